use thiserror::Error;

/// Unified result type for the screen switcher crate.
pub type Result<T> = std::result::Result<T, SwitcherError>;

/// Errors surfaced while building or driving a screen stack.
///
/// The first three variants are integration mistakes: the call that triggers
/// them is rejected and the stack is left exactly as it was.
#[derive(Debug, Error)]
pub enum SwitcherError {
    #[error("screens must contain at least one screen")]
    EmptyScreenSet,
    #[error("state needs screens in order to initialize a ScreenSwitcher")]
    EmptySwitcherState,
    #[error("screen already exists")]
    DuplicateScreen,
    #[error("screen `{0}` is not on the stack")]
    ScreenNotFound(String),
    #[error("view error: {0}")]
    View(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SwitcherError {
    /// Convenience constructor for screens reporting a view failure.
    pub fn view(reason: impl Into<String>) -> Self {
        Self::View(reason.into())
    }
}
