use std::any::Any;

use crate::screen::ScreenRef;

/// Observer of stack membership and visibility.
///
/// Implementations are owned by the [`ScreenSwitcherState`](crate::ScreenSwitcherState)
/// and called synchronously from inside the mutating operation.
pub trait ScreenLifecycleListener {
    fn on_screen_added(&mut self, _screen: &ScreenRef) {}

    fn on_screen_becomes_visible(&mut self, _screen: &ScreenRef) {}

    fn on_screen_removed(&mut self, _screen: &ScreenRef) {}

    /// Per-screen component owned by this listener, if it keeps any.
    fn component(&self, _screen: &ScreenRef) -> Option<&dyn Any> {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullLifecycleListener;

impl ScreenLifecycleListener for NullLifecycleListener {}
