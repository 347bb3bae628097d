use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use crate::error::Result;
use crate::state::ScreenContext;

/// How a host should bring a screen's view in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Cut,
    Slide,
    Fade,
}

/// Rendered output of a screen, handed to the host surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub title: String,
    pub body: String,
}

impl View {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Capability implemented by every navigable screen.
///
/// The switcher only talks to screens through this trait: it asks for a view
/// when the screen reaches the top of the stack, binds it, and hands it back
/// through [`Screen::destroy_screen`] once the screen leaves the stack.
/// Covered screens lose their view and get a fresh one when uncovered.
pub trait Screen {
    fn name(&self) -> &str {
        "screen"
    }

    fn create_view(&self, ctx: &mut ScreenContext<'_>) -> Result<View>;

    fn bind_view(&self, _view: &mut View, _ctx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once as the screen leaves the stack, before its component is
    /// released. `view` is `None` when the screen was covered at the time.
    fn destroy_screen(&self, _view: Option<View>) {}

    fn transition(&self) -> Transition {
        Transition::default()
    }
}

/// Identity handle for a screen on the stack.
///
/// Equality and hashing use the address of the shared allocation, so two
/// handles are equal only when one was cloned from the other. Screens with
/// identical content are still distinct entries.
#[derive(Clone)]
pub struct ScreenRef {
    inner: Rc<dyn Screen>,
}

impl ScreenRef {
    pub fn new<S>(screen: S) -> Self
    where
        S: Screen + 'static,
    {
        Self {
            inner: Rc::new(screen),
        }
    }

    pub fn from_rc(inner: Rc<dyn Screen>) -> Self {
        Self { inner }
    }

    pub fn ptr_eq(&self, other: &ScreenRef) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

impl Deref for ScreenRef {
    type Target = dyn Screen;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl PartialEq for ScreenRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ScreenRef {}

impl Hash for ScreenRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ScreenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenRef")
            .field("name", &self.inner.name())
            .field("addr", &format_args!("{:#x}", self.addr()))
            .finish()
    }
}
