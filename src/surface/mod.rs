//! Host surfaces a switcher presents screens into.

mod input;
mod memory;
mod terminal;
mod width;

use serde::Serialize;

use crate::error::Result;
use crate::screen::{Transition, View};

pub use input::{NavigationKeymap, NavigationRequest};
pub use memory::MemorySurface;
pub use terminal::{TerminalSettings, TerminalSurface};
pub use width::display_width;

/// What finishing the stack means for the surface a switcher is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// The whole application window; finishing closes the application.
    Application,
    /// A region inside a larger component; finishing hands control back to it.
    Embedded,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Application => "application",
            SurfaceKind::Embedded => "embedded",
        }
    }
}

/// Destination for the view of the screen on top of the stack.
pub trait HostSurface {
    /// Replace whatever is shown with `view`.
    fn show(&mut self, view: &View, transition: Transition) -> Result<()>;

    /// Remove the current view, leaving the surface blank.
    fn clear(&mut self) -> Result<()>;
}

impl<H> HostSurface for &mut H
where
    H: HostSurface + ?Sized,
{
    fn show(&mut self, view: &View, transition: Transition) -> Result<()> {
        (**self).show(view, transition)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
