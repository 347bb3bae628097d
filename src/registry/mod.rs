//! Bookkeeping that backs a [`ScreenSwitcherState`](crate::ScreenSwitcherState):
//! the ordered screen list and the per-screen pop listeners.

mod pop_listeners;
mod screens;

pub use pop_listeners::{ListenerId, ListenerState, PopListener, PopListenerRegistry};
pub use screens::ScreenList;
