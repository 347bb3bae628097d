use std::any::Any;

use crate::registry::{ListenerId, PopListener};
use crate::screen::ScreenRef;
use crate::surface::SurfaceKind;

use super::ScreenSwitcherState;

/// Handed to a screen while its view is created and bound.
///
/// It gives the screen its own identity, read access to the stack and a way
/// to register pop listeners against itself, without letting it reorder the
/// stack underneath the switcher.
pub struct ScreenContext<'a> {
    screen: &'a ScreenRef,
    surface: SurfaceKind,
    state: &'a mut ScreenSwitcherState,
    listeners: Vec<ListenerId>,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        screen: &'a ScreenRef,
        surface: SurfaceKind,
        state: &'a mut ScreenSwitcherState,
    ) -> Self {
        Self {
            screen,
            surface,
            state,
            listeners: Vec::new(),
        }
    }

    pub fn screen(&self) -> &ScreenRef {
        self.screen
    }

    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }

    pub fn state(&self) -> &ScreenSwitcherState {
        &*self.state
    }

    /// Zero-based position of this screen in the stack.
    pub fn depth(&self) -> Option<usize> {
        self.state.index_of(self.screen)
    }

    /// Register a pop listener that lives as long as the view being built.
    /// It is withdrawn when the screen is covered and its view dropped, so a
    /// screen that registers here gets a fresh guard each time it is shown.
    pub fn register_pop_listener<L>(&mut self, listener: L)
    where
        L: PopListener + 'static,
    {
        if let Some(id) = self.state.register_pop_listener(self.screen, listener) {
            self.listeners.push(id);
        }
    }

    /// The component created for this screen by the state's lifecycle listener.
    pub fn component<T: Any>(&self) -> Option<&T> {
        self.state
            .lifecycle_listener()
            .component(self.screen)
            .and_then(|component| component.downcast_ref::<T>())
    }

    pub(crate) fn into_listeners(self) -> Vec<ListenerId> {
        self.listeners
    }
}
