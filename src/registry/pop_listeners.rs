use std::collections::HashMap;

use crate::screen::ScreenRef;

/// Interceptor consulted before a screen is popped.
///
/// Returning `true` vetoes the pop and keeps the listener registered, so it is
/// asked again next time. Returning `false` lets the pop through and
/// unregisters the listener.
pub trait PopListener {
    fn on_screen_pop(&mut self, screen: &ScreenRef) -> bool;
}

impl<F> PopListener for F
where
    F: FnMut(&ScreenRef) -> bool,
{
    fn on_screen_pop(&mut self, screen: &ScreenRef) -> bool {
        self(screen)
    }
}

/// Lifecycle of a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Will be consulted on the next pop attempt.
    Armed,
    /// Answered `false`; removed before the current consultation returns.
    Consumed,
}

/// Handle for one registration, used to withdraw it before it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    listener: Box<dyn PopListener>,
    state: ListenerState,
}

impl Registration {
    fn consult(&mut self, screen: &ScreenRef) -> bool {
        if self.listener.on_screen_pop(screen) {
            return true;
        }
        self.state = ListenerState::Consumed;
        false
    }

    fn is_armed(&self) -> bool {
        self.state == ListenerState::Armed
    }
}

/// Per-screen ordered pop listeners.
#[derive(Default)]
pub struct PopListenerRegistry {
    entries: HashMap<ScreenRef, Vec<Registration>>,
    next_id: u64,
}

impl PopListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, screen: &ScreenRef, listener: Box<dyn PopListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries
            .entry(screen.clone())
            .or_default()
            .push(Registration {
                id,
                listener,
                state: ListenerState::Armed,
            });
        id
    }

    /// Withdraw the given registrations of `screen`. Ids that were already
    /// consumed or discarded are skipped. Returns how many were removed.
    pub fn unregister(&mut self, screen: &ScreenRef, ids: &[ListenerId]) -> usize {
        let Some(registrations) = self.entries.get_mut(screen) else {
            return 0;
        };
        let before = registrations.len();
        registrations.retain(|registration| !ids.contains(&registration.id));
        let removed = before - registrations.len();
        if registrations.is_empty() {
            self.entries.remove(screen);
        }
        removed
    }

    /// Ask the listeners of `screen`, in registration order, whether they veto
    /// the pop. The first veto ends the round; everything consulted before it
    /// that declined is dropped.
    pub fn handles_pop(&mut self, screen: &ScreenRef) -> bool {
        let Some(registrations) = self.entries.get_mut(screen) else {
            return false;
        };

        let mut handled = false;
        for registration in registrations.iter_mut() {
            if !registration.is_armed() {
                continue;
            }
            if registration.consult(screen) {
                handled = true;
                break;
            }
        }

        registrations.retain(Registration::is_armed);
        if registrations.is_empty() {
            self.entries.remove(screen);
        }
        handled
    }

    /// Drop every listener registered for `screen`.
    pub fn discard(&mut self, screen: &ScreenRef) -> usize {
        self.entries
            .remove(screen)
            .map(|registrations| registrations.len())
            .unwrap_or(0)
    }

    pub fn listener_count(&self, screen: &ScreenRef) -> usize {
        self.entries
            .get(screen)
            .map(|registrations| registrations.iter().filter(|r| r.is_armed()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
