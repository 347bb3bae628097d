//! The mutable source of truth for one navigation surface.

mod context;
mod lifecycle;

use std::fmt;

use crate::error::Result;
use crate::registry::{ListenerId, PopListener, PopListenerRegistry, ScreenList};
use crate::screen::ScreenRef;

pub use context::ScreenContext;
pub use lifecycle::{NullLifecycleListener, ScreenLifecycleListener};

/// Which screens exist, in what order, and who intercepts pop for each.
///
/// The state outlives any single [`ScreenSwitcher`](crate::ScreenSwitcher):
/// detaching a switcher hands it back so a new one can pick up the same stack.
pub struct ScreenSwitcherState {
    lifecycle: Box<dyn ScreenLifecycleListener>,
    screens: ScreenList,
    pop_listeners: PopListenerRegistry,
}

impl ScreenSwitcherState {
    /// Build a state from the initial stack, bottom first.
    ///
    /// Fails with [`SwitcherError::EmptyScreenSet`](crate::SwitcherError::EmptyScreenSet)
    /// when `screens` is empty and with
    /// [`SwitcherError::DuplicateScreen`](crate::SwitcherError::DuplicateScreen)
    /// when the same screen appears twice.
    pub fn new<I>(screens: I) -> Result<Self>
    where
        I: IntoIterator<Item = ScreenRef>,
    {
        Self::with_lifecycle_listener(NullLifecycleListener, screens)
    }

    pub fn with_lifecycle_listener<L, I>(listener: L, screens: I) -> Result<Self>
    where
        L: ScreenLifecycleListener + 'static,
        I: IntoIterator<Item = ScreenRef>,
    {
        let screens = ScreenList::from_screens(screens)?;
        let mut lifecycle: Box<dyn ScreenLifecycleListener> = Box::new(listener);
        for screen in &screens {
            lifecycle.on_screen_added(screen);
        }
        Ok(Self {
            lifecycle,
            screens,
            pop_listeners: PopListenerRegistry::new(),
        })
    }

    /// Register a listener consulted before `screen` is popped. Listeners are
    /// dropped automatically when the screen leaves the stack.
    ///
    /// Screens that are not on the stack get nothing registered: the listener
    /// is dropped and `None` is returned.
    pub fn register_pop_listener<L>(&mut self, screen: &ScreenRef, listener: L) -> Option<ListenerId>
    where
        L: PopListener + 'static,
    {
        if !self.screens.contains(screen) {
            return None;
        }
        Some(self.pop_listeners.register(screen, Box::new(listener)))
    }

    /// Withdraw specific registrations of `screen` that have not been consumed.
    pub fn unregister_pop_listeners(&mut self, screen: &ScreenRef, ids: &[ListenerId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        self.pop_listeners.unregister(screen, ids)
    }

    pub fn index_of(&self, screen: &ScreenRef) -> Option<usize> {
        self.screens.index_of(screen)
    }

    pub fn contains(&self, screen: &ScreenRef) -> bool {
        self.screens.contains(screen)
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    pub fn screens(&self) -> &[ScreenRef] {
        self.screens.as_slice()
    }

    pub fn top_screen(&self) -> Option<&ScreenRef> {
        self.screens.top()
    }

    pub fn pop_listener_count(&self, screen: &ScreenRef) -> usize {
        self.pop_listeners.listener_count(screen)
    }

    pub fn add_screen(&mut self, screen: ScreenRef) -> Result<()> {
        self.screens.push(screen.clone())?;
        self.lifecycle.on_screen_added(&screen);
        Ok(())
    }

    /// Remove `screen` and its pop listeners. Returns `false` if it was not on
    /// the stack.
    pub fn remove_screen(&mut self, screen: &ScreenRef) -> bool {
        let Some(removed) = self.screens.remove(screen) else {
            return false;
        };
        self.pop_listeners.discard(&removed);
        self.lifecycle.on_screen_removed(&removed);
        true
    }

    /// Whether a listener of `screen` vetoes popping it. Declining listeners
    /// are unregistered as they answer.
    pub fn handles_pop(&mut self, screen: &ScreenRef) -> bool {
        self.pop_listeners.handles_pop(screen)
    }

    pub fn lifecycle_listener(&self) -> &dyn ScreenLifecycleListener {
        self.lifecycle.as_ref()
    }

    pub(crate) fn notify_visible(&mut self, screen: &ScreenRef) {
        self.lifecycle.on_screen_becomes_visible(screen);
    }
}

impl fmt::Debug for ScreenSwitcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenSwitcherState")
            .field("screens", &self.screens)
            .field("has_pop_listeners", &!self.pop_listeners.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwitcherError;
    use crate::test_support::{RecordingLifecycle, screen};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn constructor_copies_the_screens_passed_in() {
        let mut passed = vec![screen("first")];
        let mut state = ScreenSwitcherState::new(passed.clone()).unwrap();

        state.add_screen(screen("second")).unwrap();
        assert_eq!(passed.len(), 1);
        assert_eq!(state.screen_count(), 2);

        passed.push(screen("third"));
        assert_eq!(state.screen_count(), 2);
        assert_eq!(state.screens()[0], passed[0]);
    }

    #[test]
    fn constructor_preserves_order() {
        let screens = vec![screen("a"), screen("b"), screen("c")];
        let state = ScreenSwitcherState::new(screens.clone()).unwrap();
        assert_eq!(state.screens(), screens.as_slice());
        assert_eq!(state.top_screen(), Some(&screens[2]));
    }

    #[test]
    fn constructor_does_not_allow_empty_screens() {
        let err = ScreenSwitcherState::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SwitcherError::EmptyScreenSet));
        assert_eq!(err.to_string(), "screens must contain at least one screen");
    }

    #[test]
    fn constructor_rejects_duplicate_screens() {
        let shared = screen("shared");
        let err = ScreenSwitcherState::new(vec![shared.clone(), shared]).unwrap_err();
        assert!(matches!(err, SwitcherError::DuplicateScreen));
        assert_eq!(err.to_string(), "screen already exists");
    }

    #[test]
    fn handles_pop_is_false_without_listeners() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        assert!(!state.handles_pop(&only));
    }

    #[test]
    fn handles_pop_is_false_when_listener_declines() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        state.register_pop_listener(&only, |_: &ScreenRef| false);
        assert!(!state.handles_pop(&only));
    }

    #[test]
    fn handles_pop_is_true_when_listener_intercepts() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        state.register_pop_listener(&only, |_: &ScreenRef| true);
        assert!(state.handles_pop(&only));
    }

    #[test]
    fn handles_pop_ignores_listeners_of_other_screens() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        state.register_pop_listener(&only, |_: &ScreenRef| true);
        assert!(!state.handles_pop(&screen("stranger")));
        assert_eq!(state.pop_listener_count(&only), 1);
    }

    #[test]
    fn handles_pop_removes_listener_that_declines() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.register_pop_listener(&only, move |_: &ScreenRef| {
            counter.set(counter.get() + 1);
            false
        });

        assert!(!state.handles_pop(&only));
        assert!(!state.handles_pop(&only));
        assert_eq!(calls.get(), 1);
        assert_eq!(state.pop_listener_count(&only), 0);
    }

    #[test]
    fn handles_pop_keeps_listener_that_intercepts() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.register_pop_listener(&only, move |_: &ScreenRef| {
            counter.set(counter.get() + 1);
            true
        });

        for _ in 0..3 {
            assert!(state.handles_pop(&only));
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn listeners_receive_the_screen_being_popped() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let slot = seen.clone();
        state.register_pop_listener(&only, move |popped: &ScreenRef| {
            *slot.borrow_mut() = Some(popped.clone());
            false
        });
        state.handles_pop(&only);
        assert_eq!(seen.borrow().as_ref(), Some(&only));
    }

    #[test]
    fn listeners_for_absent_screens_are_not_kept() {
        let mut state = ScreenSwitcherState::new(vec![screen("root")]).unwrap();
        let later = screen("later");
        assert_eq!(state.register_pop_listener(&later, |_: &ScreenRef| true), None);

        state.add_screen(later.clone()).unwrap();
        assert_eq!(state.pop_listener_count(&later), 0);
        assert!(!state.handles_pop(&later));
    }

    #[test]
    fn unregister_withdraws_a_single_registration() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        let first = state
            .register_pop_listener(&only, |_: &ScreenRef| true)
            .unwrap();
        state.register_pop_listener(&only, |_: &ScreenRef| false);

        assert_eq!(state.unregister_pop_listeners(&only, &[first]), 1);
        assert_eq!(state.pop_listener_count(&only), 1);
        assert!(!state.handles_pop(&only));
    }

    #[test]
    fn add_screen_rejects_duplicate_screen() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        let err = state.add_screen(only).unwrap_err();
        assert!(matches!(err, SwitcherError::DuplicateScreen));
        assert_eq!(state.screen_count(), 1);
    }

    #[test]
    fn add_screen_does_not_touch_pop_listeners() {
        let first = screen("first");
        let mut state = ScreenSwitcherState::new(vec![first.clone()]).unwrap();
        state.register_pop_listener(&first, |_: &ScreenRef| true);
        state.add_screen(screen("second")).unwrap();
        assert_eq!(state.pop_listener_count(&first), 1);
    }

    #[test]
    fn index_of_is_none_for_unknown_screen() {
        let state = ScreenSwitcherState::new(vec![screen("only")]).unwrap();
        assert_eq!(state.index_of(&screen("stranger")), None);
    }

    #[test]
    fn index_of_returns_position_of_existing_screens() {
        let screens = vec![screen("zero"), screen("one"), screen("two")];
        let state = ScreenSwitcherState::new(screens.clone()).unwrap();
        for (expected, entry) in screens.iter().enumerate() {
            assert_eq!(state.index_of(entry), Some(expected));
        }
    }

    #[test]
    fn screen_count_tracks_additions() {
        let mut state = ScreenSwitcherState::new(vec![screen("a"), screen("b")]).unwrap();
        assert_eq!(state.screen_count(), 2);
        state.add_screen(screen("c")).unwrap();
        assert_eq!(state.screen_count(), 3);
    }

    #[test]
    fn remove_screen_discards_its_listeners() {
        let first = screen("first");
        let second = screen("second");
        let mut state = ScreenSwitcherState::new(vec![first, second.clone()]).unwrap();
        state.register_pop_listener(&second, |_: &ScreenRef| true);

        assert!(state.remove_screen(&second));
        assert_eq!(state.pop_listener_count(&second), 0);
        assert!(!state.remove_screen(&second));

        // Re-adding the same identity starts without listeners.
        state.add_screen(second.clone()).unwrap();
        assert!(!state.handles_pop(&second));
    }

    #[test]
    fn removing_the_sole_screen_leaves_an_empty_state() {
        let only = screen("only");
        let mut state = ScreenSwitcherState::new(vec![only.clone()]).unwrap();
        assert!(state.remove_screen(&only));
        assert_eq!(state.screen_count(), 0);
        assert!(state.top_screen().is_none());
    }

    #[test]
    fn lifecycle_listener_sees_membership_changes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = screen("first");
        let mut state = ScreenSwitcherState::with_lifecycle_listener(
            RecordingLifecycle::new(log.clone()),
            vec![first.clone()],
        )
        .unwrap();
        let second = screen("second");
        state.add_screen(second.clone()).unwrap();
        state.remove_screen(&second);
        state.remove_screen(&second);

        assert_eq!(
            *log.borrow(),
            vec!["added:first", "added:second", "removed:second"]
        );
    }

    #[test]
    fn failed_construction_notifies_nobody() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = screen("shared");
        let result = ScreenSwitcherState::with_lifecycle_listener(
            RecordingLifecycle::new(log.clone()),
            vec![shared.clone(), shared],
        );
        assert!(result.is_err());
        assert!(log.borrow().is_empty());
    }
}
