use std::slice;

use crate::error::{Result, SwitcherError};
use crate::screen::ScreenRef;

/// Ordered, duplicate-free list of screens. Index 0 is the bottom of the stack.
#[derive(Debug, Default, Clone)]
pub struct ScreenList {
    screens: Vec<ScreenRef>,
}

impl ScreenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from an initial sequence, rejecting empty input and
    /// repeated identities. The sequence is copied.
    pub fn from_screens<I>(screens: I) -> Result<Self>
    where
        I: IntoIterator<Item = ScreenRef>,
    {
        let iter = screens.into_iter();
        let mut list = Self {
            screens: Vec::with_capacity(iter.size_hint().0),
        };
        for screen in iter {
            list.push(screen)?;
        }
        if list.is_empty() {
            return Err(SwitcherError::EmptyScreenSet);
        }
        Ok(list)
    }

    pub fn push(&mut self, screen: ScreenRef) -> Result<()> {
        if self.contains(&screen) {
            return Err(SwitcherError::DuplicateScreen);
        }
        self.screens.push(screen);
        Ok(())
    }

    /// Remove `screen`, returning the handle that was stored if it was present.
    pub fn remove(&mut self, screen: &ScreenRef) -> Option<ScreenRef> {
        let index = self.index_of(screen)?;
        Some(self.screens.remove(index))
    }

    pub fn index_of(&self, screen: &ScreenRef) -> Option<usize> {
        self.screens.iter().position(|entry| entry == screen)
    }

    pub fn contains(&self, screen: &ScreenRef) -> bool {
        self.index_of(screen).is_some()
    }

    pub fn top(&self) -> Option<&ScreenRef> {
        self.screens.last()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn as_slice(&self) -> &[ScreenRef] {
        &self.screens
    }

    pub fn iter(&self) -> slice::Iter<'_, ScreenRef> {
        self.screens.iter()
    }
}

impl<'a> IntoIterator for &'a ScreenList {
    type Item = &'a ScreenRef;
    type IntoIter = slice::Iter<'a, ScreenRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{Screen, View};
    use crate::state::ScreenContext;

    struct Plain;

    impl Screen for Plain {
        fn create_view(&self, _ctx: &mut ScreenContext<'_>) -> Result<View> {
            Ok(View::default())
        }
    }

    fn screen() -> ScreenRef {
        ScreenRef::new(Plain)
    }

    #[test]
    fn rejects_empty_input() {
        let err = ScreenList::from_screens(Vec::new()).unwrap_err();
        assert!(matches!(err, SwitcherError::EmptyScreenSet));
    }

    #[test]
    fn rejects_repeated_identity() {
        let a = screen();
        let err = ScreenList::from_screens(vec![a.clone(), a]).unwrap_err();
        assert!(matches!(err, SwitcherError::DuplicateScreen));
    }

    #[test]
    fn remove_returns_stored_handle() {
        let a = screen();
        let b = screen();
        let mut list = ScreenList::from_screens(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(list.remove(&a), Some(a.clone()));
        assert_eq!(list.remove(&a), None);
        assert_eq!(list.top(), Some(&b));
        assert_eq!(list.len(), 1);
    }
}
