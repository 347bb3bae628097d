use crate::error::Result;
use crate::screen::{Transition, View};

use super::HostSurface;

/// Headless surface that remembers everything it was asked to show.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    current: Option<View>,
    history: Vec<(View, Transition)>,
    clears: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&View> {
        self.current.as_ref()
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current.as_ref().map(|view| view.title.as_str())
    }

    pub fn history(&self) -> &[(View, Transition)] {
        &self.history
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl HostSurface for MemorySurface {
    fn show(&mut self, view: &View, transition: Transition) -> Result<()> {
        self.current = Some(view.clone());
        self.history.push((view.clone(), transition));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.current = None;
        self.clears += 1;
        Ok(())
    }
}
