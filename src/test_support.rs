//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, SwitcherError};
use crate::screen::{Screen, ScreenRef, View};
use crate::state::{ScreenContext, ScreenLifecycleListener};

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Screen that records every lifecycle call into a shared log.
pub(crate) struct RecordingScreen {
    name: String,
    log: EventLog,
    fail_view: bool,
    fail_bind: bool,
}

impl Screen for RecordingScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_view(&self, _ctx: &mut ScreenContext<'_>) -> Result<View> {
        self.log.borrow_mut().push(format!("create:{}", self.name));
        if self.fail_view {
            return Err(SwitcherError::view(format!("{} cannot render", self.name)));
        }
        Ok(View::new(self.name.clone(), format!("{} body", self.name)))
    }

    fn bind_view(&self, _view: &mut View, _ctx: &mut ScreenContext<'_>) -> Result<()> {
        self.log.borrow_mut().push(format!("bind:{}", self.name));
        if self.fail_bind {
            return Err(SwitcherError::view(format!("{} cannot bind", self.name)));
        }
        Ok(())
    }

    fn destroy_screen(&self, view: Option<View>) {
        let suffix = if view.is_some() { "" } else { " (no view)" };
        self.log
            .borrow_mut()
            .push(format!("destroy:{}{}", self.name, suffix));
    }
}

pub(crate) fn screen(name: &str) -> ScreenRef {
    recording(name, &event_log())
}

pub(crate) fn recording(name: &str, log: &EventLog) -> ScreenRef {
    ScreenRef::new(RecordingScreen {
        name: name.to_string(),
        log: log.clone(),
        fail_view: false,
        fail_bind: false,
    })
}

pub(crate) fn failing(name: &str, log: &EventLog) -> ScreenRef {
    ScreenRef::new(RecordingScreen {
        name: name.to_string(),
        log: log.clone(),
        fail_view: true,
        fail_bind: false,
    })
}

pub(crate) fn failing_bind(name: &str, log: &EventLog) -> ScreenRef {
    ScreenRef::new(RecordingScreen {
        name: name.to_string(),
        log: log.clone(),
        fail_view: false,
        fail_bind: true,
    })
}

/// Lifecycle listener writing `added:`, `visible:` and `removed:` entries.
pub(crate) struct RecordingLifecycle {
    log: EventLog,
}

impl RecordingLifecycle {
    pub(crate) fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl ScreenLifecycleListener for RecordingLifecycle {
    fn on_screen_added(&mut self, screen: &ScreenRef) {
        self.log.borrow_mut().push(format!("added:{}", screen.name()));
    }

    fn on_screen_becomes_visible(&mut self, screen: &ScreenRef) {
        self.log
            .borrow_mut()
            .push(format!("visible:{}", screen.name()));
    }

    fn on_screen_removed(&mut self, screen: &ScreenRef) {
        self.log
            .borrow_mut()
            .push(format!("removed:{}", screen.name()));
    }
}
