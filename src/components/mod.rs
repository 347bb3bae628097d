//! Per-screen component scoping, wired into the stack lifecycle.
//!
//! The crate does not build dependency graphs. A [`ComponentFactory`] hands
//! back an opaque component for each screen that joins the stack, and
//! [`ComponentStore`] keeps it alive until the screen leaves, at which point
//! the factory tears it down and a [`LeakWatcher`] is told to keep an eye on
//! the screen.

use std::any::Any;
use std::collections::HashMap;

use serde_json::json;

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::screen::ScreenRef;
use crate::state::ScreenLifecycleListener;

pub type Component = Box<dyn Any>;

/// Description attached to every leak-watch request for a removed screen.
pub const SCREEN_REMOVED_DESCRIPTION: &str = "screen has been removed";

pub trait ComponentFactory {
    fn create_component(&self, screen: &ScreenRef) -> Component;

    fn destroy_component(&self, _screen: &ScreenRef, _component: Component) {}
}

impl<F> ComponentFactory for F
where
    F: Fn(&ScreenRef) -> Component,
{
    fn create_component(&self, screen: &ScreenRef) -> Component {
        self(screen)
    }
}

/// Fire-and-forget notification that a destroyed screen should be collectable.
pub trait LeakWatcher {
    fn watch(&self, screen: &ScreenRef, description: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullLeakWatcher;

impl LeakWatcher for NullLeakWatcher {
    fn watch(&self, _screen: &ScreenRef, _description: &str) {}
}

/// Writes watch requests to the structured log.
#[derive(Clone)]
pub struct LoggingLeakWatcher {
    logger: Logger,
}

impl LoggingLeakWatcher {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl LeakWatcher for LoggingLeakWatcher {
    fn watch(&self, screen: &ScreenRef, description: &str) {
        let event = event_with_fields(
            LogLevel::Debug,
            "screen_switcher::leak_watch",
            "watch_requested",
            [
                json_kv("screen", json!(screen.name())),
                json_kv("description", json!(description)),
            ],
        );
        let _ = self.logger.log_event(event);
    }
}

/// Lifecycle listener owning one component per screen on the stack.
pub struct ComponentStore<F> {
    factory: F,
    leak_watcher: Box<dyn LeakWatcher>,
    components: HashMap<ScreenRef, Component>,
}

impl<F> ComponentStore<F>
where
    F: ComponentFactory,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            leak_watcher: Box::new(NullLeakWatcher),
            components: HashMap::new(),
        }
    }

    pub fn with_leak_watcher<W>(mut self, watcher: W) -> Self
    where
        W: LeakWatcher + 'static,
    {
        self.leak_watcher = Box::new(watcher);
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<F> ScreenLifecycleListener for ComponentStore<F>
where
    F: ComponentFactory,
{
    fn on_screen_added(&mut self, screen: &ScreenRef) {
        let component = self.factory.create_component(screen);
        self.components.insert(screen.clone(), component);
    }

    fn on_screen_removed(&mut self, screen: &ScreenRef) {
        if let Some(component) = self.components.remove(screen) {
            self.factory.destroy_component(screen, component);
        }
        self.leak_watcher.watch(screen, SCREEN_REMOVED_DESCRIPTION);
    }

    fn component(&self, screen: &ScreenRef) -> Option<&dyn Any> {
        self.components.get(screen).map(|component| component.as_ref())
    }
}
