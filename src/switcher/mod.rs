//! The live controller bound to one host surface and one state.

pub mod driver;
mod factory;

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::{Result, SwitcherError};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::SwitcherMetrics;
use crate::registry::{ListenerId, PopListener};
use crate::screen::{ScreenRef, View};
use crate::state::{ScreenContext, ScreenSwitcherState};
use crate::surface::{HostSurface, NavigationRequest, SurfaceKind};

pub use factory::ScreenSwitcherFactory;

/// Configuration knobs shared by every switcher a factory creates.
#[derive(Clone)]
pub struct SwitcherConfig {
    /// Optional structured logger for navigation events.
    pub logger: Option<Logger>,
    /// Counters updated on every navigation.
    pub metrics: Option<Arc<Mutex<SwitcherMetrics>>>,
    /// Target field used for navigation log events.
    pub log_target: String,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "screen_switcher::switcher".to_string(),
            metrics_target: "screen_switcher::metrics".to_string(),
        }
    }
}

impl SwitcherConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SwitcherMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SwitcherMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Invoked once when the stack is popped past its last screen or finished.
pub trait FinishHandler {
    fn on_finish(&mut self);
}

impl<F> FinishHandler for F
where
    F: FnMut(),
{
    fn on_finish(&mut self) {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherPhase {
    /// At least one screen on the stack, top screen presented.
    Active,
    /// The finish handler is running.
    Finishing,
    /// Terminal. Every further call panics.
    Destroyed,
}

/// Result of a back-navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// A pop listener of the top screen vetoed the request.
    Intercepted,
    /// These screens were removed, topmost first.
    Popped(Vec<ScreenRef>),
    /// The last screen was popped; the switcher is destroyed.
    Finished,
}

struct ActiveView {
    screen: ScreenRef,
    view: View,
    /// Pop listeners the screen registered through its context for this view.
    listeners: Vec<ListenerId>,
}

/// A view that could not be built or shown, with whatever was built of it.
struct ViewFailure {
    error: SwitcherError,
    view: Option<View>,
}

/// Long-lived navigation controller for one host surface.
///
/// Created through [`ScreenSwitcherFactory`]. The switcher owns both the
/// surface and the [`ScreenSwitcherState`]; [`ScreenSwitcher::detach`] hands
/// them back so a new switcher can re-attach to the same stack.
///
/// # Panics
///
/// Navigation methods panic once the switcher is
/// [`Destroyed`](SwitcherPhase::Destroyed). Using a finished switcher is an
/// integration bug, not a runtime condition.
pub struct ScreenSwitcher<H: HostSurface> {
    host: H,
    state: ScreenSwitcherState,
    finish_handler: Box<dyn FinishHandler>,
    kind: SurfaceKind,
    phase: SwitcherPhase,
    active: Option<ActiveView>,
    config: SwitcherConfig,
}

impl<H: HostSurface> ScreenSwitcher<H> {
    pub(crate) fn attach(
        host: H,
        state: ScreenSwitcherState,
        finish_handler: Box<dyn FinishHandler>,
        kind: SurfaceKind,
        config: SwitcherConfig,
    ) -> Result<Self> {
        if state.screen_count() == 0 {
            return Err(SwitcherError::EmptySwitcherState);
        }

        let mut switcher = Self {
            host,
            state,
            finish_handler,
            kind,
            phase: SwitcherPhase::Active,
            active: None,
            config,
        };
        switcher.show_top()?;
        switcher.log_switcher_event(
            LogLevel::Info,
            "switcher_attached",
            [json_kv("depth", json!(switcher.state.screen_count()))],
        );
        Ok(switcher)
    }

    pub fn phase(&self) -> SwitcherPhase {
        self.phase
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == SwitcherPhase::Destroyed
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn state(&self) -> &ScreenSwitcherState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub(crate) fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn top_screen(&self) -> Option<&ScreenRef> {
        self.state.top_screen()
    }

    /// The view currently presented on the host, if any.
    pub fn active_view(&self) -> Option<&View> {
        self.active.as_ref().map(|active| &active.view)
    }

    /// Register a listener for `screen` that stays until it declines a pop or
    /// the screen leaves the stack. `None` if the screen is not on the stack.
    pub fn register_pop_listener<L>(&mut self, screen: &ScreenRef, listener: L) -> Option<ListenerId>
    where
        L: PopListener + 'static,
    {
        self.ensure_active("register_pop_listener");
        self.state.register_pop_listener(screen, listener)
    }

    /// Put `screen` on top of the stack and present it.
    ///
    /// Fails with [`SwitcherError::DuplicateScreen`] if the screen is already
    /// on the stack. If the new screen cannot be presented the push is undone
    /// and the previous top is shown again.
    pub fn push(&mut self, screen: ScreenRef) -> Result<()> {
        self.ensure_active("push");
        self.state.add_screen(screen.clone())?;

        let covered = self.active.take();
        if let Err(failure) = self.present_top() {
            screen.destroy_screen(failure.view);
            self.state.remove_screen(&screen);
            if let Some(active) = covered {
                self.host.show(&active.view, active.screen.transition())?;
                self.state.notify_visible(&active.screen);
                self.active = Some(active);
            }
            return Err(failure.error);
        }
        if let Some(covered) = covered {
            self.retire_view(covered);
        }

        self.record_metric(SwitcherMetrics::record_push);
        self.log_switcher_event(
            LogLevel::Debug,
            "screen_pushed",
            [
                json_kv("screen", json!(screen.name())),
                json_kv("depth", json!(self.state.screen_count())),
            ],
        );
        Ok(())
    }

    /// Handle a back request for the top screen.
    ///
    /// Pop listeners of the top screen are consulted first. Popping the last
    /// screen runs the finish handler and destroys the switcher.
    pub fn pop(&mut self) -> Result<PopOutcome> {
        self.ensure_active("pop");
        let Some(top) = self.state.top_screen().cloned() else {
            self.finish_stack()?;
            return Ok(PopOutcome::Finished);
        };

        if self.intercepted(&top) {
            return Ok(PopOutcome::Intercepted);
        }

        if self.state.screen_count() == 1 {
            self.finish_stack()?;
            return Ok(PopOutcome::Finished);
        }

        self.release_screen(&top);
        self.show_top()?;
        self.record_metric(|metrics| metrics.record_pop(1));
        self.log_switcher_event(
            LogLevel::Debug,
            "screen_popped",
            [
                json_kv("screen", json!(top.name())),
                json_kv("depth", json!(self.state.screen_count())),
            ],
        );
        Ok(PopOutcome::Popped(vec![top]))
    }

    /// Pop every screen above `target`, making it the top.
    ///
    /// Only the current top's pop listeners are consulted. Nothing happens
    /// when `target` is already on top.
    pub fn pop_to(&mut self, target: &ScreenRef) -> Result<PopOutcome> {
        self.ensure_active("pop_to");
        let Some(index) = self.state.index_of(target) else {
            return Err(SwitcherError::ScreenNotFound(target.name().to_string()));
        };
        let Some(top) = self.state.top_screen().cloned() else {
            return Err(SwitcherError::ScreenNotFound(target.name().to_string()));
        };
        if top == *target {
            return Ok(PopOutcome::Popped(Vec::new()));
        }

        if self.intercepted(&top) {
            return Ok(PopOutcome::Intercepted);
        }

        let removed: Vec<ScreenRef> = self.state.screens()[index + 1..]
            .iter()
            .rev()
            .cloned()
            .collect();
        for screen in &removed {
            self.release_screen(screen);
        }
        self.show_top()?;

        self.record_metric(|metrics| metrics.record_pop(removed.len()));
        self.log_switcher_event(
            LogLevel::Debug,
            "screens_popped",
            [
                json_kv("count", json!(removed.len())),
                json_kv("target", json!(target.name())),
            ],
        );
        Ok(PopOutcome::Popped(removed))
    }

    /// Swap the top screen for `screen` without consulting pop listeners.
    ///
    /// The previous top is destroyed before the replacement is presented, so
    /// a presentation failure leaves `screen` on top without a view.
    pub fn replace_top(&mut self, screen: ScreenRef) -> Result<()> {
        self.ensure_active("replace_top");
        let previous = self.state.top_screen().cloned();
        self.state.add_screen(screen.clone())?;
        if let Some(previous) = previous.as_ref() {
            self.release_screen(previous);
        }
        self.show_top()?;

        self.log_switcher_event(
            LogLevel::Debug,
            "screen_replaced",
            [
                json_kv(
                    "previous",
                    json!(previous.as_ref().map(|screen| screen.name().to_string())),
                ),
                json_kv("screen", json!(screen.name())),
            ],
        );
        Ok(())
    }

    /// Tear the whole stack down regardless of pop listeners.
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_active("finish");
        self.finish_stack()
    }

    pub fn handle_navigation(&mut self, request: NavigationRequest) -> Result<PopOutcome> {
        match request {
            NavigationRequest::Back => self.pop(),
            NavigationRequest::Finish => {
                self.finish()?;
                Ok(PopOutcome::Finished)
            }
        }
    }

    /// Clear the host and show the active view again.
    pub fn refresh(&mut self) -> Result<()> {
        self.ensure_active("refresh");
        self.host.clear()?;
        if let Some(active) = self.active.as_ref() {
            self.host.show(&active.view, active.screen.transition())?;
        }
        Ok(())
    }

    /// Release the host and the state without destroying any screen.
    ///
    /// Pop listeners registered through the presented view's context go with
    /// the view; the next switcher registers them again when it presents it.
    pub fn detach(mut self) -> Result<(H, ScreenSwitcherState)> {
        if let Some(active) = self.active.take() {
            self.retire_view(active);
            self.host.clear()?;
        }
        self.log_switcher_event(
            LogLevel::Info,
            "switcher_detached",
            [json_kv("depth", json!(self.state.screen_count()))],
        );
        Ok((self.host, self.state))
    }

    /// Log a snapshot of the navigation counters, if both a logger and
    /// metrics are configured.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let snapshot = guard.snapshot(self.state.screen_count());
                let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
            }
        }
    }

    fn show_top(&mut self) -> Result<()> {
        self.present_top().map_err(|failure| failure.error)
    }

    fn present_top(&mut self) -> std::result::Result<(), ViewFailure> {
        let Some(screen) = self.state.top_screen().cloned() else {
            return Ok(());
        };

        let active = self.build_view(&screen)?;
        if let Err(error) = self.host.show(&active.view, screen.transition()) {
            self.state
                .unregister_pop_listeners(&screen, &active.listeners);
            return Err(ViewFailure {
                error,
                view: Some(active.view),
            });
        }
        self.state.notify_visible(&screen);
        self.record_metric(SwitcherMetrics::record_view_presented);
        self.active = Some(active);
        Ok(())
    }

    /// Create and bind a view. Listeners registered by a failed build are
    /// withdrawn before returning.
    fn build_view(&mut self, screen: &ScreenRef) -> std::result::Result<ActiveView, ViewFailure> {
        let mut ctx = ScreenContext::new(screen, self.kind, &mut self.state);
        let built = match screen.create_view(&mut ctx) {
            Ok(mut view) => match screen.bind_view(&mut view, &mut ctx) {
                Ok(()) => Ok(view),
                Err(error) => Err(ViewFailure {
                    error,
                    view: Some(view),
                }),
            },
            Err(error) => Err(ViewFailure { error, view: None }),
        };
        let listeners = ctx.into_listeners();

        match built {
            Ok(view) => Ok(ActiveView {
                screen: screen.clone(),
                view,
                listeners,
            }),
            Err(failure) => {
                self.state.unregister_pop_listeners(screen, &listeners);
                Err(failure)
            }
        }
    }

    /// Drop a view whose screen stays on the stack.
    fn retire_view(&mut self, active: ActiveView) {
        self.state
            .unregister_pop_listeners(&active.screen, &active.listeners);
    }

    fn intercepted(&mut self, top: &ScreenRef) -> bool {
        if !self.state.handles_pop(top) {
            return false;
        }
        self.record_metric(SwitcherMetrics::record_intercepted_pop);
        self.log_switcher_event(
            LogLevel::Debug,
            "pop_intercepted",
            [json_kv("screen", json!(top.name()))],
        );
        true
    }

    /// Hand the screen its view back and drop it from the stack.
    fn release_screen(&mut self, screen: &ScreenRef) {
        let view = match self.active.take() {
            Some(active) if active.screen == *screen => Some(active.view),
            other => {
                self.active = other;
                None
            }
        };
        screen.destroy_screen(view);
        self.state.remove_screen(screen);
    }

    fn finish_stack(&mut self) -> Result<()> {
        self.phase = SwitcherPhase::Finishing;
        self.log_switcher_event(
            LogLevel::Info,
            "switcher_finishing",
            [json_kv("depth", json!(self.state.screen_count()))],
        );
        self.finish_handler.on_finish();

        while let Some(screen) = self.state.top_screen().cloned() {
            self.release_screen(&screen);
        }
        let cleared = self.host.clear();

        self.phase = SwitcherPhase::Destroyed;
        self.record_metric(SwitcherMetrics::record_finish);
        self.log_switcher_event(LogLevel::Info, "switcher_destroyed", std::iter::empty());
        cleared
    }

    fn ensure_active(&self, operation: &str) {
        assert!(
            self.phase == SwitcherPhase::Active,
            "ScreenSwitcher::{operation} called on a {:?} switcher",
            self.phase
        );
    }

    fn record_metric(&self, record: impl FnOnce(&mut SwitcherMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log_switcher_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let fields = std::iter::once(json_kv("surface", json!(self.kind.as_str())))
                .chain(fields);
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
