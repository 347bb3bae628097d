//! Stack-based screen navigation for a single host surface.
//!
//! A [`ScreenSwitcherState`] holds the ordered stack of screens together with
//! their pop listeners. A [`ScreenSwitcher`] attaches that state to a
//! [`HostSurface`], presents the top screen, and routes back/finish requests
//! through the listeners before unwinding the stack. Switchers are built by
//! [`ScreenSwitcherFactory`]; terminal hosts can be driven end to end by
//! [`TerminalDriver`].

pub mod components;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod screen;
pub mod state;
pub mod surface;
pub mod switcher;

#[cfg(test)]
mod test_support;

pub use components::{
    Component, ComponentFactory, ComponentStore, LeakWatcher, LoggingLeakWatcher, NullLeakWatcher,
    SCREEN_REMOVED_DESCRIPTION,
};
pub use error::{Result, SwitcherError};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{MetricSnapshot, SwitcherMetrics};
pub use registry::{ListenerId, ListenerState, PopListener, PopListenerRegistry, ScreenList};
pub use screen::{Screen, ScreenRef, Transition, View};
pub use state::{NullLifecycleListener, ScreenContext, ScreenLifecycleListener, ScreenSwitcherState};
pub use surface::{
    HostSurface, MemorySurface, NavigationKeymap, NavigationRequest, SurfaceKind,
    TerminalSettings, TerminalSurface, display_width,
};
pub use switcher::driver::{DriverError, DriverResult, TerminalDriver, UnhandledEventHook};
pub use switcher::{
    FinishHandler, PopOutcome, ScreenSwitcher, ScreenSwitcherFactory, SwitcherConfig,
    SwitcherPhase,
};
