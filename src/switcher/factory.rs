use crate::error::Result;
use crate::state::ScreenSwitcherState;
use crate::surface::{HostSurface, SurfaceKind};

use super::{FinishHandler, ScreenSwitcher, SwitcherConfig};

/// Validates a [`ScreenSwitcherState`] and binds it to a host surface.
///
/// Both entry points reject a state without screens with
/// [`SwitcherError::EmptySwitcherState`](crate::SwitcherError::EmptySwitcherState)
/// and otherwise behave identically; they only record what finishing means
/// for the surface.
#[derive(Clone, Default)]
pub struct ScreenSwitcherFactory {
    config: SwitcherConfig,
}

impl ScreenSwitcherFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SwitcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SwitcherConfig {
        &mut self.config
    }

    /// Switcher for a whole application window. `finish_handler` should close
    /// the application.
    pub fn application_switcher<H, F>(
        &self,
        host: H,
        state: ScreenSwitcherState,
        finish_handler: F,
    ) -> Result<ScreenSwitcher<H>>
    where
        H: HostSurface,
        F: FinishHandler + 'static,
    {
        self.create(host, state, finish_handler, SurfaceKind::Application)
    }

    /// Switcher for a region embedded in a larger component. `finish_handler`
    /// should hand control back to the container.
    pub fn embedded_switcher<H, F>(
        &self,
        host: H,
        state: ScreenSwitcherState,
        finish_handler: F,
    ) -> Result<ScreenSwitcher<H>>
    where
        H: HostSurface,
        F: FinishHandler + 'static,
    {
        self.create(host, state, finish_handler, SurfaceKind::Embedded)
    }

    fn create<H, F>(
        &self,
        host: H,
        state: ScreenSwitcherState,
        finish_handler: F,
        kind: SurfaceKind,
    ) -> Result<ScreenSwitcher<H>>
    where
        H: HostSurface,
        F: FinishHandler + 'static,
    {
        ScreenSwitcher::attach(
            host,
            state,
            Box::new(finish_handler),
            kind,
            self.config.clone(),
        )
    }
}
