use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::error::{Result, SwitcherError};
use crate::surface::{NavigationKeymap, TerminalSurface};

use super::{PopOutcome, ScreenSwitcher};

pub type DriverResult<T> = std::result::Result<T, DriverError>;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("switcher error: {0}")]
    Switcher(#[from] SwitcherError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

type TerminalSwitcher<W> = ScreenSwitcher<TerminalSurface<W>>;

/// Callback for input the keymap does not translate into navigation.
pub type UnhandledEventHook<W> = Box<dyn FnMut(&mut TerminalSwitcher<W>, &Event) -> Result<()>>;

/// Runs a terminal-hosted switcher: raw mode, alternate screen, and an event
/// loop feeding back/finish requests until the stack is finished.
pub struct TerminalDriver<W: Write> {
    switcher: TerminalSwitcher<W>,
    keymap: NavigationKeymap,
    on_unhandled: Option<UnhandledEventHook<W>>,
}

impl<W: Write> TerminalDriver<W> {
    pub fn new(switcher: TerminalSwitcher<W>) -> Self {
        Self {
            switcher,
            keymap: NavigationKeymap::default(),
            on_unhandled: None,
        }
    }

    pub fn with_keymap(mut self, keymap: NavigationKeymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn on_unhandled<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut TerminalSwitcher<W>, &Event) -> Result<()> + 'static,
    {
        self.on_unhandled = Some(Box::new(hook));
        self
    }

    pub fn switcher(&self) -> &TerminalSwitcher<W> {
        &self.switcher
    }

    pub fn switcher_mut(&mut self) -> &mut TerminalSwitcher<W> {
        &mut self.switcher
    }

    /// Take over the terminal until the switcher finishes. The terminal is
    /// restored even when the loop fails.
    pub fn run(mut self) -> DriverResult<()> {
        self.enter()?;
        let result = self.run_inner();
        self.exit();
        result
    }

    /// Feed a fixed list of events without touching terminal modes.
    pub fn run_scripted<I>(&mut self, events: I) -> DriverResult<()>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            if self.switcher.is_destroyed() {
                break;
            }
            self.dispatch(&event)?;
        }
        Ok(())
    }

    /// Route one event: navigation keys to the switcher, resizes to a
    /// repaint, everything else to the unhandled hook.
    pub fn dispatch(&mut self, event: &Event) -> DriverResult<Option<PopOutcome>> {
        if let Some(request) = self.keymap.resolve(event) {
            return Ok(Some(self.switcher.handle_navigation(request)?));
        }

        if matches!(event, Event::Resize(_, _)) {
            self.switcher.refresh()?;
            return Ok(None);
        }

        if let Some(hook) = self.on_unhandled.as_mut() {
            hook(&mut self.switcher, event)?;
        }
        Ok(None)
    }

    fn run_inner(&mut self) -> DriverResult<()> {
        self.switcher.refresh()?;
        while !self.switcher.is_destroyed() {
            let event = event::read()?;
            self.dispatch(&event)?;
        }
        Ok(())
    }

    fn enter(&mut self) -> DriverResult<()> {
        terminal::enable_raw_mode().map_err(|err| DriverError::Terminal(err.to_string()))?;
        let writer = self.switcher.host_mut().writer_mut();
        execute!(writer, EnterAlternateScreen, Hide)?;
        Ok(())
    }

    fn exit(&mut self) {
        let writer = self.switcher.host_mut().writer_mut();
        execute!(writer, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}
