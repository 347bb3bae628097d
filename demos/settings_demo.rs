use std::cell::Cell;
use std::io;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use screen_switcher::{
    DriverResult, Result, Screen, ScreenContext, ScreenRef, ScreenSwitcherFactory,
    ScreenSwitcherState, TerminalDriver, TerminalSurface, View,
};

const MENU_HINT: &str = "[a] account  [e] editor  [esc] back  [ctrl+c] quit";

struct Menu;

impl Screen for Menu {
    fn name(&self) -> &str {
        "menu"
    }

    fn create_view(&self, _ctx: &mut ScreenContext<'_>) -> Result<View> {
        Ok(View::new("Settings", MENU_HINT))
    }
}

struct Account;

impl Screen for Account {
    fn name(&self) -> &str {
        "account"
    }

    fn create_view(&self, ctx: &mut ScreenContext<'_>) -> Result<View> {
        let depth = ctx.depth().unwrap_or_default();
        Ok(View::new(
            "Account",
            format!("signed in as demo\nstack depth {depth}\n\n[esc] back"),
        ))
    }
}

/// Asks for a second back press before discarding unsaved edits.
struct Editor {
    dirty: Rc<Cell<bool>>,
}

impl Screen for Editor {
    fn name(&self) -> &str {
        "editor"
    }

    fn create_view(&self, ctx: &mut ScreenContext<'_>) -> Result<View> {
        self.dirty.set(true);
        let dirty = Rc::clone(&self.dirty);
        ctx.register_pop_listener(move |_: &ScreenRef| dirty.replace(false));
        Ok(View::new(
            "Editor",
            "unsaved changes\n\n[esc] once to confirm, twice to discard",
        ))
    }
}

fn main() -> DriverResult<()> {
    let state = ScreenSwitcherState::new(vec![ScreenRef::new(Menu)])?;
    let switcher = ScreenSwitcherFactory::new().application_switcher(
        TerminalSurface::with_default(io::stdout()),
        state,
        || {},
    )?;

    TerminalDriver::new(switcher)
        .on_unhandled(|switcher, event| {
            let Event::Key(key) = event else {
                return Ok(());
            };
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            let on_menu = switcher.top_screen().map(|top| top.name()) == Some("menu");
            match key.code {
                KeyCode::Char('a') if on_menu => switcher.push(ScreenRef::new(Account)),
                KeyCode::Char('e') if on_menu => switcher.push(ScreenRef::new(Editor {
                    dirty: Rc::new(Cell::new(false)),
                })),
                _ => Ok(()),
            }
        })
        .run()
}
