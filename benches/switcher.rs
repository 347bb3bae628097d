use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use screen_switcher::{
    Logger, MemorySurface, NullSink, Result, Screen, ScreenContext, ScreenRef, ScreenSwitcher,
    ScreenSwitcherFactory, ScreenSwitcherState, SwitcherConfig, TerminalDriver, TerminalSurface,
    View,
};

const STACK_DEPTH: usize = 32;

struct Page {
    name: String,
}

impl Screen for Page {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_view(&self, ctx: &mut ScreenContext<'_>) -> Result<View> {
        let depth = ctx.depth().unwrap_or_default();
        Ok(View::new(self.name.clone(), format!("depth {depth}")))
    }
}

fn page(index: usize) -> ScreenRef {
    ScreenRef::new(Page {
        name: format!("page-{index}"),
    })
}

fn memory_switcher(factory: &ScreenSwitcherFactory) -> ScreenSwitcher<MemorySurface> {
    let state = ScreenSwitcherState::new(vec![page(0)]).expect("state");
    factory
        .application_switcher(MemorySurface::new(), state, || {})
        .expect("switcher")
}

fn push_pop_churn(c: &mut Criterion) {
    let mut config = SwitcherConfig::default().with_logger(Logger::new(NullSink));
    config.enable_metrics();
    let factory = ScreenSwitcherFactory::with_config(config);

    c.bench_function("push_pop_churn", |b| {
        b.iter(|| {
            let mut switcher = memory_switcher(&factory);
            for index in 1..STACK_DEPTH {
                switcher.push(page(index)).expect("push");
            }
            while !switcher.is_destroyed() {
                black_box(switcher.pop().expect("pop"));
            }
        });
    });
}

fn intercepted_pops(c: &mut Criterion) {
    let factory = ScreenSwitcherFactory::new();
    c.bench_function("intercepted_pops", |b| {
        b.iter(|| {
            let mut switcher = memory_switcher(&factory);
            let top = page(1);
            switcher.push(top.clone()).expect("push");
            for _ in 0..8 {
                switcher.register_pop_listener(&top, |_: &ScreenRef| false);
            }
            switcher.register_pop_listener(&top, |_: &ScreenRef| true);
            for _ in 0..STACK_DEPTH {
                black_box(switcher.pop().expect("pop"));
            }
        });
    });
}

fn terminal_script(c: &mut Criterion) {
    let escape = Event::Key(KeyEvent {
        code: KeyCode::Esc,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    });
    let script: Vec<Event> = std::iter::repeat(escape).take(STACK_DEPTH).collect();

    c.bench_function("terminal_back_script", |b| {
        b.iter(|| {
            let screens: Vec<ScreenRef> = (0..STACK_DEPTH).map(page).collect();
            let state = ScreenSwitcherState::new(screens).expect("state");
            let switcher = ScreenSwitcherFactory::new()
                .application_switcher(TerminalSurface::with_default(io::sink()), state, || {})
                .expect("switcher");
            let mut driver = TerminalDriver::new(switcher);
            driver
                .run_scripted(black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

criterion_group!(benches, push_pop_churn, intercepted_pops, terminal_script);
criterion_main!(benches);
