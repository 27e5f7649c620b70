use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{
    clock::Clock,
    config::Config,
    correction::CorrectionEngine,
    surface::{Page, StringSurface, SurfaceId},
};

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub fn engine_with(config: &Config) -> (CorrectionEngine, ManualClock) {
    let clock = ManualClock::new();
    let engine = CorrectionEngine::with_clock(config, Box::new(clock.clone()));
    (engine, clock)
}

pub fn engine() -> (CorrectionEngine, ManualClock) {
    engine_with(&Config::default())
}

/// Page with one focused plain field, caret at the end.
pub fn focused_page(text: &str) -> (Page, SurfaceId) {
    let mut page = Page::new();
    let id = page.bind(Box::new(StringSurface::plain(text)));
    assert!(page.focus(id));
    (page, id)
}

pub fn text_of(page: &Page, id: SurfaceId) -> String {
    page.get(id).map(|s| s.text()).unwrap_or_default()
}
