use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Time source for timers. Hosts use `SystemClock`; tests drive a `ManualClock`.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically.
#[derive(Debug)]
pub struct ManualClock {
    t: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Rc<Self> {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(t: Instant) -> Rc<Self> {
        Rc::new(Self { t: Cell::new(t) })
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }

    pub fn set(&self, t: Instant) {
        self.t.set(t);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
