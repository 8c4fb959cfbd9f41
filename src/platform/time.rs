//! Time sources for the simulated clock

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic-ish time in seconds.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Real time: `Date.now()` in the browser, `Instant` natively.
#[derive(Debug, Clone)]
pub struct WallClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> f64 {
        js_sys::Date::now() / 1000.0
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-stepped time. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
