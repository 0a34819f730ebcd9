//! Reloj lógico en milisegundos.
//!
//! El motor no agenda timers propios: todas las operaciones sensibles al
//! tiempo reciben `now_ms` del llamador. `SystemClock` sirve para hosts
//! reales y `ManualClock` para tests deterministas sin timers de verdad.
use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    /// Milisegundos monótonos desde el origen del reloj.
    fn now_ms(&self) -> u64;
}

/// Reloj monótono basado en `std::time::Instant`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Reloj controlado a mano (avanza sólo cuando el test lo pide).
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
