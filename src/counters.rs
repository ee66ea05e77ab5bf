//! Shared detection counters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::Signal;

/// Snapshot of the four counts at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub xmas_scans: u64,
    pub arp_responses: u64,
    pub blacklist_hits: u64,
    pub frames_seen: u64,
}

/// Process-wide detection counts.
///
/// All four counts live behind a single lock and only ever increase.
/// Increments commute, so completion order across workers does not
/// matter.
#[derive(Debug, Default)]
pub struct Counters {
    totals: Mutex<Totals>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Totals> {
        // A poisoned lock only means a worker panicked mid-increment;
        // the counts themselves remain usable.
        self.totals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count a frame whose ethertype matched a protocol branch.
    ///
    /// Frames with an unrecognized ethertype are never counted.
    pub fn record_frame(&self) {
        self.lock().frames_seen += 1;
    }

    /// Count one detection signal.
    pub fn record(&self, signal: Signal) {
        let mut totals = self.lock();
        match signal {
            Signal::XmasScan => totals.xmas_scans += 1,
            Signal::ArpResponse => totals.arp_responses += 1,
            Signal::BlacklistHit => totals.blacklist_hits += 1,
        }
    }

    /// Read a consistent snapshot of all four counts.
    pub fn snapshot(&self) -> Totals {
        *self.lock()
    }
}
