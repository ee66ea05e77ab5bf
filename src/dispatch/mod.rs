//! Frame dispatch: a bounded work queue feeding a fixed analysis pool.
//!
//! The queue decouples the capture path from frame analysis. Workers
//! block on the channel until a frame arrives instead of polling, and
//! a full queue blocks the submitting path until a worker catches up.

mod worker;

pub use worker::analyze;

use std::sync::{Arc, OnceLock};
use std::thread;

use crossbeam_channel::{bounded, Sender};

use crate::classifier::Classifier;
use crate::counters::Counters;
use crate::domain::{Frame, FrameMetadata};
use crate::error::FrameError;

/// Default analysis pool size.
pub const DEFAULT_WORKERS: usize = 10;

/// Default work queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Entry point the capture path calls once per captured frame.
///
/// Owns the work queue and starts the worker pool on first use, so no
/// pool resources are allocated when nothing is ever captured. The
/// pool is started exactly once; workers live for the rest of the
/// process.
pub struct Dispatcher {
    counters: Arc<Counters>,
    classifier: Arc<Classifier>,
    workers: usize,
    capacity: usize,
    verbose: bool,
    tx: OnceLock<Sender<Frame>>,
}

impl Dispatcher {
    pub fn new(counters: Arc<Counters>, classifier: Classifier, verbose: bool) -> Self {
        Self {
            counters,
            classifier: Arc::new(classifier),
            workers: DEFAULT_WORKERS,
            capacity: DEFAULT_QUEUE_CAPACITY,
            verbose,
            tx: OnceLock::new(),
        }
    }

    /// Set the analysis pool size. Only effective before the first
    /// submission.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the work queue capacity. Only effective before the first
    /// submission.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Copy a raw capture buffer and queue the frame for analysis.
    ///
    /// The buffer is copied before queuing, so the caller may reuse it
    /// as soon as this returns. Fails only if the buffer is shorter
    /// than the declared capture length.
    pub fn submit(&self, metadata: FrameMetadata, raw: &[u8]) -> Result<(), FrameError> {
        let frame = Frame::copied_from(metadata, raw)?;
        self.submit_frame(frame);
        Ok(())
    }

    /// Queue an already-owned frame for analysis.
    ///
    /// Blocks while the queue is full.
    pub fn submit_frame(&self, frame: Frame) {
        let tx = self.tx.get_or_init(|| self.start_pool());
        // The receivers live in detached worker threads that never
        // exit, so the send cannot fail.
        let _ = tx.send(frame);
    }

    fn start_pool(&self) -> Sender<Frame> {
        let (tx, rx) = bounded::<Frame>(self.capacity);

        for id in 0..self.workers {
            let rx = rx.clone();
            let counters = Arc::clone(&self.counters);
            let classifier = Arc::clone(&self.classifier);
            let verbose = self.verbose;

            thread::Builder::new()
                .name(format!("analysis-{}", id))
                .spawn(move || worker::run(rx, classifier, counters, verbose))
                .expect("failed to spawn analysis worker");
        }

        tracing::debug!(
            workers = self.workers,
            capacity = self.capacity,
            "analysis pool started"
        );
        tx
    }
}
