//! Analysis worker loop: decode, classify, count.

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::classifier::Classifier;
use crate::counters::Counters;
use crate::decoder::FrameDecoder;
use crate::domain::{DecodedView, Frame};
use crate::error::{DecodeError, Layer};
use crate::reporter::frame_dump;

pub(super) fn run(
    rx: Receiver<Frame>,
    classifier: Arc<Classifier>,
    counters: Arc<Counters>,
    verbose: bool,
) {
    let decoder = FrameDecoder::new();
    // recv blocks until the capture path queues a frame; it only
    // errors if every sender is gone, which ends the worker.
    while let Ok(frame) = rx.recv() {
        analyze(&frame, &decoder, &classifier, &counters, verbose);
    }
}

/// Run a single frame through decode -> classify -> count.
///
/// A truncated frame is abandoned at the layer where the bytes ran
/// out: if the ethertype had already selected a protocol branch the
/// frame still counts in `frames_seen`, but no signal counter moves.
pub fn analyze(
    frame: &Frame,
    decoder: &FrameDecoder,
    classifier: &Classifier,
    counters: &Counters,
    verbose: bool,
) {
    let decoded = match decoder.decode(frame) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!("decode failure: {}", err);
            if let DecodeError::Truncated { layer, .. } = err {
                if layer != Layer::Ethernet {
                    counters.record_frame();
                }
            }
            return;
        }
    };

    if verbose {
        frame_dump::print(frame, &decoded);
    }

    if matches!(decoded.inner, DecodedView::Unrecognized) {
        return;
    }

    for signal in classifier.classify(frame, &decoded) {
        tracing::debug!(signal = %signal, "signature matched");
        counters.record(signal);
    }

    // Counted last so a snapshot that has seen this frame has also
    // seen its signals.
    counters.record_frame();
}
