//! jerat - live network intrusion detection monitor.
//!
//! Captures link-layer frames, classifies each against a small set of
//! attack signatures (TCP Xmas scans, ARP cache-poisoning replies,
//! HTTP requests to a blacklisted host) and accumulates counts that
//! are printed as a report when the operator interrupts the process.
//!
//! Data flow: capture -> `Dispatcher::submit` -> bounded work queue ->
//! analysis pool -> decode -> classify -> `Counters`.

pub mod capture;
pub mod classifier;
pub mod counters;
pub mod decoder;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod reporter;

pub use classifier::Classifier;
pub use counters::{Counters, Totals};
pub use decoder::FrameDecoder;
pub use dispatch::Dispatcher;
