//! Signature classification module.
//!
//! Responsible for evaluating detection rules over decoded frames
//! (SRP); decoding and counting live elsewhere.

mod rules;

pub use rules::Classifier;
