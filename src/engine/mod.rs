//! Core engine: the detect → analyse → heal cycle and its summary metrics.

pub mod metrics;
pub mod simulator;
