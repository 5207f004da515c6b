pub mod jitter;
pub mod structs;

pub use jitter::{JitterSimulator, StabilityCurve};
pub use structs::{Classification, JitterSample, PenaltyModel, Regime, SweetSpotParams};
