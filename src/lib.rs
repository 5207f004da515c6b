//! Benchmark log analysis and window tuning for an adaptive blocking/spin lock.
//!
//! Raw rate profiler output is parsed into per-`(lock_type, thread_count)` records,
//! aggregated into thread-count series and turned into switch threshold advice. A
//! seeded jitter simulator scores candidate sampling windows to find a stable one.

pub mod analysis;
pub mod common;
pub mod config;
pub mod errors;
pub mod logging;
pub mod parser;
pub mod report;
pub mod simulation;

pub use analysis::{Advice, MetricsAggregator, ThresholdAdvisor, ThresholdRecommendation};
pub use errors::LockTunerError;
pub use parser::{BenchmarkRecord, LogParser, MetricField, ParsedLog};
pub use simulation::{JitterSample, JitterSimulator, PenaltyModel, StabilityCurve, SweetSpotParams};
