pub mod advisor;
pub mod aggregator;

pub use advisor::{Advice, AdvisorConfig, MissingData, ThresholdAdvisor, ThresholdRecommendation};
pub use aggregator::{MetricsAggregator, SeriesEntry};
