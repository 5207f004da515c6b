use serde::{Deserialize, Serialize};

pub type ThreadCount = u32;
pub type WindowMs = u32;

/// Identity of a benchmark measurement: one lock implementation at one concurrency level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub lock_type: String,
    pub thread_count: ThreadCount,
}

impl RecordKey {
    pub fn new(lock_type: impl Into<String>, thread_count: ThreadCount) -> Self {
        Self {
            lock_type: lock_type.into(),
            thread_count,
        }
    }
}

/// Per-window trylock statistic carried by a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    AvgFailuresPerWindow,
    AvgSuccessesPerWindow,
}

impl MetricField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::AvgFailuresPerWindow => "avg_failures_per_window",
            MetricField::AvgSuccessesPerWindow => "avg_successes_per_window",
        }
    }
}

/// Trylock statistics for one `(lock_type, thread_count)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub lock_type: String,
    pub thread_count: ThreadCount,
    /// Sampling window of the context that created the record
    pub window_ms: WindowMs,
    pub avg_failures_per_window: Option<u64>,
    pub avg_successes_per_window: Option<u64>,
}

impl BenchmarkRecord {
    pub fn new(lock_type: impl Into<String>, thread_count: ThreadCount, window_ms: WindowMs) -> Self {
        Self {
            lock_type: lock_type.into(),
            thread_count,
            window_ms,
            avg_failures_per_window: None,
            avg_successes_per_window: None,
        }
    }

    pub fn get(&self, field: MetricField) -> Option<u64> {
        match field {
            MetricField::AvgFailuresPerWindow => self.avg_failures_per_window,
            MetricField::AvgSuccessesPerWindow => self.avg_successes_per_window,
        }
    }

    pub fn set(&mut self, field: MetricField, value: u64) {
        match field {
            MetricField::AvgFailuresPerWindow => self.avg_failures_per_window = Some(value),
            MetricField::AvgSuccessesPerWindow => self.avg_successes_per_window = Some(value),
        }
    }

    /// Both per-window statistics are present
    pub fn is_complete(&self) -> bool {
        self.avg_failures_per_window.is_some() && self.avg_successes_per_window.is_some()
    }
}

/// Total run time of the critical-section benchmark at one thread count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTiming {
    pub thread_count: ThreadCount,
    pub time_ms: f64,
}
