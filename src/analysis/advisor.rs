//! Threshold advice for the adaptive lock's mode switches
//!
//! - switch-to-spin: blocking mutex failures per window at a contended thread count
//! - switch-back-to-blocking: adaptive lock successes per window at a low thread count
//!
//! A missing or incomplete data point yields `Advice::InsufficientData`, never a made-up value.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::constants::{
    DEFAULT_ADAPTIVE_LOCK_TYPE, DEFAULT_BLOCKING_LOCK_TYPE, DEFAULT_SWITCH_BACK_THREADS,
    DEFAULT_SWITCH_TO_SPIN_THREADS,
};
use crate::parser::structs::{MetricField, ThreadCount, WindowMs};
use super::aggregator::MetricsAggregator;

/// Which lock types and thread counts the advice is read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub blocking_lock_type: String,
    pub adaptive_lock_type: String,
    pub switch_to_spin_threads: ThreadCount,
    pub switch_back_threads: ThreadCount,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            blocking_lock_type: DEFAULT_BLOCKING_LOCK_TYPE.to_string(),
            adaptive_lock_type: DEFAULT_ADAPTIVE_LOCK_TYPE.to_string(),
            switch_to_spin_threads: DEFAULT_SWITCH_TO_SPIN_THREADS,
            switch_back_threads: DEFAULT_SWITCH_BACK_THREADS,
        }
    }
}

/// Why a representative data point could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingData {
    NoRecord,
    FieldUnset,
    /// The field is present but its companion statistic is not
    IncompleteRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Advice {
    Recommended {
        lock_type: String,
        thread_count: ThreadCount,
        window_ms: WindowMs,
        field: MetricField,
        threshold: u64,
    },
    InsufficientData {
        lock_type: String,
        thread_count: ThreadCount,
        field: MetricField,
        reason: MissingData,
    },
}

impl Advice {
    pub fn threshold(&self) -> Option<u64> {
        match self {
            Advice::Recommended { threshold, .. } => Some(*threshold),
            Advice::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Advice::InsufficientData { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRecommendation {
    pub switch_to_spin: Advice,
    pub switch_back_to_blocking: Advice,
}

#[derive(Debug, Clone, Default)]
pub struct ThresholdAdvisor {
    config: AdvisorConfig,
}

impl ThresholdAdvisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    pub fn recommend(&self, aggregator: &MetricsAggregator) -> ThresholdRecommendation {
        ThresholdRecommendation {
            switch_to_spin: self.switch_to_spin(aggregator),
            switch_back_to_blocking: self.switch_back_to_blocking(aggregator),
        }
    }

    pub fn switch_to_spin(&self, aggregator: &MetricsAggregator) -> Advice {
        Self::advise(
            aggregator,
            &self.config.blocking_lock_type,
            self.config.switch_to_spin_threads,
            MetricField::AvgFailuresPerWindow,
        )
    }

    pub fn switch_back_to_blocking(&self, aggregator: &MetricsAggregator) -> Advice {
        Self::advise(
            aggregator,
            &self.config.adaptive_lock_type,
            self.config.switch_back_threads,
            MetricField::AvgSuccessesPerWindow,
        )
    }

    fn advise(
        aggregator: &MetricsAggregator,
        lock_type: &str,
        thread_count: ThreadCount,
        field: MetricField,
    ) -> Advice {
        let insufficient = |reason: MissingData| {
            warn!(lock_type, thread_count, field = field.as_str(), ?reason, "⚠️ Insufficient data for threshold advice");
            Advice::InsufficientData {
                lock_type: lock_type.to_string(),
                thread_count,
                field,
                reason,
            }
        };

        let Some(record) = aggregator.record(lock_type, thread_count) else {
            return insufficient(MissingData::NoRecord);
        };
        let Some(threshold) = record.get(field) else {
            return insufficient(MissingData::FieldUnset);
        };
        if !record.is_complete() {
            return insufficient(MissingData::IncompleteRecord);
        }

        info!(
            lock_type,
            thread_count,
            window_ms = record.window_ms,
            field = field.as_str(),
            threshold,
            "🎯 Threshold starting point derived"
        );
        Advice::Recommended {
            lock_type: lock_type.to_string(),
            thread_count,
            window_ms: record.window_ms,
            field,
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::structs::BenchmarkRecord;

    fn record(lock_type: &str, threads: u32, failures: Option<u64>, successes: Option<u64>) -> BenchmarkRecord {
        BenchmarkRecord {
            lock_type: lock_type.to_string(),
            thread_count: threads,
            window_ms: 20,
            avg_failures_per_window: failures,
            avg_successes_per_window: successes,
        }
    }

    #[test]
    fn test_recommend_reads_representative_points() {
        let aggregator = MetricsAggregator::from_records(vec![
            record("pthread_mutex", 4, Some(28684), Some(238880)),
            record("komb_mutex", 2, Some(8390), Some(179075)),
        ]);
        let recommendation = ThresholdAdvisor::default().recommend(&aggregator);

        assert_eq!(recommendation.switch_to_spin.threshold(), Some(28684));
        assert_eq!(recommendation.switch_back_to_blocking.threshold(), Some(179075));
        assert!(matches!(
            recommendation.switch_to_spin,
            Advice::Recommended { window_ms: 20, thread_count: 4, .. }
        ));
    }

    #[test]
    fn test_missing_thread_count_is_insufficient() {
        let aggregator = MetricsAggregator::from_records(vec![record("pthread_mutex", 2, Some(9514), Some(217034))]);
        let advice = ThresholdAdvisor::default().switch_to_spin(&aggregator);

        assert!(advice.is_insufficient());
        assert_eq!(advice.threshold(), None);
        assert!(matches!(
            advice,
            Advice::InsufficientData { reason: MissingData::NoRecord, thread_count: 4, .. }
        ));
    }

    #[test]
    fn test_unset_or_incomplete_point_is_insufficient() {
        let aggregator = MetricsAggregator::from_records(vec![
            record("pthread_mutex", 4, None, Some(1)),
            record("komb_mutex", 2, None, Some(179075)),
        ]);
        let recommendation = ThresholdAdvisor::default().recommend(&aggregator);

        assert!(matches!(
            recommendation.switch_to_spin,
            Advice::InsufficientData { reason: MissingData::FieldUnset, .. }
        ));
        assert!(matches!(
            recommendation.switch_back_to_blocking,
            Advice::InsufficientData { reason: MissingData::IncompleteRecord, .. }
        ));
    }

    #[test]
    fn test_zero_failures_is_a_recommendation() {
        let aggregator = MetricsAggregator::from_records(vec![record("pthread_mutex", 4, Some(0), Some(5))]);
        assert_eq!(ThresholdAdvisor::default().switch_to_spin(&aggregator).threshold(), Some(0));
    }

    #[test]
    fn test_custom_config_changes_lookup() {
        let aggregator = MetricsAggregator::from_records(vec![record("spin_hybrid", 3, Some(1), Some(42))]);
        let advisor = ThresholdAdvisor::new(AdvisorConfig {
            adaptive_lock_type: "spin_hybrid".to_string(),
            switch_back_threads: 3,
            ..AdvisorConfig::default()
        });
        assert_eq!(advisor.switch_back_to_blocking(&aggregator).threshold(), Some(42));
    }

    #[test]
    fn test_advice_serializes_with_outcome_tag() {
        let advice = Advice::InsufficientData {
            lock_type: "pthread_mutex".to_string(),
            thread_count: 4,
            field: MetricField::AvgFailuresPerWindow,
            reason: MissingData::NoRecord,
        };
        let json = serde_json::to_value(&advice).unwrap();
        assert_eq!(json["outcome"], "insufficient_data");
        assert_eq!(json["reason"], "no_record");
    }
}
