use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::parser::log_parser::ParsedLog;
use crate::parser::structs::{BenchmarkRecord, MetricField, ThreadCount, WindowMs};

/// One row of a per-lock series, flagged for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub record: BenchmarkRecord,
    /// Both statistics present; incomplete rows are excluded from threshold derivation
    pub complete: bool,
}

/// Records grouped per lock type and sorted ascending by thread count
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    series: BTreeMap<String, Vec<BenchmarkRecord>>,
}

impl MetricsAggregator {
    pub fn new(parsed: &ParsedLog) -> Self {
        Self::from_records(parsed.records().cloned())
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BenchmarkRecord>,
    {
        let mut series: BTreeMap<String, Vec<BenchmarkRecord>> = BTreeMap::new();
        for record in records {
            let entries = series.entry(record.lock_type.clone()).or_default();
            // Keyed input already holds one record per pair; keep the last one if not
            entries.retain(|existing| existing.thread_count != record.thread_count);
            entries.push(record);
        }
        for entries in series.values_mut() {
            entries.sort_by_key(|record| record.thread_count);
        }

        debug!(lock_types = series.len(), "Aggregated benchmark records");
        Self { series }
    }

    pub fn lock_types(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// All records for a lock type, ascending by thread count
    pub fn records(&self, lock_type: &str) -> &[BenchmarkRecord] {
        self.series.get(lock_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn series(&self, lock_type: &str) -> Vec<SeriesEntry> {
        self.records(lock_type)
            .iter()
            .map(|record| SeriesEntry {
                complete: record.is_complete(),
                record: record.clone(),
            })
            .collect()
    }

    pub fn complete_records(&self, lock_type: &str) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records(lock_type).iter().filter(|record| record.is_complete())
    }

    pub fn record(&self, lock_type: &str, thread_count: ThreadCount) -> Option<&BenchmarkRecord> {
        let records = self.records(lock_type);
        records
            .binary_search_by_key(&thread_count, |record| record.thread_count)
            .ok()
            .map(|idx| &records[idx])
    }

    /// Field value at one data point; `None` when the record or the field is missing
    pub fn value_at(&self, lock_type: &str, thread_count: ThreadCount, field: MetricField) -> Option<u64> {
        self.record(lock_type, thread_count)?.get(field)
    }

    /// `(thread_count, value)` pairs for records carrying the field
    pub fn data_points(&self, lock_type: &str, field: MetricField) -> Vec<(ThreadCount, u64)> {
        self.records(lock_type)
            .iter()
            .filter_map(|record| record.get(field).map(|value| (record.thread_count, value)))
            .collect()
    }

    pub fn has_data(&self, lock_type: &str, field: MetricField) -> bool {
        self.records(lock_type).iter().any(|record| record.get(field).is_some())
    }

    /// Window of the lowest thread count record, used to label a series
    pub fn window_ms(&self, lock_type: &str) -> Option<WindowMs> {
        self.records(lock_type).first().map(|record| record.window_ms)
    }
}
