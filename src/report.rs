//! Serializable bundle of one tuning run, handed to whatever renders tables or charts

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::advisor::ThresholdRecommendation;
use crate::errors::LockTunerError;
use crate::parser::log_parser::{ParseStats, ParsedLog};
use crate::parser::structs::{BenchmarkRecord, ExecutionTiming};
use crate::simulation::jitter::StabilityCurve;

#[derive(Debug, Clone, Serialize)]
pub struct TuningReport {
    pub generated_at: DateTime<Utc>,
    pub parse_stats: ParseStats,
    /// Ordered by lock type, then thread count
    pub records: Vec<BenchmarkRecord>,
    pub timings: Vec<ExecutionTiming>,
    pub recommendation: ThresholdRecommendation,
    pub stability: StabilityCurve,
}

impl TuningReport {
    pub fn new(
        parsed: &ParsedLog,
        timings: Vec<ExecutionTiming>,
        recommendation: ThresholdRecommendation,
        stability: StabilityCurve,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            parse_stats: parsed.stats().clone(),
            records: parsed.records().cloned().collect(),
            timings,
            recommendation,
            stability,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, LockTunerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), LockTunerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), records = self.records.len(), "💾 Tuning report written");
        Ok(())
    }
}
