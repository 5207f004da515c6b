//! `config.toml` loading
//!
//! Every section is optional; missing sections and keys fall back to the defaults in
//! `common::constants`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::analysis::advisor::AdvisorConfig;
use crate::common::constants::{
    DEFAULT_BENCHMARK_LOG, DEFAULT_GRID_MS, DEFAULT_LEVEL_FILTER, DEFAULT_LOG_CLEANUP_DAYS,
    DEFAULT_LOG_DIR, DEFAULT_SEED, MAX_MODEL_CONSTANT,
};
use crate::errors::LockTunerError;
use crate::logging::{LogRotation, LoggingConfig};
use crate::simulation::structs::{PenaltyModel, SweetSpotParams};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Rate profiler output to parse
    pub benchmark_log: PathBuf,
    /// Optional critical-section benchmark output with `THREADS:..,TIME_MS:..` lines
    pub timing_log: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            benchmark_log: PathBuf::from(DEFAULT_BENCHMARK_LOG),
            timing_log: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub params: SweetSpotParams,
    pub seed: u64,
    /// Candidate window lengths, scanned in this order
    pub grid_ms: Vec<f64>,
    pub model: PenaltyModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: SweetSpotParams::default(),
            seed: DEFAULT_SEED,
            grid_ms: DEFAULT_GRID_MS.to_vec(),
            model: PenaltyModel::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report_path: Option<PathBuf>,
}

/// Logging section as written in config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingTomlConfig {
    pub log_dir: Option<String>,
    pub level_filter: Option<String>,
    pub rotation: Option<String>, // "daily", "hourly", or "size:<MB>"
    pub console_timestamps: Option<bool>,
    pub file_json_format: Option<bool>,
    pub cleanup_days: Option<u32>,
}

impl LoggingTomlConfig {
    pub fn to_logging_config(&self) -> LoggingConfig {
        let rotation = self
            .rotation
            .as_deref()
            .map(|r| match r {
                "hourly" => LogRotation::Hourly,
                "daily" => LogRotation::Daily,
                s if s.starts_with("size:") => {
                    let size_mb = s.strip_prefix("size:").and_then(|v| v.parse().ok()).unwrap_or(100);
                    LogRotation::SizeBased(size_mb)
                }
                _ => LogRotation::Daily,
            })
            .unwrap_or(LogRotation::Daily);

        LoggingConfig {
            log_dir: self.log_dir.clone().unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            level_filter: self
                .level_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LEVEL_FILTER.to_string()),
            rotation,
            console_timestamps: self.console_timestamps.unwrap_or(true),
            file_json_format: self.file_json_format.unwrap_or(true),
        }
    }

    pub fn cleanup_days(&self) -> u32 {
        self.cleanup_days.unwrap_or(DEFAULT_LOG_CLEANUP_DAYS)
    }
}

/// Full TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LockTunerConfig {
    pub input: InputConfig,
    pub advisor: AdvisorConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
    pub logging: LoggingTomlConfig,
}

impl LockTunerConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, LockTunerError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LockTunerError> {
        let config: LockTunerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LockTunerError> {
        let invalid = |msg: String| Err(LockTunerError::InvalidConfig(msg));
        let params = &self.simulation.params;
        let model = &self.simulation.model;

        if !(params.t_lag_ms.is_finite() && params.t_lag_ms > 0.0) {
            return invalid(format!("t_lag_ms must be positive, got {}", params.t_lag_ms));
        }
        if !(params.l_min_ms.is_finite() && params.l_max_ms.is_finite()) || params.l_min_ms > params.l_max_ms {
            return invalid(format!(
                "l_min_ms ({}) must not exceed l_max_ms ({})",
                params.l_min_ms, params.l_max_ms
            ));
        }
        if params.n_min > params.n_max {
            return invalid(format!("n_min ({}) must not exceed n_max ({})", params.n_min, params.n_max));
        }
        if !(params.tolerance_ms.is_finite() && params.tolerance_ms >= 0.0) {
            return invalid(format!("tolerance_ms must be non-negative, got {}", params.tolerance_ms));
        }
        if model.single_window_min_jitter > model.single_window_max_jitter {
            return invalid("single_window_min_jitter must not exceed single_window_max_jitter".to_string());
        }
        for (name, value) in [
            ("base_penalty", model.base_penalty),
            ("below_min_slope", model.below_min_slope),
            ("above_max_slope", model.above_max_slope),
            ("off_target_penalty", model.off_target_penalty),
            ("peak_fraction", model.peak_fraction),
            ("single_window_fraction", model.single_window_fraction),
            ("taper_slope", model.taper_slope),
            ("taper_floor", model.taper_floor),
            ("noise_fraction", model.noise_fraction),
            ("noise_floor", model.noise_floor),
        ] {
            if !value.is_finite() || value.abs() > MAX_MODEL_CONSTANT {
                return invalid(format!("simulation.model.{name} must be finite and within +-{MAX_MODEL_CONSTANT}, got {value}"));
            }
        }
        if model.noise_floor < 0.0 || model.noise_fraction < 0.0 {
            return invalid("noise_floor and noise_fraction must be non-negative".to_string());
        }
        if self.advisor.blocking_lock_type.trim().is_empty() || self.advisor.adaptive_lock_type.trim().is_empty() {
            return invalid("advisor lock types must not be empty".to_string());
        }
        if self.advisor.switch_to_spin_threads == 0 || self.advisor.switch_back_threads == 0 {
            return invalid("representative thread counts must be positive".to_string());
        }
        Ok(())
    }
}
