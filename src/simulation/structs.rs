use serde::{Deserialize, Serialize};

use crate::common::constants::{
    DEFAULT_ABOVE_MAX_SLOPE, DEFAULT_BASE_PENALTY, DEFAULT_BELOW_MIN_SLOPE, DEFAULT_CAP_BASE,
    DEFAULT_CAP_SPREAD, DEFAULT_L_MAX_MS, DEFAULT_L_MIN_MS, DEFAULT_NOISE_FLOOR,
    DEFAULT_NOISE_FRACTION, DEFAULT_N_MAX, DEFAULT_N_MIN, DEFAULT_OFF_TARGET_PENALTY,
    DEFAULT_PEAK_FRACTION, DEFAULT_SINGLE_WINDOW_FRACTION, DEFAULT_SINGLE_WINDOW_MAX_JITTER,
    DEFAULT_SINGLE_WINDOW_MIN_JITTER, DEFAULT_SWEET_SPOT_MAX_JITTER, DEFAULT_TAPER_FLOOR,
    DEFAULT_TAPER_SLOPE, DEFAULT_TOLERANCE_MS, DEFAULT_T_LAG_MS, INVALID_WINDOW_JITTER,
};

/// Bounds of the stable operating region, fixed for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweetSpotParams {
    pub l_min_ms: f64,
    pub l_max_ms: f64,
    pub n_min: u32,
    pub n_max: u32,
    /// Nominal total lag that `L * N` should approximate
    pub t_lag_ms: f64,
    /// Allowed absolute deviation of `L * N` from `t_lag_ms`
    pub tolerance_ms: f64,
}

impl Default for SweetSpotParams {
    fn default() -> Self {
        Self {
            l_min_ms: DEFAULT_L_MIN_MS,
            l_max_ms: DEFAULT_L_MAX_MS,
            n_min: DEFAULT_N_MIN,
            n_max: DEFAULT_N_MAX,
            t_lag_ms: DEFAULT_T_LAG_MS,
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }
}

impl SweetSpotParams {
    /// Windows needed to cover the lag at granularity `l_ms`, at least one
    pub fn repetitions(&self, l_ms: f64) -> u32 {
        // f64 -> u32 casts saturate, so tiny windows cannot wrap
        ((self.t_lag_ms / l_ms).round_ties_even() as u32).max(1)
    }
}

/// Regime boundaries and constants of the jitter heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyModel {
    pub base_penalty: f64,
    /// k1: growth per millisecond below `l_min_ms`
    pub below_min_slope: f64,
    /// k2: growth per millisecond above `l_max_ms` up to the peak
    pub above_max_slope: f64,
    /// Flat penalty inside the L bounds when N or the lag check fails
    pub off_target_penalty: f64,
    /// Fraction of the lag where mid-range instability peaks
    pub peak_fraction: f64,
    /// Fraction of the lag from which a single window counts as low jitter
    pub single_window_fraction: f64,
    pub taper_slope: f64,
    pub taper_floor: f64,
    pub noise_fraction: f64,
    pub noise_floor: f64,
    pub cap_base: u32,
    pub cap_spread: u32,
    pub sweet_spot_max_jitter: u32,
    pub single_window_min_jitter: u32,
    pub single_window_max_jitter: u32,
    /// Returned for non-positive window lengths
    pub invalid_jitter: u32,
}

impl Default for PenaltyModel {
    fn default() -> Self {
        Self {
            base_penalty: DEFAULT_BASE_PENALTY,
            below_min_slope: DEFAULT_BELOW_MIN_SLOPE,
            above_max_slope: DEFAULT_ABOVE_MAX_SLOPE,
            off_target_penalty: DEFAULT_OFF_TARGET_PENALTY,
            peak_fraction: DEFAULT_PEAK_FRACTION,
            single_window_fraction: DEFAULT_SINGLE_WINDOW_FRACTION,
            taper_slope: DEFAULT_TAPER_SLOPE,
            taper_floor: DEFAULT_TAPER_FLOOR,
            noise_fraction: DEFAULT_NOISE_FRACTION,
            noise_floor: DEFAULT_NOISE_FLOOR,
            cap_base: DEFAULT_CAP_BASE,
            cap_spread: DEFAULT_CAP_SPREAD,
            sweet_spot_max_jitter: DEFAULT_SWEET_SPOT_MAX_JITTER,
            single_window_min_jitter: DEFAULT_SINGLE_WINDOW_MIN_JITTER,
            single_window_max_jitter: DEFAULT_SINGLE_WINDOW_MAX_JITTER,
            invalid_jitter: INVALID_WINDOW_JITTER,
        }
    }
}

/// Where a candidate window length falls in the heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Non-positive or non-finite window length
    Invalid,
    SweetSpot,
    /// Window shorter than `l_min_ms`
    BelowWindow,
    /// Window longer than `l_max_ms` that covers the lag almost alone
    SingleWindow,
    /// Window longer than `l_max_ms`, mid-range instability
    AboveWindow,
    /// Window inside the L bounds but N or the lag approximation is off
    OffTarget,
}

/// Deterministic part of a jitter evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub l_ms: f64,
    /// Zero for invalid windows
    pub n: u32,
    pub l_in_range: bool,
    pub n_in_range: bool,
    pub lag_in_tolerance: bool,
    pub regime: Regime,
}

impl Classification {
    pub fn in_sweet_spot(&self) -> bool {
        self.l_in_range && self.n_in_range && self.lag_in_tolerance
    }
}

impl PenaltyModel {
    pub fn classify(&self, params: &SweetSpotParams, l_ms: f64) -> Classification {
        if !l_ms.is_finite() || l_ms <= 0.0 {
            return Classification {
                l_ms,
                n: 0,
                l_in_range: false,
                n_in_range: false,
                lag_in_tolerance: false,
                regime: Regime::Invalid,
            };
        }

        let n = params.repetitions(l_ms);
        let l_in_range = params.l_min_ms <= l_ms && l_ms <= params.l_max_ms;
        let n_in_range = params.n_min <= n && n <= params.n_max;
        let lag_in_tolerance = (l_ms * n as f64 - params.t_lag_ms).abs() <= params.tolerance_ms;

        let regime = if l_in_range && n_in_range && lag_in_tolerance {
            Regime::SweetSpot
        } else if l_ms < params.l_min_ms {
            Regime::BelowWindow
        } else if l_ms > params.l_max_ms {
            if n == 1 && l_ms >= params.t_lag_ms * self.single_window_fraction {
                Regime::SingleWindow
            } else {
                Regime::AboveWindow
            }
        } else {
            Regime::OffTarget
        };

        Classification {
            l_ms,
            n,
            l_in_range,
            n_in_range,
            lag_in_tolerance,
            regime,
        }
    }

    /// Penalty before noise and capping, for the regimes that use the additive model
    pub fn deterministic_penalty(&self, params: &SweetSpotParams, classification: &Classification) -> Option<f64> {
        let l_ms = classification.l_ms;
        match classification.regime {
            Regime::BelowWindow => {
                Some(self.base_penalty + (params.l_min_ms - l_ms) * self.below_min_slope)
            }
            Regime::AboveWindow => {
                let peak_l = params.t_lag_ms * self.peak_fraction;
                if l_ms <= peak_l {
                    return Some(self.base_penalty + (l_ms - params.l_max_ms) * self.above_max_slope);
                }
                let peak_penalty = self.base_penalty + (peak_l - params.l_max_ms) * self.above_max_slope;
                let reduction = ((l_ms - peak_l) / (params.t_lag_ms - peak_l).max(f64::EPSILON)).max(0.0);
                Some(peak_penalty * (1.0 - self.taper_slope * reduction) + self.taper_floor * reduction)
            }
            Regime::OffTarget => Some(self.base_penalty + self.off_target_penalty),
            Regime::Invalid | Regime::SweetSpot | Regime::SingleWindow => None,
        }
    }
}

/// Outcome of evaluating one candidate window length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterSample {
    pub l_ms: f64,
    pub n: u32,
    pub jitter_count: u32,
    pub in_sweet_spot: bool,
    pub regime: Regime,
}
