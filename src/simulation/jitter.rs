//! Jitter simulator for the adaptive lock's sampling window
//!
//! Maps a candidate window length `L` to a count of undesired mode flips. The count
//! is near zero inside the sweet spot, grows steeply for short windows, peaks for
//! mid-range windows and falls again once one window covers the whole lag. All
//! randomness comes from the injected generator, so a fixed seed replays exactly.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::structs::{Classification, JitterSample, PenaltyModel, Regime, SweetSpotParams};

#[derive(Debug)]
pub struct JitterSimulator<R = ChaCha8Rng> {
    params: SweetSpotParams,
    model: PenaltyModel,
    rng: R,
}

impl JitterSimulator<ChaCha8Rng> {
    pub fn seeded(params: SweetSpotParams, model: PenaltyModel, seed: u64) -> Self {
        Self::with_rng(params, model, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> JitterSimulator<R> {
    pub fn with_rng(params: SweetSpotParams, model: PenaltyModel, rng: R) -> Self {
        Self { params, model, rng }
    }

    pub fn classify(&self, l_ms: f64) -> Classification {
        self.model.classify(&self.params, l_ms)
    }

    /// Evaluate one candidate window length
    pub fn jitter(&mut self, l_ms: f64) -> JitterSample {
        let classification = self.classify(l_ms);

        let jitter_count = match classification.regime {
            Regime::Invalid => self.model.invalid_jitter,
            Regime::SweetSpot => self.draw_sweet_spot(),
            Regime::SingleWindow => {
                let (low, high) = ordered(self.model.single_window_min_jitter, self.model.single_window_max_jitter);
                self.rng.gen_range(low..=high)
            }
            Regime::BelowWindow | Regime::AboveWindow | Regime::OffTarget => {
                let penalty = self
                    .model
                    .deterministic_penalty(&self.params, &classification)
                    .unwrap_or(self.model.base_penalty);
                let settled = self.settle(penalty);
                self.reassert_sweet_spot(&classification, settled)
            }
        };

        debug!(
            l_ms,
            n = classification.n,
            jitter_count,
            regime = ?classification.regime,
            "Jitter sample"
        );

        JitterSample {
            l_ms,
            n: classification.n,
            jitter_count,
            in_sweet_spot: classification.in_sweet_spot(),
            regime: classification.regime,
        }
    }

    /// Evaluate every grid entry in the order given
    pub fn scan(&mut self, grid: &[f64]) -> StabilityCurve {
        let samples: Vec<_> = grid.iter().map(|&l_ms| self.jitter(l_ms)).collect();
        let curve = StabilityCurve {
            t_lag_ms: self.params.t_lag_ms,
            samples,
        };

        info!(
            t_lag_ms = curve.t_lag_ms,
            candidates = curve.samples.len(),
            sweet_spot = curve.sweet_spot().count(),
            "📈 Stability curve simulated"
        );
        curve
    }

    fn draw_sweet_spot(&mut self) -> u32 {
        self.rng.gen_range(0..=self.model.sweet_spot_max_jitter)
    }

    /// Symmetric noise, then clamp to `[0, cap]` and round
    fn settle(&mut self, penalty: f64) -> u32 {
        let spread = self.model.noise_floor.max(self.model.noise_fraction * penalty).abs();
        // The sampled range is 2 * spread wide and must stay finite
        let spread = if (2.0 * spread).is_finite() { spread } else { 0.0 };
        let noisy = penalty + self.rng.gen_range(-spread..=spread);
        let cap = self.model.cap_base.saturating_add(self.rng.gen_range(0..=self.model.cap_spread));
        noisy.clamp(0.0, cap as f64).round_ties_even() as u32
    }

    // Sweet-spot samples always end in [0, sweet_spot_max_jitter]. The additive
    // regimes are never sweet today, so this override does not fire on its own.
    fn reassert_sweet_spot(&mut self, classification: &Classification, jitter_count: u32) -> u32 {
        if classification.in_sweet_spot() {
            return self.draw_sweet_spot();
        }
        jitter_count
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Jitter samples over a grid of candidate window lengths
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityCurve {
    pub t_lag_ms: f64,
    pub samples: Vec<JitterSample>,
}

impl StabilityCurve {
    /// Lowest jitter; the earliest grid entry wins ties
    pub fn most_stable(&self) -> Option<&JitterSample> {
        self.samples.iter().min_by_key(|sample| sample.jitter_count)
    }

    pub fn sweet_spot(&self) -> impl Iterator<Item = &JitterSample> {
        self.samples.iter().filter(|sample| sample.in_sweet_spot)
    }

    /// Smallest and largest sweet-spot window on the grid
    pub fn sweet_spot_bounds(&self) -> Option<(f64, f64)> {
        self.sweet_spot().fold(None, |bounds, sample| match bounds {
            None => Some((sample.l_ms, sample.l_ms)),
            Some((low, high)) => Some((low.min(sample.l_ms), high.max(sample.l_ms))),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
