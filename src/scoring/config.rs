use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_MAX_SCORE: f64 = 100.0;
pub const DEFAULT_FOLLOWUP_DAYS: i64 = 3;

/// Main scoring configuration.
///
/// Loaded once at startup and passed by reference into every scoring call.
/// Omitted fields take their defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   tier_weights: { A: 3, B: 2, C: 1 }
///   weights:
///     days_open: 0.4
///     next_followup: 0.2
///     tier: 0.2
///     revenue: 0.2
///   default_followup_days: 3
///   min_score: 0
///   max_score: 100
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Customer tier -> relative weight. Lookups ignore case.
    pub tier_weights: BTreeMap<String, f64>,

    /// Share of `max_score` each factor can contribute
    pub weights: FactorWeights,

    /// Days until follow-up assumed when a task has none scheduled
    pub default_followup_days: i64,

    pub min_score: f64,
    pub max_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tier_weights: BTreeMap::from([
                ("A".to_string(), 3.0),
                ("B".to_string(), 2.0),
                ("C".to_string(), 1.0),
            ]),
            weights: FactorWeights::default(),
            default_followup_days: DEFAULT_FOLLOWUP_DAYS,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl ScoringConfig {
    /// Weight for a customer tier, 0 when unknown
    pub fn tier_weight(&self, tier: &str) -> f64 {
        let tier = tier.trim();
        self.tier_weights
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(tier))
            .map(|(_, weight)| *weight)
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(0.0)
    }

    /// Largest usable tier weight, 0 when the table has none
    pub fn max_tier_weight(&self) -> f64 {
        self.tier_weights
            .values()
            .copied()
            .filter(|w| w.is_finite() && *w > 0.0)
            .fold(0.0, f64::max)
    }

    /// Score bounds as an ordered `(min, max)` pair.
    ///
    /// Non-finite bounds fall back to the defaults and swapped bounds are
    /// reordered, so clamping never panics even on an unvalidated config.
    pub fn bounds(&self) -> (f64, f64) {
        let min = if self.min_score.is_finite() {
            self.min_score
        } else {
            DEFAULT_MIN_SCORE
        };
        let max = if self.max_score.is_finite() {
            self.max_score
        } else {
            DEFAULT_MAX_SCORE
        };
        if min <= max {
            (min, max)
        } else {
            (max, min)
        }
    }
}

/// Per-factor weights. Each one is the share of `max_score` that factor
/// contributes when saturated.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FactorWeights {
    pub days_open: f64,
    pub next_followup: f64,
    pub tier: f64,
    pub revenue: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            days_open: 0.4,
            next_followup: 0.2,
            tier: 0.2,
            revenue: 0.2,
        }
    }
}
