use super::config::FactorWeights;

/// Days without action after which a task counts as fully stale
pub const STALENESS_CAP_DAYS: i64 = 10;

/// Follow-ups this many days out (or more) add no urgency
pub const FOLLOWUP_HORIZON_DAYS: i64 = 7;

/// Revenue at or above which the revenue factor saturates
pub const REVENUE_CEILING: f64 = 50_000.0;

/// The four additive scoring factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    DaysOpen,
    NextFollowup,
    Tier,
    Revenue,
}

impl Factor {
    pub fn label(&self) -> &'static str {
        match self {
            Factor::DaysOpen => "Days open",
            Factor::NextFollowup => "Next follow-up",
            Factor::Tier => "Customer tier",
            Factor::Revenue => "Revenue",
        }
    }

    pub fn weight(&self, weights: &FactorWeights) -> f64 {
        match self {
            Factor::DaysOpen => weights.days_open,
            Factor::NextFollowup => weights.next_followup,
            Factor::Tier => weights.tier,
            Factor::Revenue => weights.revenue,
        }
    }
}

/// Staleness in `[0, 1]`: days since last touch over the cap.
/// Negative spans (future timestamps) count as zero.
pub fn staleness(days_since: i64) -> f64 {
    days_since.clamp(0, STALENESS_CAP_DAYS) as f64 / STALENESS_CAP_DAYS as f64
}

/// Follow-up urgency points out of `full`.
///
/// Overdue follow-ups get the full allotment. Otherwise urgency decays
/// linearly from `full` at 0 days to nothing at the horizon.
pub fn followup_urgency(days_until: i64, full: f64) -> f64 {
    if days_until < 0 {
        return full;
    }
    let step = full / FOLLOWUP_HORIZON_DAYS as f64;
    (full - days_until.min(FOLLOWUP_HORIZON_DAYS) as f64 * step).max(0.0)
}

/// Tier share in `[0, 1]`. A table with no positive weight yields 0.
pub fn tier_share(tier_weight: f64, max_tier_weight: f64) -> f64 {
    if max_tier_weight > 0.0 {
        (tier_weight / max_tier_weight).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Revenue share in `[0, 1]` relative to the fixed ceiling
pub fn revenue_share(revenue: f64) -> f64 {
    if revenue.is_finite() && revenue > 0.0 {
        (revenue / REVENUE_CEILING).min(1.0)
    } else {
        0.0
    }
}
