use chrono::{Local, NaiveDateTime};

use super::config::ScoringConfig;
use super::factors::{
    followup_urgency, revenue_share, staleness, tier_share, Factor, REVENUE_CEILING,
    STALENESS_CAP_DAYS,
};
use crate::tasks::dates::days_between;
use crate::tasks::types::Task;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub factor: Factor,
    pub description: String, // e.g. "12 days since last touch (capped at 10)"
    pub points: f64,         // Points this factor added
    pub max_points: f64,     // max_score * factor weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    /// Sum of contributions before clamping
    pub raw_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// Task is waiting on a future follow-up and was pinned to the minimum
    pub waiting: bool,
    pub breakdown: ScoreBreakdown,
}

/// Score a task against the current local time.
pub fn calculate_score(task: &Task, config: &ScoringConfig) -> ScoreResult {
    calculate_score_at(task, config, Local::now().naive_local())
}

/// Score only, against the current local time.
pub fn score(task: &Task, config: &ScoringConfig) -> f64 {
    calculate_score(task, config).score
}

/// Score a task against a fixed reference time.
///
/// Total: every input yields a score within the configured bounds. Missing
/// or unparseable fields fall back to their zero/default contribution.
pub fn calculate_score_at(task: &Task, config: &ScoringConfig, now: NaiveDateTime) -> ScoreResult {
    let (min_score, max_score) = config.bounds();
    let next_followup = task.next_followup_at();

    let factors = vec![
        days_open_factor(task, config, now),
        next_followup_factor(next_followup, config, now),
        tier_factor(task, config),
        revenue_factor(task, config),
    ];

    let raw_total: f64 = factors.iter().map(|f| f.points).sum();

    // Waiting on a future follow-up overrides everything else
    let waiting = task.is_waiting() && next_followup.is_some_and(|at| at > now);

    let score = if waiting {
        min_score
    } else {
        raw_total.clamp(min_score, max_score)
    };

    ScoreResult {
        score,
        waiting,
        breakdown: ScoreBreakdown { factors, raw_total },
    }
}

fn allotment(factor: Factor, config: &ScoringConfig) -> f64 {
    let (_, max_score) = config.bounds();
    finite_or_zero(max_score * factor.weight(&config.weights))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn days_open_factor(task: &Task, config: &ScoringConfig, now: NaiveDateTime) -> FactorContribution {
    let max_points = allotment(Factor::DaysOpen, config);
    let touched = task.last_touched_at();
    let days_since = touched.map(|at| days_between(at, now)).unwrap_or(0).max(0);

    let description = if touched.is_none() {
        "no last action or creation date".to_string()
    } else if days_since >= STALENESS_CAP_DAYS {
        format!(
            "{} days since last touch (capped at {})",
            days_since, STALENESS_CAP_DAYS
        )
    } else {
        format!("{} days since last touch", days_since)
    };

    FactorContribution {
        factor: Factor::DaysOpen,
        description,
        points: finite_or_zero(staleness(days_since) * max_points),
        max_points,
    }
}

fn next_followup_factor(
    next_followup: Option<NaiveDateTime>,
    config: &ScoringConfig,
    now: NaiveDateTime,
) -> FactorContribution {
    let max_points = allotment(Factor::NextFollowup, config);
    let days_until = next_followup
        .map(|at| days_between(now, at))
        .unwrap_or(config.default_followup_days);

    let description = match next_followup {
        None => format!(
            "no follow-up set, assuming {} days",
            config.default_followup_days
        ),
        Some(_) if days_until < 0 => format!("overdue by {} days", -days_until),
        Some(_) if days_until == 0 => "due today".to_string(),
        Some(_) => format!("due in {} days", days_until),
    };

    FactorContribution {
        factor: Factor::NextFollowup,
        description,
        points: finite_or_zero(followup_urgency(days_until, max_points)),
        max_points,
    }
}

fn tier_factor(task: &Task, config: &ScoringConfig) -> FactorContribution {
    let max_points = allotment(Factor::Tier, config);
    let tier = task.customer_tier.as_deref().unwrap_or("").trim();
    let weight = config.tier_weight(tier);
    let max_weight = config.max_tier_weight();

    let description = if tier.is_empty() {
        "no tier".to_string()
    } else if weight > 0.0 {
        format!("tier {} ({} of {})", tier.to_uppercase(), weight, max_weight)
    } else {
        format!("unknown tier '{}'", tier)
    };

    FactorContribution {
        factor: Factor::Tier,
        description,
        points: finite_or_zero(tier_share(weight, max_weight) * max_points),
        max_points,
    }
}

fn revenue_factor(task: &Task, config: &ScoringConfig) -> FactorContribution {
    let max_points = allotment(Factor::Revenue, config);
    let revenue = task.revenue();

    FactorContribution {
        factor: Factor::Revenue,
        description: format!("{:.0} of {:.0} ceiling", revenue, REVENUE_CEILING),
        points: finite_or_zero(revenue_share(revenue) * max_points),
        max_points,
    }
}
