use super::config::ScoringConfig;
use super::factors::Factor;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate factor weights
    for (name, factor) in [
        ("days_open", Factor::DaysOpen),
        ("next_followup", Factor::NextFollowup),
        ("tier", Factor::Tier),
        ("revenue", Factor::Revenue),
    ] {
        let weight = factor.weight(&config.weights);
        if !weight.is_finite() {
            errors.push(format!("scoring.weights.{}: must be a finite number", name));
        } else if weight < 0.0 {
            errors.push(format!("scoring.weights.{}: must be non-negative", name));
        }
    }

    // Validate tier table
    for (tier, weight) in &config.tier_weights {
        if tier.trim().is_empty() {
            errors.push("scoring.tier_weights: tier names must not be empty".to_string());
        }
        if !weight.is_finite() {
            errors.push(format!("scoring.tier_weights.{}: must be a finite number", tier));
        } else if *weight < 0.0 {
            errors.push(format!("scoring.tier_weights.{}: must be non-negative", tier));
        }
    }

    if config.default_followup_days < 0 {
        errors.push("scoring.default_followup_days: must be non-negative".to_string());
    }

    // Validate bounds
    let bounds_finite = config.min_score.is_finite() && config.max_score.is_finite();
    if !config.min_score.is_finite() {
        errors.push("scoring.min_score: must be a finite number".to_string());
    }
    if !config.max_score.is_finite() {
        errors.push("scoring.max_score: must be a finite number".to_string());
    }
    if bounds_finite && config.min_score >= config.max_score {
        errors.push(format!(
            "scoring.min_score: must be less than max_score ({} >= {})",
            config.min_score, config.max_score
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::FactorWeights;

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_weights_allowed() {
        let config = ScoringConfig {
            weights: FactorWeights {
                days_open: 0.0,
                next_followup: 0.0,
                tier: 0.0,
                revenue: 0.0,
            },
            ..ScoringConfig::default()
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            weights: FactorWeights {
                revenue: -0.2,
                ..FactorWeights::default()
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights.revenue"));
    }

    #[test]
    fn test_non_finite_weight() {
        let config = ScoringConfig {
            weights: FactorWeights {
                tier: f64::NAN,
                ..FactorWeights::default()
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.weights.tier: must be a finite number"));
    }

    #[test]
    fn test_negative_tier_weight() {
        let mut config = ScoringConfig::default();
        config.tier_weights.insert("D".to_string(), -1.0);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.tier_weights.D"));
    }

    #[test]
    fn test_negative_default_followup_days() {
        let config = ScoringConfig {
            default_followup_days: -2,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("default_followup_days"));
    }

    #[test]
    fn test_inverted_bounds() {
        let config = ScoringConfig {
            min_score: 100.0,
            max_score: 0.0,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("less than max_score"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ScoringConfig {
            weights: FactorWeights {
                days_open: -1.0,  // Error 1
                ..FactorWeights::default()
            },
            default_followup_days: -1,  // Error 2
            max_score: f64::INFINITY,  // Error 3
            ..ScoringConfig::default()
        };
        config.tier_weights.insert("X".to_string(), f64::NAN);  // Error 4
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
