pub mod config;
pub mod factors;
pub mod engine;
pub mod rank;
pub mod validation;

pub use config::*;
pub use factors::Factor;
pub use engine::{calculate_score, calculate_score_at, score, FactorContribution, ScoreResult};
pub use rank::{rank_tasks, rank_tasks_at, RankedTask};
pub use validation::validate_scoring;
