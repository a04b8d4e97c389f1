use chrono::{Local, NaiveDateTime};

use super::config::ScoringConfig;
use super::engine::{calculate_score_at, ScoreResult};
use crate::tasks::types::Task;

/// A task with its calculated score, in worklist order
#[derive(Debug, Clone)]
pub struct RankedTask<'a> {
    pub task: &'a Task,
    pub result: ScoreResult,
}

/// Score and order tasks against the current local time.
pub fn rank_tasks<'a>(tasks: &'a [Task], config: &ScoringConfig) -> Vec<RankedTask<'a>> {
    rank_tasks_at(tasks, config, Local::now().naive_local())
}

/// Score every task against one shared reference time and sort by score,
/// highest first. The sort is stable: equal scores keep input order.
pub fn rank_tasks_at<'a>(
    tasks: &'a [Task],
    config: &ScoringConfig,
    now: NaiveDateTime,
) -> Vec<RankedTask<'a>> {
    let mut ranked: Vec<RankedTask<'a>> = tasks
        .iter()
        .map(|task| RankedTask {
            task,
            result: calculate_score_at(task, config, now),
        })
        .collect();

    ranked.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));
    ranked
}
