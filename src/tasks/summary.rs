use chrono::{Local, NaiveDateTime};

use super::filter::split_worklist;
use super::types::Task;
use crate::scoring::{calculate_score_at, ScoringConfig};

/// Dashboard counters over the open tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub total_open_tasks: usize,
    pub total_quick_tasks: usize,
    pub tasks_due_today: usize,
    /// Mean score of open, non-quick tasks, one decimal place
    pub avg_score: f64,
}

pub fn summarize_tasks(tasks: Vec<Task>, config: &ScoringConfig) -> TaskSummary {
    summarize_tasks_at(tasks, config, Local::now().naive_local())
}

/// Summarize against a fixed reference time. Done tasks are ignored.
pub fn summarize_tasks_at(tasks: Vec<Task>, config: &ScoringConfig, now: NaiveDateTime) -> TaskSummary {
    let today = now.date();
    let worklist = split_worklist(tasks);

    let tasks_due_today = worklist
        .prioritized
        .iter()
        .chain(&worklist.quick)
        .filter(|t| t.due_at().is_some_and(|due| due.date() == today))
        .count();

    let scores: Vec<f64> = worklist
        .prioritized
        .iter()
        .map(|t| calculate_score_at(t, config, now).score)
        .collect();

    let avg_score = if scores.is_empty() {
        0.0
    } else {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    TaskSummary {
        total_open_tasks: worklist.open_count(),
        total_quick_tasks: worklist.quick.len(),
        tasks_due_today,
        avg_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_tasks_at(Vec::new(), &ScoringConfig::default(), now());
        assert_eq!(
            summary,
            TaskSummary {
                total_open_tasks: 0,
                total_quick_tasks: 0,
                tasks_due_today: 0,
                avg_score: 0.0,
            }
        );
    }

    #[test]
    fn test_summary_counts() {
        let tasks = vec![
            Task {
                status: Some("open".to_string()),
                kind: Some("quick".to_string()),
                due_date: Some("2024-06-15".into()),
                ..Task::default()
            },
            Task {
                status: Some("open".to_string()),
                due_date: Some("2024-06-15 08:00:00".into()),
                ..Task::default()
            },
            Task {
                status: Some("open".to_string()),
                due_date: Some("2024-06-16".into()),
                ..Task::default()
            },
            Task {
                status: Some("done".to_string()),
                kind: Some("quick".to_string()),
                due_date: Some("2024-06-15".into()),
                ..Task::default()
            },
            Task {
                status: Some("open".to_string()),
                due_date: Some("someday".into()),
                ..Task::default()
            },
        ];

        let summary = summarize_tasks_at(tasks, &ScoringConfig::default(), now());
        assert_eq!(summary.total_open_tasks, 4);
        assert_eq!(summary.total_quick_tasks, 1);
        assert_eq!(summary.tasks_due_today, 2);
    }

    #[test]
    fn test_average_skips_quick_and_rounds() {
        let tasks = vec![
            // 40 points: stale for 10 days, follow-up far out
            Task {
                last_action_date: Some((now() - Duration::days(10)).into()),
                next_followup_date: Some((now() + Duration::days(30)).into()),
                ..Task::default()
            },
            // 0 points
            Task {
                last_action_date: Some(now().into()),
                next_followup_date: Some((now() + Duration::days(30)).into()),
                ..Task::default()
            },
            // Tier C: 20/3 points
            Task {
                customer_tier: Some("C".to_string()),
                last_action_date: Some(now().into()),
                next_followup_date: Some((now() + Duration::days(30)).into()),
                ..Task::default()
            },
            // Quick tasks are not scored
            Task {
                kind: Some("quick".to_string()),
                customer_tier: Some("A".to_string()),
                ..Task::default()
            },
        ];

        let summary = summarize_tasks_at(tasks, &ScoringConfig::default(), now());
        // (40 + 0 + 6.667) / 3 = 15.556 -> 15.6
        assert_eq!(summary.avg_score, 15.6);
    }
}
