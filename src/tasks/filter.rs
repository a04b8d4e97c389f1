use chrono::NaiveDateTime;
use std::cmp::Ordering;

use super::types::Task;

/// Open tasks split into the scored worklist and the quick-task list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worklist {
    /// Open non-quick tasks, in fetch order
    pub prioritized: Vec<Task>,
    /// Open quick tasks, earliest due date first
    pub quick: Vec<Task>,
}

impl Worklist {
    pub fn open_count(&self) -> usize {
        self.prioritized.len() + self.quick.len()
    }
}

/// Keep tasks that are not done, in fetch order: earliest next follow-up
/// first, falling back to the creation time when no follow-up is set.
/// Tasks with neither (or with unparseable dates) go last. A missing status
/// counts as open.
pub fn open_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut open: Vec<Task> = tasks.into_iter().filter(|t| !t.is_done()).collect();
    open.sort_by(|a, b| earliest_first(fetch_anchor(a), fetch_anchor(b)));
    open
}

/// Split open tasks into prioritized and quick tasks
pub fn split_worklist(tasks: Vec<Task>) -> Worklist {
    let (mut quick, prioritized): (Vec<Task>, Vec<Task>) =
        open_tasks(tasks).into_iter().partition(Task::is_quick);
    quick.sort_by(|a, b| earliest_first(a.due_at(), b.due_at()));
    Worklist { prioritized, quick }
}

/// Open tasks that take part in prioritization (everything except quick tasks)
pub fn prioritized_tasks(tasks: Vec<Task>) -> Vec<Task> {
    split_worklist(tasks).prioritized
}

fn fetch_anchor(task: &Task) -> Option<NaiveDateTime> {
    task.next_followup_at().or_else(|| task.created_at())
}

fn earliest_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
