//! Next-task selection.
//!
//! Pending tasks are ranked by [`Task::score`], which weights urgency twice as
//! heavily as importance. Ties keep sequence order, so the earliest of several
//! equally scored tasks wins.

use crate::model::Task;

/// The pending task with the highest score, or `None` when everything is done.
pub fn select_next(tasks: &[Task]) -> Option<&Task> {
    tasks
        .iter()
        .filter(|t| t.is_pending())
        .fold(None::<&Task>, |best, task| match best {
            Some(b) if b.score() >= task.score() => Some(b),
            _ => Some(task),
        })
}

/// Pending tasks ordered by descending score; equal scores stay in sequence order.
pub fn rank_pending(tasks: &[Task]) -> Vec<&Task> {
    let mut pending: Vec<&Task> = tasks.iter().filter(|t| t.is_pending()).collect();
    // sort_by is stable
    pending.sort_by(|a, b| b.score().cmp(&a.score()));
    pending
}
