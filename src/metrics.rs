//! Read-time aggregates over a task snapshot.
//!
//! Every function takes `today` as a parameter: "today" is the wall-clock
//! date at render time, never a stored or cached value, so metrics can
//! never go stale between reads. Terminal-stage detection goes through the
//! board set's stage-to-bucket mapping; no stage id literal appears here.

use crate::config::BoardSet;
use crate::types::{Priority, StatusBucket, Task};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Tasks due strictly before `today` whose stage has not reached the
/// completed bucket, most recent snapshot order preserved.
pub fn overdue_tasks(tasks: &[Task], boards: &BoardSet, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date.is_some_and(|d| d < today)
                && boards.bucket_for(&t.status) != StatusBucket::Completed
        })
        .cloned()
        .collect()
}

pub fn overdue_count(tasks: &[Task], boards: &BoardSet, today: NaiveDate) -> usize {
    overdue_tasks(tasks, boards, today).len()
}

/// Tasks due on `today` (same calendar day) and not yet completed.
pub fn due_today(tasks: &[Task], boards: &BoardSet, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date == Some(today)
                && boards.bucket_for(&t.status) != StatusBucket::Completed
        })
        .cloned()
        .collect()
}

/// Task counts per priority. Every priority bucket is present, zero when
/// empty, never omitted.
pub fn priority_breakdown(tasks: &[Task]) -> HashMap<Priority, usize> {
    let mut counts: HashMap<Priority, usize> =
        Priority::ALL.iter().map(|p| (*p, 0)).collect();
    for task in tasks {
        *counts.entry(task.priority).or_insert(0) += 1;
    }
    counts
}

/// Task counts per semantic status bucket, resolved through the board set's
/// stage mapping. Every bucket is present; totals always equal the task
/// count (stage ids unknown to every board land in the open bucket).
pub fn completion_counts(tasks: &[Task], boards: &BoardSet) -> HashMap<StatusBucket, usize> {
    let mut counts: HashMap<StatusBucket, usize> =
        StatusBucket::ALL.iter().map(|b| (*b, 0)).collect();
    for task in tasks {
        *counts.entry(boards.bucket_for(&task.status)).or_insert(0) += 1;
    }
    counts
}

/// Per-user or per-board metric summary, computed in one pass over a
/// snapshot already filtered to the assignee or board of interest.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub overdue: usize,
    pub due_today: usize,
    pub by_priority: HashMap<Priority, usize>,
    pub by_bucket: HashMap<StatusBucket, usize>,
}

pub fn summarize(tasks: &[Task], boards: &BoardSet, today: NaiveDate) -> MetricsSummary {
    MetricsSummary {
        overdue: overdue_count(tasks, boards, today),
        due_today: due_today(tasks, boards, today).len(),
        by_priority: priority_breakdown(tasks),
        by_bucket: completion_counts(tasks, boards),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(title: &str, status: &str, priority: Priority, due: Option<NaiveDate>) -> Task {
        let now = Utc::now();
        Task {
            id: title.to_string(),
            title: title.to_string(),
            description: None,
            assignee: None,
            priority,
            status: status.to_string(),
            due_date: due,
            squad: None,
            tags: vec![],
            sort_key: None,
            comments: vec![],
            attachments: vec![],
            custom_fields: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn overdue_excludes_completed_bucket_and_future_dates() {
        let boards = BoardSet::default();
        let today = date(10);
        let tasks = vec![
            task("late", "doing", Priority::Medium, Some(date(9))),
            task("late-done", "done", Priority::Medium, Some(date(9))),
            task("today", "doing", Priority::Medium, Some(date(10))),
            task("future", "doing", Priority::Medium, Some(date(11))),
            task("undated", "doing", Priority::Medium, None),
        ];

        let overdue = overdue_tasks(&tasks, &boards, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "late");
    }

    #[test]
    fn completing_a_task_removes_it_from_overdue_on_next_read() {
        let boards = BoardSet::default();
        let today = date(10);
        let mut tasks = vec![task("late", "doing", Priority::Medium, Some(date(9)))];
        assert_eq!(overdue_count(&tasks, &boards, today), 1);

        // Metrics are recomputed, never cached: the next read reflects the
        // status change with no explicit invalidation.
        tasks[0].status = "done".to_string();
        assert_eq!(overdue_count(&tasks, &boards, today), 0);
    }

    #[test]
    fn overdue_is_monotone_as_today_advances() {
        let boards = BoardSet::default();
        let tasks = vec![
            task("a", "doing", Priority::Medium, Some(date(5))),
            task("b", "doing", Priority::Medium, Some(date(10))),
            task("c", "doing", Priority::Medium, Some(date(15))),
        ];

        let mut prev = 0;
        for day in 1..=20 {
            let count = overdue_count(&tasks, &boards, date(day));
            assert!(count >= prev, "overdue shrank with no mutations");
            prev = count;
        }
        // Idempotent under repeated identical today.
        assert_eq!(
            overdue_count(&tasks, &boards, date(12)),
            overdue_count(&tasks, &boards, date(12))
        );
    }

    #[test]
    fn due_today_matches_calendar_day_only() {
        let boards = BoardSet::default();
        let today = date(10);
        let tasks = vec![
            task("today", "todo", Priority::Medium, Some(date(10))),
            task("today-done", "done", Priority::Medium, Some(date(10))),
            task("yesterday", "todo", Priority::Medium, Some(date(9))),
        ];
        let due = due_today(&tasks, &boards, today);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "today");
    }

    #[test]
    fn priority_breakdown_has_all_buckets() {
        let tasks = vec![task("a", "todo", Priority::High, None)];
        let counts = priority_breakdown(&tasks);
        assert_eq!(counts[&Priority::High], 1);
        assert_eq!(counts[&Priority::Medium], 0);
        assert_eq!(counts[&Priority::Low], 0);
    }

    #[test]
    fn completion_counts_total_equals_task_count() {
        let boards = BoardSet::default();
        let tasks = vec![
            task("a", "todo", Priority::Medium, None),
            task("b", "doing", Priority::Medium, None),
            task("c", "review", Priority::Medium, None),
            task("d", "done", Priority::Medium, None),
            // Stage unknown to every board buckets as open.
            task("e", "mystery", Priority::Medium, None),
        ];
        let counts = completion_counts(&tasks, &boards);
        assert_eq!(counts[&StatusBucket::Open], 2);
        assert_eq!(counts[&StatusBucket::InProgress], 2);
        assert_eq!(counts[&StatusBucket::Completed], 1);
        assert_eq!(counts.values().sum::<usize>(), tasks.len());
    }

    #[test]
    fn summarize_combines_all_aggregates() {
        let boards = BoardSet::default();
        let today = date(10);
        let tasks = vec![
            task("late", "doing", Priority::High, Some(date(9))),
            task("today", "todo", Priority::Medium, Some(date(10))),
        ];
        let summary = summarize(&tasks, &boards, today);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.due_today, 1);
        assert_eq!(summary.by_priority[&Priority::High], 1);
        assert_eq!(summary.by_bucket[&StatusBucket::InProgress], 1);
    }
}
