//! Kanban projection: one column per stage, tasks grouped by status.

use super::filter::visible_tasks;
use crate::config::{BoardConfig, Stage};
use crate::types::{Task, TaskFilter};
use std::cmp::Ordering;

/// A rendered kanban column.
#[derive(Debug, Clone)]
pub struct KanbanColumn {
    pub stage: Stage,
    pub tasks: Vec<Task>,
}

/// A rendered kanban board.
#[derive(Debug, Clone)]
pub struct KanbanView {
    pub board_id: String,
    pub columns: Vec<KanbanColumn>,
}

impl KanbanView {
    /// All tasks across columns, left to right. Useful for comparing the
    /// kanban and list projections.
    pub fn flatten(&self) -> Vec<&Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter()).collect()
    }

    pub fn column(&self, stage_id: &str) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.stage.id == stage_id)
    }
}

/// Build the kanban projection for a board.
///
/// Columns follow the board's stage order (ascending, stable on ties).
/// Stage membership is authoritative: a task whose status is not a stage of
/// *this* board is dropped from this board's kanban, even when its squad
/// matches (it may have been created under a different board).
pub fn kanban_view(tasks: &[Task], board: &BoardConfig, filter: &TaskFilter) -> KanbanView {
    let visible = visible_tasks(tasks, board, filter);

    let columns = board
        .ordered_stages()
        .into_iter()
        .map(|stage| {
            let mut column_tasks: Vec<Task> = visible
                .iter()
                .filter(|t| t.status == stage.id)
                .cloned()
                .collect();
            column_tasks.sort_by(column_order);
            KanbanColumn {
                stage: stage.clone(),
                tasks: column_tasks,
            }
        })
        .collect();

    KanbanView {
        board_id: board.id.clone(),
        columns,
    }
}

/// In-column ordering: explicit sort keys first (ascending), then creation
/// time descending. The input snapshot is already most-recent-first, so the
/// stable sort preserves repository insertion order for ties.
fn column_order(a: &Task, b: &Task) -> Ordering {
    match (a.sort_key, b.sort_key) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardSet;
    use crate::types::Priority;
    use chrono::{TimeZone, Utc};

    fn task_at(title: &str, status: &str, secs: i64, sort_key: Option<i64>) -> Task {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        Task {
            id: title.to_string(),
            title: title.to_string(),
            description: None,
            assignee: None,
            priority: Priority::Medium,
            status: status.to_string(),
            due_date: None,
            squad: None,
            tags: vec![],
            sort_key,
            comments: vec![],
            attachments: vec![],
            custom_fields: serde_json::Map::new(),
            created_at: at,
            updated_at: at,
        }
    }

    fn general() -> crate::config::BoardConfig {
        BoardSet::default().find("general").unwrap().clone()
    }

    #[test]
    fn groups_tasks_under_their_stage_column() {
        let board = general();
        let tasks = vec![
            task_at("a", "todo", 1, None),
            task_at("b", "doing", 2, None),
            task_at("c", "todo", 3, None),
        ];
        let view = kanban_view(&tasks, &board, &TaskFilter::board("general"));

        assert_eq!(view.column("todo").unwrap().tasks.len(), 2);
        assert_eq!(view.column("doing").unwrap().tasks.len(), 1);
        assert_eq!(view.column("done").unwrap().tasks.len(), 0);
    }

    #[test]
    fn columns_follow_stage_order() {
        let board = general();
        let view = kanban_view(&[], &board, &TaskFilter::board("general"));
        let ids: Vec<&str> = view.columns.iter().map(|c| c.stage.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "doing", "review", "done"]);
    }

    #[test]
    fn foreign_status_tasks_are_dropped() {
        let board = general();
        let tasks = vec![
            task_at("known", "todo", 1, None),
            task_at("foreign", "triage", 2, None),
        ];
        let view = kanban_view(&tasks, &board, &TaskFilter::board("general"));
        assert_eq!(view.flatten().len(), 1);
        assert_eq!(view.flatten()[0].title, "known");
    }

    #[test]
    fn in_column_order_recent_first_without_sort_keys() {
        let board = general();
        // Snapshot is most-recent-first, as the repository returns it.
        let tasks = vec![
            task_at("newest", "todo", 30, None),
            task_at("middle", "todo", 20, None),
            task_at("oldest", "todo", 10, None),
        ];
        let view = kanban_view(&tasks, &board, &TaskFilter::board("general"));
        let titles: Vec<&str> = view.column("todo").unwrap().tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn explicit_sort_keys_come_first_ascending() {
        let board = general();
        let tasks = vec![
            task_at("unkeyed", "todo", 40, None),
            task_at("second", "todo", 10, Some(2)),
            task_at("first", "todo", 5, Some(1)),
        ];
        let view = kanban_view(&tasks, &board, &TaskFilter::board("general"));
        let titles: Vec<&str> = view.column("todo").unwrap().tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "unkeyed"]);
    }
}
