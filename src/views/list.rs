//! List projection: flat sortable rows, no grouping.

use super::filter::visible_tasks;
use crate::config::BoardConfig;
use crate::types::{Task, TaskFilter};
use std::cmp::Ordering;

/// Field a list view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    DueDate,
    Priority,
    #[default]
    CreatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    /// Default: priority is descending (higher first), dates are descending.
    #[default]
    Desc,
}

/// A rendered flat list.
#[derive(Debug, Clone)]
pub struct ListView {
    pub board_id: String,
    pub rows: Vec<Task>,
}

/// Build the list projection: same filter pass as the other views, one row
/// per task, client-side sort. Unlike the kanban projection, rows keep
/// tasks whose status is not a stage of this board; stage clamping is a
/// kanban column concern.
pub fn list_view(
    tasks: &[Task],
    board: &BoardConfig,
    filter: &TaskFilter,
    sort: SortField,
    order: SortOrder,
) -> ListView {
    let mut rows = visible_tasks(tasks, board, filter);
    rows.sort_by(|a, b| compare(a, b, sort, order));
    ListView {
        board_id: board.id.clone(),
        rows,
    }
}

fn directed(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => cmp,
        SortOrder::Desc => cmp.reverse(),
    }
}

/// Field comparison. Undated tasks sort after dated ones regardless of
/// direction, so they never float to the top of a deadline view.
fn compare(a: &Task, b: &Task, sort: SortField, order: SortOrder) -> Ordering {
    match sort {
        SortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y), order),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::Priority => directed(a.priority.cmp(&b.priority), order),
        SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at), order),
        SortField::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase()), order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardSet;
    use crate::types::Priority;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(title: &str, priority: Priority, due: Option<NaiveDate>, secs: i64) -> Task {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        Task {
            id: title.to_string(),
            title: title.to_string(),
            description: None,
            assignee: None,
            priority,
            status: "todo".to_string(),
            due_date: due,
            squad: None,
            tags: vec![],
            sort_key: None,
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

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn default_sort_is_created_at_descending() {
        let board = general();
        let tasks = vec![
            task("old", Priority::Medium, None, 10),
            task("new", Priority::Medium, None, 20),
        ];
        let view = list_view(
            &tasks,
            &board,
            &TaskFilter::board("general"),
            SortField::default(),
            SortOrder::default(),
        );
        let titles: Vec<&str> = view.rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[test]
    fn priority_desc_puts_high_first() {
        let board = general();
        let tasks = vec![
            task("low", Priority::Low, None, 1),
            task("high", Priority::High, None, 2),
            task("medium", Priority::Medium, None, 3),
        ];
        let view = list_view(
            &tasks,
            &board,
            &TaskFilter::board("general"),
            SortField::Priority,
            SortOrder::Desc,
        );
        let titles: Vec<&str> = view.rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "medium", "low"]);
    }

    #[test]
    fn due_date_asc_keeps_undated_last() {
        let board = general();
        let tasks = vec![
            task("undated", Priority::Medium, None, 1),
            task("later", Priority::Medium, Some(date(20)), 2),
            task("sooner", Priority::Medium, Some(date(5)), 3),
        ];
        let view = list_view(
            &tasks,
            &board,
            &TaskFilter::board("general"),
            SortField::DueDate,
            SortOrder::Asc,
        );
        let titles: Vec<&str> = view.rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later", "undated"]);
    }

    #[test]
    fn due_date_desc_still_keeps_undated_last() {
        let board = general();
        let tasks = vec![
            task("undated", Priority::Medium, None, 1),
            task("later", Priority::Medium, Some(date(20)), 2),
            task("sooner", Priority::Medium, Some(date(5)), 3),
        ];
        let view = list_view(
            &tasks,
            &board,
            &TaskFilter::board("general"),
            SortField::DueDate,
            SortOrder::Desc,
        );
        let titles: Vec<&str> = view.rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["later", "sooner", "undated"]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let board = general();
        let tasks = vec![
            task("beta", Priority::Medium, None, 1),
            task("Alpha", Priority::Medium, None, 2),
        ];
        let view = list_view(
            &tasks,
            &board,
            &TaskFilter::board("general"),
            SortField::Title,
            SortOrder::Asc,
        );
        let titles: Vec<&str> = view.rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "beta"]);
    }

    #[test]
    fn rows_keep_foreign_status_tasks() {
        let board = general();
        let mut foreign = task("foreign", Priority::Medium, None, 1);
        foreign.status = "triage".to_string();
        let view = list_view(
            &[foreign],
            &board,
            &TaskFilter::board("general"),
            SortField::default(),
            SortOrder::default(),
        );
        assert_eq!(view.rows.len(), 1);
    }
}
