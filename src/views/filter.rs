//! Shared filter pass applied before every projection.

use crate::config::BoardConfig;
use crate::types::{Task, TaskFilter};

/// Apply board scoping and the view filter to a task snapshot.
///
/// Board scoping comes from the `board` argument (the filter's `board_id`
/// drives the repository fetch, see `TaskRepository::tasks_for_filter`; it
/// is not re-resolved here): a board with no owning department sees every
/// task, otherwise only tasks whose squad matches.
/// The remaining criteria narrow the set further. Every projection calls
/// this and nothing else for visibility, which is what keeps kanban,
/// calendar, and list consistent with each other.
pub fn visible_tasks(tasks: &[Task], board: &BoardConfig, filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| on_board(t, board))
        .filter(|t| matches_filter(t, filter))
        .cloned()
        .collect()
}

fn on_board(task: &Task, board: &BoardConfig) -> bool {
    match &board.department {
        None => true,
        Some(department) => task.squad.as_deref() == Some(department.as_str()),
    }
}

fn matches_filter(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(search) = &filter.search
        && !search.trim().is_empty()
        && !matches_search(task, search)
    {
        return false;
    }
    if let Some(assignee) = &filter.assignee
        && task.assignee.as_deref() != Some(assignee.as_str())
    {
        return false;
    }
    if let Some(priority) = filter.priority
        && task.priority != priority
    {
        return false;
    }
    if let Some(status) = &filter.status
        && task.status != *status
    {
        return false;
    }
    if filter.due_from.is_some() || filter.due_to.is_some() {
        let Some(due) = task.due_date else {
            return false;
        };
        if let Some(from) = filter.due_from
            && due < from
        {
            return false;
        }
        if let Some(to) = filter.due_to
            && due > to
        {
            return false;
        }
    }
    true
}

/// Case-insensitive substring match over title, description, and tags.
fn matches_search(task: &Task, search: &str) -> bool {
    let needle = search.to_lowercase();
    if task.title.to_lowercase().contains(&needle) {
        return true;
    }
    if let Some(description) = &task.description
        && description.to_lowercase().contains(&needle)
    {
        return true;
    }
    task.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}
