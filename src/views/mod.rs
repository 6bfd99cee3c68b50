//! Pure view projections over the task collection.
//!
//! Each projection is a stateless function of (tasks, board config, filter
//! state) and holds no persisted state of its own. All three run the same
//! filter pass first, so applying one filter to any projection yields the
//! same set of visible tasks; only the grouping/shape differs.

mod calendar;
mod filter;
mod kanban;
mod list;

pub use calendar::{CalendarView, DAY_PREVIEW_LIMIT, DayCell, calendar_view};
pub use filter::visible_tasks;
pub use kanban::{KanbanColumn, KanbanView, kanban_view};
pub use list::{ListView, SortField, SortOrder, list_view};
