//! Calendar projection: tasks grouped by due-date day on a month grid.

use super::filter::visible_tasks;
use crate::config::BoardConfig;
use crate::types::{Task, TaskFilter};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// Maximum task previews shown in one day cell; the rest become the
/// overflow counter.
pub const DAY_PREVIEW_LIMIT: usize = 3;

/// One cell of the month grid.
#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the padding days pulled in from adjacent months. Padding
    /// cells render as placeholders and never carry tasks.
    pub in_month: bool,
    /// Up to [`DAY_PREVIEW_LIMIT`] task previews for this day.
    pub previews: Vec<Task>,
    /// Tasks beyond the preview limit.
    pub overflow: usize,
}

impl DayCell {
    /// Total tasks due on this day.
    pub fn task_count(&self) -> usize {
        self.previews.len() + self.overflow
    }
}

/// A rendered month grid. `days` always holds complete weeks: its length is
/// a multiple of 7, with the requested month's real days as a contiguous
/// sub-range between the leading and trailing padding.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayCell>,
}

impl CalendarView {
    /// The grid as 7-column rows.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.days.chunks(7)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|c| c.date == date)
    }
}

/// Build the calendar projection for one displayed month.
///
/// Day-level granularity: a task lands on the cell matching its `due_date`;
/// undated tasks do not appear. The grid runs from the Monday on or before
/// the 1st to the Sunday on or after the last day of the month.
pub fn calendar_view(
    tasks: &[Task],
    board: &BoardConfig,
    filter: &TaskFilter,
    year: i32,
    month: u32,
) -> CalendarView {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        debug!(year, month, "calendar_view: invalid month");
        return CalendarView {
            year,
            month,
            days: Vec::new(),
        };
    };
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of next month is always a valid date");
    let last = first_of_next - Days::new(1);

    let visible = visible_tasks(tasks, board, filter);

    // Pad both ends with adjacent-month days so every row is a full week.
    let grid_start = first - Days::new(u64::from(first.weekday().num_days_from_monday()));
    let grid_end = last + Days::new(u64::from(6 - last.weekday().num_days_from_monday()));

    let mut days = Vec::new();
    let mut date = grid_start;
    while date <= grid_end {
        let in_month = date.month() == month && date.year() == year;
        let cell = if in_month {
            let mut due: Vec<Task> = visible
                .iter()
                .filter(|t| t.due_date == Some(date))
                .cloned()
                .collect();
            let overflow = due.len().saturating_sub(DAY_PREVIEW_LIMIT);
            due.truncate(DAY_PREVIEW_LIMIT);
            DayCell {
                date,
                in_month,
                previews: due,
                overflow,
            }
        } else {
            DayCell {
                date,
                in_month,
                previews: Vec::new(),
                overflow: 0,
            }
        };
        days.push(cell);
        date = date + Days::new(1);
    }

    CalendarView { year, month, days }
}
