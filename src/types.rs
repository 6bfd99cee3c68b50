//! Core data model for the board subsystem.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Task priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// All priority values, low to high. Metric breakdowns iterate this so
    /// every bucket is present even when its count is zero.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

/// Parse a priority string ("low", "medium", "high").
/// Unrecognized values normalize to `Medium`.
pub fn parse_priority(s: &str) -> Priority {
    match s.to_lowercase().as_str() {
        "high" => Priority::High,
        "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Board-agnostic semantic status bucket. Each stage of a board maps into
/// exactly one bucket; metrics never look at raw stage ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl StatusBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBucket::Open => "open",
            StatusBucket::InProgress => "in_progress",
            StatusBucket::Completed => "completed",
        }
    }

    pub const ALL: [StatusBucket; 3] = [
        StatusBucket::Open,
        StatusBucket::InProgress,
        StatusBucket::Completed,
    ];
}

/// A task on a board.
///
/// `status` is a stage id into a board configuration's stage list. `squad`
/// routes the task to its department board; the "general" board aggregates
/// all tasks regardless of squad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub squad: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Explicit ordering key within a kanban column. Tasks without one sort
    /// by creation time, most recent first.
    pub sort_key: Option<i64>,

    // Opaque bags: stored and returned verbatim, never interpreted here.
    #[serde(default)]
    pub comments: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. The repository assigns id and timestamps;
/// callers never supply them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub squad: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub sort_key: Option<i64>,
    #[serde(default)]
    pub comments: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

/// Partial-field update payload. `None` fields leave the stored value
/// untouched; shallow merge, last-write-wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub squad: Option<String>,
    pub tags: Option<Vec<String>>,
    pub sort_key: Option<i64>,
    pub comments: Option<Vec<Value>>,
    pub attachments: Option<Vec<Value>>,
    pub custom_fields: Option<Map<String, Value>>,
}

impl TaskPatch {
    /// Patch that only moves a task to another stage.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

/// Ephemeral per-view filter state. Created on view mount, mutated by user
/// interaction, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// The user's board selection; `TaskRepository::tasks_for_filter` reads
    /// it to pick the snapshot a projection receives. The "general"
    /// sentinel selects all tasks.
    pub board_id: String,
    /// Case-insensitive substring match over title, description, and tags.
    pub search: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    /// Inclusive due-date range. A task with no due date only passes when
    /// no range is set.
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

impl TaskFilter {
    /// Filter scoped to a board with no other criteria.
    pub fn board(board_id: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            ..Self::default()
        }
    }
}
