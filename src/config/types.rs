//! Board configuration types and structures.
//!
//! Boards are seeded out-of-band (admin action or YAML file); the core only
//! reads them. A board owns an ordered list of stages; each stage maps to a
//! board-agnostic semantic bucket so metrics never depend on raw stage ids.

use crate::types::StatusBucket;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel board id that aggregates tasks from every squad.
pub const GENERAL_BOARD_ID: &str = "general";

/// A single column of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default = "default_stage_color")]
    pub color: String,
    /// Left-to-right column position, ascending. Values need not be
    /// contiguous; ties keep insertion order (stable sort).
    #[serde(default)]
    pub order: i32,
    /// Semantic bucket this stage maps to for metrics.
    #[serde(default)]
    pub bucket: StatusBucket,
}

fn default_stage_color() -> String {
    "#94a3b8".to_string()
}

impl Stage {
    pub fn new(id: &str, name: &str, order: i32, bucket: StatusBucket) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: default_stage_color(),
            order,
            bucket,
        }
    }
}

/// A named board definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_board_color")]
    pub color: String,
    /// Owning department. `None` means all departments (the general board).
    #[serde(default)]
    pub department: Option<String>,
    pub stages: Vec<Stage>,
}

fn default_board_color() -> String {
    "#6366f1".to_string()
}

impl BoardConfig {
    /// Check whether a stage id is defined on this board.
    pub fn has_stage(&self, stage_id: &str) -> bool {
        self.stages.iter().any(|s| s.id == stage_id)
    }

    /// Look up a stage by id.
    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Stages sorted by `order` ascending, insertion order on ties.
    pub fn ordered_stages(&self) -> Vec<&Stage> {
        let mut stages: Vec<&Stage> = self.stages.iter().collect();
        stages.sort_by_key(|s| s.order);
        stages
    }

    /// Whether this is the all-departments sentinel board.
    pub fn is_general(&self) -> bool {
        self.id == GENERAL_BOARD_ID
    }

    /// Validate structural invariants: non-empty stage list, unique stage ids.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(anyhow!("board '{}' has no stages", self.id));
        }
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.id.as_str()) {
                return Err(anyhow!(
                    "board '{}' has duplicate stage id '{}'",
                    self.id,
                    stage.id
                ));
            }
        }
        Ok(())
    }
}

/// Partial update payload for a board. `None` fields are left untouched.
/// Stage edits replace the whole stage list (admin CRUD granularity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub department: Option<Option<String>>,
    pub stages: Option<Vec<Stage>>,
}

/// The full set of configured boards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSet {
    #[serde(default = "BoardSet::default_boards")]
    pub boards: Vec<BoardConfig>,
}

impl Default for BoardSet {
    fn default() -> Self {
        Self {
            boards: Self::default_boards(),
        }
    }
}

impl BoardSet {
    /// Built-in board set: the general board plus one board per department,
    /// each with a todo/doing/review/done pipeline.
    pub fn default_boards() -> Vec<BoardConfig> {
        let pipeline = || {
            vec![
                Stage::new("todo", "To Do", 0, StatusBucket::Open),
                Stage::new("doing", "Doing", 1, StatusBucket::InProgress),
                Stage::new("review", "Review", 2, StatusBucket::InProgress),
                Stage::new("done", "Done", 3, StatusBucket::Completed),
            ]
        };

        vec![
            BoardConfig {
                id: GENERAL_BOARD_ID.to_string(),
                name: "General".to_string(),
                color: default_board_color(),
                department: None,
                stages: pipeline(),
            },
            BoardConfig {
                id: "engineering".to_string(),
                name: "Engineering".to_string(),
                color: "#22c55e".to_string(),
                department: Some("engineering".to_string()),
                stages: pipeline(),
            },
            BoardConfig {
                id: "design".to_string(),
                name: "Design".to_string(),
                color: "#f59e0b".to_string(),
                department: Some("design".to_string()),
                stages: pipeline(),
            },
            BoardConfig {
                id: "marketing".to_string(),
                name: "Marketing".to_string(),
                color: "#ec4899".to_string(),
                department: Some("marketing".to_string()),
                stages: pipeline(),
            },
        ]
    }

    /// Look up a board by id.
    pub fn find(&self, board_id: &str) -> Option<&BoardConfig> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Check whether a stage id is defined on at least one board. The data
    /// model requires every task status to satisfy this.
    pub fn is_known_stage(&self, stage_id: &str) -> bool {
        self.boards.iter().any(|b| b.has_stage(stage_id))
    }

    /// Resolve a stage id to its semantic bucket. Stage ids defined on no
    /// board fall into `Open` so completion totals always equal task count.
    pub fn bucket_for(&self, stage_id: &str) -> StatusBucket {
        self.boards
            .iter()
            .find_map(|b| b.stage(stage_id).map(|s| s.bucket))
            .unwrap_or(StatusBucket::Open)
    }

    /// Validate the whole set: non-empty, unique board ids, each board valid.
    pub fn validate(&self) -> Result<()> {
        if self.boards.is_empty() {
            return Err(anyhow!("at least one board must be defined"));
        }
        let mut seen = HashSet::new();
        for board in &self.boards {
            if !seen.insert(board.id.as_str()) {
                return Err(anyhow!("duplicate board id '{}'", board.id));
            }
            board.validate()?;
        }
        Ok(())
    }
}
