//! Board configuration registry.
//!
//! Holds the configured boards and tracks which one is "current" for
//! rendering. The current board lives behind an `ArcSwap` so reads are
//! lock-free and `update_board` can refresh the pointer in place; a stale
//! `current_board()` after an update is the bug class this avoids.
//!
//! Registry operations never fail at runtime: unknown board ids are no-ops
//! for mutations and `None` for lookups. The only throwing path is
//! construction with a malformed board set.

use crate::config::{BoardConfig, BoardPatch, BoardSet};
use crate::error::{BoardError, BoardResult};
use crate::subscriptions::{ChangeNotifier, MutationKind};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct BoardRegistry {
    boards: Mutex<Vec<BoardConfig>>,
    current: ArcSwap<BoardConfig>,
    notifier: Arc<ChangeNotifier>,
}

impl BoardRegistry {
    /// Create a registry from a validated board set. The first board becomes
    /// the current selection, so `current_board` is never absent.
    pub fn new(set: BoardSet, notifier: Arc<ChangeNotifier>) -> BoardResult<Self> {
        set.validate()
            .map_err(|e| BoardError::malformed(format!("{e:#}")))?;
        let current = Arc::new(set.boards[0].clone());
        Ok(Self {
            boards: Mutex::new(set.boards),
            current: ArcSwap::new(current),
            notifier,
        })
    }

    /// Registry over the built-in default board set.
    pub fn with_defaults(notifier: Arc<ChangeNotifier>) -> Self {
        // Built-in defaults are valid by construction.
        Self::new(BoardSet::default(), notifier).expect("default board set is valid")
    }

    /// All configured boards, as an owned snapshot.
    pub fn boards(&self) -> Vec<BoardConfig> {
        self.boards.lock().unwrap().clone()
    }

    /// Snapshot of the full set, for stage lookups and bucket mapping.
    pub fn board_set(&self) -> BoardSet {
        BoardSet {
            boards: self.boards(),
        }
    }

    /// Look up a board by id.
    pub fn find(&self, board_id: &str) -> Option<BoardConfig> {
        self.boards
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == board_id)
            .cloned()
    }

    /// The active board. Falls back to the first configured board when the
    /// selection has never been set.
    pub fn current_board(&self) -> Arc<BoardConfig> {
        self.current.load_full()
    }

    /// Switch the active board. Pure selection state: no validation against
    /// existing tasks, no-op for unknown ids.
    pub fn set_current(&self, board_id: &str) {
        let Some(board) = self.find(board_id) else {
            debug!(board_id, "set_current ignored: unknown board");
            return;
        };
        self.current.store(Arc::new(board));
        self.notifier.broadcast(MutationKind::BoardChanged);
    }

    /// Shallow-merge a patch into the matching board. No-op for unknown ids.
    /// If the patched board is the current one, the current reference is
    /// refreshed to the merged value.
    pub fn update_board(&self, board_id: &str, patch: BoardPatch) {
        let merged = {
            let mut boards = self.boards.lock().unwrap();
            let Some(board) = boards.iter_mut().find(|b| b.id == board_id) else {
                debug!(board_id, "update_board ignored: unknown board");
                return;
            };
            if let Some(name) = patch.name {
                board.name = name;
            }
            if let Some(color) = patch.color {
                board.color = color;
            }
            if let Some(department) = patch.department {
                board.department = department;
            }
            if let Some(stages) = patch.stages {
                board.stages = stages;
            }
            board.clone()
        };

        if self.current.load().id == board_id {
            self.current.store(Arc::new(merged));
        }
        self.notifier.broadcast(MutationKind::BoardChanged);
    }
}
