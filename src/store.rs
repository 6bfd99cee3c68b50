//! Entity-store adapter seam and the synced repository wrapper.
//!
//! The core runs fully in memory; persistence is opt-in through the
//! [`EntityStore`] trait. The wrapper calls the store first and applies the
//! in-memory mutation only when the remote call succeeds. An adapter
//! failure means "operation did not take effect" with no partial apply,
//! and the UI can retry against unchanged state.

use crate::error::BoardError;
use crate::registry::BoardRegistry;
use crate::repo::TaskRepository;
use crate::types::{NewTask, Task, TaskPatch};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Remote relational CRUD service for task entities. All calls are
/// asynchronous and fallible; the returned entities are authoritative
/// (the backend may assign ids and timestamps of its own).
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>>;
    async fn create(&self, fields: &NewTask) -> Result<Task>;
    async fn update(&self, id: &str, fields: &TaskPatch) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Outcome category for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

/// Fire-and-forget toast sink. Implementations must not block; the core
/// never treats a notification problem as a mutation failure.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Repository wrapper that persists mutations through an entity store.
pub struct SyncedTasks<S: EntityStore> {
    repo: Arc<TaskRepository>,
    registry: Arc<BoardRegistry>,
    store: S,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl<S: EntityStore> SyncedTasks<S> {
    pub fn new(repo: Arc<TaskRepository>, registry: Arc<BoardRegistry>, store: S) -> Self {
        Self {
            repo,
            registry,
            store,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn notify(&self, kind: NotifyKind, message: &str) {
        if let Some(sink) = &self.sink {
            sink.notify(kind, message);
        }
    }

    /// Create remotely, then adopt the stored entity in memory.
    pub async fn add_task(&self, input: NewTask) -> Result<Task> {
        match self.store.create(&input).await {
            Ok(task) => {
                self.repo.adopt(task.clone());
                self.notify(NotifyKind::Success, "Task created");
                Ok(task)
            }
            Err(err) => {
                warn!("task create failed: {err:#}");
                self.notify(NotifyKind::Error, "Could not create task");
                Err(err)
            }
        }
    }

    /// Update remotely, then merge in memory. The stage check runs before
    /// the remote call so a rejected patch never reaches the backend.
    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<()> {
        if let Some(status) = &patch.status
            && !self.registry.board_set().is_known_stage(status)
        {
            return Err(BoardError::invalid_stage(status).into());
        }

        match self.store.update(id, &patch).await {
            Ok(()) => {
                self.repo.update_task(id, patch)?;
                self.notify(NotifyKind::Success, "Task updated");
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %id, "task update failed: {err:#}");
                self.notify(NotifyKind::Error, "Could not update task");
                Err(err)
            }
        }
    }

    /// Delete remotely, then in memory.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        match self.store.delete(id).await {
            Ok(()) => {
                self.repo.delete_task(id);
                self.notify(NotifyKind::Success, "Task deleted");
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %id, "task delete failed: {err:#}");
                self.notify(NotifyKind::Error, "Could not delete task");
                Err(err)
            }
        }
    }

    /// Reload the full collection from the store, replacing local state.
    pub async fn refresh(&self) -> Result<usize> {
        let tasks = self.store.list().await?;
        let count = tasks.len();
        self.repo.replace_all(tasks);
        Ok(count)
    }
}
