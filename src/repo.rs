//! Task repository: the authoritative in-process task collection.
//!
//! All board-subsystem reads and writes go through here. Mutations are
//! synchronous and in-memory; persistence, when enabled, is layered on by
//! the entity-store wrapper in `store`. Reads return owned snapshots, so
//! mutating a returned `Vec` never affects stored state.

use crate::config::GENERAL_BOARD_ID;
use crate::error::{BoardError, BoardResult};
use crate::registry::BoardRegistry;
use crate::subscriptions::{ChangeNotifier, MutationKind};
use crate::types::{NewTask, Task, TaskFilter, TaskPatch};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

pub struct TaskRepository {
    /// Most-recent-first: `add_task` prepends.
    tasks: Mutex<Vec<Task>>,
    registry: Arc<BoardRegistry>,
    notifier: Arc<ChangeNotifier>,
}

impl TaskRepository {
    pub fn new(registry: Arc<BoardRegistry>, notifier: Arc<ChangeNotifier>) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            registry,
            notifier,
        }
    }

    /// Repository pre-populated with seed tasks (local/offline mode).
    /// Seed order is preserved as-is; callers provide most-recent-first.
    pub fn with_tasks(
        registry: Arc<BoardRegistry>,
        notifier: Arc<ChangeNotifier>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            registry,
            notifier,
        }
    }

    /// Create a task. The repository assigns a fresh id and creation
    /// timestamp; opaque bags default to empty. The task is prepended so
    /// snapshots read most-recent-first. Form-level validation does not
    /// happen here.
    pub fn add_task(&self, input: NewTask) -> Task {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            assignee: input.assignee,
            priority: input.priority,
            status: input.status,
            due_date: input.due_date,
            squad: input.squad,
            tags: input.tags,
            sort_key: input.sort_key,
            comments: input.comments,
            attachments: input.attachments,
            custom_fields: input.custom_fields,
            created_at: now,
            updated_at: now,
        };

        self.tasks.lock().unwrap().insert(0, task.clone());
        debug!(task_id = %task.id, status = %task.status, "task added");
        self.notifier.broadcast(MutationKind::TaskChanged);
        task
    }

    /// Shallow-merge a patch into the matching task. A missing id is a
    /// silent no-op: concurrent deletion races are expected in a multi-tab
    /// UI and must not surface as errors. A patch that would set `status`
    /// to a stage id defined on no configured board is rejected.
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> BoardResult<()> {
        if let Some(status) = &patch.status
            && !self.registry.board_set().is_known_stage(status)
        {
            return Err(BoardError::invalid_stage(status));
        }

        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            debug!(task_id = %id, "update ignored: task not found");
            return Ok(());
        };

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(assignee) = patch.assignee {
            task.assignee = Some(assignee);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(squad) = patch.squad {
            task.squad = Some(squad);
        }
        if let Some(tags) = patch.tags {
            task.tags = tags;
        }
        if let Some(sort_key) = patch.sort_key {
            task.sort_key = Some(sort_key);
        }
        if let Some(comments) = patch.comments {
            task.comments = comments;
        }
        if let Some(attachments) = patch.attachments {
            task.attachments = attachments;
        }
        if let Some(custom_fields) = patch.custom_fields {
            task.custom_fields = custom_fields;
        }
        task.updated_at = Utc::now();
        let task_id = task.id.clone();
        drop(tasks);

        debug!(task_id = %task_id, "task updated");
        self.notifier.broadcast(MutationKind::TaskChanged);
        Ok(())
    }

    /// Hard delete. No-op if the id is unknown.
    pub fn delete_task(&self, id: &str) {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        drop(tasks);

        if removed {
            debug!(task_id = %id, "task deleted");
            self.notifier.broadcast(MutationKind::TaskChanged);
        } else {
            debug!(task_id = %id, "delete ignored: task not found");
        }
    }

    /// Insert an entity sourced from the entity store, keeping its id and
    /// timestamps. Used by the store wrapper once a remote create has
    /// succeeded; local callers use `add_task`.
    pub fn adopt(&self, task: Task) {
        self.tasks.lock().unwrap().insert(0, task);
        self.notifier.broadcast(MutationKind::TaskChanged);
    }

    /// Replace the whole collection with a snapshot from the entity store.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap() = tasks;
        self.notifier.broadcast(MutationKind::TaskChanged);
    }

    /// Look up a single task.
    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    /// Snapshot of every task, most-recent-first.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    /// Tasks visible on a board: everything for the "general" sentinel (or
    /// any board owning no department), otherwise tasks whose squad equals
    /// the board's department. Unknown board ids yield an empty snapshot.
    pub fn tasks_for_board(&self, board_id: &str) -> Vec<Task> {
        if board_id == GENERAL_BOARD_ID {
            return self.all_tasks();
        }
        let Some(board) = self.registry.find(board_id) else {
            debug!(board_id, "tasks_for_board: unknown board");
            return Vec::new();
        };
        let Some(department) = board.department else {
            return self.all_tasks();
        };
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.squad.as_deref() == Some(department.as_str()))
            .cloned()
            .collect()
    }

    /// Tasks in a filter's board scope. The filter's `board_id` is the
    /// user's board selection and decides which snapshot the projections
    /// receive; the remaining filter criteria are applied inside the view
    /// pass, not here.
    pub fn tasks_for_filter(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks_for_board(&filter.board_id)
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().unwrap().is_empty()
    }
}
