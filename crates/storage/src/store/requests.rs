#![forbid(unsafe_code)]

use super::board::BoardOptions;
use super::task::{Subtask, TaskMetadata};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct BoardInitRequest {
    pub name: String,
    pub description: String,
    /// Defaults to Backlog / In Progress / Done / Archive when absent.
    pub columns: Option<Vec<String>>,
    /// Overrides the conventional column behavior mapping when present.
    pub options: Option<BoardOptions>,
}

#[derive(Clone, Debug, Default)]
pub struct TaskCreateRequest {
    pub name: String,
    pub description: String,
    /// Defaults to the board's first column.
    pub column: Option<String>,
    pub tags: Vec<String>,
    pub assigned: Option<String>,
    pub due: Option<String>,
    pub started: Option<String>,
    pub completed: Option<String>,
    pub subtasks: Vec<String>,
}

/// Partial update. `None` leaves a field unchanged; for the clearable
/// fields the inner `Option` distinguishes `Some(None)` ("clear it") from
/// `Some(Some(value))` ("set it").
#[derive(Clone, Debug, Default)]
pub struct TaskUpdateRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Routed through the same column-transition rules as a move.
    pub column: Option<String>,
    pub tags: Option<Vec<String>>,
    pub progress: Option<f64>,
    pub assigned: Option<Option<String>>,
    pub due: Option<Option<String>>,
    pub started: Option<Option<String>>,
    pub completed: Option<Option<String>>,
    pub subtasks: Option<Vec<Subtask>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardCreated {
    pub path: PathBuf,
    pub index_path: PathBuf,
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskCreated {
    pub id: String,
    pub column: String,
    pub path: PathBuf,
    /// Tags outside the taxonomy: accepted, surfaced as advisory.
    pub freeform_tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskMoved {
    pub id: String,
    pub from_column: String,
    pub to_column: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskUpdated {
    pub id: String,
    /// Present when a name change re-derived the id and renamed the file.
    pub previous_id: Option<String>,
    pub column: String,
    pub path: PathBuf,
    pub freeform_tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskDeleted {
    pub id: String,
    pub removed_from: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnAdded {
    pub column: String,
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnReordered {
    pub column: String,
    pub previous_order: Vec<String>,
    pub new_order: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchAddFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of `batch_add_tasks`: the one operation with per-entry
/// partial-failure semantics.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchAddReport {
    pub created: Vec<TaskCreated>,
    pub failed: Vec<BatchAddFailure>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnStatus {
    pub name: String,
    pub hidden: bool,
    pub tasks: Vec<String>,
    /// Sum of the workload weights of the column's tasks.
    pub total_workload: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardStatus {
    pub name: String,
    pub description: String,
    pub columns: Vec<ColumnStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskDetail {
    pub id: String,
    pub name: String,
    pub column: String,
    pub description: String,
    pub metadata: TaskMetadata,
    pub subtasks: Vec<Subtask>,
    pub relations: Vec<String>,
    pub comments: Vec<String>,
    pub workload_weight: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnTasks {
    pub column: String,
    pub tasks: Vec<TaskDetail>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskList {
    pub total: usize,
    pub columns: Vec<ColumnTasks>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagCategory {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkloadTag {
    pub tag: String,
    pub weight: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TagCatalog {
    pub categories: Vec<TagCategory>,
    pub workload: Vec<WorkloadTag>,
}
