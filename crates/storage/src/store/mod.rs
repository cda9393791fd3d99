#![forbid(unsafe_code)]

mod board;
mod codec;
mod columns;
mod error;
mod init;
mod requests;
mod status;
mod support;
mod task;
mod tasks;

pub use board::{Board, BoardOptions, Column, ColumnBehavior, DEFAULT_COLUMNS};
pub use error::StoreError;
pub use requests::*;
pub use task::{Subtask, Task, TaskMetadata};

use kb_core::ids::TaskId;
use kb_core::taxonomy::Taxonomy;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "index.md";
const TASKS_DIR: &str = "tasks";

/// Handle on one board directory. Holds no board state: every operation
/// re-reads the index and the task files it touches, so concurrent human
/// edits are picked up on the next call.
#[derive(Debug)]
pub struct BoardStore {
    board_dir: PathBuf,
    taxonomy: Taxonomy,
}

impl BoardStore {
    pub fn open(board_dir: impl AsRef<Path>) -> Self {
        Self::with_taxonomy(board_dir, Taxonomy::builtin())
    }

    pub fn with_taxonomy(board_dir: impl AsRef<Path>, taxonomy: Taxonomy) -> Self {
        Self {
            board_dir: board_dir.as_ref().to_path_buf(),
            taxonomy,
        }
    }

    pub fn board_dir(&self) -> &Path {
        &self.board_dir
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn exists(&self) -> bool {
        self.index_path().exists()
    }

    pub(crate) fn index_path(&self) -> PathBuf {
        self.board_dir.join(INDEX_FILE)
    }

    pub(crate) fn tasks_dir(&self) -> PathBuf {
        self.board_dir.join(TASKS_DIR)
    }

    pub(crate) fn task_path(&self, id: &TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.md", id.as_str()))
    }

    pub(crate) fn load_board(&self) -> Result<Board, StoreError> {
        if !self.exists() {
            return Err(StoreError::BoardNotFound {
                path: self.board_dir.clone(),
            });
        }
        let raw = std::fs::read_to_string(self.index_path())?;
        codec::parse_index(&raw)
    }

    pub(crate) fn save_board(&self, board: &Board) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.tasks_dir())?;
        let raw = codec::render_index(board)?;
        std::fs::write(self.index_path(), raw)?;
        Ok(())
    }

    pub(crate) fn load_task(&self, id: &TaskId) -> Result<Task, StoreError> {
        let path = self.task_path(id);
        if !path.exists() {
            return Err(StoreError::TaskNotFound {
                id: id.as_str().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        codec::parse_task(&raw, id.clone())
    }

    pub(crate) fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.tasks_dir())?;
        let raw = codec::render_task(task)?;
        std::fs::write(self.task_path(&task.id), raw)?;
        Ok(())
    }

    /// Column-transition side effects: entering an auto-start column stamps
    /// `started` only if unset; entering an auto-complete column stamps
    /// `completed` on first entry only and raises progress to 1.0. Leaving
    /// a completed column clears nothing.
    pub(crate) fn apply_column_transition(&self, board: &Board, task: &mut Task, column: &str) {
        let behavior = board.behavior(column);
        if behavior.auto_start && task.metadata.started.is_none() {
            task.metadata.started = Some(support::now_rfc3339());
        }
        if behavior.auto_complete && task.metadata.completed.is_none() {
            task.metadata.completed = Some(support::now_rfc3339());
            task.metadata.progress = 1.0;
        }
    }
}
