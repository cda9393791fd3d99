#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    /// Drop the index reference first, then the file: an interruption in
    /// between leaves an orphan task file, never an index entry that
    /// points at nothing.
    pub fn delete_task(&self, id: &str) -> Result<TaskDeleted, StoreError> {
        let mut board = self.load_board()?;
        let id = TaskId::try_new(id)?;

        let file_exists = self.task_path(&id).exists();
        let Some(removed_from) = board.remove_task(id.as_str()) else {
            return Err(StoreError::TaskNotFound {
                id: id.into_string(),
            });
        };
        self.save_board(&board)?;
        if file_exists {
            std::fs::remove_file(self.task_path(&id))?;
        }

        Ok(TaskDeleted {
            id: id.into_string(),
            removed_from,
        })
    }
}
