#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    pub fn move_task(&self, id: &str, target_column: &str) -> Result<TaskMoved, StoreError> {
        let mut board = self.load_board()?;
        let id = TaskId::try_new(id)?;

        let from_column = board.move_task(id.as_str(), target_column)?;

        let mut task = self.load_task(&id)?;
        task.metadata.updated = Some(support::now_rfc3339());
        self.apply_column_transition(&board, &mut task, target_column);

        self.save_task(&task)?;
        self.save_board(&board)?;

        Ok(TaskMoved {
            id: id.into_string(),
            from_column,
            to_column: target_column.to_string(),
        })
    }
}
