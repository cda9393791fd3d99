#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    /// Rewrite one column's ordering. The ids must be a permutation of the
    /// column's current tasks; no task enters or leaves the column here.
    pub fn reorder_tasks(
        &self,
        column: &str,
        ids: &[String],
    ) -> Result<ColumnReordered, StoreError> {
        let mut board = self.load_board()?;
        let ids = ids
            .iter()
            .map(|id| TaskId::try_new(id))
            .collect::<Result<Vec<_>, _>>()?;

        let previous = board.reorder_column(column, ids)?;
        self.save_board(&board)?;

        let new_order = board
            .columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.tasks.iter().map(|t| t.as_str().to_string()).collect())
            .unwrap_or_default();
        Ok(ColumnReordered {
            column: column.to_string(),
            previous_order: previous.into_iter().map(TaskId::into_string).collect(),
            new_order,
        })
    }
}
