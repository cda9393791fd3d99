#![forbid(unsafe_code)]

use super::*;

impl BoardStore {
    /// Insert a column at the given index (append when absent). Existing
    /// task placement is untouched.
    pub fn add_column(
        &self,
        name: &str,
        position: Option<usize>,
    ) -> Result<ColumnAdded, StoreError> {
        let mut board = self.load_board()?;
        board.insert_column(name.to_string(), position)?;
        self.save_board(&board)?;
        Ok(ColumnAdded {
            column: name.to_string(),
            columns: board.column_names(),
        })
    }
}
