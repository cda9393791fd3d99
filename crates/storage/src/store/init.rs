#![forbid(unsafe_code)]

use super::*;

impl BoardStore {
    /// Create the board content at this store's directory. The directory
    /// itself may pre-exist (workspace bootstrap is the caller's concern);
    /// an existing index means an existing board.
    pub fn init_board(&self, request: BoardInitRequest) -> Result<BoardCreated, StoreError> {
        if self.exists() {
            return Err(StoreError::BoardAlreadyExists {
                path: self.board_dir().to_path_buf(),
            });
        }

        let BoardInitRequest {
            name,
            description,
            columns,
            options,
        } = request;

        let columns = columns.unwrap_or_else(|| {
            DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
        });
        let options = options.unwrap_or_else(|| BoardOptions::conventional(&columns));
        let board = Board::new(name, description, columns, options)?;
        self.save_board(&board)?;

        Ok(BoardCreated {
            path: self.board_dir().to_path_buf(),
            index_path: self.index_path(),
            columns: board.column_names(),
        })
    }
}
