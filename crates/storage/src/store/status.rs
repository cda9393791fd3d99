#![forbid(unsafe_code)]

use super::*;

impl BoardStore {
    /// Pure read: columns with their task ids and summed workload weights.
    /// A reference whose file a human already removed contributes nothing,
    /// but a file that fails to parse fails the whole call.
    pub fn board_status(&self) -> Result<BoardStatus, StoreError> {
        let board = self.load_board()?;
        let mut columns = Vec::with_capacity(board.columns.len());
        for column in &board.columns {
            let mut total_workload = 0u32;
            for id in &column.tasks {
                match self.load_task(id) {
                    Ok(task) => {
                        if let Some(workload) = task.workload(self.taxonomy()) {
                            total_workload += workload.weight();
                        }
                    }
                    Err(StoreError::TaskNotFound { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
            columns.push(ColumnStatus {
                name: column.name.clone(),
                hidden: board.behavior(&column.name).hidden,
                tasks: column.tasks.iter().map(|t| t.as_str().to_string()).collect(),
                total_workload,
            });
        }
        Ok(BoardStatus {
            name: board.name,
            description: board.description,
            columns,
        })
    }

    /// The taxonomy catalog, for callers that want to validate up front.
    pub fn valid_tags(&self) -> TagCatalog {
        let taxonomy = self.taxonomy();
        TagCatalog {
            categories: taxonomy
                .categories()
                .iter()
                .map(|(name, members)| TagCategory {
                    name: name.to_string(),
                    tags: members.iter().map(|tag| tag.to_string()).collect(),
                })
                .collect(),
            workload: kb_core::taxonomy::Workload::ALL
                .iter()
                .map(|workload| WorkloadTag {
                    tag: workload.as_str().to_string(),
                    weight: workload.weight(),
                })
                .collect(),
        }
    }
}
