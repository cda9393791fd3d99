#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    /// Partial update. A `column` field goes through the same transition
    /// rules as a move; a `name` change re-derives the id, renames the
    /// task file and rewrites the index reference in place.
    pub fn update_task(&self, request: TaskUpdateRequest) -> Result<TaskUpdated, StoreError> {
        let mut board = self.load_board()?;
        let id = TaskId::try_new(request.id.as_str())?;

        let Some(current_column) = board.find_task(id.as_str()).map(str::to_string) else {
            return Err(StoreError::TaskNotFound {
                id: id.into_string(),
            });
        };
        let mut task = self.load_task(&id)?;

        let mut column = current_column.clone();
        let moved = match &request.column {
            Some(target) if *target != current_column => {
                board.move_task(id.as_str(), target)?;
                column = target.clone();
                true
            }
            _ => false,
        };

        let new_id = match &request.name {
            Some(name) => {
                let derived = TaskId::derive(name)?;
                if derived != id
                    && (board.find_task(derived.as_str()).is_some()
                        || self.task_path(&derived).exists())
                {
                    return Err(StoreError::DuplicateTask {
                        id: derived.into_string(),
                    });
                }
                derived
            }
            None => id.clone(),
        };

        let freeform_tags = task.apply_update(&request, self.taxonomy())?;
        task.metadata.updated = Some(support::now_rfc3339());
        if moved {
            self.apply_column_transition(&board, &mut task, &column);
        }

        if new_id != id {
            board.rename_task(id.as_str(), new_id.clone())?;
            task.id = new_id.clone();
            // new file first, then the index, then the old file goes away
            self.save_task(&task)?;
            self.save_board(&board)?;
            std::fs::remove_file(self.task_path(&id))?;
        } else {
            self.save_task(&task)?;
            if moved {
                self.save_board(&board)?;
            }
        }

        Ok(TaskUpdated {
            id: new_id.as_str().to_string(),
            previous_id: (new_id != id).then(|| id.into_string()),
            column,
            path: self.task_path(&new_id),
            freeform_tags,
        })
    }
}
