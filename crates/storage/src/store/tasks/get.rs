#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    pub fn get_task(&self, id: &str) -> Result<TaskDetail, StoreError> {
        let board = self.load_board()?;
        let id = TaskId::try_new(id)?;
        let Some(column) = board.find_task(id.as_str()).map(str::to_string) else {
            return Err(StoreError::TaskNotFound {
                id: id.into_string(),
            });
        };
        let task = self.load_task(&id)?;
        Ok(self.task_detail(task, column))
    }

    /// Every task, grouped by column in index order. A reference whose file
    /// is gone is skipped; a file that fails to parse is an error, matching
    /// `board_status`.
    pub fn list_tasks(&self) -> Result<TaskList, StoreError> {
        let board = self.load_board()?;
        let mut total = 0;
        let mut columns = Vec::with_capacity(board.columns.len());
        for column in &board.columns {
            let mut tasks = Vec::with_capacity(column.tasks.len());
            for id in &column.tasks {
                match self.load_task(id) {
                    Ok(task) => tasks.push(self.task_detail(task, column.name.clone())),
                    Err(StoreError::TaskNotFound { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
            total += tasks.len();
            columns.push(ColumnTasks {
                column: column.name.clone(),
                tasks,
            });
        }
        Ok(TaskList { total, columns })
    }

    fn task_detail(&self, task: Task, column: String) -> TaskDetail {
        let workload_weight = task.workload(self.taxonomy()).map(|w| w.weight());
        TaskDetail {
            id: task.id.into_string(),
            name: task.name,
            column,
            description: task.description,
            metadata: task.metadata,
            subtasks: task.subtasks,
            relations: task.relations,
            comments: task.comments,
            workload_weight,
        }
    }
}
