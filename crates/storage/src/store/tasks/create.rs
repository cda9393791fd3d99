#![forbid(unsafe_code)]

use super::super::*;
use kb_core::ids::TaskId;

impl BoardStore {
    /// Derive the id from the name, validate tags and column, stamp
    /// `created`, then write the task file before the index gains its
    /// reference (an interrupted call leaves a harmless orphan file, never
    /// a dangling reference).
    pub fn add_task(&self, request: TaskCreateRequest) -> Result<TaskCreated, StoreError> {
        let mut board = self.load_board()?;

        let TaskCreateRequest {
            name,
            description,
            column,
            tags,
            assigned,
            due,
            started,
            completed,
            subtasks,
        } = request;

        let column = match column {
            Some(column) => column,
            None => board
                .first_column()
                .ok_or(StoreError::InvalidInput("board has no columns"))?
                .to_string(),
        };
        if !board.has_column(&column) {
            return Err(StoreError::UnknownColumn { column });
        }

        task::validate_name(&name)?;
        task::validate_description(&description)?;
        for text in &subtasks {
            task::validate_subtask_text(text)?;
        }

        let id = TaskId::derive(&name)?;
        if board.find_task(id.as_str()).is_some() || self.task_path(&id).exists() {
            return Err(StoreError::DuplicateTask {
                id: id.into_string(),
            });
        }

        let mut task = Task::new(id.clone(), name, description);
        let freeform_tags = task.set_tags(tags, self.taxonomy())?;

        let now = support::now_rfc3339();
        task.metadata.created = Some(now.clone());
        task.metadata.updated = Some(now);
        task.metadata.assigned = assigned;
        task.metadata.due = due;
        task.metadata.started = started;
        if completed.is_some() {
            task.metadata.progress = 1.0;
        }
        task.metadata.completed = completed;
        task.subtasks = subtasks
            .into_iter()
            .map(|text| Subtask { text, done: false })
            .collect();

        board.add_to_column(id.clone(), &column)?;
        self.apply_column_transition(&board, &mut task, &column);

        self.save_task(&task)?;
        self.save_board(&board)?;

        Ok(TaskCreated {
            id: id.as_str().to_string(),
            column,
            path: self.task_path(&id),
            freeform_tags,
        })
    }
}
