#![forbid(unsafe_code)]

use super::error::StoreError;
use kb_core::ids::TaskId;
use kb_core::taxonomy::Workload;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_COLUMNS: &[&str] = &["Backlog", "In Progress", "Done", "Archive"];

/// Index frontmatter. Field names follow the kanbn on-disk convention
/// (`startedColumns`, `taskWorkloadTags`, ...); keys this engine does not
/// recognize are preserved through the flattened map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub started_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_task_workload: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub task_workload_tags: BTreeMap<String, u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl BoardOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Column behavior for a fresh board. The classic four-column layout
    /// gets the kanbn defaults; any custom layout maps first column to no
    /// behavior, middle columns to auto-start and the last one to
    /// auto-complete.
    pub fn conventional(columns: &[String]) -> Self {
        let mut options = Self {
            default_task_workload: Some(Workload::Small.weight()),
            task_workload_tags: Workload::ALL
                .iter()
                .map(|workload| (workload.as_str().to_string(), workload.weight()))
                .collect(),
            ..Self::default()
        };
        if columns.iter().map(String::as_str).eq(DEFAULT_COLUMNS.iter().copied()) {
            options.started_columns = vec!["In Progress".to_string()];
            options.completed_columns = vec!["Done".to_string()];
            options.hidden_columns = vec!["Archive".to_string()];
            return options;
        }
        if columns.len() >= 2 {
            options.started_columns = columns[1..columns.len() - 1].to_vec();
            options.completed_columns = vec![columns[columns.len() - 1].clone()];
        }
        options
    }
}

/// Per-column behavior flags resolved from the board options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnBehavior {
    pub auto_start: bool,
    pub auto_complete: bool,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub tasks: Vec<TaskId>,
}

/// In-memory image of one index file. Owns the column → task-id ordering;
/// a task id appears in at most one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub name: String,
    pub description: String,
    pub options: BoardOptions,
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(
        name: String,
        description: String,
        columns: Vec<String>,
        options: BoardOptions,
    ) -> Result<Self, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidInput("board name must not be empty"));
        }
        if name.contains('\n') {
            return Err(StoreError::InvalidInput("board name must be a single line"));
        }
        // a description line starting with '#' would reparse as a heading
        if description
            .lines()
            .any(|line| line.trim_start().starts_with('#'))
        {
            return Err(StoreError::InvalidInput(
                "board description lines must not start with '#'",
            ));
        }
        if columns.is_empty() {
            return Err(StoreError::InvalidInput("board needs at least one column"));
        }
        let mut seen = BTreeSet::new();
        for column in &columns {
            validate_column_name(column)?;
            if !seen.insert(column.as_str()) {
                return Err(StoreError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            name,
            description,
            options,
            columns: columns
                .into_iter()
                .map(|name| Column {
                    name,
                    tasks: Vec::new(),
                })
                .collect(),
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    pub fn first_column(&self) -> Option<&str> {
        self.columns.first().map(|column| column.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    pub fn behavior(&self, column: &str) -> ColumnBehavior {
        ColumnBehavior {
            auto_start: self.options.started_columns.iter().any(|c| c == column),
            auto_complete: self.options.completed_columns.iter().any(|c| c == column),
            hidden: self.options.hidden_columns.iter().any(|c| c == column),
        }
    }

    /// Column currently holding the given task, if any.
    pub fn find_task(&self, id: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.tasks.iter().any(|task| task.as_str() == id))
            .map(|column| column.name.as_str())
    }

    pub fn add_to_column(&mut self, id: TaskId, column: &str) -> Result<(), StoreError> {
        if self.find_task(id.as_str()).is_some() {
            return Err(StoreError::DuplicateTask {
                id: id.into_string(),
            });
        }
        let Some(target) = self.columns.iter_mut().find(|c| c.name == column) else {
            return Err(StoreError::UnknownColumn {
                column: column.to_string(),
            });
        };
        target.tasks.push(id);
        Ok(())
    }

    /// Drop the task's reference; returns the column it was removed from.
    pub fn remove_task(&mut self, id: &str) -> Option<String> {
        for column in &mut self.columns {
            if let Some(index) = column.tasks.iter().position(|task| task.as_str() == id) {
                column.tasks.remove(index);
                return Some(column.name.clone());
            }
        }
        None
    }

    /// Remove from the source column and append to the target, as one
    /// logical step. Returns the source column.
    pub fn move_task(&mut self, id: &str, target: &str) -> Result<String, StoreError> {
        if !self.has_column(target) {
            return Err(StoreError::UnknownColumn {
                column: target.to_string(),
            });
        }
        let mut removed: Option<(TaskId, String)> = None;
        for column in &mut self.columns {
            if let Some(index) = column.tasks.iter().position(|task| task.as_str() == id) {
                let task = column.tasks.remove(index);
                removed = Some((task, column.name.clone()));
                break;
            }
        }
        let Some((task, from)) = removed else {
            return Err(StoreError::TaskNotFound { id: id.to_string() });
        };
        if let Some(column) = self.columns.iter_mut().find(|c| c.name == target) {
            column.tasks.push(task);
            Ok(from)
        } else {
            Err(StoreError::UnknownColumn {
                column: target.to_string(),
            })
        }
    }

    pub fn insert_column(&mut self, name: String, position: Option<usize>) -> Result<(), StoreError> {
        validate_column_name(&name)?;
        if self.has_column(&name) {
            return Err(StoreError::DuplicateColumn { column: name });
        }
        let index = position.unwrap_or(self.columns.len()).min(self.columns.len());
        self.columns.insert(
            index,
            Column {
                name,
                tasks: Vec::new(),
            },
        );
        Ok(())
    }

    /// Swap a task's id in place, keeping its column and position.
    pub fn rename_task(&mut self, old: &str, new: TaskId) -> Result<(), StoreError> {
        if self.find_task(new.as_str()).is_some() {
            return Err(StoreError::DuplicateTask {
                id: new.into_string(),
            });
        }
        for column in &mut self.columns {
            if let Some(slot) = column.tasks.iter_mut().find(|task| task.as_str() == old) {
                *slot = new;
                return Ok(());
            }
        }
        Err(StoreError::TaskNotFound {
            id: old.to_string(),
        })
    }

    /// Replace a column's ordering with a permutation of its current tasks.
    /// Returns the previous order.
    pub fn reorder_column(
        &mut self,
        column: &str,
        ids: Vec<TaskId>,
    ) -> Result<Vec<TaskId>, StoreError> {
        let Some(target) = self.columns.iter_mut().find(|c| c.name == column) else {
            return Err(StoreError::UnknownColumn {
                column: column.to_string(),
            });
        };
        let mut current: Vec<&str> = target.tasks.iter().map(|t| t.as_str()).collect();
        let mut requested: Vec<&str> = ids.iter().map(|t| t.as_str()).collect();
        current.sort_unstable();
        requested.sort_unstable();
        if current != requested {
            return Err(StoreError::InvalidInput(
                "reordered ids must match the column's current tasks",
            ));
        }
        Ok(std::mem::replace(&mut target.tasks, ids))
    }
}

fn validate_column_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidInput("column name must not be empty"));
    }
    if name.contains('\n') {
        return Err(StoreError::InvalidInput("column name must be a single line"));
    }
    Ok(())
}
