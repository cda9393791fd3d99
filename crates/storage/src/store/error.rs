#![forbid(unsafe_code)]

use kb_core::ids::TaskIdError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// Malformed document: bad frontmatter, missing identity heading,
    /// duplicate or conflicting references inside one file.
    Format(String),
    Id(TaskIdError),
    BoardNotFound {
        path: PathBuf,
    },
    BoardAlreadyExists {
        path: PathBuf,
    },
    TaskNotFound {
        id: String,
    },
    DuplicateTask {
        id: String,
    },
    UnknownColumn {
        column: String,
    },
    DuplicateColumn {
        column: String,
    },
    /// More than one workload tag supplied for a single task.
    ConflictingTag {
        kept: String,
        rejected: String,
    },
    InvalidInput(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Format(message) => write!(f, "malformed document: {message}"),
            Self::Id(err) => write!(f, "task id: {err}"),
            Self::BoardNotFound { path } => {
                write!(f, "board not found at {}", path.display())
            }
            Self::BoardAlreadyExists { path } => {
                write!(f, "board already exists at {}", path.display())
            }
            Self::TaskNotFound { id } => write!(f, "task '{id}' not found"),
            Self::DuplicateTask { id } => write!(f, "task '{id}' already exists"),
            Self::UnknownColumn { column } => write!(f, "column '{column}' does not exist"),
            Self::DuplicateColumn { column } => write!(f, "column '{column}' already exists"),
            Self::ConflictingTag { kept, rejected } => write!(
                f,
                "conflicting workload tags ('{kept}' and '{rejected}'); a task takes at most one"
            ),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_yaml::Error> for StoreError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Format(value.to_string())
    }
}

impl From<TaskIdError> for StoreError {
    fn from(value: TaskIdError) -> Self {
        Self::Id(value)
    }
}
