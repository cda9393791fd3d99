#![forbid(unsafe_code)]

pub mod taxonomy;

pub mod ids {
    /// Identifier of one task: the file stem of its markdown file and the
    /// target of its index link. Always kebab-case.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct TaskId(String);

    impl TaskId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        /// Derive the id from a human task name: lowercase, collapse runs of
        /// non-alphanumeric characters into single hyphens, trim hyphens.
        pub fn derive(name: &str) -> Result<Self, TaskIdError> {
            let mut out = String::with_capacity(name.len());
            let mut pending_hyphen = false;
            for ch in name.chars() {
                if ch.is_alphanumeric() {
                    if pending_hyphen && !out.is_empty() {
                        out.push('-');
                    }
                    pending_hyphen = false;
                    for lower in ch.to_lowercase() {
                        out.push(lower);
                    }
                } else {
                    pending_hyphen = true;
                }
            }
            if out.is_empty() {
                return Err(TaskIdError::Empty);
            }
            Ok(Self(out))
        }

        /// Accept an id read back from an index or file name.
        pub fn try_new(value: impl Into<String>) -> Result<Self, TaskIdError> {
            let value = value.into();
            validate_task_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum TaskIdError {
        Empty,
        TooLong,
        InvalidChar { ch: char, index: usize },
    }

    impl std::fmt::Display for TaskIdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Empty => write!(f, "task id is empty"),
                Self::TooLong => write!(f, "task id exceeds 128 characters"),
                Self::InvalidChar { ch, index } => {
                    write!(f, "task id has invalid character {ch:?} at index {index}")
                }
            }
        }
    }

    impl std::error::Error for TaskIdError {}

    fn validate_task_id(value: &str) -> Result<(), TaskIdError> {
        if value.is_empty() {
            return Err(TaskIdError::Empty);
        }
        if value.len() > 128 {
            return Err(TaskIdError::TooLong);
        }
        for (index, ch) in value.chars().enumerate() {
            if ch.is_alphanumeric() && !ch.is_uppercase() {
                continue;
            }
            if ch == '-' && index != 0 && index != value.chars().count() - 1 {
                continue;
            }
            return Err(TaskIdError::InvalidChar { ch, index });
        }
        Ok(())
    }

}
