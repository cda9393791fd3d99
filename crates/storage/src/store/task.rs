#![forbid(unsafe_code)]

use super::error::StoreError;
use super::requests::TaskUpdateRequest;
use kb_core::ids::TaskId;
use kb_core::taxonomy::{TagClass, Taxonomy, Workload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Task frontmatter. Timestamps travel as RFC 3339 strings; unknown keys
/// are preserved through the flattened map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned: Option<String>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// In-memory image of one task file. Sole authority for that file's
/// content.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub metadata: TaskMetadata,
    pub subtasks: Vec<Subtask>,
    /// Raw `## Relations` lines, carried through untouched.
    pub relations: Vec<String>,
    /// Raw `## Comments` lines, carried through untouched.
    pub comments: Vec<String>,
}

impl Task {
    pub fn new(id: TaskId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            metadata: TaskMetadata::default(),
            subtasks: Vec::new(),
            relations: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Replace the full tag set. Duplicates collapse, at most one workload
    /// tag is allowed, and tags outside the taxonomy are returned so the
    /// caller can surface them as advisory.
    pub fn set_tags(
        &mut self,
        tags: Vec<String>,
        taxonomy: &Taxonomy,
    ) -> Result<Vec<String>, StoreError> {
        let mut kept: Vec<String> = Vec::with_capacity(tags.len());
        let mut workload: Option<String> = None;
        let mut freeform = Vec::new();
        for tag in tags {
            if kept.contains(&tag) {
                continue;
            }
            match taxonomy.classify(&tag) {
                TagClass::Workload(_) => {
                    if let Some(first) = &workload {
                        return Err(StoreError::ConflictingTag {
                            kept: first.clone(),
                            rejected: tag,
                        });
                    }
                    workload = Some(tag.clone());
                }
                TagClass::FreeForm => freeform.push(tag.clone()),
                TagClass::Category(_) => {}
            }
            kept.push(tag);
        }
        self.metadata.tags = kept;
        Ok(freeform)
    }

    pub fn workload(&self, taxonomy: &Taxonomy) -> Option<Workload> {
        self.metadata.tags.iter().find_map(|tag| {
            match taxonomy.classify(tag) {
                TagClass::Workload(workload) => Some(workload),
                _ => None,
            }
        })
    }

    /// Partial update: absent fields stay untouched; clearable fields use
    /// the double-`Option` to tell "clear" apart from "leave unchanged".
    /// Returns the free-form tags encountered, if tags were replaced.
    pub fn apply_update(
        &mut self,
        request: &TaskUpdateRequest,
        taxonomy: &Taxonomy,
    ) -> Result<Vec<String>, StoreError> {
        if let Some(name) = &request.name {
            validate_name(name)?;
            self.name = name.clone();
        }
        if let Some(description) = &request.description {
            validate_description(description)?;
            self.description = description.clone();
        }
        let mut freeform = Vec::new();
        if let Some(tags) = &request.tags {
            freeform = self.set_tags(tags.clone(), taxonomy)?;
        }
        if let Some(progress) = request.progress {
            validate_progress(progress)?;
            self.metadata.progress = progress;
        }
        if let Some(assigned) = &request.assigned {
            self.metadata.assigned = assigned.clone();
        }
        if let Some(due) = &request.due {
            self.metadata.due = due.clone();
        }
        if let Some(started) = &request.started {
            self.metadata.started = started.clone();
        }
        if let Some(completed) = &request.completed {
            self.metadata.completed = completed.clone();
            if self.metadata.completed.is_some() {
                self.metadata.progress = 1.0;
            }
        }
        if let Some(subtasks) = &request.subtasks {
            for subtask in subtasks {
                validate_subtask_text(&subtask.text)?;
            }
            self.subtasks = subtasks.clone();
        }
        Ok(freeform)
    }
}

pub(crate) fn validate_progress(progress: f64) -> Result<(), StoreError> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(StoreError::InvalidInput(
            "progress must be within 0.0..=1.0",
        ));
    }
    Ok(())
}

pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidInput("task name must not be empty"));
    }
    if name.contains('\n') {
        return Err(StoreError::InvalidInput("task name must be a single line"));
    }
    Ok(())
}

/// Unrecognized `##` headings are fine (they fold back into the
/// description), but a reserved section heading would be captured by that
/// section's parser on the next read.
pub(crate) fn validate_description(text: &str) -> Result<(), StoreError> {
    for line in text.lines() {
        if let Some(heading) = line.trim_start().strip_prefix("## ") {
            if matches!(
                heading.trim().to_ascii_lowercase().as_str(),
                "sub-tasks" | "subtasks" | "relations" | "comments"
            ) {
                return Err(StoreError::InvalidInput(
                    "task description must not contain a reserved section heading",
                ));
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_subtask_text(text: &str) -> Result<(), StoreError> {
    if text.contains('\n') {
        return Err(StoreError::InvalidInput(
            "subtask text must be a single line",
        ));
    }
    Ok(())
}
