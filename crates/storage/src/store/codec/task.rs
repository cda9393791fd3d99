#![forbid(unsafe_code)]

use super::super::error::StoreError;
use super::super::task::{Subtask, Task, TaskMetadata};
use super::{parse_mapping, render_frontmatter, split_frontmatter};
use kb_core::ids::TaskId;

enum Section {
    Description,
    Subtasks,
    Relations,
    Comments,
}

/// Parse one task file. The `#` heading is the task name, `## Sub-tasks`
/// holds the checklist, `## Relations` and `## Comments` are carried as raw
/// lines. Unrecognized `##` sections are folded into the description with
/// their heading intact so nothing is dropped.
pub(crate) fn parse_task(raw: &str, id: TaskId) -> Result<Task, StoreError> {
    let (header, body) = split_frontmatter(raw)?;
    let metadata = match header {
        Some(header) => parse_mapping::<TaskMetadata>(header, "task")?,
        None => TaskMetadata::default(),
    };

    let mut section = Section::Description;
    let mut name = String::new();
    let mut description_lines: Vec<&str> = Vec::new();
    let mut subtasks: Vec<Subtask> = Vec::new();
    let mut relations: Vec<String> = Vec::new();
    let mut comments: Vec<String> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(heading) = trimmed.strip_prefix("## ") {
            section = match heading.trim().to_ascii_lowercase().as_str() {
                "sub-tasks" | "subtasks" => Section::Subtasks,
                "relations" => Section::Relations,
                "comments" => Section::Comments,
                _ => {
                    description_lines.push(trimmed);
                    Section::Description
                }
            };
            continue;
        }
        if name.is_empty() {
            if let Some(heading) = trimmed.strip_prefix("# ") {
                name = heading.trim().to_string();
                section = Section::Description;
                continue;
            }
        }
        match section {
            Section::Description => description_lines.push(line),
            Section::Subtasks => {
                if let Some(subtask) = parse_subtask(trimmed) {
                    subtasks.push(subtask);
                }
            }
            Section::Relations => {
                if !trimmed.is_empty() {
                    relations.push(trimmed.to_string());
                }
            }
            Section::Comments => {
                if !trimmed.is_empty() {
                    comments.push(trimmed.to_string());
                }
            }
        }
    }

    if name.is_empty() {
        return Err(StoreError::Format(
            "task file is missing a name heading".to_string(),
        ));
    }

    Ok(Task {
        id,
        name,
        description: description_lines.join("\n").trim().to_string(),
        metadata,
        subtasks,
        relations,
        comments,
    })
}

fn parse_subtask(line: &str) -> Option<Subtask> {
    let rest = line.strip_prefix("- [")?;
    let (mark, text) = rest.split_once(']')?;
    let done = matches!(mark, "x" | "X");
    if !done && !matches!(mark, " " | "") {
        return None;
    }
    Some(Subtask {
        text: text.trim().to_string(),
        done,
    })
}

pub(crate) fn render_task(task: &Task) -> Result<String, StoreError> {
    let mut lines: Vec<String> = Vec::new();
    lines.push(render_frontmatter(&task.metadata)?);
    lines.push(String::new());
    lines.push(format!("# {}", task.name));
    lines.push(String::new());
    if !task.description.is_empty() {
        lines.push(task.description.clone());
        lines.push(String::new());
    }
    if !task.subtasks.is_empty() {
        lines.push("## Sub-tasks".to_string());
        lines.push(String::new());
        for subtask in &task.subtasks {
            let mark = if subtask.done { "x" } else { " " };
            lines.push(format!("- [{mark}] {}", subtask.text));
        }
        lines.push(String::new());
    }
    if !task.relations.is_empty() {
        lines.push("## Relations".to_string());
        lines.push(String::new());
        lines.extend(task.relations.iter().cloned());
        lines.push(String::new());
    }
    if !task.comments.is_empty() {
        lines.push("## Comments".to_string());
        lines.push(String::new());
        lines.extend(task.comments.iter().cloned());
        lines.push(String::new());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let mut task = Task::new(
            TaskId::try_new("wire-up-auth").expect("id"),
            "Wire Up Auth".to_string(),
            "Add the login flow.\nCover token refresh as well.".to_string(),
        );
        task.metadata.created = Some("2026-01-05T10:00:00Z".to_string());
        task.metadata.updated = Some("2026-01-06T09:30:00Z".to_string());
        task.metadata.progress = 0.25;
        task.metadata.tags = vec!["feature".to_string(), "Medium".to_string()];
        task.subtasks = vec![
            Subtask {
                text: "login endpoint".to_string(),
                done: true,
            },
            Subtask {
                text: "refresh endpoint".to_string(),
                done: false,
            },
        ];
        task
    }

    #[test]
    fn task_roundtrip_preserves_structure() {
        let task = sample_task();
        let rendered = render_task(&task).expect("render");
        let parsed = parse_task(&rendered, task.id.clone()).expect("parse rendered task");
        assert_eq!(parsed, task);
    }

    #[test]
    fn task_reserialization_is_byte_stable() {
        let rendered = render_task(&sample_task()).expect("render");
        let parsed = parse_task(&rendered, TaskId::try_new("wire-up-auth").expect("id"))
            .expect("parse");
        let rendered_two = render_task(&parsed).expect("render again");
        assert_eq!(rendered, rendered_two);
    }

    #[test]
    fn uppercase_checkbox_marks_parse_as_done() {
        let raw = "# T\n\n## Sub-tasks\n\n- [X] shouted\n- [x] quiet\n- [ ] open\n";
        let task = parse_task(raw, TaskId::try_new("t").expect("id")).expect("parse");
        assert_eq!(task.subtasks.len(), 3);
        assert!(task.subtasks[0].done);
        assert!(task.subtasks[1].done);
        assert!(!task.subtasks[2].done);
    }

    #[test]
    fn missing_name_heading_is_a_format_error() {
        let err = parse_task("just text\n", TaskId::try_new("t").expect("id"))
            .expect_err("no heading");
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn unknown_sections_fold_into_the_description() {
        let raw = "# T\n\nIntro.\n\n## Notes\n\nKeep this line.\n";
        let task = parse_task(raw, TaskId::try_new("t").expect("id")).expect("parse");
        assert!(task.description.contains("## Notes"));
        assert!(task.description.contains("Keep this line."));
        // folding is stable: a second parse/render cycle changes nothing
        let rendered = render_task(&task).expect("render");
        let reparsed = parse_task(&rendered, task.id.clone()).expect("reparse");
        assert_eq!(render_task(&reparsed).expect("render again"), rendered);
    }

    #[test]
    fn relations_and_comments_are_carried_through() {
        let raw = "# T\n\n## Relations\n\n- [blocks](tasks/other-task.md)\n\n## Comments\n\n- author: \"someone\"\n";
        let task = parse_task(raw, TaskId::try_new("t").expect("id")).expect("parse");
        assert_eq!(task.relations, vec!["- [blocks](tasks/other-task.md)".to_string()]);
        assert_eq!(task.comments, vec!["- author: \"someone\"".to_string()]);
        let rendered = render_task(&task).expect("render");
        assert!(rendered.contains("## Relations"));
        assert!(rendered.contains("## Comments"));
    }

    #[test]
    fn malformed_frontmatter_is_a_format_error() {
        let raw = "---\ntags: [unclosed\n---\n\n# T\n";
        let err = parse_task(raw, TaskId::try_new("t").expect("id")).expect_err("bad yaml");
        assert!(matches!(err, StoreError::Format(_)));
    }
}
