#![forbid(unsafe_code)]

use super::super::board::{Board, BoardOptions, Column};
use super::super::error::StoreError;
use super::{parse_mapping, render_frontmatter, split_frontmatter};
use kb_core::ids::TaskId;
use std::collections::BTreeSet;

/// Parse an index file: frontmatter options, `#` board name, free-text
/// description, `##` column headings with `- [id](tasks/id.md)` references.
/// Column order is preserved exactly; empty columns are fine.
pub(crate) fn parse_index(raw: &str) -> Result<Board, StoreError> {
    let (header, body) = split_frontmatter(raw)?;
    let options = match header {
        Some(header) => parse_mapping::<BoardOptions>(header, "index")?,
        None => BoardOptions::default(),
    };

    let mut name = String::new();
    let mut description_lines: Vec<&str> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(heading) = trimmed.strip_prefix("## ") {
            let column = heading.trim();
            if columns.iter().any(|c| c.name == column) {
                return Err(StoreError::Format(format!(
                    "duplicate column heading '{column}'"
                )));
            }
            columns.push(Column {
                name: column.to_string(),
                tasks: Vec::new(),
            });
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix("# ") {
            if name.is_empty() {
                name = heading.trim().to_string();
            }
            continue;
        }
        if let Some(column) = columns.last_mut() {
            if let Some(target) = parse_task_link(trimmed) {
                let id = TaskId::try_new(target).map_err(|err| {
                    StoreError::Format(format!("bad task reference '{trimmed}': {err}"))
                })?;
                column.tasks.push(id);
            }
            continue;
        }
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            description_lines.push(trimmed);
        }
    }

    if name.is_empty() {
        return Err(StoreError::Format(
            "index is missing a board name heading".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for column in &columns {
        for task in &column.tasks {
            if !seen.insert(task.as_str()) {
                return Err(StoreError::Format(format!(
                    "task '{}' is referenced more than once",
                    task.as_str()
                )));
            }
        }
    }

    Ok(Board {
        name,
        description: description_lines.join("\n"),
        options,
        columns,
    })
}

/// Accepts `- [anything](tasks/<id>.md)` as well as bare `- [x](<id>)`
/// references; only the link target matters.
fn parse_task_link(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("- [")?;
    let (_, target) = rest.split_once("](")?;
    let target = target.strip_suffix(')')?;
    let target = target.strip_prefix("tasks/").unwrap_or(target);
    Some(target.strip_suffix(".md").unwrap_or(target))
}

pub(crate) fn render_index(board: &Board) -> Result<String, StoreError> {
    let mut lines: Vec<String> = Vec::new();
    if !board.options.is_empty() {
        lines.push(render_frontmatter(&board.options)?);
        lines.push(String::new());
    }
    lines.push(format!("# {}", board.name));
    lines.push(String::new());
    if !board.description.is_empty() {
        lines.push(board.description.clone());
        lines.push(String::new());
    }
    for column in &board.columns {
        lines.push(format!("## {}", column.name));
        lines.push(String::new());
        for task in &column.tasks {
            let id = task.as_str();
            lines.push(format!("- [{id}](tasks/{id}.md)"));
        }
        lines.push(String::new());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        let mut board = Board::new(
            "Sample Project".to_string(),
            "Planning board for the sample project.".to_string(),
            vec![
                "Backlog".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
            BoardOptions {
                started_columns: vec!["In Progress".to_string()],
                completed_columns: vec!["Done".to_string()],
                ..BoardOptions::default()
            },
        )
        .expect("new board");
        board
            .add_to_column(TaskId::try_new("first-task").expect("id"), "Backlog")
            .expect("add first");
        board
            .add_to_column(TaskId::try_new("second-task").expect("id"), "In Progress")
            .expect("add second");
        board
    }

    #[test]
    fn index_roundtrip_preserves_structure() {
        let board = sample_board();
        let rendered = render_index(&board).expect("render");
        let parsed = parse_index(&rendered).expect("parse rendered index");
        assert_eq!(parsed, board);
    }

    #[test]
    fn index_reserialization_is_byte_stable() {
        let rendered = render_index(&sample_board()).expect("render");
        let parsed = parse_index(&rendered).expect("parse");
        let rendered_two = render_index(&parsed).expect("render again");
        assert_eq!(rendered, rendered_two);
    }

    #[test]
    fn empty_columns_parse_and_keep_their_order() {
        let raw = "# Board\n\n## One\n\n## Two\n\n## Three\n";
        let board = parse_index(raw).expect("parse");
        assert_eq!(
            board.column_names(),
            vec!["One".to_string(), "Two".to_string(), "Three".to_string()]
        );
        assert!(board.columns.iter().all(|column| column.tasks.is_empty()));
    }

    #[test]
    fn human_edited_link_text_is_tolerated() {
        let raw = "# Board\n\n## Backlog\n\n- [My Task Name](tasks/my-task.md)\n";
        let board = parse_index(raw).expect("parse");
        assert_eq!(board.find_task("my-task"), Some("Backlog"));
    }

    #[test]
    fn missing_name_heading_is_a_format_error() {
        let err = parse_index("## Backlog\n").expect_err("no name");
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn doubly_referenced_task_is_a_format_error() {
        let raw = "# Board\n\n## A\n\n- [t](tasks/t.md)\n\n## B\n\n- [t](tasks/t.md)\n";
        let err = parse_index(raw).expect_err("duplicate ref");
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn unknown_option_keys_survive_a_roundtrip() {
        let raw = "---\nstartedColumns:\n- Doing\ncustomSetting: 7\n---\n\n# Board\n\n## Doing\n";
        let board = parse_index(raw).expect("parse");
        assert_eq!(board.options.started_columns, vec!["Doing".to_string()]);
        assert!(board.options.extra.contains_key("customSetting"));
        let rendered = render_index(&board).expect("render");
        let reparsed = parse_index(&rendered).expect("reparse");
        assert_eq!(reparsed.options, board.options);
    }
}
