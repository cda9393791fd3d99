#![forbid(unsafe_code)]

mod index;
mod task;

pub(super) use index::{parse_index, render_index};
pub(super) use task::{parse_task, render_task};

use super::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;

const FRONTMATTER_DELIMITER: &str = "---";

/// Split a document into its optional frontmatter block and the markdown
/// body. A document without a leading `---` line has no frontmatter; an
/// opening delimiter without a closing one is malformed.
fn split_frontmatter(raw: &str) -> Result<(Option<&str>, &str), StoreError> {
    let Some(rest) = raw.strip_prefix("---\n") else {
        return Ok((None, raw));
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == FRONTMATTER_DELIMITER {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches('\n');
            return Ok((Some(header), body));
        }
        offset += line.len();
    }
    Err(StoreError::Format(
        "unterminated frontmatter block".to_string(),
    ))
}

/// Frontmatter must be a YAML mapping; anything else is a format error,
/// never a partial record.
fn parse_mapping<T>(header: &str, what: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let value: serde_yaml::Value = serde_yaml::from_str(header)
        .map_err(|err| StoreError::Format(format!("{what} frontmatter must be valid YAML: {err}")))?;
    if !value.is_mapping() {
        return Err(StoreError::Format(format!(
            "{what} frontmatter must be a YAML mapping"
        )));
    }
    serde_yaml::from_value(value)
        .map_err(|err| StoreError::Format(format!("{what} frontmatter schema invalid: {err}")))
}

fn render_frontmatter<T>(value: &T) -> Result<String, StoreError>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(value)
        .map_err(|err| StoreError::Format(format!("failed to serialize frontmatter: {err}")))?;
    Ok(format!("---\n{yaml}---"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_without_frontmatter_pass_through() {
        let (header, body) = split_frontmatter("# Board\n").expect("split");
        assert_eq!(header, None);
        assert_eq!(body, "# Board\n");
    }

    #[test]
    fn frontmatter_splits_off_the_body() {
        let raw = "---\nprogress: 0.5\n---\n\n# Task\n";
        let (header, body) = split_frontmatter(raw).expect("split");
        assert_eq!(header, Some("progress: 0.5\n"));
        assert_eq!(body, "# Task\n");
    }

    #[test]
    fn unterminated_frontmatter_is_a_format_error() {
        let err = split_frontmatter("---\nprogress: 0.5\n").expect_err("unterminated");
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn non_mapping_frontmatter_is_a_format_error() {
        let err = parse_mapping::<serde_yaml::Value>("- just\n- a list\n", "index")
            .expect_err("not a mapping");
        assert!(matches!(err, StoreError::Format(_)));
    }
}
