//! Recovery of a generated-file batch from a raw model response. Models do
//! not reliably emit pure JSON, so extraction runs through an ordered list
//! of named strategies and the result is validated all-or-nothing: either
//! every element carries a usable path and content, or the whole response
//! is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ForgeError, ForgeResult};

/// One file produced by a generation call. `path` is forward-slash
/// separated and doubles as the directory structure inside the exported
/// archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    #[serde(rename = "fileName")]
    pub path: String,
    #[serde(rename = "code")]
    pub content: String,
}

/// Wrapper keys probed, in order, when a model answers with an object
/// instead of the requested bare array.
const WRAPPER_KEYS: &[&str] = &["files", "generatedFiles"];

type Extractor = fn(&str) -> Option<Value>;

/// Extraction strategies tried in order; the first one that yields an array
/// wins.
const STRATEGIES: &[(&str, Extractor)] = &[
    ("direct", extract_direct),
    ("bracket-slice", extract_bracket_slice),
];

fn extract_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Recovers an array wrapped in prose or markdown fencing by slicing from
/// the first `[` to the last `]`.
fn extract_bracket_slice(text: &str) -> Option<Value> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

fn as_file_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => WRAPPER_KEYS.iter().find_map(|key| {
            match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            }
        }),
        _ => None,
    }
}

/// Parse a raw model response into a validated file batch.
pub fn recover_file_batch(raw: &str) -> ForgeResult<Vec<GeneratedFile>> {
    let trimmed = raw.trim();
    for (_name, extract) in STRATEGIES {
        if let Some(value) = extract(trimmed) {
            if let Some(items) = as_file_array(value) {
                return validate_batch(items, raw);
            }
        }
    }
    Err(ForgeError::parse_failed(raw))
}

/// An empty array is a failed generation, not an empty-but-valid batch.
/// Every element must carry a non-empty `fileName`; `code` must be present
/// as a string but may be empty.
fn validate_batch(items: Vec<Value>, raw: &str) -> ForgeResult<Vec<GeneratedFile>> {
    if items.is_empty() {
        return Err(ForgeError::parse_failed(raw));
    }

    let mut files = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let file: GeneratedFile = serde_json::from_value(item).map_err(|_| {
            ForgeError::InvalidBatch(format!("element {index} is missing fileName or code"))
        })?;
        if file.path.is_empty() {
            return Err(ForgeError::InvalidBatch(format!(
                "element {index} has an empty fileName"
            )));
        }
        files.push(file);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single_file() -> Vec<GeneratedFile> {
        vec![GeneratedFile {
            path: "a.java".to_string(),
            content: "x".to_string(),
        }]
    }

    #[test]
    fn parses_clean_array() {
        let raw = r#"[{"fileName":"a.java","code":"x"}]"#;
        assert_eq!(recover_file_batch(raw).unwrap(), single_file());
    }

    #[test]
    fn recovers_array_wrapped_in_prose() {
        let raw = "Here is the code:\n[{\"fileName\":\"a.java\",\"code\":\"x\"}]\nHope this helps!";
        assert_eq!(recover_file_batch(raw).unwrap(), single_file());
    }

    #[test]
    fn recovers_array_wrapped_in_markdown_fence() {
        let raw = "```json\n[{\"fileName\":\"a.java\",\"code\":\"x\"}]\n```";
        assert_eq!(recover_file_batch(raw).unwrap(), single_file());
    }

    #[test]
    fn probes_wrapper_object_keys() {
        let raw = r#"{"files":[{"fileName":"a.java","code":"x"}]}"#;
        assert_eq!(recover_file_batch(raw).unwrap(), single_file());

        let alternate = r#"{"generatedFiles":[{"fileName":"a.java","code":"x"}]}"#;
        assert_eq!(recover_file_batch(alternate).unwrap(), single_file());
    }

    #[test]
    fn rejects_plain_text() {
        match recover_file_batch("not json at all") {
            Err(ForgeError::ParseFailed { preview }) => {
                assert_eq!(preview, "not json at all");
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_array() {
        assert!(matches!(
            recover_file_batch("[]"),
            Err(ForgeError::ParseFailed { .. })
        ));
    }

    #[test]
    fn rejects_element_without_file_name() {
        let raw = r#"[{"code":"x"}]"#;
        assert!(matches!(
            recover_file_batch(raw),
            Err(ForgeError::InvalidBatch(_))
        ));
    }

    #[test]
    fn rejects_empty_file_name() {
        let raw = r#"[{"fileName":"","code":"x"}]"#;
        assert!(matches!(
            recover_file_batch(raw),
            Err(ForgeError::InvalidBatch(_))
        ));
    }

    #[test]
    fn accepts_empty_code_string() {
        let raw = r#"[{"fileName":"empty.java","code":""}]"#;
        let files = recover_file_batch(raw).unwrap();
        assert_eq!(files[0].content, "");
    }

    #[test]
    fn rejects_missing_code() {
        let raw = r#"[{"fileName":"a.java"}]"#;
        assert!(matches!(
            recover_file_batch(raw),
            Err(ForgeError::InvalidBatch(_))
        ));
    }

    #[test]
    fn preview_of_long_garbage_is_bounded() {
        let raw = format!("garbage {}", "y".repeat(2000));
        match recover_file_batch(&raw) {
            Err(ForgeError::ParseFailed { preview }) => {
                assert!(preview.chars().count() <= 303);
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn escaped_newlines_survive_into_content() {
        let raw = r#"[{"fileName":"a.java","code":"line1\nline2"}]"#;
        let files = recover_file_batch(raw).unwrap();
        assert_eq!(files[0].content, "line1\nline2");
    }
}
