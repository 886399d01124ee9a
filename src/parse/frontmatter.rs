//! YAML frontmatter splitting.
//!
//! A frontmatter block is a leading `---` line closed by a `---` (or `...`)
//! line; everything between is handed to the YAML parser. Only mapping-shaped
//! frontmatter contributes data; scalar or sequence documents are ignored.

use serde_yaml::{Mapping, Value};

/// Split `text` into its decoded frontmatter (if any) and the document body.
///
/// Returns an error only when a frontmatter block is present but is not
/// valid YAML.
pub fn split(text: &str) -> Result<(Option<Mapping>, &str), serde_yaml::Error> {
    let Some(rest) = fence_line(text) else {
        return Ok((None, text));
    };

    let mut offset = text.len() - rest.len();
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == "---" || trimmed == "..." {
            let block = &text[text.len() - rest.len()..offset];
            let body = &text[offset + line.len()..];
            let value: Value = serde_yaml::from_str(block)?;
            let mapping = match value {
                Value::Mapping(m) => Some(m),
                _ => None,
            };
            return Ok((mapping, body));
        }
        offset += line.len();
    }

    // Unterminated fence: the whole text is body, not frontmatter.
    Ok((None, text))
}

/// If `text` opens with a `---` fence, return the content after that line.
fn fence_line(text: &str) -> Option<&str> {
    let first_end = text.find('\n')?;
    let first = text[..first_end].trim_end_matches('\r');
    if first == "---" {
        Some(&text[first_end + 1..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_frontmatter_passes_body_through() {
        let (fm, body) = split("# Title\ntext\n").unwrap();
        assert!(fm.is_none());
        assert_eq!(body, "# Title\ntext\n");
    }

    #[test]
    fn mapping_frontmatter_is_decoded() {
        let (fm, body) = split("---\ntitle: Hello\n---\nbody\n").unwrap();
        let fm = fm.unwrap();
        assert_eq!(
            fm.get(Value::from("title")),
            Some(&Value::from("Hello"))
        );
        assert_eq!(body, "body\n");
    }

    #[test]
    fn unterminated_fence_is_body() {
        let (fm, body) = split("---\ntitle: Hello\nbody\n").unwrap();
        assert!(fm.is_none());
        assert_eq!(body, "---\ntitle: Hello\nbody\n");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(split("---\n{unclosed\n---\nbody\n").is_err());
    }

    #[test]
    fn non_mapping_frontmatter_is_ignored() {
        let (fm, body) = split("---\n- a\n- b\n---\nbody\n").unwrap();
        assert!(fm.is_none());
        assert_eq!(body, "body\n");
    }
}
