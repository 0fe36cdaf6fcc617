//! Best-effort extraction of a JSON object from free text.
//!
//! A character scanner, not a regex: brace depth is tracked outside
//! JSON string literals, and escapes inside strings are honored. The
//! documented failure case is a text with no balanced top-level span,
//! which returns `None`.

/// Find the first balanced `{...}` span in `text`.
///
/// Returns the span including both braces. Braces inside string
/// literals do not affect the depth count. An opening brace that never
/// closes yields `None`.
pub fn first_object_span(text: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' if start.is_some() => in_string = true,
            '{' => {
                if start.is_none() {
                    start = Some(idx);
                }
                depth += 1;
            }
            '}' if start.is_some() => {
                depth -= 1;
                if depth == 0 {
                    let begin = start.unwrap();
                    return Some(&text[begin..idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        assert_eq!(first_object_span(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let text = "Here is the analysis you asked for:\n{\"summary\": \"ok\"}\nHope it helps!";
        assert_eq!(first_object_span(text), Some("{\"summary\": \"ok\"}"));
    }

    #[test]
    fn test_nested_objects() {
        let text = r#"prefix {"a": {"b": {"c": 3}}, "d": 4} suffix {"e": 5}"#;
        assert_eq!(
            first_object_span(text),
            Some(r#"{"a": {"b": {"c": 3}}, "d": 4}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"note": "unmatched } and { inside", "n": 1}"#;
        assert_eq!(first_object_span(text), Some(text));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"quote": "she said \"}\" loudly"}"#;
        assert_eq!(first_object_span(text), Some(text));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(first_object_span("no json here"), None);
        assert_eq!(first_object_span(""), None);
    }

    #[test]
    fn test_unbalanced_object() {
        assert_eq!(first_object_span(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn test_non_ascii_payload() {
        let text = "وەڵامەکە ئەمەیە: {\"summary\": \"داتاکە باشە\"} سوپاس";
        assert_eq!(first_object_span(text), Some("{\"summary\": \"داتاکە باشە\"}"));
    }
}
