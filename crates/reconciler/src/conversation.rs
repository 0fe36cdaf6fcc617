//! Merging two free-text replies into one.
//!
//! The arbitration rules are behavior contracts inherited from
//! production tuning: same-language replies prefer the clearly longer
//! one (more than 50% longer by character count) and otherwise
//! concatenate; replies in different languages prefer the one matching
//! the user's language; everything else concatenates so no content is
//! lost. With at least one reply present the result is never empty.

use crate::language::{detect, Language};

/// Merge up to two successful replies, using `user_message` only for
/// language matching. Returns `None` when neither reply is present.
pub fn merge_replies(
    first: Option<&str>,
    second: Option<&str>,
    user_message: &str,
) -> Option<String> {
    match (first, second) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (Some(a), Some(b)) => Some(merge_two(a, b, user_message)),
    }
}

fn merge_two(a: &str, b: &str, user_message: &str) -> String {
    let lang_a = detect(a);
    let lang_b = detect(b);

    if lang_a == lang_b && lang_a != Language::Unknown {
        let chars_a = a.chars().count();
        let chars_b = b.chars().count();
        let (longer, longer_chars, shorter_chars) = if chars_a >= chars_b {
            (a, chars_a, chars_b)
        } else {
            (b, chars_b, chars_a)
        };
        // Prefer the longer reply outright only when it exceeds the
        // shorter by more than 50%; near-equal lengths usually mean
        // complementary content.
        if 2 * longer_chars > 3 * shorter_chars {
            return longer.to_string();
        }
        return concat(a, b);
    }

    if lang_a != lang_b {
        let user_lang = detect(user_message);
        if user_lang != Language::Unknown {
            if lang_a == user_lang {
                return a.to_string();
            }
            if lang_b == user_lang {
                return b.to_string();
            }
        }
    }

    concat(a, b)
}

fn concat(a: &str, b: &str) -> String {
    format!("{}\n\n{}", a, b)
}
