//! Script-range language classification.
//!
//! The product behavior is exactly this heuristic, so it stays a small
//! closed function rather than an NLP dependency: Arabic-range script
//! containing a Kurdish-only glyph means Kurdish, Arabic-range without
//! one means Arabic, Latin letters mean English, anything else is
//! Unknown.

/// Detected natural language of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Kurdish,
    Arabic,
    English,
    Unknown,
}

/// Glyphs used by Sorani Kurdish but absent from standard Arabic.
const KURDISH_GLYPHS: [char; 10] = ['ە', 'ێ', 'ۆ', 'ڕ', 'ڵ', 'ڤ', 'پ', 'چ', 'ژ', 'گ'];

fn is_arabic_script(ch: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&ch)
}

fn is_kurdish_glyph(ch: char) -> bool {
    KURDISH_GLYPHS.contains(&ch)
}

/// Classify `text` by script ranges.
pub fn detect(text: &str) -> Language {
    if text.chars().any(is_arabic_script) {
        if text.chars().any(is_kurdish_glyph) {
            Language::Kurdish
        } else {
            Language::Arabic
        }
    } else if text.chars().any(|c| c.is_ascii_alphabetic()) {
        Language::English
    } else {
        Language::Unknown
    }
}
