//! Text normalization for remote catalogue strings
//!
//! Source descriptions were laid out for fixed-width game text boxes and
//! carry form feeds, hard line breaks and soft hyphens at wrap points.

const SOFT_HYPHEN: char = '\u{ad}';
const FORM_FEED: char = '\u{c}';

/// Turn raw source text into a single display line.
///
/// Soft hyphens at a wrap point join the halves of the word, a hard hyphen
/// at a wrap point is kept without the break, and every other run of
/// whitespace collapses to one space.
pub fn normalize_text(raw: &str) -> String {
    let unwrapped = raw
        .replace(FORM_FEED, "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(&format!("{SOFT_HYPHEN}\n"), "")
        .replace(SOFT_HYPHEN, "")
        .replace(" -\n", " - ")
        .replace("-\n", "-");

    unwrapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize every word, including each part of a hyphenated word
pub fn capitalize_words(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of an entry name
pub fn display_name(raw: &str) -> String {
    capitalize_words(&normalize_text(raw))
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
