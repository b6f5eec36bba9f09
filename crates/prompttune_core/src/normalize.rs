//! Response normalizer: strip model preamble and wrapping quotes.

/// Lead-ins the model tends to emit before the rewritten prompt.
///
/// Checked in this order, once each, against the text as it stands at that point.
pub const PREAMBLE_PHRASES: &[&str] = &[
    "Here is an optimized prompt",
    "Here's an optimized prompt",
    "The optimized prompt is",
    "Optimized prompt:",
    "Improved prompt:",
    "Sure! Here is",
    "Here is your optimized prompt:",
    "Here's the improved prompt:",
    "Rewritten prompt:",
];

/// Clean raw model output into a prompt that can be inserted as-is.
///
/// Single pass: a phrase revealed by an earlier strip is only removed if it comes
/// later in [`PREAMBLE_PHRASES`]. Never fails; empty output is valid.
pub fn normalize(raw: &str) -> String {
    let mut text = trim(raw);

    for phrase in PREAMBLE_PHRASES {
        if let Some(rest) = strip_prefix_ignore_case(text, phrase) {
            text = trim(rest);
            if let Some(rest) = text.strip_prefix(':') {
                text = trim(rest);
            }
        }
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text = trim(&text[1..text.len() - 1]);
    }

    text.to_string()
}

/// Whitespace plus the byte order mark, which some model servers leave on replies.
fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Phrases are ASCII, so a byte-length prefix compare is exact.
fn strip_prefix_ignore_case<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let head = text.get(..phrase.len())?;
    if head.eq_ignore_ascii_case(phrase) {
        Some(&text[phrase.len()..])
    } else {
        None
    }
}
