//! Commit message normalization.
//!
//! Replaces variable tokens with fixed placeholders so that messages with the
//! same shape compare equal. Placeholders are wrapped in `<` `>` and contain
//! no digits or hex runs, so no pass can match them.

use regex::Regex;
use std::sync::LazyLock;

/// Substitution passes, applied in order.
static PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // major.minor.patch
        (Regex::new(r"\d+\.\d+\.\d+").unwrap(), "<version>"),
        // YYYY-MM-DD
        (Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap(), "<date>"),
        // issue / PR references
        (Regex::new(r"#\d+").unwrap(), "<issue>"),
        // abbreviated and full commit hashes
        (Regex::new(r"(?i)\b[0-9a-f]{7,40}\b").unwrap(), "<hash>"),
    ]
});

/// Canonicalize a commit message for structural comparison.
pub fn normalize_message(message: &str) -> String {
    let mut out = message.to_string();
    for (pattern, placeholder) in PASSES.iter() {
        out = pattern.replace_all(&out, *placeholder).into_owned();
    }
    out.to_lowercase().trim().to_string()
}
