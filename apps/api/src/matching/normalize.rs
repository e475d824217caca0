//! Text normalization shared by the scoring policies.
//!
//! There are two rule sets here and they are NOT interchangeable:
//!
//! - [`normalize`] keeps `+`, `.` and `#` so taxonomy phrases such as `c++`,
//!   `node.js` and `c#` survive, and turns every other symbol into a space.
//! - [`strip_for_keywords`] deletes everything outside `[a-z0-9\s]`, so
//!   `node.js` collapses to `nodejs` and `c++` to `c`.
//!
//! Unifying them changes scores for compound terms. Keep them apart until the
//! keyword policy is deliberately re-tuned.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// Lowercased text containing only `[a-z0-9+.#]` tokens separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Substring containment. `"sql"` is contained in `"mysql"`.
    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.0.contains(needle)
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_phrase_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '#')
}

/// Lowercases `text`, replaces every character outside `[a-z0-9+.#]` with a
/// space and collapses whitespace runs. Idempotent.
pub fn normalize(text: &str) -> NormalizedText {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_phrase_char(c) { c } else { ' ' })
        .collect();

    NormalizedText(replaced.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Lowercases `text` and deletes every character outside `[a-z0-9\s]`.
///
/// Symbols are removed rather than replaced, so `"full-stack"` becomes
/// `"fullstack"`. See the module docs before changing this.
pub fn strip_for_keywords(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!").as_str(), "hello world");
    }

    #[test]
    fn test_normalize_keeps_compound_skill_symbols() {
        assert_eq!(
            normalize("C++, Node.js & C# (senior)").as_str(),
            "c++ node.js c# senior"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  react\n\n\tnode   sql ").as_str(), "react node sql");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize("").as_str(), "");
        assert_eq!(normalize("!!! ---").as_str(), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Senior Rust/Go Engineer — 5+ yrs",
            "UI/UX designer; Figma, Sketch",
            "Café résumé naïve",
            "node.js...c#",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_replaces_non_ascii_letters() {
        assert_eq!(normalize("Résumé").as_str(), "r sum");
    }

    #[test]
    fn test_strip_for_keywords_deletes_symbols() {
        assert_eq!(strip_for_keywords("Node.js, C++ & full-stack"), "nodejs c  fullstack");
    }

    #[test]
    fn test_strip_for_keywords_keeps_whitespace() {
        assert_eq!(strip_for_keywords("React\nDeveloper"), "react\ndeveloper");
    }

    #[test]
    fn test_contains_rejects_empty_needle() {
        let text = normalize("react");
        assert!(!text.contains(""));
        assert!(text.contains("rea"));
    }
}
