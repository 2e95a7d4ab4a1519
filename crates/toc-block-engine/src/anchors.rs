//! Anchor derivation for headings that have not been given one yet.
//!
//! Anchors are URL-fragment safe: a lowercase, hyphenated slug of the heading
//! text followed by the heading's block id. The id suffix keeps anchors unique
//! when two headings share the same text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::blocks::BlockId;

/// Request to persist a freshly derived anchor on the heading block `identity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorAssignment {
    pub identity: BlockId,
    pub anchor: String,
}

/// Derive the anchor for a heading: `kebab_case(content)-identity`.
pub fn derive_anchor(content: &str, identity: &BlockId) -> String {
    format!("{}-{}", kebab_case(content), identity)
}

/// Lowercase ASCII, hyphen separated slug of `text`.
///
/// Words are split on any run of characters that are neither letters nor
/// digits, and on camel case humps (`fooBar`, `HTMLParser`). Letters and
/// digits stay together, so `"Version 2"` gives `"version-2"` and `"h2o"`
/// stays `"h2o"`. Apostrophes are dropped (`"What's"` gives `"whats"`) and
/// each word is transliterated to ASCII by [`slug::slugify`].
pub fn kebab_case(text: &str) -> String {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("Invalid separator regex"));

    let text = text.replace(APOSTROPHES, "");
    separator
        .split(&text)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_humps)
        .map(slug::slugify)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Split a chunk of letters/digits on camel case boundaries.
fn split_humps(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, c) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());

        let hump = c.is_uppercase() && (prev.is_lowercase() || (prev.is_uppercase() && next_is_lower));
        if hump {
            words.push(&chunk[start..offset]);
            start = offset;
        }
    }

    words.push(&chunk[start..]);
    words
}
