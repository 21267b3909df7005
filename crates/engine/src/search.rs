//! Free-text search and name suggestions.

use serde::{Deserialize, Serialize};

use crate::entries::Entry;

/// Maximum number of name suggestions returned while typing.
pub const SUGGESTION_LIMIT: usize = 5;

/// Canonical form used for substring matching: lowercased, with every
/// period and whitespace character removed. Tolerates punctuation and
/// spacing inconsistencies in freeform name entry ("J. Smith" vs
/// "J Smith").
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether an entry matches a live search query. A blank query matches
/// unconditionally; otherwise the normalized query must be a substring of
/// the normalized name or place.
pub fn matches(query: &str, entry: &Entry) -> bool {
    let needle = normalize(query);
    if needle.is_empty() {
        return true;
    }
    normalize(&entry.name).contains(&needle) || normalize(&entry.place).contains(&needle)
}

/// A candidate name for an in-progress form input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub place: String,
}

impl Suggestion {
    /// One-way, idempotent copy into a form buffer: the name is always
    /// overwritten, the place only when the suggestion carries one.
    pub fn apply(&self, name: &mut String, place: &mut String) {
        name.clone_from(&self.name);
        if !self.place.is_empty() {
            place.clone_from(&self.place);
        }
    }
}

/// Candidate names for the in-progress input `input`, in the iteration
/// order of `entries` (the fetch order, not the display order).
///
/// An entry qualifies when its name case-insensitively contains the input
/// but is not exactly equal to it; names are deduplicated
/// case-insensitively keeping the first occurrence (including its place),
/// and at most [`SUGGESTION_LIMIT`] suggestions are returned.
pub fn suggestions(input: &str, entries: &[Entry]) -> Vec<Suggestion> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();

    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for entry in entries {
        let lower = entry.name.to_lowercase();
        if lower == needle || !lower.contains(&needle) {
            continue;
        }
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        out.push(Suggestion {
            name: entry.name.clone(),
            place: entry.place.clone(),
        });
        if out.len() == SUGGESTION_LIMIT {
            break;
        }
    }
    out
}
