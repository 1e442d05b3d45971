//! Hobby-to-keyword mapping
//!
//! Hobby names describe activities; nearby-search works better with venue
//! types. This table rewrites the former into the latter. Hobbies without
//! an entry pass through as their own search term, which works for most
//! of them.

/// Venue-type keywords for known hobbies, keyed by lowercased hobby name
const KEYWORD_TABLE: &[(&str, &str)] = &[
    ("swimming", "swimming pool"),
    ("basketball", "basketball court"),
    ("yoga", "yoga studio"),
    ("pilates", "pilates studio"),
    ("ceramics", "pottery studio"),
    ("movie", "cinema"),
    ("tennis", "tennis court"),
    ("cycling", "bike trail"),
    ("cooking", "cooking class"),
    ("painting", "art studio"),
    ("running", "running track"),
    ("chess", "chess club"),
    ("photography", "photography store"),
    ("hiking", "hiking trail"),
    ("surfing", "surfing beach"),
    ("dancing", "dance studio"),
    ("bowling", "bowling alley"),
    ("gym", "gym"),
];

/// Maps a hobby name to its venue-search keyword.
///
/// Matching ignores case and surrounding whitespace; unknown hobbies fall
/// back to the hobby name itself, trimmed but otherwise untouched.
pub fn hobby_to_keyword(hobby: &str) -> String {
    let normalized = hobby.trim().to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, keyword)| (*keyword).to_string())
        .unwrap_or_else(|| hobby.trim().to_string())
}
