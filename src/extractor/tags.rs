//! Tag resolution.
//!
//! Three candidate sources, first non-empty wins: the payload's tag
//! array, a filtered view of the first version's trained words, and a
//! fixed vocabulary sniffed out of the description.

use crate::clients::civitai::{CivitaiModel, TagEntry};

/// Descriptive words worth keeping when nothing better is available.
const DESCRIPTION_VOCABULARY: [&str; 10] = [
    "anime",
    "character",
    "woman",
    "man",
    "girl",
    "boy",
    "portrait",
    "realistic",
    "fantasy",
    "scifi",
];

const TRAINED_WORD_CAP: usize = 10;

/// Resolves the comma-joined tag string, or `None` when every source is
/// empty.
#[must_use]
pub fn resolve(payload: &CivitaiModel) -> Option<String> {
    let from_tags: Vec<String> = payload
        .tags
        .iter()
        .flatten()
        .filter_map(TagEntry::normalize)
        .collect();
    if !from_tags.is_empty() {
        return Some(from_tags.join(", "));
    }

    let from_trained: Vec<&str> = payload
        .first_version()
        .and_then(|v| v.trained_words.as_deref())
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .filter(|w| keep_trained_word(w))
        .take(TRAINED_WORD_CAP)
        .collect();
    if !from_trained.is_empty() {
        return Some(from_trained.join(", "));
    }

    let description = payload.description.as_deref().unwrap_or_default().to_lowercase();
    let from_vocabulary: Vec<&str> = DESCRIPTION_VOCABULARY
        .iter()
        .copied()
        .filter(|word| description.contains(word))
        .collect();

    (!from_vocabulary.is_empty()).then(|| from_vocabulary.join(", "))
}

/// Keeps descriptive trained words, dropping the ones that read as
/// trigger syntax or body-part boilerplate.
fn keep_trained_word(word: &str) -> bool {
    if word.contains('(') || word.contains(')') || word.chars().count() < 3 {
        return false;
    }
    if word.contains("1girl") || word.contains("1boy") {
        return false;
    }
    if word.contains("breasts") || word.contains("eyes") || word.contains("hair") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> CivitaiModel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tag_array_wins_over_trained_words() {
        let p = payload(
            r#"{
                "tags": ["anime", {"name": "character"}],
                "modelVersions": [{"trainedWords": ["descriptive tag"]}]
            }"#,
        );
        assert_eq!(resolve(&p).as_deref(), Some("anime, character"));
    }

    #[test]
    fn test_trained_word_filter() {
        let p = payload(
            r#"{
                "modelVersions": [{"trainedWords": [
                    "1girl, red outfit",
                    "red ribbon",
                    "(masterpiece)",
                    "ok",
                    "blue eyes",
                    "long hair",
                    "medium breasts",
                    "school uniform"
                ]}]
            }"#,
        );
        assert_eq!(resolve(&p).as_deref(), Some("red ribbon, school uniform"));
    }

    #[test]
    fn test_trained_words_capped_at_ten() {
        let words: Vec<String> = (0..15).map(|i| format!("word number {i}")).collect();
        let json = format!(
            r#"{{"modelVersions": [{{"trainedWords": {}}}]}}"#,
            serde_json::to_string(&words).unwrap()
        );
        let p = payload(&json);
        let resolved = resolve(&p).unwrap();
        assert_eq!(resolved.split(", ").count(), 10);
        assert!(resolved.starts_with("word number 0"));
        assert!(resolved.ends_with("word number 9"));
    }

    #[test]
    fn test_description_vocabulary_fallback() {
        let p = payload(
            r#"{"description": "A realistic portrait of a woman in a fantasy setting."}"#,
        );
        assert_eq!(
            resolve(&p).as_deref(),
            Some("woman, portrait, realistic, fantasy")
        );
    }

    #[test]
    fn test_vocabulary_match_is_case_insensitive() {
        let p = payload(r#"{"description": "ANIME Character art"}"#);
        assert_eq!(resolve(&p).as_deref(), Some("anime, character"));
    }

    #[test]
    fn test_empty_sources_leave_tags_unset() {
        assert_eq!(resolve(&payload("{}")), None);

        let p = payload(
            r#"{
                "tags": [],
                "description": "nothing of note",
                "modelVersions": [{"trainedWords": ["(a)", "xy"]}]
            }"#,
        );
        assert_eq!(resolve(&p), None);
    }
}
