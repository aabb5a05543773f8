//! Sentence segmentation shared by both extractors

/// Split text into trimmed, non-empty sentences on terminal punctuation
///
/// Runs of `.`, `!` and `?` act as one separator, so ellipses and "?!"
/// do not produce empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
