//! Local text statistics

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: f32,
}

fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"))
}

/// Count words the way a reader would, ignoring Markdown punctuation
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

pub fn calculate_text_stats(text: &str) -> TextStats {
    let character_count = text.chars().count();
    let word_count = word_count(text);

    // Count sentences (simple heuristic)
    let sentence_count = sentence_regex().find_iter(text).count().max(1);

    let paragraph_count = text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count()
        .max(1);

    TextStats {
        character_count,
        word_count,
        sentence_count,
        paragraph_count,
        avg_words_per_sentence: word_count as f32 / sentence_count as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stats() {
        let stats = calculate_text_stats("# Title\n\nOne two three. Four five!\n\nSix?");
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.paragraph_count, 3);
    }

    #[test]
    fn test_empty_text() {
        let stats = calculate_text_stats("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.avg_words_per_sentence, 0.0);
    }
}
