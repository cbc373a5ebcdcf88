// Text Processing Service
// Sentence segmentation for answer lines

use regex::Regex;
use std::sync::OnceLock;

fn sentence_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Sentence-final punctuation followed by whitespace. Rust regex has no
    // lookbehind, so the boundary is rewritten to a sentinel and split on it.
    RE.get_or_init(|| Regex::new(r"([.!?])\s+").unwrap())
}

/// Split raw answer text into sentences.
///
/// Splits on `.`, `!` or `?` followed by whitespace; results are trimmed and
/// empty pieces dropped. Order is preserved and no state crosses sentences.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![];
    }

    let marked = sentence_boundary_re().replace_all(trimmed, "$1\x00");
    marked
        .split('\x00')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let text = "Мы решили действовать. Я подумал об этом.";
        let sentences = split_into_sentences(text);
        assert_eq!(
            sentences,
            vec!["Мы решили действовать.", "Я подумал об этом."]
        );
    }

    #[test]
    fn test_split_mixed_terminators() {
        let text = "Что это было? Не знаю! Посмотрим.";
        let sentences = split_into_sentences(text);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "Что это было?");
        assert_eq!(sentences[1], "Не знаю!");
    }

    #[test]
    fn test_no_terminator_yields_single_sentence() {
        let sentences = split_into_sentences("ответ без точки");
        assert_eq!(sentences, vec!["ответ без точки"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   \t ").is_empty());
    }

    #[test]
    fn test_roundtrip_modulo_whitespace() {
        let text = "Первое предложение.  Второе!   Третье?";
        let sentences = split_into_sentences(text);
        let rejoined = sentences.join(" ");
        let normalized: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), normalized);
    }
}
