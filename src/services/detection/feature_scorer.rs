// Morphological Feature Scorer
// Counts GENERAL-leaning and SPECIFIC-leaning morphological features of one
// sentence. The two scoring functions are deliberately not symmetric.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{FeatureCounts, Sentence};
use crate::services::morphology::{Grammeme, MorphAnalyzer};

/// Первое лицо во множественном числе (мы, наш).
const FIRST_PERSON_PLURAL_LEMMAS: &[&str] = &["мы", "наш"];

/// Первое лицо в единственном числе (я, мой).
const FIRST_PERSON_SINGULAR_LEMMAS: &[&str] = &["я", "мой"];

/// Суффиксы, характерные для отглагольных существительных.
const DEVERBAL_SUFFIXES: &[&str] = &["ние", "ция", "тельство", "ание", "ение", "ка"];

/// Minimum consecutive verbs for the verb-run feature.
const VERB_RUN_LENGTH: u32 = 3;

fn comma_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\s]+").unwrap())
}

fn looks_like_deverbal(surface: &str) -> bool {
    DEVERBAL_SUFFIXES.iter().any(|s| surface.ends_with(s))
}

/// Compute both feature counts for one sentence.
pub fn score<A: MorphAnalyzer>(sentence: &Sentence, analyzer: &A) -> FeatureCounts {
    FeatureCounts {
        general: general_score(sentence),
        specific: specific_score(sentence, analyzer),
    }
}

/// Подсчет ОБЩИХ признаков: every token is checked against each rule, every
/// qualifying token contributes +1 per rule.
fn general_score(sentence: &Sentence) -> u32 {
    let mut counter = 0;

    for token in &sentence.tokens {
        // Местоимение 1-го лица множественного числа.
        if FIRST_PERSON_PLURAL_LEMMAS.contains(&token.lemma.as_str()) {
            counter += 1;
        }

        // Глагол 1-го лица множественного числа.
        if token.tags.is_verb_like()
            && token.tags.contains(Grammeme::FirstPerson)
            && token.tags.contains(Grammeme::Plural)
        {
            counter += 1;
        }

        // Глагол совершенного вида.
        if token.tags.is_verb_like() && token.tags.contains(Grammeme::Perfective) {
            counter += 1;
        }

        // Пассивная форма.
        if token.tags.contains(Grammeme::Passive) {
            counter += 1;
        }

        // Причастие или деепричастие.
        if token.tags.contains(Grammeme::Participle)
            || token.tags.contains(Grammeme::AdverbialParticiple)
        {
            counter += 1;
        }
    }

    counter
}

/// Подсчет ЧАСТНЫХ признаков: per-token rules plus three whole-sentence
/// rules, each of which contributes at most +1.
fn specific_score<A: MorphAnalyzer>(sentence: &Sentence, analyzer: &A) -> u32 {
    let mut counter = 0;

    for token in &sentence.tokens {
        // Местоимение 1-го лица единственного числа.
        if FIRST_PERSON_SINGULAR_LEMMAS.contains(&token.lemma.as_str()) {
            counter += 1;
        }

        // Глагол 1-го лица единственного числа.
        if token.tags.is_verb_like()
            && token.tags.contains(Grammeme::FirstPerson)
            && token.tags.contains(Grammeme::Singular)
        {
            counter += 1;
        }
    }

    // Отглагольное существительное (checked on the surface form).
    if sentence
        .tokens
        .iter()
        .any(|t| t.tags.contains(Grammeme::Noun) && looks_like_deverbal(&t.surface))
    {
        counter += 1;
    }

    // Глагол несовершенного вида.
    if sentence
        .tokens
        .iter()
        .any(|t| t.tags.is_verb_like() && t.tags.contains(Grammeme::Imperfective))
    {
        counter += 1;
    }

    // Три и более глагола подряд: re-tokenize on commas and whitespace and
    // look for a run of consecutive verb/infinitive tokens. The run
    // contributes a single +1 however long it gets.
    if has_verb_run(&sentence.text, analyzer) {
        counter += 1;
    }

    counter
}

fn has_verb_run<A: MorphAnalyzer>(text: &str, analyzer: &A) -> bool {
    let lowered = text.to_lowercase();
    let mut run = 0u32;

    for token in comma_ws_re().split(&lowered).filter(|t| !t.is_empty()) {
        let parse = analyzer.analyze(token);
        if parse.tags.is_verb_like() {
            run += 1;
            if run >= VERB_RUN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
    }

    false
}
