// Morphological Analysis Boundary
// The analyzer itself is an external collaborator (a dictionary-backed
// morphology engine); the core only depends on the lemma/tag contract below.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::models::{Sentence, Token};

/// Grammatical feature markers attached to a word by morphological analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammeme {
    Verb,
    Infinitive,
    /// Причастие (participle).
    Participle,
    /// Деепричастие (adverbial participle).
    AdverbialParticiple,
    Noun,
    Pronoun,
    FirstPerson,
    Singular,
    Plural,
    Perfective,
    Imperfective,
    Passive,
}

/// Unordered set of grammemes for one word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(HashSet<Grammeme>);

impl TagSet {
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn contains(&self, g: Grammeme) -> bool {
        self.0.contains(&g)
    }

    pub fn insert(&mut self, g: Grammeme) {
        self.0.insert(g);
    }

    /// Finite verb or infinitive (the "VERB or INFN" check of the rules).
    pub fn is_verb_like(&self) -> bool {
        self.contains(Grammeme::Verb) || self.contains(Grammeme::Infinitive)
    }
}

impl FromIterator<Grammeme> for TagSet {
    fn from_iter<I: IntoIterator<Item = Grammeme>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One morphological reading of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphParse {
    pub lemma: String,
    pub tags: TagSet,
}

/// External morphological analyzer: word -> (lemma, tag set).
/// Required to be side-effect-free; repeated calls with the same surface
/// form must return the same parse.
pub trait MorphAnalyzer {
    fn analyze(&self, word: &str) -> MorphParse;
}

/// Build a `Sentence` by lower-casing, splitting on whitespace and running
/// every word through the analyzer. Words keep trailing punctuation, the
/// analyzer is expected to tolerate it (the original pipeline did the same).
pub fn analyze_sentence<A: MorphAnalyzer>(text: &str, analyzer: &A) -> Sentence {
    let lowered = text.to_lowercase();
    let tokens = lowered
        .split_whitespace()
        .map(|w| {
            let parse = analyzer.analyze(w);
            Token {
                surface: w.to_string(),
                lemma: parse.lemma,
                tags: parse.tags,
            }
        })
        .collect();

    Sentence {
        text: text.to_string(),
        tokens,
    }
}

// ============ Memoizing wrapper ============

/// Memoizes parses per surface form. Safe because the analyzer contract is
/// referentially transparent.
pub struct CachedAnalyzer<A: MorphAnalyzer> {
    inner: A,
    cache: Mutex<HashMap<String, MorphParse>>,
}

impl<A: MorphAnalyzer> CachedAnalyzer<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<A: MorphAnalyzer> MorphAnalyzer for CachedAnalyzer<A> {
    fn analyze(&self, word: &str) -> MorphParse {
        if let Ok(cache) = self.cache.lock() {
            if let Some(parse) = cache.get(word) {
                return parse.clone();
            }
        }
        let parse = self.inner.analyze(word);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(word.to_string(), parse.clone());
        }
        parse
    }
}

// ============ Heuristic fallback analyzer ============

/// Suffix-driven Russian morphology guesser.
///
/// Stands in for the external dictionary analyzer when none is wired up
/// (CLI runs without a sidecar). Covers the inflection classes the feature
/// rules look at; everything unrecognized degrades to a bare noun reading
/// with the surface form as lemma.
#[derive(Debug, Default)]
pub struct HeuristicAnalyzer;

/// Case forms of the four pronoun lemmas the rules care about.
const PRONOUN_FORMS: &[(&str, &str)] = &[
    ("мы", "мы"),
    ("нас", "мы"),
    ("нам", "мы"),
    ("нами", "мы"),
    ("наш", "наш"),
    ("наша", "наш"),
    ("наше", "наш"),
    ("наши", "наш"),
    ("нашего", "наш"),
    ("нашей", "наш"),
    ("наших", "наш"),
    ("нашему", "наш"),
    ("нашим", "наш"),
    ("нашими", "наш"),
    ("я", "я"),
    ("меня", "я"),
    ("мне", "я"),
    ("мной", "я"),
    ("мною", "я"),
    ("мой", "мой"),
    ("моя", "мой"),
    ("моё", "мой"),
    ("мое", "мой"),
    ("мои", "мой"),
    ("моего", "мой"),
    ("моей", "мой"),
    ("моих", "мой"),
    ("моему", "мой"),
    ("моим", "мой"),
    ("моими", "мой"),
];

/// Prefixes that usually mark the perfective aspect of a past-tense verb.
const PERFECTIVE_PREFIXES: &[&str] = &[
    "по", "с", "за", "про", "вы", "при", "от", "пере", "раз", "рас", "у", "на", "до",
];

impl HeuristicAnalyzer {
    fn strip_punct(word: &str) -> &str {
        word.trim_matches(|c: char| !c.is_alphabetic())
    }

    fn looks_perfective(word: &str) -> bool {
        PERFECTIVE_PREFIXES.iter().any(|p| word.starts_with(p))
    }
}

impl MorphAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, word: &str) -> MorphParse {
        let w = Self::strip_punct(word);

        if let Some((_, lemma)) = PRONOUN_FORMS.iter().find(|(form, _)| *form == w) {
            let tags: TagSet = [Grammeme::Pronoun].into_iter().collect();
            return MorphParse {
                lemma: (*lemma).to_string(),
                tags,
            };
        }

        let mut tags = TagSet::new();

        // Non-finite verb forms first: participles and adverbial participles.
        let participle_endings = [
            "щий", "щая", "щее", "щие", "вший", "вшая", "вшее", "вшие", "нный", "нная", "нное",
            "нные",
        ];
        let passive_participle_endings = ["емый", "емая", "емое", "емые", "имый", "имая", "имое", "имые"];
        let adverbial_endings = ["вшись", "вши", "учи", "ючи"];

        if passive_participle_endings.iter().any(|e| w.ends_with(e)) {
            tags.insert(Grammeme::Participle);
            tags.insert(Grammeme::Passive);
        } else if participle_endings.iter().any(|e| w.ends_with(e)) {
            tags.insert(Grammeme::Participle);
        } else if adverbial_endings.iter().any(|e| w.ends_with(e)) {
            tags.insert(Grammeme::AdverbialParticiple);
        } else if w.ends_with("ть") || w.ends_with("ти") || w.ends_with("чь") {
            tags.insert(Grammeme::Infinitive);
            if Self::looks_perfective(w) {
                tags.insert(Grammeme::Perfective);
            } else {
                tags.insert(Grammeme::Imperfective);
            }
        } else if w.ends_with("ем") || w.ends_with("им") || w.ends_with("ём") {
            tags.insert(Grammeme::Verb);
            tags.insert(Grammeme::FirstPerson);
            tags.insert(Grammeme::Plural);
            if Self::looks_perfective(w) {
                tags.insert(Grammeme::Perfective);
            } else {
                tags.insert(Grammeme::Imperfective);
            }
        } else if w.ends_with('ю') || w.ends_with('у') {
            tags.insert(Grammeme::Verb);
            tags.insert(Grammeme::FirstPerson);
            tags.insert(Grammeme::Singular);
            if Self::looks_perfective(w) {
                tags.insert(Grammeme::Perfective);
            } else {
                tags.insert(Grammeme::Imperfective);
            }
        } else if w.ends_with('л') || w.ends_with("ла") || w.ends_with("ли") || w.ends_with("ло") {
            // Past tense: number is recoverable, person is not.
            tags.insert(Grammeme::Verb);
            if w.ends_with("ли") {
                tags.insert(Grammeme::Plural);
            } else {
                tags.insert(Grammeme::Singular);
            }
            if Self::looks_perfective(w) {
                tags.insert(Grammeme::Perfective);
            } else {
                tags.insert(Grammeme::Imperfective);
            }
        } else {
            tags.insert(Grammeme::Noun);
        }

        MorphParse {
            lemma: w.to_string(),
            tags,
        }
    }
}
