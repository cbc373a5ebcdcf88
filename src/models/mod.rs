// GenSpec Data Models
// Migrated from the Python bot's implicit dict/tuple shapes

use serde::{Deserialize, Serialize};

use crate::services::morphology::TagSet;

// ============ Labels ============

/// Classification label for one answer sentence.
///
/// `General` (ОБЩЕЕ) marks impersonal / collective / procedural framing,
/// `Specific` (ЧАСТНОЕ) marks personal / first-person-singular framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    General,
    Specific,
}

impl Label {
    /// Russian display name used in the user-facing report.
    pub fn display_ru(&self) -> &'static str {
        match self {
            Label::General => "ОБЩЕЕ",
            Label::Specific => "ЧАСТНОЕ",
        }
    }
}

// ============ Tokens & Sentences ============

/// A word-like unit of a sentence together with its morphological parse.
#[derive(Debug, Clone)]
pub struct Token {
    pub surface: String,
    pub lemma: String,
    pub tags: TagSet,
}

/// One answer sentence: the original string plus its analyzed tokens.
/// Built once during segmentation/analysis, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

// ============ Feature Counts ============

/// Morphological feature counts for one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCounts {
    pub general: u32,
    pub specific: u32,
}

impl FeatureCounts {
    /// Per-sentence label derived from the counts.
    /// Ties resolve to `Specific`, same direction as the transcript verdict.
    pub fn label(&self) -> Label {
        if self.general > self.specific {
            Label::General
        } else {
            Label::Specific
        }
    }
}

// ============ Tally & Report ============

/// Per-method label counts accumulated across all sentences of one transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTally {
    pub general: u32,
    pub specific: u32,
}

impl MethodTally {
    pub fn add(&mut self, label: Label) {
        match label {
            Label::General => self.general += 1,
            Label::Specific => self.specific += 1,
        }
    }

    /// Majority verdict; ties resolve to `Specific`.
    pub fn verdict(&self) -> Label {
        if self.general > self.specific {
            Label::General
        } else {
            Label::Specific
        }
    }
}

/// Final two-method result for one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub run_id: String,
    pub sentence_count: usize,
    pub model_tally: MethodTally,
    pub morph_tally: MethodTally,
    pub model_verdict: Label,
    pub morph_verdict: Label,
}
