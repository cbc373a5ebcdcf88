// Transcript Parser / Validator
// Enforces the "В:" / "О:" line contract and extracts answer sentences.

use tracing::info;

use crate::services::detection::AnalysisError;
use crate::services::text_processor::split_into_sentences;

/// Prefix marking a question line.
pub const QUESTION_PREFIX: &str = "В:";
/// Prefix marking an answer line.
pub const ANSWER_PREFIX: &str = "О:";

const MALFORMED_LINE_PREVIEW_CHARS: usize = 60;

fn preview(line: &str) -> String {
    if line.chars().count() <= MALFORMED_LINE_PREVIEW_CHARS {
        return line.to_string();
    }
    let mut out: String = line.chars().take(MALFORMED_LINE_PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

/// Validate the transcript and return the answer sentences in document order.
///
/// Every non-empty line must start with the question or answer prefix;
/// a single violation rejects the whole transcript. Question lines are
/// discarded, answer lines are stripped of their prefix and segmented.
pub fn parse_transcript(paragraphs: &[String]) -> Result<Vec<String>, AnalysisError> {
    let lines: Vec<&str> = paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    for line in &lines {
        if !line.starts_with(QUESTION_PREFIX) && !line.starts_with(ANSWER_PREFIX) {
            return Err(AnalysisError::MalformedTranscript {
                line: preview(line),
            });
        }
    }

    let mut sentences = Vec::new();
    for line in &lines {
        if let Some(rest) = line.strip_prefix(ANSWER_PREFIX) {
            sentences.extend(split_into_sentences(rest.trim()));
        }
    }

    if sentences.is_empty() {
        return Err(AnalysisError::NoAnswersFound);
    }

    info!(
        "[TRANSCRIPT] {} lines validated, {} answer sentences",
        lines.len(),
        sentences.len()
    );

    Ok(sentences)
}
