// GenSpec Detection Pipeline
// parse -> segment -> classify every sentence -> aggregate -> report

pub mod aggregation;
pub mod dual_classifier;
pub mod feature_scorer;

pub use aggregation::{aggregate, render_report};
pub use dual_classifier::{classify_sentences, DualLabels};
pub use feature_scorer::score;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{AnalysisReport, Sentence};
use crate::services::classifier_client::{ClassifierError, SentenceClassifier};
use crate::services::docx_reader::read_docx_paragraphs;
use crate::services::morphology::{analyze_sentence, MorphAnalyzer};
use crate::services::transcript::parse_transcript;

/// Terminal failure of one analysis run. None of these are retried; the
/// conversation layer maps them to user-facing messages and state resets.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("submitted file is not a .DOCX document")]
    WrongFormat,
    #[error("transcript line without a question/answer prefix: {line}")]
    MalformedTranscript { line: String },
    #[error("no answer lines found in transcript")]
    NoAnswersFound,
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),
}

/// Run one full analysis over a submitted document.
///
/// Strictly sequential: each stage completes before the next starts, and a
/// failure at any stage aborts the run with no partial report.
pub async fn run_analysis<C, A>(
    file_name: &str,
    bytes: &[u8],
    classifier: &C,
    analyzer: &A,
) -> Result<AnalysisReport, AnalysisError>
where
    C: SentenceClassifier,
    A: MorphAnalyzer,
{
    let run_id = Uuid::new_v4().to_string();
    info!("[PIPELINE] run {} started for {}", run_id, file_name);

    let paragraphs = read_docx_paragraphs(file_name, bytes)?;
    let sentence_texts = parse_transcript(&paragraphs)?;

    let sentences: Vec<Sentence> = sentence_texts
        .iter()
        .map(|text| analyze_sentence(text, analyzer))
        .collect();

    let labels = classify_sentences(&sentences, classifier, analyzer).await?;
    let report = aggregate(&labels, run_id);

    info!(
        "[PIPELINE] run {} done: {} sentences, model={:?}, morph={:?}",
        report.run_id, report.sentence_count, report.model_verdict, report.morph_verdict
    );

    Ok(report)
}
