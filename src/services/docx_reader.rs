// DOCX Paragraph Extraction
// Only .docx transcripts are accepted; everything else is WrongFormat.

use std::io::Cursor;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use tracing::info;

use crate::services::detection::AnalysisError;

/// Check the submitted file name/content before structural parsing:
/// extension must be `.docx` and the bytes must be an OOXML container
/// carrying `word/document.xml`.
fn verify_container(file_name: &str, bytes: &[u8]) -> Result<(), AnalysisError> {
    if !file_name.to_lowercase().ends_with(".docx") {
        return Err(AnalysisError::WrongFormat);
    }

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|_| AnalysisError::WrongFormat)?;
    archive
        .by_name("word/document.xml")
        .map_err(|_| AnalysisError::WrongFormat)?;

    Ok(())
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    out.push_str(&t.text);
                }
            }
        }
    }
    out
}

/// Extract the ordered paragraph texts of a .docx document.
pub fn read_docx_paragraphs(file_name: &str, bytes: &[u8]) -> Result<Vec<String>, AnalysisError> {
    verify_container(file_name, bytes)?;

    let docx = docx_rs::read_docx(bytes).map_err(|_| AnalysisError::WrongFormat)?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    info!(
        "[DOCX] Extracted {} paragraphs from {}",
        paragraphs.len(),
        file_name
    );

    Ok(paragraphs)
}
