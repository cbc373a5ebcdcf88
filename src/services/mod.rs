// GenSpec Core Services
// Migrated from the Python bot's handler/helper functions

pub mod classifier_client;
pub mod detection;
pub mod docx_reader;
pub mod morphology;
pub mod session;
pub mod text_processor;
pub mod transcript;

pub use classifier_client::{ClassifierClient, ClassifierError, SentenceClassifier};
pub use docx_reader::read_docx_paragraphs;
pub use morphology::{analyze_sentence, CachedAnalyzer, HeuristicAnalyzer, MorphAnalyzer};
pub use text_processor::split_into_sentences;
pub use transcript::parse_transcript;

// Re-export detection module functions
pub use detection::{aggregate, classify_sentences, render_report, run_analysis, AnalysisError};
