// Dual Classifier
// Classifies every sentence twice: once through the statistical model,
// once through the morphological feature scorer.

use tracing::{info, warn};

use crate::models::{Label, Sentence};
use crate::services::classifier_client::{ClassifierError, SentenceClassifier};
use crate::services::morphology::MorphAnalyzer;

use super::feature_scorer;

/// Per-sentence label pairs for one transcript, order-preserving.
#[derive(Debug, Clone, Default)]
pub struct DualLabels {
    pub model: Vec<Label>,
    pub morph: Vec<Label>,
}

/// Classify all sentences with both methods.
///
/// Sentences are processed sequentially in input order. The two methods are
/// independent per sentence; a failed model call aborts the whole run with
/// no partial result.
pub async fn classify_sentences<C, A>(
    sentences: &[Sentence],
    classifier: &C,
    analyzer: &A,
) -> Result<DualLabels, ClassifierError>
where
    C: SentenceClassifier,
    A: MorphAnalyzer,
{
    let mut labels = DualLabels::default();

    for (idx, sentence) in sentences.iter().enumerate() {
        let classification = classifier.classify_one(&sentence.text).await.map_err(|e| {
            warn!("[DUAL] model call failed on sentence {}: {}", idx, e);
            e
        })?;
        labels.model.push(classification.label);

        let counts = feature_scorer::score(sentence, analyzer);
        labels.morph.push(counts.label());
    }

    info!("[DUAL] classified {} sentences", sentences.len());
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier_client::Classification;
    use crate::services::morphology::{MorphParse, TagSet};
    use std::sync::Mutex;

    struct NullAnalyzer;

    impl MorphAnalyzer for NullAnalyzer {
        fn analyze(&self, word: &str) -> MorphParse {
            MorphParse {
                lemma: word.to_string(),
                tags: TagSet::new(),
            }
        }
    }

    /// Returns scripted labels in order; records every input text.
    struct ScriptedClassifier {
        script: Vec<Result<Label, ()>>,
        seen: Mutex<Vec<String>>,
    }

    impl SentenceClassifier for ScriptedClassifier {
        async fn classify_one(&self, text: &str) -> Result<Classification, ClassifierError> {
            let mut seen = self.seen.lock().unwrap();
            let idx = seen.len();
            seen.push(text.to_string());
            match self.script[idx] {
                Ok(label) => Ok(Classification { label, score: 0.9 }),
                Err(()) => Err(ClassifierError::ServiceError(500)),
            }
        }
    }

    fn plain_sentence(text: &str) -> Sentence {
        Sentence {
            text: text.to_string(),
            tokens: vec![],
        }
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let sentences = vec![plain_sentence("раз."), plain_sentence("два."), plain_sentence("три.")];
        let classifier = ScriptedClassifier {
            script: vec![Ok(Label::General), Ok(Label::Specific), Ok(Label::General)],
            seen: Mutex::new(vec![]),
        };
        let labels = classify_sentences(&sentences, &classifier, &NullAnalyzer)
            .await
            .unwrap();

        assert_eq!(
            labels.model,
            vec![Label::General, Label::Specific, Label::General]
        );
        // Tokenless sentences score 0:0, tie goes to Specific.
        assert_eq!(labels.morph, vec![Label::Specific; 3]);
        assert_eq!(
            *classifier.seen.lock().unwrap(),
            vec!["раз.", "два.", "три."]
        );
    }

    #[tokio::test]
    async fn test_model_failure_aborts_run() {
        let sentences = vec![plain_sentence("раз."), plain_sentence("два.")];
        let classifier = ScriptedClassifier {
            script: vec![Ok(Label::General), Err(())],
            seen: Mutex::new(vec![]),
        };
        let err = classify_sentences(&sentences, &classifier, &NullAnalyzer)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifierError::ServiceError(500)));
    }
}
