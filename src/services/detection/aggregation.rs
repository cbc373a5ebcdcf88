// Aggregation Logic
// Tallies per-sentence labels per method and derives the final verdicts.

use crate::models::{AnalysisReport, Label, MethodTally};

use super::dual_classifier::DualLabels;

/// Aggregate per-sentence labels into the final report. Deterministic and
/// pure: the verdict per method is the label with strictly more votes, ties
/// resolving to `Specific`.
pub fn aggregate(labels: &DualLabels, run_id: String) -> AnalysisReport {
    let mut model_tally = MethodTally::default();
    for label in &labels.model {
        model_tally.add(*label);
    }

    let mut morph_tally = MethodTally::default();
    for label in &labels.morph {
        morph_tally.add(*label);
    }

    AnalysisReport {
        run_id,
        sentence_count: labels.model.len(),
        model_verdict: model_tally.verdict(),
        morph_verdict: morph_tally.verdict(),
        model_tally,
        morph_tally,
    }
}

/// Render the user-facing report text (Russian, matching the bot wording).
pub fn render_report(report: &AnalysisReport) -> String {
    format!(
        "📊 Интервью проанализировано:\n\n\
         Анализ языковой модели:\n\
         ОБЩИХ признаков: {}\n\
         ЧАСТНЫХ признаков: {}\n\
         Результат: {}\n\n\
         Морфологический анализ:\n\
         ОБЩИХ признаков: {}\n\
         ЧАСТНЫХ признаков: {}\n\
         Результат: {}",
        report.model_tally.general,
        report.model_tally.specific,
        report.model_verdict.display_ru(),
        report.morph_tally.general,
        report.morph_tally.specific,
        report.morph_verdict.display_ru(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(model: Vec<Label>, morph: Vec<Label>) -> DualLabels {
        DualLabels { model, morph }
    }

    #[test]
    fn test_aggregate_counts_per_method() {
        let labels = labels(
            vec![Label::General, Label::General, Label::Specific],
            vec![Label::Specific, Label::Specific, Label::Specific],
        );
        let report = aggregate(&labels, "run-1".to_string());

        assert_eq!(report.sentence_count, 3);
        assert_eq!(report.model_tally, MethodTally { general: 2, specific: 1 });
        assert_eq!(report.morph_tally, MethodTally { general: 0, specific: 3 });
        assert_eq!(report.model_verdict, Label::General);
        assert_eq!(report.morph_verdict, Label::Specific);
    }

    #[test]
    fn test_aggregate_tie_goes_specific() {
        let labels = labels(
            vec![Label::General, Label::Specific],
            vec![Label::General, Label::Specific],
        );
        let report = aggregate(&labels, "run-2".to_string());
        assert_eq!(report.model_verdict, Label::Specific);
        assert_eq!(report.morph_verdict, Label::Specific);
    }

    #[test]
    fn test_render_report_wording() {
        let labels = labels(vec![Label::General], vec![Label::Specific]);
        let report = aggregate(&labels, "run-3".to_string());
        let text = render_report(&report);

        assert!(text.contains("Анализ языковой модели"));
        assert!(text.contains("Морфологический анализ"));
        assert!(text.contains("Результат: ОБЩЕЕ"));
        assert!(text.contains("Результат: ЧАСТНОЕ"));
        assert!(text.contains("ОБЩИХ признаков: 1"));
    }
}
