//! Benchmark report and text rendering

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EvalError, EvaluationRecord};
use crate::logic::model::ModelKind;

/// Accuracy of one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub model: ModelKind,
    pub correct: usize,
    pub total: usize,
    /// Percent, 0-100
    pub accuracy: f64,
    /// True when the strategy could not load and predicted neutral throughout
    pub degraded: bool,
    #[serde(skip)]
    pub records: Vec<EvaluationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub sample_size: usize,
    pub seed: Option<u64>,
    pub cleaned: bool,
    pub generated_at: DateTime<Utc>,
    pub models: Vec<ModelScore>,
}

impl EvaluationReport {
    pub fn get(&self, kind: ModelKind) -> Option<&ModelScore> {
        self.models.iter().find(|m| m.model == kind)
    }

    /// (UPPERCASE name, accuracy) pairs for charting
    pub fn accuracies(&self) -> Vec<(String, f64)> {
        self.models
            .iter()
            .map(|m| (m.model.as_str().to_uppercase(), m.accuracy))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, EvalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), EvalError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Report saved as {}", path.as_ref().display());
        Ok(())
    }
}

/// Horizontal bar chart on a 0-100 scale
pub fn render_bar_chart(title: &str, values: &[(String, f64)], width: usize) -> String {
    let label_width = values.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::new();

    let _ = writeln!(out, "{}", title);
    for (name, value) in values {
        let clamped = value.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * width as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<label_width$} |{}{}| {:6.2}%",
            name,
            "█".repeat(filled),
            " ".repeat(width - filled),
            value,
        );
    }
    out
}

/// Per-row listing: status, actual, predicted, first 70 chars of text
pub fn render_details(score: &ModelScore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Detailed Results for {} (Actual vs Predicted):", score.model.as_str().to_uppercase());

    for record in &score.records {
        let status = if record.is_match() { "✅" } else { "❌" };
        let actual = record.actual.map(|a| a.as_str()).unwrap_or("unlabeled");
        let preview: String = record.text.chars().take(70).collect();
        let _ = writeln!(
            out,
            "{} Actual: {} | Pred: {} | Text: {}...",
            status, actual, record.predicted, preview
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::Sentiment;

    fn score(model: ModelKind, accuracy: f64) -> ModelScore {
        ModelScore { model, correct: 0, total: 0, accuracy, degraded: false, records: Vec::new() }
    }

    #[test]
    fn test_bar_chart_scales() {
        let chart = render_bar_chart(
            "Accuracy",
            &[("VADER".to_string(), 50.0), ("ROBERTA".to_string(), 100.0)],
            10,
        );
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "Accuracy");
        assert_eq!(lines[1], "VADER   |█████     |  50.00%");
        assert_eq!(lines[2], "ROBERTA |██████████| 100.00%");
    }

    #[test]
    fn test_details_marks_matches() {
        let mut s = score(ModelKind::Vader, 50.0);
        s.records = vec![
            EvaluationRecord { text: "good".into(), actual: Some(Sentiment::Positive), predicted: Sentiment::Positive },
            EvaluationRecord { text: "meh".into(), actual: None, predicted: Sentiment::Negative },
        ];

        let details = render_details(&s);
        assert!(details.contains("✅ Actual: positive | Pred: positive | Text: good..."));
        assert!(details.contains("❌ Actual: unlabeled | Pred: negative | Text: meh..."));
    }

    #[test]
    fn test_json_skips_records() {
        let report = EvaluationReport {
            sample_size: 10,
            seed: Some(3),
            cleaned: false,
            generated_at: Utc::now(),
            models: vec![score(ModelKind::TextBlob, 70.0)],
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["models"][0]["model"], "textblob");
        assert_eq!(json["models"][0]["accuracy"], 70.0);
        assert!(json["models"][0].get("records").is_none());
        assert_eq!(report.accuracies(), vec![("TEXTBLOB".to_string(), 70.0)]);
    }
}
