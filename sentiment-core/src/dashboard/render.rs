//! Terminal rendering for dashboard results

use std::fmt::Write as _;

use super::{Battle, LocalVerdict};
use crate::api::{CompareResponse, PredictResponse};
use crate::logic::model::ModelKind;

/// Boxed table with one header row and one value row per entry in `rows`
pub fn render_table(title: &str, headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+", border);

    let line = |cells: &[String]| {
        let inner = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let pad = w - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|", inner)
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", border);
    let _ = writeln!(out, "{}", line(headers));
    let _ = writeln!(out, "{}", border);
    for row in rows {
        let _ = writeln!(out, "{}", line(row));
    }
    let _ = writeln!(out, "{}", border);
    out
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "N/A".to_string(),
    }
}

fn local_cells(verdict: &LocalVerdict) -> (String, String) {
    (verdict.sentiment.title().to_string(), percent(verdict.intensity))
}

/// "Final Decision" and "Model Certainty / Intensity" tables
pub fn render_battle(battle: &Battle) -> String {
    let remote = battle.remote.model_used.short_name();
    let (v_label, v_score) = local_cells(&battle.vader);
    let (t_label, t_score) = local_cells(&battle.textblob);

    let decision = render_table(
        "Final Decision",
        &[
            "VADER Sentiment".to_string(),
            "TextBlob Sentiment".to_string(),
            format!("{} Sentiment", remote),
        ],
        &[vec![v_label, t_label, battle.remote.sentiment.title().to_string()]],
    );

    let certainty = render_table(
        "Model Certainty / Intensity",
        &[
            "VADER Score".to_string(),
            "TextBlob Score".to_string(),
            format!("{} Score", remote),
        ],
        &[
            vec![v_score, t_score, percent(Some(battle.remote.confidence))],
            vec![
                "Rule-based intensity".to_string(),
                "Pattern-based polarity".to_string(),
                "Server confidence".to_string(),
            ],
        ],
    );

    format!("{}\n{}", decision, certainty)
}

/// Server-side labels of all three strategies
pub fn render_compare(response: &CompareResponse) -> String {
    let headers: Vec<String> = ModelKind::ALL
        .iter()
        .map(|kind| format!("{} Sentiment", kind.short_name()))
        .collect();
    let labels: Vec<String> = ModelKind::ALL
        .iter()
        .map(|&kind| response.results.get(kind).title().to_string())
        .collect();

    let mut out = render_table("Server Comparison", &headers, &[labels]);
    let _ = writeln!(out, "Active model: {}", response.model_used.display_name());
    out
}

/// Single-model result. Adds a note when the server answered with a
/// different model than the one requested.
pub fn render_single(requested: ModelKind, response: &PredictResponse) -> String {
    let mut out = render_table(
        &format!("{} Result", requested.display_name()),
        &["Result".to_string(), "Confidence".to_string()],
        &[vec![
            response.sentiment.title().to_string(),
            percent(Some(response.confidence)),
        ]],
    );

    if response.model_used != requested {
        let _ = writeln!(
            out,
            "Note: the server's active model is {}, not {}. Change api_config.active_model and restart the server to switch.",
            response.model_used.display_name(),
            requested.display_name(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{Comparison, Sentiment};

    fn response(model_used: ModelKind) -> PredictResponse {
        PredictResponse { sentiment: Sentiment::Positive, confidence: 85.0, model_used }
    }

    #[test]
    fn test_table_layout() {
        let table = render_table(
            "T",
            &["A".to_string(), "Longer".to_string()],
            &[vec!["xyz".to_string(), "1".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], "+-----+--------+");
        assert_eq!(lines[2], "| A   | Longer |");
        assert_eq!(lines[4], "| xyz | 1      |");
        assert_eq!(lines[5], lines[1]);
    }

    #[test]
    fn test_battle_tables() {
        let battle = Battle {
            vader: LocalVerdict { sentiment: Sentiment::Positive, intensity: Some(83.456) },
            textblob: LocalVerdict { sentiment: Sentiment::Negative, intensity: Some(25.0) },
            remote: response(ModelKind::Roberta),
        };

        let out = render_battle(&battle);
        assert!(out.contains("Final Decision"));
        assert!(out.contains("Model Certainty / Intensity"));
        assert!(out.contains("RoBERTa Sentiment"));
        assert!(out.contains("83.5%"));
        assert!(out.contains("25.0%"));
        assert!(out.contains("85.0%"));
        assert!(out.contains("Negative"));
    }

    #[test]
    fn test_missing_intensity_shown_as_na() {
        let battle = Battle {
            vader: LocalVerdict { sentiment: Sentiment::Neutral, intensity: None },
            textblob: LocalVerdict { sentiment: Sentiment::Positive, intensity: Some(0.0) },
            remote: response(ModelKind::Vader),
        };
        let out = render_battle(&battle);
        assert!(out.contains("N/A"));
        assert!(out.contains("VADER Score"));
    }

    #[test]
    fn test_single_notes_model_mismatch() {
        let same = render_single(ModelKind::Roberta, &response(ModelKind::Roberta));
        assert!(same.contains("RoBERTa (Transformer) Result"));
        assert!(!same.contains("Note:"));

        let other = render_single(ModelKind::Vader, &response(ModelKind::Roberta));
        assert!(other.contains("Note: the server's active model is RoBERTa (Transformer)"));
    }

    #[test]
    fn test_compare_table() {
        let out = render_compare(&CompareResponse {
            results: Comparison {
                vader: Sentiment::Positive,
                textblob: Sentiment::Negative,
                roberta: Sentiment::Neutral,
            },
            model_used: ModelKind::TextBlob,
        });
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Server Comparison");
        assert!(lines[2].contains("VADER Sentiment") && lines[2].contains("RoBERTa Sentiment"));
        assert!(lines[4].starts_with("| Positive") && lines[4].contains("Neutral"));
        assert_eq!(lines[6], "Active model: TextBlob (Pattern)");
    }
}
