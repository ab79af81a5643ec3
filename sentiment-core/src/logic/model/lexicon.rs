//! Lexicon Strategy - VADER Rule-based Scoring
//!
//! Wraps the `vader_sentiment` analyzer (full VADER lexicon and emoji table,
//! boosters, negation, capitalization, "but" and punctuation rules) and
//! applies the inclusive compound threshold.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

use super::Sentiment;
use crate::logic::config::LexiconParams;

/// The analyzer only borrows its static lexicons, so one instance serves every thread
static ANALYZER: Lazy<SentimentIntensityAnalyzer<'static>> = Lazy::new(SentimentIntensityAnalyzer::new);

/// Proportions of negative, neutral and positive text plus the normalized
/// compound score in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

pub fn polarity_scores(text: &str) -> PolarityScores {
    let scores = ANALYZER.polarity_scores(text);
    let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

    PolarityScores {
        neg: get("neg"),
        neu: get("neu"),
        pos: get("pos"),
        compound: get("compound"),
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Lexicon predictor: positive iff compound >= threshold
#[derive(Debug, Clone)]
pub struct LexiconPredictor {
    threshold: f64,
}

impl LexiconPredictor {
    pub fn new(params: &LexiconParams) -> Self {
        Self { threshold: params.threshold }
    }

    pub fn compound(&self, text: &str) -> f64 {
        polarity_scores(text).compound
    }

    pub fn predict(&self, text: &str) -> Sentiment {
        self.classify(self.compound(text))
    }

    /// Decision rule on a precomputed score
    pub fn classify(&self, compound: f64) -> Sentiment {
        if compound >= self.threshold {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_single_positive_word() {
        let scores = polarity_scores("I love this");
        assert!(approx(scores.compound, 0.6369), "got {}", scores.compound);
        assert!(scores.pos > 0.0);
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn test_no_sentiment_words_is_zero() {
        assert_eq!(polarity_scores("").compound, 0.0);
        assert_eq!(polarity_scores("going to the store").compound, 0.0);
    }

    #[test]
    fn test_full_lexicon_coverage() {
        for text in [
            "I am so delighted and grateful",
            "thrilled with the results",
            "what a gorgeous sunny morning",
        ] {
            let c = polarity_scores(text).compound;
            assert!(c >= 0.05, "{text:?} scored {c}");
        }

        let c = polarity_scores("feeling miserable and depressed today").compound;
        assert!(c < 0.0, "scored {c}");
    }

    #[test]
    fn test_negation_flips_sign() {
        assert!(polarity_scores("this is good").compound > 0.0);
        assert!(polarity_scores("this is not good").compound < 0.0);
        assert!(polarity_scores("this isn't good").compound < 0.0);
    }

    #[test]
    fn test_booster_amplifies() {
        let plain = polarity_scores("good movie").compound;
        let boosted = polarity_scores("very good movie").compound;
        assert!(boosted > plain);
    }

    #[test]
    fn test_exclamation_amplifies() {
        let plain = polarity_scores("good movie").compound;
        let loud = polarity_scores("good movie!!!").compound;
        assert!(loud > plain);
    }

    #[test]
    fn test_caps_emphasis() {
        let plain = polarity_scores("this is great").compound;
        let shouted = polarity_scores("this is GREAT").compound;
        assert!(shouted > plain);
    }

    #[test]
    fn test_but_shifts_weight() {
        assert!(polarity_scores("the food was good but the service was terrible").compound < 0.0);
    }

    #[test]
    fn test_compound_bounded() {
        let text = "love love love love love love love love best best best!!!!";
        let c = polarity_scores(text).compound;
        assert!(c <= 1.0 && c > 0.9);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let predictor = LexiconPredictor::new(&LexiconParams { threshold: 0.05 });
        assert_eq!(predictor.classify(0.05), Sentiment::Positive);
        assert_eq!(predictor.classify(0.0499), Sentiment::Negative);
        assert_eq!(predictor.classify(-1.0), Sentiment::Negative);
    }

    #[test]
    fn test_predict_labels() {
        let predictor = LexiconPredictor::new(&LexiconParams::default());
        assert_eq!(predictor.predict("I absolutely love this project"), Sentiment::Positive);
        assert_eq!(predictor.predict("worst day ever, I hate it"), Sentiment::Negative);
        assert_eq!(predictor.predict("thrilled with the results"), Sentiment::Positive);
        // no lexicon hits -> 0.0 < 0.05
        assert_eq!(predictor.predict("going to the store"), Sentiment::Negative);
    }

    #[test]
    fn test_monotonic_in_score() {
        let predictor = LexiconPredictor::new(&LexiconParams { threshold: 0.2 });
        let mut seen_positive = false;
        for step in -10..=10 {
            let label = predictor.classify(step as f64 / 10.0);
            if label == Sentiment::Positive {
                seen_positive = true;
            } else {
                assert!(!seen_positive, "negative after positive at {}", step);
            }
        }
        assert!(seen_positive);
    }
}
