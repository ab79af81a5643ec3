//! Pattern Strategy - TextBlob-style Polarity
//!
//! Scores text against the pattern sentiment lexicon (`en-sentiment.xml`,
//! the file TextBlob ships). Every known word becomes an assessment with a
//! polarity in [-1, 1] and a subjectivity in [0, 1]. Adverbs (`RB` entries)
//! scale the next known word by their intensity, a negation multiplies the
//! final polarity by -0.5, and `!` boosts the preceding assessment. The text
//! score is the mean over assessments.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ModelError, Sentiment};
use crate::logic::config::PatternParams;

/// Polarity multiplier for negated assessments
const NEGATION_FACTOR: f64 = -0.5;

/// Boost applied by a trailing exclamation mark
const EXCLAMATION_FACTOR: f64 = 1.25;

const NEGATIONS: &[&str] = &["no", "not", "n't", "never"];

/// Part-of-speech tags that modify the following word
const MODIFIER_TAGS: &[&str] = &["RB"];

const PUNCTUATION: &str = ".,;:!?()[]{}`'\"@#$^&*+-|=~_";

/// Emoticon polarities, matched case-insensitively on whole tokens
const EMOTICONS: &[(f64, &[&str])] = &[
    (1.0, &["<3", "♥", "❤"]),
    (1.0, &[">:d", ":-d", ":d", "=-d", "=d", "x-d", "xd", "8-d"]),
    (0.75, &[">:p", ":-p", ":p", ":-b", ":b", ":c)", ":o)", ":^)"]),
    (0.5, &[">:)", ":-)", ":)", "=)", "=]", ":]", ":}", ":>", ":3", "8)", "8-)"]),
    (0.25, &[">;]", ";-)", ";)", ";-]", ";]", ";d", ";^)", "*-)", "*)"]),
    (0.0, &[":-|", ":|"]),
    (-0.05, &[">:o", ":-o", ":o", "o_o", "o.o"]),
    (-0.25, &[">:/", ":-/", ":/", ":\\", ">:\\", ":-.", ":-s", ":s", ">.>"]),
    (-0.75, &[">:[", ":-(", ":(", "=(", ":-[", ":[", ":{", ":-<", ":c", ":-c", "=/"]),
    (-1.0, &[":'(", ":'''(", ";'("]),
];

// ============================================================================
// LEXICON
// ============================================================================

#[derive(Debug, Deserialize)]
struct SentimentXml {
    #[serde(rename = "word", default)]
    words: Vec<WordXml>,
}

#[derive(Debug, Deserialize)]
struct WordXml {
    #[serde(rename = "@form")]
    form: String,
    #[serde(rename = "@pos", default)]
    pos: String,
    #[serde(rename = "@polarity", default)]
    polarity: f64,
    #[serde(rename = "@subjectivity", default)]
    subjectivity: f64,
    #[serde(rename = "@intensity", default = "unit_intensity")]
    intensity: f64,
}

fn unit_intensity() -> f64 {
    1.0
}

/// Averaged scores of one word form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordScore {
    pub polarity: f64,
    pub subjectivity: f64,
    pub intensity: f64,
    /// Has an adverb sense, so it scales the next known word
    pub modifier: bool,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Word form -> score, senses averaged per tag and then across tags
#[derive(Debug, Clone, Default)]
pub struct PatternLexicon {
    words: HashMap<String, WordScore>,
}

impl PatternLexicon {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ModelError::MissingFile(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Lexicon(format!("{}: {}", path.display(), e)))?;
        let lexicon = Self::from_xml(&raw)?;
        log::info!("Pattern lexicon loaded: {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn from_xml(raw: &str) -> Result<Self, ModelError> {
        let doc: SentimentXml = quick_xml::de::from_str(raw)
            .map_err(|e| ModelError::Lexicon(e.to_string()))?;

        // form -> tag -> senses
        let mut senses: HashMap<String, HashMap<String, Vec<(f64, f64, f64)>>> = HashMap::new();
        for w in doc.words.into_iter().filter(|w| !w.form.is_empty()) {
            senses
                .entry(w.form)
                .or_default()
                .entry(w.pos)
                .or_default()
                .push((w.polarity, w.subjectivity, w.intensity));
        }

        let words = senses
            .into_iter()
            .map(|(form, by_tag)| {
                let per_tag: Vec<(f64, f64, f64)> = by_tag
                    .values()
                    .map(|s| {
                        (
                            mean(s.iter().map(|x| x.0)),
                            mean(s.iter().map(|x| x.1)),
                            mean(s.iter().map(|x| x.2)),
                        )
                    })
                    .collect();
                let score = WordScore {
                    polarity: mean(per_tag.iter().map(|x| x.0)),
                    subjectivity: mean(per_tag.iter().map(|x| x.1)),
                    intensity: mean(per_tag.iter().map(|x| x.2)),
                    modifier: by_tag.keys().any(|tag| MODIFIER_TAGS.contains(&tag.as_str())),
                };
                (form, score)
            })
            .collect();

        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&WordScore> {
        self.words.get(word)
    }

    /// Score a text
    pub fn analyze(&self, text: &str) -> PatternSentiment {
        let mut pending: Vec<Pending> = Vec::new();
        let mut modifier: Option<String> = None;
        let mut negation: Option<String> = None;

        for w in tokenize(text) {
            if let Some(score) = self.get(&w) {
                match pending.last_mut().filter(|_| modifier.is_some()) {
                    // "really good": the adverb's assessment absorbs the word
                    Some(last) => {
                        last.words.push(w.clone());
                        last.polarity = (score.polarity * last.intensity).clamp(-1.0, 1.0);
                        last.subjectivity = (score.subjectivity * last.intensity).clamp(-1.0, 1.0);
                        last.intensity = score.intensity;
                    }
                    None => pending.push(Pending::new(&w, score)),
                }
                if let (Some(n), Some(last)) = (negation.take(), pending.last_mut()) {
                    last.words.insert(0, n);
                    last.intensity = 1.0 / last.intensity;
                    last.negated = true;
                }
                modifier = score.modifier.then(|| w.clone());
                if NEGATIONS.contains(&w.as_str()) {
                    negation = Some(w);
                }
                continue;
            }

            if NEGATIONS.contains(&w.as_str()) {
                negation = Some(w.clone());
            } else if negation.is_some() && w.trim_matches('\'').chars().count() > 1 {
                // Negation carries over short words only ("not a good")
                negation = None;
            }

            if negation.is_some() && modifier.is_some() {
                // "really not good"
                if let (Some(n), Some(last)) = (negation.take(), pending.last_mut()) {
                    last.words.push(n);
                    last.negated = true;
                }
            } else if modifier.is_some() && w.chars().count() > 2 {
                modifier = None;
            }

            if w == "!" {
                if let Some(last) = pending.last_mut() {
                    last.words.push(w.clone());
                    last.polarity = (last.polarity * EXCLAMATION_FACTOR).clamp(-1.0, 1.0);
                }
            }

            if let Some(p) = emoticon_polarity(&w) {
                pending.push(Pending {
                    words: vec![w],
                    polarity: p,
                    subjectivity: 1.0,
                    intensity: 1.0,
                    negated: false,
                });
            }
        }

        let assessments: Vec<Assessment> = pending.into_iter().map(Pending::finish).collect();
        PatternSentiment {
            polarity: mean(assessments.iter().map(|a| a.polarity)),
            subjectivity: mean(assessments.iter().map(|a| a.subjectivity)),
            assessments,
        }
    }
}

struct Pending {
    words: Vec<String>,
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
    negated: bool,
}

impl Pending {
    fn new(word: &str, score: &WordScore) -> Self {
        Self {
            words: vec![word.to_string()],
            polarity: score.polarity,
            subjectivity: score.subjectivity,
            intensity: score.intensity,
            negated: false,
        }
    }

    fn finish(self) -> Assessment {
        let polarity = if self.negated { self.polarity * NEGATION_FACTOR } else { self.polarity };
        Assessment {
            words: self.words,
            polarity,
            subjectivity: self.subjectivity,
        }
    }
}

fn emoticon_polarity(token: &str) -> Option<f64> {
    if token.chars().count() > 5 || token.chars().all(char::is_alphabetic) {
        return None;
    }
    EMOTICONS
        .iter()
        .find(|(_, faces)| faces.contains(&token))
        .map(|(p, _)| *p)
}

fn is_emoticon(token: &str) -> bool {
    EMOTICONS.iter().any(|(_, faces)| faces.contains(&token))
}

/// Lowercase tokens with punctuation split off and `n't` detached
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let chunk = chunk.to_lowercase();
        if is_emoticon(&chunk) {
            tokens.push(chunk);
            continue;
        }

        let start = chunk.find(|c: char| !PUNCTUATION.contains(c)).unwrap_or(chunk.len());
        let end = chunk
            .char_indices()
            .rev()
            .find(|(_, c)| !PUNCTUATION.contains(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(start)
            .max(start);

        tokens.extend(chunk[..start].chars().map(String::from));

        let core = &chunk[start..end];
        match core.strip_suffix("n't") {
            Some(stem) if !stem.is_empty() => {
                tokens.push(stem.to_string());
                tokens.push("n't".to_string());
            }
            _ if !core.is_empty() => tokens.push(core.to_string()),
            _ => {}
        }

        tokens.extend(chunk[end..].chars().map(String::from));
    }

    tokens
}

/// One scored word with its modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub words: Vec<String>,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Text-level score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSentiment {
    pub polarity: f64,
    pub subjectivity: f64,
    pub assessments: Vec<Assessment>,
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Pattern predictor: positive iff polarity > threshold
#[derive(Debug, Clone)]
pub struct PatternPredictor {
    threshold: f64,
    lexicon: PatternLexicon,
}

impl PatternPredictor {
    /// Load the lexicon named in `params`
    pub fn load(params: &PatternParams) -> Result<Self, ModelError> {
        let lexicon = PatternLexicon::load(&params.lexicon_path)?;
        log::info!("Pattern predictor ready (polarity threshold {})", params.polarity_threshold);
        Ok(Self::with_lexicon(params, lexicon))
    }

    pub fn with_lexicon(params: &PatternParams, lexicon: PatternLexicon) -> Self {
        Self { threshold: params.polarity_threshold, lexicon }
    }

    pub fn analyze(&self, text: &str) -> PatternSentiment {
        self.lexicon.analyze(text)
    }

    pub fn polarity(&self, text: &str) -> f64 {
        self.analyze(text).polarity
    }

    pub fn predict(&self, text: &str) -> Sentiment {
        self.classify(self.polarity(text))
    }

    /// Strict comparison: a polarity equal to the threshold is negative
    pub fn classify(&self, polarity: f64) -> Sentiment {
        if polarity > self.threshold {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}
