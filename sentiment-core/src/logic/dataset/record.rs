use serde::{Deserialize, Serialize};

use crate::logic::model::Sentiment;

/// One corpus row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledTweet {
    pub label_code: u8,
    pub id: String,
    pub date: String,
    pub query: String,
    pub user: String,
    pub text: String,
}

impl LabeledTweet {
    /// Gold label: `0` negative, `4` positive. Other codes carry no label
    /// and never count as a match.
    pub fn actual(&self) -> Option<Sentiment> {
        label_from_code(self.label_code)
    }
}

pub fn label_from_code(code: u8) -> Option<Sentiment> {
    match code {
        0 => Some(Sentiment::Negative),
        4 => Some(Sentiment::Positive),
        _ => None,
    }
}
