//! Tweet Cleaner
//!
//! Normalizes raw tweets before scoring: lowercase, drop mentions and URLs,
//! keep only Latin letters and whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z0-9_]+").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").unwrap());
static NON_ALPHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

/// Clean a tweet. Pure and total: always returns a string, possibly empty.
///
/// Inner whitespace is left as-is, only the ends are trimmed.
pub fn clean_tweet(text: &str) -> String {
    let text = text.to_lowercase();
    let text = MENTION_RE.replace_all(&text, "");
    let text = URL_RE.replace_all(&text, "");
    let text = NON_ALPHA_RE.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_mentions_urls_and_punctuation() {
        assert_eq!(clean_tweet("@bob check http://x.com THIS!!"), "check  this");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_tweet(""), "");
        assert_eq!(clean_tweet("   "), "");
    }

    #[test]
    fn test_digits_and_symbols_removed() {
        assert_eq!(clean_tweet("Top 10 #1 day :)"), "top   day");
    }

    #[test]
    fn test_mention_only() {
        assert_eq!(clean_tweet("@someone_123"), "");
    }

    #[test]
    fn test_url_runs_to_whitespace() {
        assert_eq!(clean_tweet("see https://t.co/abc?x=1 now"), "see  now");
    }

    #[test]
    fn test_non_latin_letters_removed() {
        assert_eq!(clean_tweet("café naïve"), "caf nave");
    }
}
