//! Dashboard Module
//!
//! Terminal front end: asks the server for its active model's verdict and
//! runs the two rule-based strategies locally for a side-by-side view, or
//! asks the server to run all three strategies (`compare` mode).

pub mod client;
pub mod render;

use std::fmt;
use std::str::FromStr;

pub use client::{ClientConfig, ClientError, SentimentClient};
pub use render::{render_battle, render_compare, render_single, render_table};

use crate::api::{CompareResponse, PredictResponse};
use crate::logic::model::{ModelKind, ModelManager, ModelRegistry, Sentiment, UnknownModel};

/// Warning printed instead of calling the server on blank input
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to analyze.";

/// Analysis mode: all strategies, server-side comparison, or one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    Compare,
    Single(ModelKind),
}

impl FromStr for Mode {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Mode::All),
            "compare" => Ok(Mode::Compare),
            _ => s.parse().map(Mode::Single),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::All => f.write_str("all"),
            Mode::Compare => f.write_str("compare"),
            Mode::Single(kind) => kind.fmt(f),
        }
    }
}

/// Label and intensity computed in-process
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVerdict {
    pub sentiment: Sentiment,
    pub intensity: Option<f64>,
}

impl LocalVerdict {
    pub fn from_manager(manager: &ModelManager, text: &str) -> Self {
        Self {
            sentiment: manager.predict(text),
            intensity: manager.intensity(text),
        }
    }
}

/// Server verdict plus local lexicon and pattern verdicts
#[derive(Debug, Clone, PartialEq)]
pub struct Battle {
    pub vader: LocalVerdict,
    pub textblob: LocalVerdict,
    pub remote: PredictResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank input in `all` or `compare` mode, nothing was sent
    EmptyInput,
    Battle(Battle),
    Compare(CompareResponse),
    Single { requested: ModelKind, response: PredictResponse },
}

impl Outcome {
    pub fn render(&self) -> String {
        match self {
            Outcome::EmptyInput => EMPTY_INPUT_WARNING.to_string(),
            Outcome::Battle(battle) => render_battle(battle),
            Outcome::Compare(response) => render_compare(response),
            Outcome::Single { requested, response } => render_single(*requested, response),
        }
    }
}

/// Run one analysis. The server is queried first so an offline backend
/// fails fast before any local work.
pub async fn analyze(
    client: &SentimentClient,
    local: &ModelRegistry,
    mode: Mode,
    text: &str,
) -> Result<Outcome, ClientError> {
    match mode {
        Mode::All => {
            if text.trim().is_empty() {
                return Ok(Outcome::EmptyInput);
            }

            let remote = client.predict(text).await?;
            let vader = LocalVerdict::from_manager(local.get(ModelKind::Vader), text);
            let textblob = LocalVerdict::from_manager(local.get(ModelKind::TextBlob), text);

            Ok(Outcome::Battle(Battle { vader, textblob, remote }))
        }
        Mode::Compare => {
            if text.trim().is_empty() {
                return Ok(Outcome::EmptyInput);
            }
            Ok(Outcome::Compare(client.compare(text).await?))
        }
        Mode::Single(requested) => {
            let response = client.predict(text).await?;
            if response.model_used != requested {
                log::warn!(
                    "Requested {} but server is running {}",
                    requested,
                    response.model_used
                );
            }
            Ok(Outcome::Single { requested, response })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::test_model_config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"{"sentiment":"negative","confidence":85.0,"model_used":"roberta"}"#;
    const COMPARE_BODY: &str =
        r#"{"vader":"positive","textblob":"positive","roberta":"negative","model_used":"roberta"}"#;

    async fn serve_prediction() -> String {
        serve_once(BODY, None).await
    }

    /// One-shot server replying with `body`; the request head is sent on `seen`
    async fn serve_once(body: &'static str, seen: Option<tokio::sync::oneshot::Sender<String>>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if let Some(tx) = seen {
                    let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
                }
                let reply = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    fn client(url: String) -> SentimentClient {
        SentimentClient::new(ClientConfig { server_url: url, timeout_seconds: 2 }).unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
        assert_eq!("ALL".parse::<Mode>().unwrap(), Mode::All);
        assert_eq!("textblob".parse::<Mode>().unwrap(), Mode::Single(ModelKind::TextBlob));
        assert_eq!("Compare".parse::<Mode>().unwrap(), Mode::Compare);
        assert_eq!(Mode::Compare.to_string(), "compare");
        assert!("bert".parse::<Mode>().is_err());
        assert_eq!(Mode::Single(ModelKind::Roberta).to_string(), "roberta");
    }

    #[tokio::test]
    async fn test_blank_input_skips_server() {
        // Nothing listens here; a request would fail
        let client = client("http://127.0.0.1:9".to_string());
        let registry = ModelRegistry::new(test_model_config());

        let outcome = analyze(&client, &registry, Mode::All, "   ").await.unwrap();
        assert_eq!(outcome, Outcome::EmptyInput);
        assert_eq!(outcome.render(), EMPTY_INPUT_WARNING);
        assert!(registry.statuses().is_empty());
    }

    #[tokio::test]
    async fn test_battle_combines_local_and_remote() {
        let client = client(serve_prediction().await);
        let registry = ModelRegistry::new(test_model_config());

        let outcome = analyze(&client, &registry, Mode::All, "I love this, what a great day").await.unwrap();
        let Outcome::Battle(battle) = outcome else {
            panic!("expected battle outcome");
        };

        assert_eq!(battle.remote.sentiment, Sentiment::Negative);
        assert_eq!(battle.vader.sentiment, Sentiment::Positive);
        assert_eq!(battle.textblob.sentiment, Sentiment::Positive);
        assert!(battle.vader.intensity.unwrap() > 0.0);
        assert!(!registry.is_initialized(ModelKind::Roberta));
    }

    #[tokio::test]
    async fn test_single_mode_reports_server_model() {
        let client = client(serve_prediction().await);
        let registry = ModelRegistry::new(test_model_config());

        let outcome = analyze(&client, &registry, Mode::Single(ModelKind::Vader), "meh").await.unwrap();
        match &outcome {
            Outcome::Single { requested, response } => {
                assert_eq!(*requested, ModelKind::Vader);
                assert_eq!(response.model_used, ModelKind::Roberta);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(outcome.render().contains("Note:"));
    }

    #[tokio::test]
    async fn test_compare_mode_asks_server_for_all_three() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let client = client(serve_once(COMPARE_BODY, Some(tx)).await);
        let registry = ModelRegistry::new(test_model_config());

        let outcome = analyze(&client, &registry, Mode::Compare, "good vs bad").await.unwrap();
        let Outcome::Compare(response) = &outcome else {
            panic!("expected compare outcome, got {:?}", outcome);
        };

        assert_eq!(response.results.vader, Sentiment::Positive);
        assert_eq!(response.results.roberta, Sentiment::Negative);
        assert_eq!(response.model_used, ModelKind::Roberta);
        assert!(registry.statuses().is_empty());

        let request = rx.await.unwrap();
        assert!(request.starts_with("GET /compare?text=good+vs+bad "), "{}", request);

        let rendered = outcome.render();
        assert!(rendered.contains("Server Comparison"));
        assert!(rendered.contains("RoBERTa (Transformer)"));
    }

    #[tokio::test]
    async fn test_compare_mode_blank_input() {
        let client = client("http://127.0.0.1:9".to_string());
        let registry = ModelRegistry::new(test_model_config());

        let outcome = analyze(&client, &registry, Mode::Compare, "").await.unwrap();
        assert_eq!(outcome, Outcome::EmptyInput);
    }
}
