//! Terminal dashboard: live model battle and dataset benchmark.
//!
//! ```text
//! dashboard analyze --mode all "I absolutely love how this project is coming together!"
//! dashboard analyze --mode compare "great food, terrible service"
//! dashboard benchmark --sample-size 100
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sentiment_core::constants;
use sentiment_core::dashboard::{self, ClientConfig, Mode, SentimentClient};
use sentiment_core::logic::evaluator::{self, render_bar_chart, EvalOptions, DEFAULT_SAMPLE_SIZE};
use sentiment_core::{ModelRegistry, SentimentConfig};

#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about = "Twitter Sentiment: The AI Battle")]
struct Cli {
    /// Model config YAML used for local models
    #[arg(long, global = true, env = "SENTIMENT_CONFIG", default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one tweet
    Analyze {
        /// all (server plus local models), compare (server runs all three),
        /// vader, textblob or roberta
        #[arg(long, default_value = "all")]
        mode: Mode,

        /// Sentiment API base URL
        #[arg(long, env = "SENTIMENT_API_URL", default_value = constants::DEFAULT_API_URL)]
        api_url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = constants::DEFAULT_API_TIMEOUT_SECS)]
        timeout: u64,

        /// Tweet text
        #[arg(default_value = "I absolutely love how this project is coming together!")]
        text: String,
    },
    /// Run the accuracy benchmark locally and chart it
    Benchmark {
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample_size: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Dataset CSV
        #[arg(long, env = "SENTIMENT_DATASET", default_value = constants::DEFAULT_DATASET_PATH)]
        dataset: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = SentimentConfig::load(&cli.config)?.config;

    println!("🐦 Twitter Sentiment: The AI Battle");
    println!("Compare VADER, TextBlob and RoBERTa in real-time.\n");

    match cli.command {
        Command::Analyze { mode, api_url, timeout, text } => {
            let client = SentimentClient::new(ClientConfig {
                server_url: api_url,
                timeout_seconds: timeout,
            })?;
            let local = ModelRegistry::new(config.model_config);

            match dashboard::analyze(&client, &local, mode, &text).await {
                Ok(outcome) => println!("{}", outcome.render()),
                Err(e) => {
                    log::debug!("analyze failed: {}", e);
                    eprintln!("{}", e.user_message(client.server_url()));
                    std::process::exit(1);
                }
            }
        }
        Command::Benchmark { sample_size, seed, dataset } => {
            let options = EvalOptions { sample_size, seed, clean_text: false };

            println!("Calculating accuracy for all models...");
            let model_config = config.model_config;
            let report = tokio::task::spawn_blocking(move || {
                evaluator::evaluate(&dataset, &options, &model_config)
            })
            .await
            .context("benchmark task panicked")?
            .context("Could not run benchmark on the dataset")?;

            print!("{}", render_bar_chart("Dataset Accuracy Comparison", &report.accuracies(), 40));
            println!("\nBenchmark completed successfully!");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from(["dashboard", "analyze", "--mode", "compare", "--config", "c.yaml", "hi"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("c.yaml"));
        match cli.command {
            Command::Analyze { mode, text, .. } => {
                assert_eq!(mode, Mode::Compare);
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_dataset_and_config_read_env() {
        let cmd = Cli::command();
        let config = cmd.get_arguments().find(|a| a.get_id() == "config").unwrap();
        assert_eq!(config.get_env().unwrap(), "SENTIMENT_CONFIG");

        let benchmark = cmd.find_subcommand("benchmark").unwrap();
        let dataset = benchmark.get_arguments().find(|a| a.get_id() == "dataset").unwrap();
        assert_eq!(dataset.get_env().unwrap(), "SENTIMENT_DATASET");
        assert_eq!(dataset.get_default_values()[0].to_str(), Some(constants::DEFAULT_DATASET_PATH));
    }
}
