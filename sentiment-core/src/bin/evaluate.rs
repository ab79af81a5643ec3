//! Offline accuracy benchmark over a labeled tweet dataset.
//!
//! ```text
//! evaluate --sample-size 100 --seed 42 --report report.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sentiment_core::constants;
use sentiment_core::logic::evaluator::{self, render_bar_chart, render_details, EvalOptions};
use sentiment_core::SentimentConfig;

#[derive(Parser, Debug)]
#[command(name = "evaluate", version, about = "Compare sentiment model accuracy on Sentiment140")]
struct Args {
    /// Dataset CSV
    #[arg(long, env = "SENTIMENT_DATASET", default_value = constants::DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Model config YAML
    #[arg(long, env = "SENTIMENT_CONFIG", default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of rows to sample
    #[arg(long, default_value_t = 10)]
    sample_size: usize,

    /// Sampling seed; omit for a fresh random sample
    #[arg(long)]
    seed: Option<u64>,

    /// Clean tweets before predicting
    #[arg(long)]
    clean: bool,

    /// Print per-row results for every model
    #[arg(long)]
    details: bool,

    /// Write the report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Bar width of the accuracy chart
    #[arg(long, default_value_t = 50)]
    width: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let dataset = args.dataset;
    let config = SentimentConfig::load(&args.config)?.config;

    let options = EvalOptions {
        sample_size: args.sample_size,
        seed: args.seed,
        clean_text: args.clean,
    };

    log::info!(
        "Evaluating {} rows from {} (seed: {:?})",
        options.sample_size,
        dataset.display(),
        options.seed
    );

    let report = evaluator::evaluate(&dataset, &options, &config.model_config)
        .with_context(|| format!("evaluation over {} failed", dataset.display()))?;

    for score in report.models.iter().filter(|s| s.degraded) {
        log::warn!("{} could not be loaded; scored as all-neutral", score.model);
    }

    println!();
    println!("{}", "=".repeat(30));
    print!("{}", render_bar_chart("Sentiment Model Comparison (Accuracy %)", &report.accuracies(), args.width));
    println!("{}", "=".repeat(30));

    if args.details {
        for score in &report.models {
            println!();
            print!("{}", render_details(score));
        }
    }

    if let Some(path) = args.report {
        report.write_json(&path)
            .with_context(|| format!("could not write {}", path.display()))?;
    }

    Ok(())
}
