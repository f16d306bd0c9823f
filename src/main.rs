use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use triage::{PredictReply, PredictRequest, Predictor, TriageConfig};

#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Confidence-gated symptom triage", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory with vectorizer.json, classifier.json and labels.json
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Recovery plan table (JSON or YAML)
    #[arg(long)]
    recovery_plans: Option<PathBuf>,

    /// Minimum top-class confidence, 0.0 to 1.0
    #[arg(long)]
    percent_threshold: Option<f64>,

    /// Minimum gap between the two highest decision scores
    #[arg(long)]
    margin_threshold: Option<f64>,

    /// Predict a single symptom description instead of reading JSON lines
    /// from stdin
    #[arg(short, long)]
    symptoms: Option<String>,

    /// Pretty-print responses
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TriageConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TriageConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(dir) = cli.artifacts {
        config.artifacts_dir = dir;
    }
    if let Some(path) = cli.recovery_plans {
        config.recovery_plans = Some(path);
    }
    if let Some(threshold) = cli.percent_threshold {
        config.decision.percent_threshold = threshold;
    }
    if let Some(threshold) = cli.margin_threshold {
        config.decision.margin_threshold = threshold;
    }
    config.validate()?;

    init_tracing(&config);

    let predictor = Predictor::from_config(&config)?;
    tracing::info!(
        ready = predictor.state().is_ready(),
        percent_threshold = config.decision.percent_threshold,
        margin_threshold = config.decision.margin_threshold,
        "triage predictor initialized"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(symptoms) = cli.symptoms {
        let reply = PredictReply::from(predictor.predict(&PredictRequest::new(symptoms)));
        write_reply(&mut out, &reply, cli.pretty)?;
        return Ok(out.flush()?);
    }

    let mut requests = Vec::new();
    for (line_no, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let request: PredictRequest = serde_json::from_str(&line)
            .with_context(|| format!("line {}: expected {{\"symptoms\": \"...\"}}", line_no + 1))?;
        requests.push(request);
    }
    tracing::debug!(requests = requests.len(), "batch read");

    for result in predictor.predict_batch(&requests) {
        write_reply(&mut out, &PredictReply::from(result), cli.pretty)?;
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(config: &TriageConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn write_reply<W: Write>(out: &mut W, reply: &PredictReply, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, reply)?;
    } else {
        serde_json::to_writer(&mut *out, reply)?;
    }
    writeln!(out)?;
    Ok(())
}
