//! CLI binary for doc-classify.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ClientConfig` and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use doc_classify::{
    ClassificationClient, ClassificationResult, ClientConfig, CredentialSource, DEFAULT_API_KEY_ENV,
    DEFAULT_ENDPOINT, DEFAULT_ENV_FILE,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const LABELS_ENV: &str = "CLASSIFY_LABELS";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Classify with no label hints
  classify sample.pdf

  # Suggest extra labels to the classifier
  classify sample.pdf -l Invoice -l Contract

  # Structured output
  classify --json sample.pdf > result.json

  # Point at another deployment
  classify --endpoint https://classifier.internal/classify sample.pdf

ENVIRONMENT VARIABLES:
  INFERENCE_API_KEY    Bearer token (name changeable with --api-key-env)
  CLASSIFY_ENDPOINT    Override the classification endpoint URL
  CLASSIFY_LABELS      Comma-separated label hints, used when no -l is given

CREDENTIALS:
  The token is taken from $INFERENCE_API_KEY, or else from a KEY=VALUE line
  in ./.env (see --env-file). It is read once per run and never stored.
"#;

/// Classify a document against a remote labelling endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "classify",
    version,
    about = "Classify a document against a remote labelling endpoint",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the document (usually a PDF).
    input: PathBuf,

    /// Additional label hint; repeat for several. Taken verbatim, commas
    /// included. Without any -l, CLASSIFY_LABELS is split on commas instead.
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Classification endpoint URL.
    #[arg(long, env = "CLASSIFY_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Environment variable (and .env key) holding the API key.
    #[arg(long, env = "CLASSIFY_API_KEY_ENV", default_value = DEFAULT_API_KEY_ENV)]
    api_key_env: String,

    /// KEY=VALUE file consulted when the environment variable is unset.
    #[arg(long, env = "CLASSIFY_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "CLASSIFY_TIMEOUT", default_value_t = 60,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Connect timeout in seconds.
    #[arg(long, env = "CLASSIFY_CONNECT_TIMEOUT", default_value_t = 10,
          value_parser = clap::value_parser!(u64).range(1..))]
    connect_timeout: u64,

    /// Refuse files that do not start with %PDF.
    #[arg(long)]
    require_pdf: bool,

    /// Refuse files larger than this many bytes.
    #[arg(long, env = "CLASSIFY_MAX_BYTES")]
    max_bytes: Option<u64>,

    /// Print the result as JSON instead of `labels metadata`.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CLASSIFY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the result and errors.
    #[arg(short, long, env = "CLASSIFY_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers user feedback, so library INFO logs are hidden
    // while it is shown.
    let show_spinner = !cli.quiet && !cli.json && !cli.verbose;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_spinner {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let client = ClassificationClient::new(config).context("Invalid configuration")?;

    let spinner = show_spinner.then(|| spinner(&cli));
    let start = Instant::now();

    let labels = label_hints(&cli.labels, std::env::var(LABELS_ENV).ok());
    let outcome = client.classify_with_labels(&cli.input, labels).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let result = outcome.with_context(|| format!("Failed to classify {}", cli.input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialise result")?
        );
    } else {
        println!("{}", render_plain(&result));
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "{} {} labels  {}",
            green("✔"),
            result.labels().len(),
            dim(&format!("{}ms", start.elapsed().as_millis())),
        );
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let credentials = CredentialSource::Chain(vec![
        CredentialSource::Env(cli.api_key_env.clone()),
        CredentialSource::File {
            path: cli.env_file.clone(),
            key: cli.api_key_env.clone(),
        },
    ]);

    let mut builder = ClientConfig::builder()
        .endpoint(cli.endpoint.clone())
        .credentials(credentials)
        .timeout_secs(cli.timeout)
        .connect_timeout_secs(cli.connect_timeout)
        .require_pdf(cli.require_pdf);

    if let Some(limit) = cli.max_bytes {
        builder = builder.max_document_bytes(limit);
    }

    builder.build().context("Invalid configuration")
}

/// `-l` values win; otherwise the comma-separated environment value.
fn label_hints(flags: &[String], env: Option<String>) -> Vec<String> {
    if !flags.is_empty() {
        return flags.to_vec();
    }
    env.map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn spinner(cli: &Cli) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Classifying");
    bar.set_message(cli.input.display().to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// `labels metadata` on one line, both as the compact JSON the service sent.
fn render_plain(result: &ClassificationResult) -> String {
    let labels = result.labels.as_ref().map_or_else(|| "[]".to_string(), |v| v.to_string());
    format!("{} {}", labels, result.metadata())
}
