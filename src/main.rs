use clap::{Args, Parser, Subcommand};
use podmortem::analysis::{self, AnalysisError};
use podmortem::{export, render};
use podmortem_core::config::Config;
use podmortem_core::{load_log, summarize_counts, RuleSet};
use podmortem_feeds::{Feed, FeedError, FileFeed, LogSource, PasteFeed, SampleFeed};
use podmortem_report::{ChatCompletionClient, ClientOptions};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for analysis or report failures.
const EXIT_FAILED: u8 = 1;
/// Exit code for missing or empty input.
const EXIT_NO_INPUT: u8 = 2;

#[derive(Parser)]
#[command(
    name = "podmortem",
    about = "Heuristic triage and AI root-cause reports for Kubernetes logs"
)]
struct Cli {
    /// Write debug logs to /tmp/podmortem-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/podmortem/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run heuristics and ask the model for a root-cause report.
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Directory for the exported markdown report.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Print the report without writing the markdown file.
        #[arg(long)]
        no_export: bool,
    },
    /// Run only the heuristic rules (no network).
    Classify {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// Parse log lines and show counts by level.
    Parse {
        #[command(flatten)]
        input: InputArgs,
        /// Number of records to preview.
        #[arg(long, default_value_t = 5)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

/// Where the logs come from. Stdin when neither flag is given.
#[derive(Args)]
struct InputArgs {
    /// Read logs from a .log or .txt file.
    #[arg(long, value_name = "PATH", conflicts_with = "sample")]
    file: Option<PathBuf>,
    /// Use the bundled sample logs.
    #[arg(long)]
    sample: bool,
}

impl InputArgs {
    fn feed(&self, cfg: &Config) -> Box<dyn Feed> {
        match (&self.file, self.sample) {
            (Some(path), _) => Box::new(FileFeed::new(path)),
            (None, true) => Box::new(SampleFeed::new(&cfg.input.sample_path)),
            (None, false) => Box::new(PasteFeed::stdin()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/podmortem-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("podmortem debug log started, tail -f /tmp/podmortem-debug.log");
    }

    // The API key may live in .env; a missing file is fine.
    let _ = dotenvy::dotenv();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Config::defaults()
        }),
    };
    let rules = RuleSet::from_config(&config.heuristics)?;

    match cli.command {
        Command::Analyze {
            input,
            out_dir,
            no_export,
        } => {
            let source = match read_source(&input, &config) {
                Ok(source) => source,
                Err(code) => return Ok(code),
            };
            let out_dir = out_dir.unwrap_or_else(|| config.report.output_dir.clone());
            run_analyze(&source, &rules, &config, (!no_export).then_some(out_dir)).await
        }
        Command::Classify { input, json } => {
            let source = match read_source(&input, &config) {
                Ok(source) => source,
                Err(code) => return Ok(code),
            };
            let findings = rules.classify(&source.text);
            let mut out = std::io::stdout().lock();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&findings)?)?;
            } else {
                render::write_findings(&mut out, &findings, use_color())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Parse { input, limit, json } => {
            let source = match read_source(&input, &config) {
                Ok(source) => source,
                Err(code) => return Ok(code),
            };
            let records = load_log(source.text.lines());
            let counts = summarize_counts(&records);
            let mut out = std::io::stdout().lock();
            if json {
                let value = serde_json::json!({
                    "total": records.len(),
                    "counts": counts,
                    "records": records,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                writeln!(out, "Total parsed records: {}\n", records.len())?;
                render::write_records(&mut out, &records, limit)?;
                writeln!(out)?;
                render::write_counts(&mut out, &counts)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read the selected input. A missing source is a user-facing warning, not a
/// crash.
fn read_source(input: &InputArgs, config: &Config) -> Result<LogSource, ExitCode> {
    let mut feed = input.feed(config);
    tracing::debug!(kind = %feed.kind(), "reading input");
    match feed.read() {
        Ok(source) => Ok(source),
        Err(e @ (FeedError::NotFound(_) | FeedError::SampleMissing(_))) => {
            eprintln!("warning: {e}");
            Err(ExitCode::from(EXIT_NO_INPUT))
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(ExitCode::from(EXIT_FAILED))
        }
    }
}

async fn run_analyze(
    source: &LogSource,
    rules: &RuleSet,
    config: &Config,
    export_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    if source.is_blank() {
        eprintln!("warning: {}", AnalysisError::EmptyInput);
        return Ok(ExitCode::from(EXIT_NO_INPUT));
    }

    let client = match ClientOptions::from_config(&config.llm).and_then(ChatCompletionClient::new)
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            return Ok(ExitCode::from(EXIT_FAILED));
        }
    };

    eprintln!("Analyzing logs with AI...");
    let outcome = match analysis::analyze(source, rules, &client).await {
        Ok(outcome) => outcome,
        Err(AnalysisError::EmptyInput) => {
            eprintln!("warning: {}", AnalysisError::EmptyInput);
            return Ok(ExitCode::from(EXIT_NO_INPUT));
        }
        Err(e) => {
            eprintln!("analysis failed: {e}");
            return Ok(ExitCode::from(EXIT_FAILED));
        }
    };

    let mut out = std::io::stdout().lock();
    render::write_findings(&mut out, &outcome.findings, use_color())?;
    writeln!(out, "\nParsed records: {}", outcome.record_count)?;
    render::write_counts(&mut out, &outcome.counts)?;
    writeln!(out, "\n---\n\n{}", outcome.report)?;

    if let Some(dir) = export_dir {
        let path = export::write_report(&dir, &outcome.source_hint, &outcome.report)?;
        eprintln!("report written to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}
