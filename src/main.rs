//! Typewriter - command-line host for the syntax engine
//!
//! Classifies text from files or stdin and prints JSON on stdout. Logs go to
//! stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use typewriter_core::syntax::{load_state, project, save_state};
use typewriter_core::{Accumulator, Classifier, EditorSession, SessionEvent, SyntaxConfig};

#[derive(Parser)]
#[command(name = "typewriter")]
#[command(about = "Live part-of-speech classification for prose", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (TOML); TYPEWRITER_* env vars override it
    #[arg(long, global = true, env = "TYPEWRITER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file (or stdin) and print the analysis
    Classify {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Classify, merge into the accumulated state and print category counts
    Breakdown {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Accumulated state file, read before and written after
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Feed stdin line by line through a debounced editor session
    Session {
        /// Accumulated state file, read before and written after
        #[arg(short, long)]
        state: Option<PathBuf>,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_session(config: SyntaxConfig, state: Option<PathBuf>) -> Result<()> {
    let mut session = EditorSession::new(config);
    if let Some(path) = &state {
        session.load(path)?;
    }
    session.open()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut document = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => {
                        if !document.is_empty() {
                            document.push('\n');
                        }
                        document.push_str(&line);
                        session.text_changed(document.clone());
                    }
                    None => break,
                }
            }
            event = session.next_event() => {
                if let SessionEvent::Merged { changed: true } = event {
                    debug!("State now at revision {}", session.revision());
                }
            }
        }
    }

    // Settle whatever the debounce had not delivered yet
    session.analyze_now(&document).await?;
    print_json(&session.breakdown())?;

    if let Some(path) = &state {
        session.save(path)?;
    }
    session.close();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("typewriter={level},typewriter_core={level}"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Typewriter v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = SyntaxConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Classify { file } => {
            let text = read_input(file.as_deref())?;
            let analysis = Classifier::new().classify(&text);
            print_json(&analysis)?;
        }
        Commands::Breakdown { file, state } => {
            let text = read_input(file.as_deref())?;

            let mut accumulator = Accumulator::new();
            if let Some(path) = &state {
                accumulator.restore(&load_state(path)?);
            }
            accumulator.apply(&Classifier::new().classify(&text));

            print_json(&project(accumulator.state()).breakdown(&text))?;

            if let Some(path) = &state {
                save_state(path, accumulator.state())?;
            }
        }
        Commands::Session { state } => run_session(config, state).await?,
    }

    Ok(())
}
