//! LeafLens — Banana leaf diagnosis from raw inference output.
//! Entry point for the command-line binary.

mod config;
mod report;
mod source;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use leaflens_common::DiagnosisRecorder;
use leaflens_history::DiagnosisHistory;
use leaflens_kb::KnowledgeBase;
use leaflens_ranker::{DiagnosisPipeline, ResultNormalizer};

#[derive(Parser)]
#[command(name = "leaflens")]
#[command(about = "Diagnose banana leaf disease from inference responses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalise a raw inference response and report the diagnosis
    Diagnose {
        /// Response JSON file (stdin when omitted)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
        /// Image reference recorded with the diagnosis
        #[arg(long, default_value = "stdin")]
        image: String,
        /// Print the enriched diagnosis as JSON
        #[arg(long)]
        json: bool,
        /// History file to append the top-1 to
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },
    /// Resolve model labels against the knowledge base
    Resolve {
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List canonical keys and aliases
    Kb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_err) = match config::Config::load() {
        Ok(c) => (c, None),
        Err(e) => (config::Config::default(), Some(e)),
    };

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    if let Some(e) = config_err {
        warn!("Could not load leaflens.toml, using defaults: {e}");
    }

    let custom_kb = match &config.knowledge_base.path {
        Some(path) => Some(load_knowledge_base(Path::new(path))?),
        None => None,
    };
    let kb = custom_kb.as_ref().unwrap_or_else(|| KnowledgeBase::builtin());

    match cli.command {
        Command::Diagnose { input, image, json, history } => {
            let pipeline = DiagnosisPipeline::new(
                kb,
                ResultNormalizer::new(config.diagnosis.class_names.clone()),
                config.diagnosis_options(),
            );
            let source = source::FileInferenceSource::new(input);
            let diagnosis = pipeline.diagnose_source(&source, &image).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&diagnosis)?);
            } else {
                print!("{}", report::render_diagnosis(&diagnosis));
            }

            if let Some(path) = history {
                let top1 = &diagnosis.top1.candidate;
                let recent = append_history(&path, config.history.capacity, &top1.label, top1.probability, &image)?;
                if !json {
                    println!("\nRecent diagnoses:");
                    for entry in recent.entries() {
                        println!("  {}", report::render_history_line(&entry.label, entry.probability));
                    }
                }
            }
        }
        Command::Resolve { labels } => {
            for label in &labels {
                println!("{}", report::render_resolution(kb, label));
            }
        }
        Command::Kb => print!("{}", report::render_knowledge_base(kb)),
    }

    Ok(())
}

/// Load a custom knowledge base; `.toml` files as TOML, anything else as JSON.
fn load_knowledge_base(path: &Path) -> anyhow::Result<KnowledgeBase> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading knowledge base {}", path.display()))?;
    let kb = if path.extension().is_some_and(|e| e == "toml") {
        KnowledgeBase::from_toml(&text)?
    } else {
        KnowledgeBase::from_json(&text)?
    };
    info!("Loaded knowledge base from {}: {} records", path.display(), kb.n_records());
    Ok(kb)
}

/// Append the top-1 to the history file. A missing file starts a new
/// history; any other read error aborts before the file is rewritten.
fn append_history(
    path: &Path,
    capacity: usize,
    label: &str,
    probability: f64,
    image_ref: &str,
) -> anyhow::Result<DiagnosisHistory> {
    let stored = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("reading history {}", path.display()));
        }
    };
    let mut history = if stored.trim().is_empty() {
        DiagnosisHistory::with_capacity(capacity)
    } else {
        DiagnosisHistory::from_json(&stored, capacity)
    };
    history.record(label, probability, Some(image_ref));
    std::fs::write(path, history.to_json()?)
        .with_context(|| format!("writing history {}", path.display()))?;
    Ok(history)
}
