use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use api_shared::{AnalysisRes, KnowledgeBaseRes};
use aurum_core::config::resolve_knowledge_base;
use aurum_core::{AgeInput, InteractionService, PatientContext, RawPatientContext};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aurum")]
#[command(about = "AurumRx drug interaction checker CLI")]
struct Cli {
    /// YAML interaction table to use instead of the built-in one
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a candidate drug against current medications
    Check {
        /// Drug being considered
        drug: String,
        /// Current medications (comma-separated)
        #[arg(long, default_value = "")]
        current: String,
        /// Patient age in years (optional)
        #[arg(long)]
        age: Option<String>,
    },
    /// Check a single pair of drugs
    Pair {
        drug1: String,
        drug2: String,
    },
    /// List every interaction pair in the knowledge base
    List,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'aurum --help' for commands");
        return Ok(());
    };

    let json = run(command, cli.knowledge_base)?;
    println!("{json}");
    Ok(())
}

/// Execute a command against the selected knowledge base and render the result as pretty JSON.
fn run(command: Commands, knowledge_base: Option<PathBuf>) -> anyhow::Result<String> {
    let knowledge_base =
        resolve_knowledge_base(knowledge_base).context("loading knowledge base")?;
    let service = InteractionService::new(Arc::new(knowledge_base));

    let json = match command {
        Commands::Check { drug, current, age } => {
            let raw = RawPatientContext {
                age: age.map(AgeInput::Text),
                current_medications: split_list(&current),
                ..RawPatientContext::default()
            };
            let context = PatientContext::from_raw(raw)?;
            let result = service.analyze(&drug, &context.current_medications, &context)?;
            serde_json::to_string_pretty(&AnalysisRes::from(result))?
        }
        Commands::Pair { drug1, drug2 } => {
            let result = service.check_pair(&drug1, &drug2)?;
            serde_json::to_string_pretty(&AnalysisRes::from(result))?
        }
        Commands::List => {
            serde_json::to_string_pretty(&KnowledgeBaseRes::from(service.knowledge_base()))?
        }
    };

    Ok(json)
}

/// Split a comma-separated argument the way the patient form does; blanks are removed later.
fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}
