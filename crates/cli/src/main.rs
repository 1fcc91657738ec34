use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cba_catalog::IntentCatalog;
use cba_config::AppConfig;
use cba_llm::MockLlm;
use cba_mock::MockBankingService;
use cba_pipeline::{Pipeline, TurnRequest};
use cba_state::{InMemoryCache, InMemoryDatabase, StateManager};

#[derive(Debug, Parser)]
#[command(name = "cba", version, about = "Conversational banking assistant demo REPL")]
struct Cli {
    /// Path to a TOML config file; falls back to built-in defaults when absent.
    #[arg(long, default_value = "config/default.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = AppConfig::load_from(&cli.config)?;
    if !config.uses_mock_persistence() {
        tracing::warn!("a non-mock persistence backend was requested but only the in-memory one is built here; falling back to it");
    }

    let state = StateManager::new(Arc::new(InMemoryCache::new()), Arc::new(InMemoryDatabase::new()));
    let pipeline = Pipeline::new(Arc::new(MockLlm), Arc::new(MockBankingService::new()), IntentCatalog::new(), state);

    run_repl(&pipeline).await
}

async fn run_repl(pipeline: &Pipeline) -> Result<()> {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    if interactive {
        println!("Conversational banking assistant (mock backend). Type 'quit' to exit.");
    }

    let mut session_id: Option<String> = None;
    let mut line = String::new();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        let request = TurnRequest { query: query.to_string(), session_id: session_id.clone(), skip_resolution: false, ui_context: None, user_profile: None };
        let response = pipeline.process(request).await;
        session_id = Some(response.session_id.clone());

        println!("[{:?}] {}", response.status, response.message);
        if let Some(clarification) = &response.pending_clarification {
            if !clarification.options.is_empty() {
                println!("  options: {}", clarification.options.join(", "));
            }
            if !clarification.missing_entities.is_empty() {
                println!("  needs: {}", clarification.missing_entities.join(", "));
            }
        }
        if let Some(approval) = &response.approval {
            println!("  approval via {} (expires in {}s)", approval.approval_method, approval.expires_in_secs);
        }
    }

    Ok(())
}
