//! jarvis CLI: run a local REPL session against the relay core, or inspect the prompt
//! catalog. Config from env (`.env` loaded first): GEMINI_API_KEY, GEMINI_MODEL,
//! GEMINI_BASE_URL, GEMINI_TIMEOUT_SECS, LOG_FILE, RUST_LOG.

mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemini_client::EnvGeminiConfig;

#[derive(Parser)]
#[command(name = "jarvis")]
#[command(about = "Conversational relay CLI: run a local session, list prompts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a local REPL session (stdin in, stdout out) over the full handler chain.
    Run {
        /// User id for the session; defaults to a fixed local id.
        #[arg(short, long, default_value = "local@c.us")]
        user: String,
        /// API key override for GEMINI_API_KEY.
        #[arg(short, long)]
        api_key: Option<String>,
    },
    /// List catalog prompt categories with their trigger keywords.
    Prompts,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { user, api_key } => {
            let log_file = std::env::var("LOG_FILE").ok();
            jarvis_core::init_tracing(log_file.as_deref())?;

            if let Some(key) = api_key {
                std::env::set_var("GEMINI_API_KEY", key);
            }
            let config = EnvGeminiConfig::from_env()
                .context("Load Gemini config from .env (GEMINI_API_KEY)")?;

            repl::run(user, config).await
        }
        Commands::Prompts => {
            for category in prompt_catalog::CATEGORIES {
                println!("{}:", category.name());
                let keywords = category.keywords();
                if keywords.is_empty() {
                    println!("  (sem palavras-chave; usado quando nada mais casa)");
                } else {
                    println!("  palavras-chave: {}", keywords.join(", "));
                }
            }
            Ok(())
        }
    }
}
