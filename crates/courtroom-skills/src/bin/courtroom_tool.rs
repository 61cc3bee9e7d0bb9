//! Courtroom tool runner: invoke one agent tool from the command line.
//!
//! Usage:
//!   courtroom-tool --list
//!   courtroom-tool <tool> '<json payload>'
//!
//! Configuration comes from `.env`, `config/courtroom.toml` and `COURTROOM_*` variables.

use courtroom_core::{CourtroomConfig, ToolContext};
use courtroom_skills::courtroom_registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(tool) = args.next() else {
        print_usage();
        std::process::exit(2);
    };

    let cfg = match CourtroomConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("courtroom-tool: {}", e);
            std::process::exit(1);
        }
    };
    let registry = courtroom_registry(&cfg)?;

    if tool == "--list" {
        for (name, description) in registry.describe() {
            println!("{}\n    {}\n", name, description);
        }
        return Ok(());
    }

    let payload = match args.next() {
        Some(raw) => Some(serde_json::from_str(&raw)?),
        None => None,
    };
    let ctx = ToolContext {
        agent_id: None,
        correlation_id: Some(uuid::Uuid::new_v4().to_string()),
    };

    match registry.dispatch(&tool, &ctx, payload).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result["status"] == "error" {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("courtroom-tool: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("courtroom-tool: run one courtroom agent tool");
    eprintln!("  --list                 List tools with their descriptions");
    eprintln!("  <tool> '<json>'        Run <tool> with the given JSON payload");
    eprintln!();
    eprintln!("Pinning: PINATA_API_KEY / PINATA_SECRET_KEY; chain: ALCHEMY_API_URL and");
    eprintln!("COURTROOM_WALLET_PRIVATE_KEY; models: HUGGINGFACE_API_KEY; backend: MY_API_BASE.");
}
