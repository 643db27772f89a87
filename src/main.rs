use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use sigmatch::gate::{self, GateState, IdentityGate};
use sigmatch::store::{FsStore, SignatureStore};
use sigmatch::{config, engine};

#[derive(Parser)]
#[command(name = "sigmatch")]
#[command(
    version,
    about = "Forensic signature comparison against enrolled model images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an identity's genuine and forged samples against its model
    Compare {
        /// Identity to compare (prompts with retries when omitted)
        #[arg(short, long)]
        user: Option<String>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List identities with an enrolled model
    Users,
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(None)?;

    match cli.command {
        Commands::Compare { user, json } => compare(&cfg, user, json),
        Commands::Users => users(&cfg),
        Commands::Config => open_config(),
    }
}

fn compare(cfg: &config::Config, user: Option<String>, json: bool) -> Result<()> {
    let store = FsStore::new(cfg);
    let known = store
        .identities()
        .context("listing enrolled identities")?;

    let identity = match user {
        Some(user) => gate::resolve_identity(std::iter::once(user), known, 1)
            .context("unknown identity")?,
        None => prompt_login(known, cfg.max_attempts)?,
    };

    let report = engine::run_comparison(&store, &identity, cfg.packed_threshold())
        .with_context(|| format!("comparing signatures for {identity}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("VALID SIGNATURE RESULTS FOR USER: {}", report.identity);
    for scored in &report.genuine {
        println!("  {}  {:.6}", scored.path.display(), scored.score);
    }
    println!();
    println!("FORGED SIGNATURE RESULTS FOR USER: {}", report.identity);
    for scored in &report.forged {
        println!("  {}  {:.6}", scored.path.display(), scored.score);
    }
    Ok(())
}

fn prompt_login(known: Vec<String>, max_attempts: u32) -> Result<String> {
    let mut gate = IdentityGate::new(known, max_attempts);
    let stdin = io::stdin();
    loop {
        print!("Enter login: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before an identity was resolved");
        }

        match gate.submit(line.trim_end()) {
            GateState::Resolved(identity) => return Ok(identity.clone()),
            GateState::Exhausted => anyhow::bail!("maximum login attempts reached"),
            GateState::AwaitingInput => warn!("unknown login, try again"),
        }
    }
}

fn users(cfg: &config::Config) -> Result<()> {
    let store = FsStore::new(cfg);
    let mut identities = store
        .identities()
        .context("listing enrolled identities")?;
    identities.sort();
    identities.dedup();

    for identity in identities {
        println!("{identity}");
    }
    Ok(())
}

fn open_config() -> Result<()> {
    let path = config::CONFIG_PATH.as_path();
    if !path.exists() {
        config::save_config(&config::Config::default(), None)
            .context("writing default config")?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    info!("Opening config file: {}", path.display());

    let status = std::process::Command::new(editor)
        .arg(path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
