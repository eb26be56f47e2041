//! Snipbox CLI
//!
//! A command-line front for the snippet runner: serves the HTTP API,
//! dispatches files directly, and validates the configured registry.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snipbox::{Config, DispatchOutcome, EXAMPLE_CONFIG, Runner, selfcheck};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

mod server;

#[derive(Parser)]
#[command(name = "snipbox")]
#[command(about = "A minimal backend for compiling and running code snippets")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },

    /// Dispatch a source file and print the captured output
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Language ID (e.g., python, ruby, go)
        #[arg(short, long)]
        language: String,
    },

    /// Run the known-good snippets against the configured registry
    Selfcheck,

    /// List available languages
    Languages,

    /// Show the effective configuration
    ShowConfig,

    /// Initialize a new configuration file
    Init {
        /// Output path (default: snipbox.toml)
        #[arg(short, long, default_value = "snipbox.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
        Config::from_file(path).context("failed to load configuration")?
    } else {
        debug!("using default configuration");
        Config::default()
    };

    match cli.command {
        Commands::Serve { addr } => server::serve(Runner::new(config), addr).await,
        Commands::Run { source, language } => run_file(config, &source, &language).await,
        Commands::Selfcheck => run_selfcheck(config).await,
        Commands::Languages => {
            list_languages(&config);
            Ok(())
        }
        Commands::ShowConfig => {
            show_config(&config);
            Ok(())
        }
        Commands::Init { output, force } => init_config(&output, force).await,
    }
}

async fn run_file(config: Config, source: &PathBuf, language: &str) -> Result<()> {
    let code = tokio::fs::read_to_string(source)
        .await
        .context("failed to read source file")?;

    let runner = Runner::new(config);

    match runner.dispatch(&code, language).await {
        DispatchOutcome::Output { output } => {
            print!("{output}");
            Ok(())
        }
        DispatchOutcome::Error { error } => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

async fn run_selfcheck(config: Config) -> Result<()> {
    let runner = Runner::new(config);

    match selfcheck::run(&runner).await {
        Ok(()) => {
            println!(
                "Self-check passed ({} languages)",
                snipbox::SELF_CHECK_CASES.len()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("Self-check failed: {err}");
            std::process::exit(1);
        }
    }
}

fn list_languages(config: &Config) {
    println!("Available languages:\n");

    let mut languages: Vec<_> = config.languages.iter().collect();
    languages.sort_by_key(|(id, _)| *id);

    for (id, lang) in languages {
        let stages = if lang.is_compiled() {
            "compile + run"
        } else {
            "run only"
        };
        println!("  {:<12} {} ({})", id, lang.name, stages);
    }
}

fn show_config(config: &Config) {
    println!("Stage timeouts:");
    println!("  Compile: {}s", config.timeouts.compile);
    println!("  Run: {}s", config.timeouts.run);
    println!();
    match config.workspace_root {
        Some(ref root) => println!("Workspace root: {}", root.display()),
        None => println!("Workspace root: system temporary directory"),
    }
    println!();
    println!("Languages configured: {}", config.languages.len());
}

async fn init_config(output: &PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
