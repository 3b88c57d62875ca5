use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use now_sc::commands;
use now_sc::commands::init::InitOptions;
use now_sc::{Config, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "now-sc",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "CLI tool for bootstrapping presales projects for solution consultants",
    long_about = "Now-SC helps solution consultants bootstrap and manage presales projects \
                  with structured directories, prompt templates, and AI-powered workflows."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new presales project
    ///
    /// Creates the standard directory structure, fetches base prompts from
    /// GitHub, and optionally creates a GitHub repository.
    Init {
        /// Project name
        #[arg(short, long)]
        name: Option<String>,

        /// Customer name
        #[arg(short, long)]
        customer: Option<String>,

        /// Skip GitHub repository creation
        #[arg(long)]
        no_github: bool,
    },

    /// Execute a prompt template (requires OPENROUTER_API_KEY)
    Prompt,
}

/// Diagnostics go to stderr so command output stays readable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("NOW_SC_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let mut prompter = TerminalPrompter::new();

    match cli.command {
        Commands::Init {
            name,
            customer,
            no_github,
        } => {
            let options = InitOptions {
                name,
                customer,
                no_github,
            };
            commands::init::execute(&config, options, &mut prompter)?;
        }
        Commands::Prompt => {
            commands::prompt::execute(&config, &mut prompter)?;
        }
    }

    Ok(())
}

fn main() {
    // A missing .env is normal
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}
