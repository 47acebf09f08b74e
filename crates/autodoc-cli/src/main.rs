//! Autodoc CLI - comment, document and summarize a Python source tree.
//!
//! Every stage talks to a language model through the configured backend
//! (Ollama by default). `scan`, `describe` and `config` make no model calls.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use autodoc_ops::Config;
use commands::{config as config_cmd, run, scan, Stage};

/// Autodoc - LLM-assisted documentation for Python projects.
///
/// Run `autodoc <dir>` or `autodoc run <dir>` to normalize comments, add
/// docstrings, summarize the code and write a README into
/// `<dir>/auto_docu_output`.
#[derive(Parser, Debug)]
#[command(
    name = "autodoc",
    author,
    version,
    about = "Autodoc: comments, docstrings, summaries and a README for Python code",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print the operation response as JSON
    #[arg(long, global = true)]
    json: bool,

    // Pipeline arguments used when no subcommand is given
    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments shared by every pipeline command.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Directory containing the Python sources.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Directory names to skip (comma separated or repeated).
    #[arg(short, long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Target comment style, e.g. "minimal" or "verbose".
    #[arg(short, long)]
    pub commenting_style: Option<String>,

    /// Model name, overriding config and environment.
    #[arg(short, long)]
    pub model: Option<String>,

    /// TOML file with a [resolver] table describing the model endpoint.
    #[arg(long)]
    pub resolver_file: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the whole pipeline (default command).
    Run(TargetArgs),

    /// Normalize comments into the output directory.
    Comment(TargetArgs),

    /// Insert docstrings into the normalized copies.
    Docstrings(TargetArgs),

    /// Write the directory structure (no model calls).
    Describe(TargetArgs),

    /// Summarize each file and the directory as a whole.
    Summarize(TargetArgs),

    /// Generate README.md from the text artifacts.
    Readme(TargetArgs),

    /// List the Python files a run would process (no model calls).
    Scan(TargetArgs),

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .init();

    let output = commands::Output {
        json: cli.json,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let command = cli.command.unwrap_or(Commands::Run(cli.target));

    // Commands that save the file must not pick up env values
    let config = match &command {
        Commands::Config(ConfigCommands::Set { .. }) => Config::load_persisted()?,
        Commands::Config(ConfigCommands::Reset) => Config::default(),
        _ => Config::load()?,
    };

    match command {
        Commands::Run(args) => run::pipeline(config, &args, output).await?,
        Commands::Comment(args) => run::stage(config, &args, Stage::Comment, output).await?,
        Commands::Docstrings(args) => {
            run::stage(config, &args, Stage::Docstrings, output).await?
        }
        Commands::Describe(args) => run::stage(config, &args, Stage::Describe, output).await?,
        Commands::Summarize(args) => run::stage(config, &args, Stage::Summarize, output).await?,
        Commands::Readme(args) => run::stage(config, &args, Stage::Readme, output).await?,
        Commands::Scan(args) => scan::execute(config, &args, output)?,

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => config_cmd::show(&config, output)?,
                ConfigCommands::Set { key, value } => config_cmd::set(&mut config, &key, &value)?,
                ConfigCommands::Get { key } => config_cmd::get(&config, &key)?,
                ConfigCommands::Reset => config_cmd::reset()?,
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
