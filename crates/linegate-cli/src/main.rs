mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use linegate_core::settings::DEFAULT_HOOK_COMMAND;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "linegate",
    about = "Block file edits that would push a source file past its line limit",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .claude/ or .git/)
    #[arg(long, global = true, env = "LINEGATE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as a PreToolUse hook: read the tool call on stdin, exit 2 to block it
    Check,

    /// Report line counts of existing files against their limits
    Count {
        /// Files to measure
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Fail if any file is over its limit
        #[arg(long)]
        strict: bool,
    },

    /// Show the effective per-extension line limits
    Thresholds,

    /// Write a starter config and register the hook in .claude/settings.json
    Init {
        /// Only write the config file
        #[arg(long)]
        no_hook: bool,

        /// Command line the harness should run for the hook
        #[arg(long, default_value = DEFAULT_HOOK_COMMAND)]
        command: String,
    },

    /// Inspect the gate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Init { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    // stdout is reserved for --json output; the harness shows stderr verbatim.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let explicit_root = cli.root.as_deref();
    let project_root = || root::resolve_root(explicit_root, None);

    let result = match cli.command {
        Commands::Check => std::process::exit(cmd::check::run(explicit_root, cli.json)),
        Commands::Count { paths, strict } => {
            cmd::count::run(&project_root(), &paths, strict, cli.json)
        }
        Commands::Thresholds => cmd::thresholds::run(&project_root(), cli.json),
        Commands::Init { no_hook, command } => {
            cmd::init::run(&project_root(), no_hook, &command, cli.json)
        }
        Commands::Config { subcommand } => {
            cmd::config::run(&project_root(), subcommand, cli.json)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
