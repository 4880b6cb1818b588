// ABOUTME: Entry point for the livekitx-tasks CLI.
// ABOUTME: Dispatches generate, test and list; exits with the failing child's code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use livekitx_tasks::{tasks, Config, ProcessRunner, Task, TaskError};

#[derive(Parser)]
#[command(name = "livekitx-tasks")]
#[command(about = "Build tasks for the livekitx protobuf bindings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Change to this directory before doing anything
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    /// Configuration file (defaults to ./livekitx-tasks.toml if present)
    #[arg(short, long, global = true, env = "LIVEKITX_TASKS_CONFIG")]
    config: Option<PathBuf>,

    /// Root whose bin/ directory is searched when a tool is not on PATH
    #[arg(long, global = true)]
    workspace_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate protobuf bindings (default)
    Generate,

    /// Run the Go test suite
    Test,

    /// List available tasks
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    livekitx_log::init_verbose(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            let code = e
                .downcast_ref::<TaskError>()
                .map(TaskError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.dir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
    }

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let task = match cli.command {
        Some(Commands::List) => {
            print!("{}", tasks::render_list());
            return Ok(());
        }
        Some(Commands::Generate) | None => Task::Generate,
        Some(Commands::Test) => Task::Test,
    };

    let config = Config::discover(cli.config.as_deref())?;
    let resolver = config.resolver(cli.workspace_root);
    tracing::debug!(?config, root = %resolver.workspace_root().display(), "loaded configuration");

    task.run(&config, &resolver, &mut ProcessRunner)?;
    Ok(())
}
