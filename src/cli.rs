use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ltboot",
    version,
    about = "Luxury Travel Bot bootstrapper and launcher"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project directory holding the application sources"
    )]
    pub project_dir: PathBuf,
    #[arg(
        long,
        global = true,
        help = "Project config file (defaults to <project-dir>/ltboot.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check prerequisites, prepare the venv, install dependencies, materialize config.
    Setup,
    /// Launch the application from an already prepared project.
    Run {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Setup followed by run.
    Up {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Report the state of every prerequisite without changing anything.
    Check,
    /// Show the environment the application would be launched with.
    Env {
        #[arg(long, help = "Override PORT from .env and the environment")]
        port: Option<String>,
    },
    /// Render the container build recipe.
    Dockerfile {
        #[arg(long, help = "Write to this path instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    #[arg(long, value_enum, default_value_t = LaunchMode::Local)]
    pub mode: LaunchMode,
    // Validated with the PORT rules so a bad flag reports INVALID_PORT.
    #[arg(long, help = "Override PORT from .env and the environment")]
    pub port: Option<String>,
    #[arg(long, default_value_t = false, help = "Print the launch plan instead of launching")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Single foreground interpreter process.
    Local,
    /// Multi-worker process manager, as used in the container image.
    Container,
}
