use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::models::*;
pub use error::{error_code, BootstrapError};
pub use services::container::{render_dockerfile, write_dockerfile};
pub use services::doctor::run_checks;
pub use services::envfile::{materialize_config, redact};
pub use services::launch::{launch, plan_launch, resolve_environment};
pub use services::output::{print_error, print_one};
pub use services::project::{load_project, Project};
pub use services::setup::run_setup;

const LOG_ENV: &str = "LTBOOT_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let project = load_project(&cli.project_dir, cli.config.as_deref())?;

    if handle_bootstrap_commands(cli, &project)? {
        return Ok(());
    }
    if handle_inspect_commands(cli, &project)? {
        return Ok(());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(err) = run(&cli) {
        print_error(cli.json, error_code(&err), &format!("{err:#}"));
        std::process::exit(1);
    }
}
