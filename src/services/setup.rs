use crate::domain::models::{SetupReport, SetupStep, StepStatus};
use crate::services::envfile::materialize_config;
use crate::services::project::Project;
use crate::services::runtime::check_prerequisites;
use crate::services::storage::ensure_storage_dir;
use crate::services::venv::{ensure_venv, install_dependencies};
use std::path::Path;

fn step(name: &str, status: StepStatus, path: &Path) -> SetupStep {
    SetupStep {
        name: name.to_string(),
        status,
        path: path.display().to_string(),
    }
}

/// Prerequisites, venv, dependencies, config, storage, in that order. The
/// first failing step aborts the run; nothing is retried or rolled back.
pub fn run_setup(project: &Project) -> anyhow::Result<SetupReport> {
    let runtime = check_prerequisites(project)?;

    let mut steps = Vec::new();
    steps.push(step(
        "venv",
        ensure_venv(project, &runtime)?,
        &project.venv_dir(),
    ));
    steps.push(step(
        "dependencies",
        install_dependencies(project, &runtime)?,
        &project.manifest(),
    ));
    steps.push(step(
        "config",
        materialize_config(project)?,
        &project.env_file(),
    ));
    steps.push(step(
        "storage",
        ensure_storage_dir(project)?,
        &project.storage_dir(),
    ));

    tracing::info!(project = %project.root.display(), "setup complete");
    Ok(SetupReport {
        project_dir: project.root.display().to_string(),
        interpreter: runtime.interpreter.display().to_string(),
        steps,
    })
}
