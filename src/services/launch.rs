use crate::cli::LaunchMode;
use crate::domain::constants::{PORT_VAR, STORAGE_DIR_VAR};
use crate::domain::models::LaunchPlan;
use crate::error::BootstrapError;
use crate::services::envfile::load_env_file;
use crate::services::project::Project;
use crate::services::runtime::find_on_path;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

/// Variables handed to the application on top of the inherited environment.
#[derive(Debug, Clone)]
pub struct ResolvedEnv {
    pub vars: BTreeMap<String, String>,
    pub port: u16,
}

impl ResolvedEnv {
    pub fn bind(&self, host: &str) -> String {
        format!("{host}:{}", self.port)
    }
}

pub fn parse_port(raw: &str) -> Result<u16, BootstrapError> {
    match raw.trim().parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(BootstrapError::InvalidPort(raw.to_string())),
    }
}

/// `.env` entries override the ambient environment and `port_override`
/// overrides both. `PORT` falls back to the configured default and
/// `STORAGE_DIR` to the project's storage directory.
pub fn resolve_environment(
    project: &Project,
    ambient: &BTreeMap<String, String>,
    port_override: Option<&str>,
) -> anyhow::Result<ResolvedEnv> {
    let env_file = project.env_file();
    let mut vars: BTreeMap<String, String> = if env_file.exists() {
        load_env_file(&env_file)?.into_iter().collect()
    } else {
        BTreeMap::new()
    };

    let port = match port_override {
        Some(raw) => parse_port(raw)?,
        None => match vars.get(PORT_VAR).or_else(|| ambient.get(PORT_VAR)) {
            Some(raw) if !raw.trim().is_empty() => parse_port(raw)?,
            _ => project.cfg.launch.default_port,
        },
    };
    vars.insert(PORT_VAR.to_string(), port.to_string());

    if !vars.contains_key(STORAGE_DIR_VAR) && !ambient.contains_key(STORAGE_DIR_VAR) {
        vars.insert(
            STORAGE_DIR_VAR.to_string(),
            project.storage_dir().display().to_string(),
        );
    }

    Ok(ResolvedEnv { vars, port })
}

fn process_manager(project: &Project) -> anyhow::Result<PathBuf> {
    let name = &project.cfg.launch.process_manager;
    let in_venv = project.venv_bin(name);
    if in_venv.exists() {
        return Ok(in_venv);
    }
    find_on_path(name, std::env::var_os("PATH").as_deref()).ok_or_else(|| {
        BootstrapError::MissingRuntime {
            tool: name.clone(),
            hint: format!("add {name} to the dependency manifest and run setup"),
        }
        .into()
    })
}

pub fn plan_launch(
    project: &Project,
    env: &ResolvedEnv,
    mode: LaunchMode,
) -> anyhow::Result<LaunchPlan> {
    let launch = &project.cfg.launch;
    let bind = env.bind(&launch.host);

    let (program, args) = match mode {
        LaunchMode::Local => {
            let python = project.venv_python();
            if !python.exists() {
                return Err(BootstrapError::EnvironmentNotReady(format!(
                    "{} does not exist; run `ltboot setup` first",
                    python.display()
                ))
                .into());
            }
            let entrypoint = project.entrypoint();
            if !entrypoint.is_file() {
                return Err(BootstrapError::EnvironmentNotReady(format!(
                    "application entrypoint {} not found",
                    entrypoint.display()
                ))
                .into());
            }
            (python, vec![entrypoint.display().to_string()])
        }
        LaunchMode::Container => {
            let manager = process_manager(project)?;
            let args = vec![
                "--bind".to_string(),
                bind.clone(),
                "--workers".to_string(),
                launch.workers.to_string(),
                "--threads".to_string(),
                launch.threads.to_string(),
                launch.app.clone(),
            ];
            (manager, args)
        }
    };

    Ok(LaunchPlan {
        mode,
        program: program.display().to_string(),
        args,
        bind,
        workdir: project.root.display().to_string(),
        env_keys: env.vars.keys().cloned().collect(),
        env: env.vars.clone(),
    })
}

/// Hand control to the application. On unix the current process is replaced
/// and this only returns on failure; elsewhere the child's exit code is
/// returned once it finishes.
pub fn launch(plan: &LaunchPlan) -> anyhow::Result<i32> {
    tracing::info!(
        program = %plan.program,
        bind = %plan.bind,
        mode = ?plan.mode,
        "launching application"
    );
    let mut cmd = Command::new(&plan.program);
    cmd.args(&plan.args)
        .envs(&plan.env)
        .current_dir(&plan.workdir);
    hand_off(cmd, &plan.program)
}

#[cfg(unix)]
fn hand_off(mut cmd: Command, program: &str) -> anyhow::Result<i32> {
    use std::os::unix::process::CommandExt;
    let err = cmd.exec();
    Err(anyhow::Error::new(err).context(format!("failed to exec {program}")))
}

#[cfg(not(unix))]
fn hand_off(mut cmd: Command, program: &str) -> anyhow::Result<i32> {
    use anyhow::Context;
    let status = cmd
        .status()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(status.code().unwrap_or(1))
}
