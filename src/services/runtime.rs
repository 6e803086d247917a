use crate::error::BootstrapError;
use crate::services::project::Project;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Interpreter found on `PATH` with a working package manager.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub interpreter: PathBuf,
}

/// Search `path_var` (a `PATH`-style list) for an executable called `name`.
/// Names containing a separator are checked as-is.
pub fn find_on_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }

    for dir in std::env::split_paths(path_var?) {
        for file in executable_names(name) {
            let candidate = dir.join(file);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn executable_names(name: &str) -> Vec<String> {
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.BAT;.CMD".to_string());
    std::iter::once(name.to_string())
        .chain(
            exts.split(';')
                .filter(|e| !e.is_empty())
                .map(|e| format!("{name}{}", e.to_ascii_lowercase())),
        )
        .collect()
}

#[cfg(not(windows))]
fn executable_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

pub fn locate_interpreter(project: &Project) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH");
    project
        .cfg
        .runtime
        .interpreters
        .iter()
        .find_map(|name| find_on_path(name, path_var.as_deref()))
}

/// `<python> -m pip --version`; Ok(()) when pip answers.
pub fn probe_package_manager(interpreter: &Path) -> anyhow::Result<()> {
    let out = Command::new(interpreter)
        .args(["-m", "pip", "--version"])
        .output()?;
    if out.status.success() {
        tracing::debug!(
            version = %String::from_utf8_lossy(&out.stdout).trim(),
            "package manager available"
        );
        Ok(())
    } else {
        anyhow::bail!("{}", String::from_utf8_lossy(&out.stderr).trim())
    }
}

/// First gate of the setup sequence. Nothing is written before it passes.
pub fn check_prerequisites(project: &Project) -> anyhow::Result<Runtime> {
    let interpreters = &project.cfg.runtime.interpreters;
    let interpreter = locate_interpreter(project).ok_or_else(|| BootstrapError::MissingRuntime {
        tool: interpreters.join("/"),
        hint: "install Python 3 and make sure it is on PATH".to_string(),
    })?;
    tracing::info!(interpreter = %interpreter.display(), "found interpreter");

    probe_package_manager(&interpreter).map_err(|e| BootstrapError::MissingRuntime {
        tool: "pip".to_string(),
        hint: format!(
            "{} -m pip is unavailable ({e}); install pip for this interpreter",
            interpreter.display()
        ),
    })?;

    Ok(Runtime { interpreter })
}
