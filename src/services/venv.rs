use crate::domain::models::{InstallState, StepStatus};
use crate::error::BootstrapError;
use crate::services::project::Project;
use crate::services::runtime::Runtime;
use crate::services::storage::{manifest_digest, save_install_state, unix_now};
use std::process::{Command, Output};

/// Last few lines of a failed subprocess, for the operator-facing message.
fn failure_tail(out: &Output) -> String {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&out.stdout).into_owned()
    } else {
        stderr.into_owned()
    };
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = lines[lines.len().saturating_sub(3)..].join(" | ");
    match out.status.code() {
        Some(code) if tail.is_empty() => format!("exit status {code}"),
        Some(code) => format!("exit status {code}: {tail}"),
        None => format!("terminated by signal: {tail}"),
    }
}

fn log_output(step: &str, out: &Output) {
    for line in String::from_utf8_lossy(&out.stdout).lines() {
        tracing::debug!(step = step, "{line}");
    }
    for line in String::from_utf8_lossy(&out.stderr).lines() {
        tracing::debug!(step = step, "{line}");
    }
}

/// Create the isolated environment unless its interpreter already exists.
pub fn ensure_venv(project: &Project, runtime: &Runtime) -> anyhow::Result<StepStatus> {
    let venv = project.venv_dir();
    if project.venv_python().exists() {
        tracing::info!(path = %venv.display(), "reusing virtual environment");
        return Ok(StepStatus::Reused);
    }

    tracing::info!(path = %venv.display(), "creating virtual environment");
    let out = Command::new(&runtime.interpreter)
        .arg("-m")
        .arg("venv")
        .arg(&venv)
        .current_dir(&project.root)
        .output()?;
    log_output("venv", &out);

    if !out.status.success() || !project.venv_python().exists() {
        return Err(BootstrapError::MissingRuntime {
            tool: "venv".to_string(),
            hint: format!(
                "{} -m venv failed ({}); install the venv module for this interpreter",
                runtime.interpreter.display(),
                failure_tail(&out)
            ),
        }
        .into());
    }
    Ok(StepStatus::Created)
}

/// Install the manifest into the venv and record its fingerprint.
pub fn install_dependencies(project: &Project, runtime: &Runtime) -> anyhow::Result<StepStatus> {
    let manifest = project.manifest();
    if !manifest.is_file() {
        return Err(BootstrapError::DependencyInstall {
            manifest: manifest.display().to_string(),
            reason: "manifest file not found".to_string(),
        }
        .into());
    }

    tracing::info!(manifest = %manifest.display(), "installing dependencies");
    let out = Command::new(project.venv_python())
        .args(["-m", "pip", "install", "-r"])
        .arg(&manifest)
        .current_dir(&project.root)
        .output()?;
    log_output("pip", &out);

    if !out.status.success() {
        return Err(BootstrapError::DependencyInstall {
            manifest: manifest.display().to_string(),
            reason: failure_tail(&out),
        }
        .into());
    }

    let state = InstallState {
        interpreter: runtime.interpreter.display().to_string(),
        venv: project.venv_dir().display().to_string(),
        manifest_sha256: manifest_digest(&manifest)?,
        installed_at: unix_now(),
    };
    save_install_state(project, &state)?;
    Ok(StepStatus::Installed)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::services::project::load_project;
    use crate::services::storage::load_install_state;
    use std::os::unix::fs::PermissionsExt;
    use std::os::unix::process::ExitStatusExt;
    use std::path::Path;
    use tempfile::TempDir;

    const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  mkdir -p "$3/bin" && cp "$0" "$3/bin/python" && chmod +x "$3/bin/python"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ] && [ "$3" = "install" ]; then
  if grep -q "does-not-exist" "$5"; then
    echo "ERROR: No matching distribution found for does-not-exist" >&2
    exit 1
  fi
  exit 0
fi
exit 0
"#;

    fn fake_runtime(dir: &Path) -> Runtime {
        let interpreter = dir.join("python3");
        std::fs::write(&interpreter, FAKE_PYTHON).expect("write fake python");
        std::fs::set_permissions(&interpreter, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");
        Runtime { interpreter }
    }

    #[test]
    fn venv_is_created_once_then_reused() {
        let bin = TempDir::new().expect("bin dir");
        let tmp = TempDir::new().expect("project dir");
        let runtime = fake_runtime(bin.path());
        let project = load_project(tmp.path(), None).expect("load");

        assert_eq!(ensure_venv(&project, &runtime).expect("create"), StepStatus::Created);
        assert!(tmp.path().join("venv/bin/python").exists());
        assert_eq!(ensure_venv(&project, &runtime).expect("reuse"), StepStatus::Reused);
    }

    #[test]
    fn install_records_manifest_fingerprint() {
        let bin = TempDir::new().expect("bin dir");
        let tmp = TempDir::new().expect("project dir");
        let runtime = fake_runtime(bin.path());
        std::fs::write(tmp.path().join("requirements.txt"), "flask\n").expect("manifest");
        let project = load_project(tmp.path(), None).expect("load");
        ensure_venv(&project, &runtime).expect("venv");

        assert_eq!(
            install_dependencies(&project, &runtime).expect("install"),
            StepStatus::Installed
        );
        let state = load_install_state(&project).expect("load").expect("state");
        assert_eq!(
            state.manifest_sha256,
            manifest_digest(&tmp.path().join("requirements.txt")).expect("digest")
        );
    }

    #[test]
    fn broken_manifest_fails_without_recording_state() {
        let bin = TempDir::new().expect("bin dir");
        let tmp = TempDir::new().expect("project dir");
        let runtime = fake_runtime(bin.path());
        std::fs::write(tmp.path().join("requirements.txt"), "does-not-exist==0.0\n")
            .expect("manifest");
        let project = load_project(tmp.path(), None).expect("load");
        ensure_venv(&project, &runtime).expect("venv");

        let err = install_dependencies(&project, &runtime).unwrap_err();
        match err.downcast_ref::<BootstrapError>() {
            Some(BootstrapError::DependencyInstall { reason, .. }) => {
                assert!(reason.contains("No matching distribution"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(load_install_state(&project).expect("load").is_none());
    }

    #[test]
    fn missing_manifest_is_an_install_error() {
        let bin = TempDir::new().expect("bin dir");
        let tmp = TempDir::new().expect("project dir");
        let runtime = fake_runtime(bin.path());
        let project = load_project(tmp.path(), None).expect("load");

        let err = install_dependencies(&project, &runtime).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BootstrapError>(),
            Some(BootstrapError::DependencyInstall { .. })
        ));
    }

    #[test]
    fn failure_tail_keeps_last_lines() {
        let out = Output {
            status: std::process::ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: b"one\ntwo\nthree\nfour\n".to_vec(),
        };
        assert_eq!(failure_tail(&out), "exit status 1: two | three | four");
    }
}
