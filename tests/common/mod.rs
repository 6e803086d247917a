#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENV_TEMPLATE: &str = "# Copy to .env and fill in\nOPENAI_API_KEY=\nENV=production\n";
pub const ENV_POPULATED: &str = "OPENAI_API_KEY=sk-test-123\nENV=development\n";

/// Stands in for a Python interpreter: answers the venv/pip invocations the
/// bootstrapper makes and otherwise prints what the application would see.
const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ "$1" = "-m" ] && [ "$2" = "pip" ] && [ "$3" = "--version" ]; then
  echo "pip 24.0 (fake)"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  mkdir -p "$3/bin" && cp "$0" "$3/bin/python" && chmod +x "$3/bin/python"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ] && [ "$3" = "install" ]; then
  if grep -q "does-not-exist" "$5"; then
    echo "ERROR: No matching distribution found for does-not-exist" >&2
    exit 1
  fi
  echo "Successfully installed flask gunicorn reportlab"
  exit 0
fi
echo "app $* PORT=$PORT STORAGE_DIR=$STORAGE_DIR OPENAI_API_KEY=$OPENAI_API_KEY"
"#;

const PIPLESS_PYTHON: &str = r#"#!/bin/sh
if [ "$2" = "pip" ]; then
  echo "No module named pip" >&2
  exit 1
fi
exit 0
"#;

const FAKE_GUNICORN: &str = r#"#!/bin/sh
echo "gunicorn $* PORT=$PORT"
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub project: PathBuf,
    pub bin: PathBuf,
    pub empty_bin: PathBuf,
}

fn write_exec(path: &Path, body: &str) {
    fs::write(path, body).expect("write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod script");
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let project = tmp.path().join("project");
        let bin = tmp.path().join("bin");
        let empty_bin = tmp.path().join("empty-bin");
        fs::create_dir_all(&project).expect("create project");
        fs::create_dir_all(&bin).expect("create bin");
        fs::create_dir_all(&empty_bin).expect("create empty bin");

        write_exec(&bin.join("python3"), FAKE_PYTHON);
        write_exec(&bin.join("gunicorn"), FAKE_GUNICORN);

        fs::write(project.join(".env.example"), ENV_TEMPLATE).expect("write template");
        fs::write(project.join("requirements.txt"), "flask\ngunicorn\nreportlab\n")
            .expect("write manifest");
        fs::write(project.join("Luxury_Travel_Bot.py"), "# app\n").expect("write entrypoint");

        Self {
            _tmp: tmp,
            project,
            bin,
            empty_bin,
        }
    }

    pub fn without_pip(self) -> Self {
        write_exec(&self.bin.join("python3"), PIPLESS_PYTHON);
        self
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.project.join(rel)
    }

    pub fn write(&self, rel: &str, body: &str) {
        fs::write(self.path(rel), body).expect("write project file");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ltboot");
        cmd.current_dir(&self.project)
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin.display()))
            .env("LTBOOT_LOG", "warn")
            .env_remove("PORT")
            .env_remove("STORAGE_DIR")
            .env_remove("OPENAI_API_KEY");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn fail_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();
        let v: Value = serde_json::from_slice(&out).expect("error json output");
        assert_eq!(v["ok"], false);
        v
    }

    /// Populated `.env` plus a successful setup run.
    pub fn prepared(self) -> Self {
        self.write(".env", ENV_POPULATED);
        self.run_json(&["setup"]);
        self
    }
}
