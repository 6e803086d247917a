use crate::domain::constants::{PROJECT_CONFIG_FILE, STATE_DIR, STATE_FILE};
use crate::domain::models::ProjectConfig;
use crate::error::BootstrapError;
use std::path::{Path, PathBuf};

/// A project directory plus its resolved `ltboot.toml`. All configured paths
/// are relative to `root` unless absolute.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub cfg: ProjectConfig,
}

pub fn load_project(project_dir: &Path, config: Option<&Path>) -> anyhow::Result<Project> {
    let root = std::path::absolute(project_dir)?;
    let (path, explicit) = match config {
        Some(p) => (root.join(p), true),
        None => (root.join(PROJECT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            return Err(BootstrapError::InvalidConfig {
                path: path.display().to_string(),
                reason: "file does not exist".to_string(),
            }
            .into());
        }
        tracing::debug!(root = %root.display(), "no project config, using defaults");
        return Ok(Project {
            root,
            cfg: ProjectConfig::default(),
        });
    }

    let raw = std::fs::read_to_string(&path)?;
    let cfg = toml::from_str(&raw).map_err(|e| BootstrapError::InvalidConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(config = %path.display(), "loaded project config");
    Ok(Project { root, cfg })
}

impl Project {
    fn resolve(&self, p: &Path) -> PathBuf {
        self.root.join(p)
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.resolve(&self.cfg.runtime.venv_dir)
    }

    /// Interpreter inside the venv; layout differs between Windows and unix.
    pub fn venv_python(&self) -> PathBuf {
        self.venv_bin("python")
    }

    pub fn venv_bin(&self, name: &str) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir()
                .join("Scripts")
                .join(format!("{name}.exe"))
        } else {
            self.venv_dir().join("bin").join(name)
        }
    }

    pub fn manifest(&self) -> PathBuf {
        self.resolve(&self.cfg.runtime.manifest)
    }

    pub fn env_file(&self) -> PathBuf {
        self.resolve(&self.cfg.config.env_file)
    }

    pub fn env_template(&self) -> PathBuf {
        self.resolve(&self.cfg.config.template)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.resolve(&self.cfg.storage.dir)
    }

    pub fn entrypoint(&self) -> PathBuf {
        self.resolve(&self.cfg.launch.entrypoint)
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(STATE_FILE)
    }
}
