use crate::cli::LaunchMode;
use crate::domain::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Contents of `ltboot.toml`. Every section is optional.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default)]
    pub config: ConfigSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub launch: LaunchSection,
    #[serde(default)]
    pub container: ContainerSection,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSection {
    /// Tried in order; the first one found on `PATH` wins.
    pub interpreters: Vec<String>,
    pub venv_dir: PathBuf,
    pub manifest: PathBuf,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            interpreters: owned(DEFAULT_INTERPRETERS),
            venv_dir: PathBuf::from(DEFAULT_VENV_DIR),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigSection {
    pub env_file: PathBuf,
    pub template: PathBuf,
    pub required_keys: Vec<String>,
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            template: PathBuf::from(DEFAULT_ENV_TEMPLATE),
            required_keys: owned(DEFAULT_REQUIRED_KEYS),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub dir: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchSection {
    pub entrypoint: PathBuf,
    pub app: String,
    pub host: String,
    pub default_port: u16,
    pub workers: u32,
    pub threads: u32,
    pub process_manager: String,
}

impl Default for LaunchSection {
    fn default() -> Self {
        Self {
            entrypoint: PathBuf::from(DEFAULT_ENTRYPOINT),
            app: DEFAULT_APP.to_string(),
            host: DEFAULT_HOST.to_string(),
            default_port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            threads: DEFAULT_THREADS,
            process_manager: DEFAULT_PROCESS_MANAGER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerSection {
    pub base_image: String,
    pub workdir: String,
    pub system_packages: Vec<String>,
}

impl Default for ContainerSection {
    fn default() -> Self {
        Self {
            base_image: DEFAULT_BASE_IMAGE.to_string(),
            workdir: DEFAULT_CONTAINER_WORKDIR.to_string(),
            system_packages: owned(DEFAULT_SYSTEM_PACKAGES),
        }
    }
}

/// Written to `.ltboot/state.json` after a successful dependency install.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InstallState {
    pub interpreter: String,
    pub venv: String,
    pub manifest_sha256: String,
    pub installed_at: u64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Created,
    Reused,
    Installed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Created => "created",
            StepStatus::Reused => "reused",
            StepStatus::Installed => "installed",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetupStep {
    pub name: String,
    pub status: StepStatus,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SetupReport {
    pub project_dir: String,
    pub interpreter: String,
    pub steps: Vec<SetupStep>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Serialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
    pub redacted: bool,
}

#[derive(Debug, Serialize)]
pub struct EnvReport {
    pub bind: String,
    pub vars: Vec<EnvVar>,
}

#[derive(Debug, Serialize)]
pub struct LaunchPlan {
    pub mode: LaunchMode,
    pub program: String,
    pub args: Vec<String>,
    pub bind: String,
    pub workdir: String,
    /// Variables added on top of the inherited environment. Values stay out of
    /// the JSON output because they carry secrets.
    #[serde(skip)]
    pub env: BTreeMap<String, String>,
    pub env_keys: Vec<String>,
}
