/// Terminal failures of a bootstrap or launch run. Each maps to a stable code
/// used in `--json` error output; every one of them exits with status 1.
#[derive(thiserror::Error, Debug)]
pub enum BootstrapError {
    #[error("{tool} not found: {hint}")]
    MissingRuntime { tool: String, hint: String },
    #[error("dependency installation from {manifest} failed: {reason}")]
    DependencyInstall { manifest: String, reason: String },
    #[error("created {env_file} from {template}; populate its secrets and run again")]
    MissingConfig { env_file: String, template: String },
    #[error("{env_file} is missing and no template exists at {template}")]
    MissingTemplate { env_file: String, template: String },
    #[error("environment not ready: {0}")]
    EnvironmentNotReady(String),
    #[error("invalid PORT value {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid project config {path}: {reason}")]
    InvalidConfig { path: String, reason: String },
}

impl BootstrapError {
    pub fn code(&self) -> &'static str {
        match self {
            BootstrapError::MissingRuntime { .. } => "MISSING_RUNTIME",
            BootstrapError::DependencyInstall { .. } => "DEPENDENCY_INSTALL_ERROR",
            BootstrapError::MissingConfig { .. } => "MISSING_CONFIG",
            BootstrapError::MissingTemplate { .. } => "MISSING_TEMPLATE",
            BootstrapError::EnvironmentNotReady(_) => "ENV_NOT_READY",
            BootstrapError::InvalidPort(_) => "INVALID_PORT",
            BootstrapError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

/// Error code for anything that reaches `main`, typed or not.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<BootstrapError>() {
        Some(e) => e.code(),
        None if err.downcast_ref::<std::io::Error>().is_some() => "IO_ERROR",
        None => "ERROR",
    }
}
