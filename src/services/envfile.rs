//! `.env` handling: parsing, first-run materialization from the template, and
//! secret redaction for display.

use crate::domain::constants::SECRET_MARKERS;
use crate::domain::models::StepStatus;
use crate::error::BootstrapError;
use crate::services::project::Project;
use std::path::Path;

/// Parse `KEY=VALUE` lines in file order. Blank lines, `#` comments and lines
/// without `=` are skipped; a leading `export ` and one pair of matching
/// quotes around the value are stripped. Later duplicates win. A leading
/// UTF-8 byte-order mark is ignored.
pub fn parse_env(raw: &str) -> Vec<(String, String)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut out: Vec<(String, String)> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = unquote(value.trim());
        match out.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.to_string(),
            None => out.push((key.to_string(), value.to_string())),
        }
    }
    out
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

pub fn load_env_file(path: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_env(&raw))
}

/// Config gate. An existing `.env` is reused untouched. A missing one is
/// copied verbatim from the template and the run stops so the operator can
/// fill in secrets.
pub fn materialize_config(project: &Project) -> anyhow::Result<StepStatus> {
    let env_file = project.env_file();
    if env_file.exists() {
        tracing::info!(path = %env_file.display(), "reusing config");
        return Ok(StepStatus::Reused);
    }

    let template = project.env_template();
    if !template.is_file() {
        return Err(BootstrapError::MissingTemplate {
            env_file: env_file.display().to_string(),
            template: template.display().to_string(),
        }
        .into());
    }

    if let Some(parent) = env_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(&template, &env_file)?;
    tracing::warn!(
        path = %env_file.display(),
        "config created from template; edit it before launching"
    );
    Err(BootstrapError::MissingConfig {
        env_file: env_file.display().to_string(),
        template: template.display().to_string(),
    }
    .into())
}

pub fn is_secret(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|m| upper.contains(m))
}

pub fn redact(key: &str, value: &str) -> (String, bool) {
    if is_secret(key) && !value.is_empty() {
        ("********".to_string(), true)
    } else {
        (value.to_string(), false)
    }
}
