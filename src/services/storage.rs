use crate::domain::models::{InstallState, StepStatus};
use crate::services::project::Project;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Output directory for generated PDFs. Parents are created as needed.
pub fn ensure_storage_dir(project: &Project) -> anyhow::Result<StepStatus> {
    let dir = project.storage_dir();
    if dir.is_dir() {
        tracing::info!(path = %dir.display(), "reusing storage directory");
        return Ok(StepStatus::Reused);
    }
    std::fs::create_dir_all(&dir)?;
    tracing::info!(path = %dir.display(), "created storage directory");
    Ok(StepStatus::Created)
}

pub fn manifest_digest(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&raw);
    Ok(hex::encode(hasher.finalize()))
}

pub fn load_install_state(project: &Project) -> anyhow::Result<Option<InstallState>> {
    let p = project.state_path();
    if !p.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn save_install_state(project: &Project, state: &InstallState) -> anyhow::Result<()> {
    let p = project.state_path();
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

pub fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::project::load_project;
    use tempfile::TempDir;

    #[test]
    fn storage_dir_is_created_with_parents_then_reused() {
        let tmp = TempDir::new().expect("temp dir");
        let project = load_project(tmp.path(), None).expect("load");

        assert_eq!(ensure_storage_dir(&project).expect("first"), StepStatus::Created);
        assert!(tmp.path().join("tmp/travel-pdfs").is_dir());
        assert_eq!(ensure_storage_dir(&project).expect("second"), StepStatus::Reused);
    }

    #[test]
    fn install_state_round_trips_through_state_dir() {
        let tmp = TempDir::new().expect("temp dir");
        let project = load_project(tmp.path(), None).expect("load");
        assert!(load_install_state(&project).expect("load empty").is_none());

        let state = InstallState {
            interpreter: "/usr/bin/python3".to_string(),
            venv: "venv".to_string(),
            manifest_sha256: "ab".repeat(32),
            installed_at: 1,
        };
        save_install_state(&project, &state).expect("save");
        assert!(tmp.path().join(".ltboot/state.json").is_file());
        assert_eq!(load_install_state(&project).expect("load"), Some(state));
    }

    #[test]
    fn digest_tracks_manifest_content() {
        let tmp = TempDir::new().expect("temp dir");
        let manifest = tmp.path().join("requirements.txt");
        std::fs::write(&manifest, "flask\n").expect("write");
        let first = manifest_digest(&manifest).expect("digest");
        assert_eq!(first.len(), 64);

        std::fs::write(&manifest, "flask\ngunicorn\n").expect("rewrite");
        assert_ne!(manifest_digest(&manifest).expect("digest"), first);
    }
}
