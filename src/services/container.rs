use crate::domain::constants::PORT_VAR;
use crate::services::project::Project;
use std::fmt::Write as _;

/// Container build recipe: slim interpreter image, native build deps, the
/// manifest installed into the system interpreter, then the process manager
/// as PID 1 bound to `$PORT`.
pub fn render_dockerfile(project: &Project) -> String {
    let cfg = &project.cfg;
    let manifest = cfg.runtime.manifest.display().to_string();
    let storage = cfg.storage.dir.display().to_string();
    let launch = &cfg.launch;

    let mut out = String::new();
    let _ = writeln!(out, "FROM {}", cfg.container.base_image);
    out.push('\n');
    out.push_str("ENV PYTHONDONTWRITEBYTECODE=1 \\\n    PYTHONUNBUFFERED=1\n\n");

    if !cfg.container.system_packages.is_empty() {
        out.push_str("RUN apt-get update \\\n    && apt-get install -y --no-install-recommends \\\n");
        for pkg in &cfg.container.system_packages {
            let _ = writeln!(out, "       {pkg} \\");
        }
        out.push_str("    && rm -rf /var/lib/apt/lists/*\n\n");
    }

    let _ = writeln!(out, "WORKDIR {}", cfg.container.workdir);
    out.push('\n');
    let _ = writeln!(out, "COPY {manifest} ./{manifest}");
    let _ = writeln!(out, "RUN pip install --no-cache-dir -r {manifest}");
    out.push('\n');
    out.push_str("COPY . .\n");
    let _ = writeln!(out, "RUN mkdir -p {storage}");
    out.push('\n');
    let _ = writeln!(out, "ENV {PORT_VAR}={}", launch.default_port);
    let _ = writeln!(out, "EXPOSE {}", launch.default_port);
    out.push('\n');
    let _ = writeln!(
        out,
        "CMD exec {} --bind {}:${PORT_VAR} --workers {} --threads {} {}",
        launch.process_manager, launch.host, launch.workers, launch.threads, launch.app
    );
    out
}

pub fn write_dockerfile(project: &Project, dest: &std::path::Path) -> anyhow::Result<()> {
    let path = project.root.join(dest);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render_dockerfile(project))?;
    tracing::info!(path = %path.display(), "wrote container recipe");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::project::load_project;
    use tempfile::TempDir;

    #[test]
    fn default_recipe_binds_port_with_worker_pool() {
        let tmp = TempDir::new().expect("temp dir");
        let project = load_project(tmp.path(), None).expect("load");
        let recipe = render_dockerfile(&project);

        assert!(recipe.starts_with("FROM python:3.11-slim\n"));
        assert!(recipe.contains("libcairo2-dev"));
        assert!(recipe.contains("RUN pip install --no-cache-dir -r requirements.txt"));
        assert!(recipe.contains("RUN mkdir -p tmp/travel-pdfs"));
        assert!(recipe.contains("ENV PORT=8080"));
        assert!(recipe.trim_end().ends_with(
            "CMD exec gunicorn --bind 0.0.0.0:$PORT --workers 2 --threads 8 Luxury_Travel_Bot:app"
        ));
    }

    #[test]
    fn recipe_follows_project_config() {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::write(
            tmp.path().join("ltboot.toml"),
            "[container]\nbase_image = \"python:3.12-slim\"\nsystem_packages = []\n\n[launch]\nworkers = 4\n",
        )
        .expect("config");
        let project = load_project(tmp.path(), None).expect("load");
        let recipe = render_dockerfile(&project);

        assert!(recipe.starts_with("FROM python:3.12-slim\n"));
        assert!(!recipe.contains("apt-get"));
        assert!(recipe.contains("--workers 4 --threads 8"));
    }
}
