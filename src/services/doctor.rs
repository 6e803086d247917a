use crate::domain::models::{CheckItem, CheckReport};
use crate::services::envfile::load_env_file;
use crate::services::launch::resolve_environment;
use crate::services::project::Project;
use crate::services::runtime::{locate_interpreter, probe_package_manager};
use crate::services::storage::{load_install_state, manifest_digest};
use std::collections::BTreeMap;
use std::path::Path;

fn item(name: &str, status: &str, detail: Option<String>) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: status.to_string(),
        detail,
    }
}

fn check_exists(name: &str, path: &Path) -> CheckItem {
    item(
        name,
        if path.exists() { "ok" } else { "missing" },
        Some(path.display().to_string()),
    )
}

fn check_dependencies(project: &Project) -> CheckItem {
    let manifest = project.manifest();
    let state = match load_install_state(project) {
        Ok(Some(s)) => s,
        Ok(None) => return item("dependencies", "missing", Some("never installed".into())),
        Err(e) => return item("dependencies", "invalid", Some(e.to_string())),
    };
    match manifest_digest(&manifest) {
        Ok(digest) if digest == state.manifest_sha256 => item(
            "dependencies",
            "ok",
            Some(format!("installed at {}", state.installed_at)),
        ),
        Ok(_) => item(
            "dependencies",
            "stale",
            Some(format!("{} changed since last install", manifest.display())),
        ),
        Err(e) => item("dependencies", "missing", Some(e.to_string())),
    }
}

fn check_required_keys(project: &Project) -> Vec<CheckItem> {
    let vars: BTreeMap<String, String> = load_env_file(&project.env_file())
        .map(|v| v.into_iter().collect())
        .unwrap_or_default();
    project
        .cfg
        .config
        .required_keys
        .iter()
        .map(|key| {
            let status = match vars.get(key) {
                Some(v) if !v.trim().is_empty() => "ok",
                Some(_) => "empty",
                None => "missing",
            };
            item(&format!("secret:{key}"), status, None)
        })
        .collect()
}

/// Read-only inspection of everything `setup` and `run` depend on.
pub fn run_checks(project: &Project, ambient: &BTreeMap<String, String>) -> CheckReport {
    let mut checks = Vec::new();

    match locate_interpreter(project) {
        Some(interpreter) => {
            checks.push(item(
                "interpreter",
                "ok",
                Some(interpreter.display().to_string()),
            ));
            checks.push(match probe_package_manager(&interpreter) {
                Ok(()) => item("package_manager", "ok", None),
                Err(e) => item("package_manager", "missing", Some(e.to_string())),
            });
        }
        None => {
            let tried = project.cfg.runtime.interpreters.join(", ");
            checks.push(item("interpreter", "missing", Some(format!("tried {tried}"))));
            checks.push(item("package_manager", "missing", None));
        }
    }

    checks.push(check_exists("venv", &project.venv_python()));
    checks.push(check_exists("manifest", &project.manifest()));
    checks.push(check_dependencies(project));
    checks.push(check_exists("env_file", &project.env_file()));
    checks.extend(check_required_keys(project));
    checks.push(check_exists("storage", &project.storage_dir()));
    checks.push(check_exists("entrypoint", &project.entrypoint()));
    checks.push(match resolve_environment(project, ambient, None) {
        Ok(env) => item("port", "ok", Some(env.bind(&project.cfg.launch.host))),
        Err(e) => item("port", "invalid", Some(e.to_string())),
    });

    let all_ok = checks.iter().all(|c| c.status == "ok");
    CheckReport {
        overall: if all_ok { "ok" } else { "needs_attention" }.to_string(),
        checks,
    }
}
