use crate::*;
use std::collections::BTreeMap;

fn render_checks(report: &CheckReport) -> String {
    let mut lines = vec![format!("overall: {}", report.overall)];
    for c in &report.checks {
        match &c.detail {
            Some(d) => lines.push(format!("{}\t{}\t{}", c.name, c.status, d)),
            None => lines.push(format!("{}\t{}", c.name, c.status)),
        }
    }
    lines.join("\n")
}

fn env_report(project: &Project, port: Option<&str>) -> anyhow::Result<EnvReport> {
    let ambient: BTreeMap<String, String> = std::env::vars().collect();
    let env = resolve_environment(project, &ambient, port)?;
    let vars = env
        .vars
        .iter()
        .map(|(key, value)| {
            let (value, redacted) = redact(key, value);
            EnvVar {
                key: key.clone(),
                value,
                redacted,
            }
        })
        .collect();
    Ok(EnvReport {
        bind: env.bind(&project.cfg.launch.host),
        vars,
    })
}

pub fn handle_inspect_commands(cli: &Cli, project: &Project) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Check => {
            let ambient: BTreeMap<String, String> = std::env::vars().collect();
            let report = run_checks(project, &ambient);
            print_one(cli.json, report, render_checks)?;
        }
        Commands::Env { port } => {
            let report = env_report(project, port.as_deref())?;
            print_one(cli.json, report, |r| {
                let mut lines = vec![format!("bind: {}", r.bind)];
                lines.extend(r.vars.iter().map(|v| format!("{}={}", v.key, v.value)));
                lines.join("\n")
            })?;
        }
        Commands::Dockerfile { output } => match output {
            Some(dest) => {
                write_dockerfile(project, dest)?;
                let path = project.root.join(dest).display().to_string();
                print_one(cli.json, path, |p| format!("wrote {p}"))?;
            }
            None => {
                if cli.json {
                    print_one(true, render_dockerfile(project), |s| s.clone())?;
                } else {
                    print!("{}", render_dockerfile(project));
                }
            }
        },
        _ => return Ok(false),
    }
    Ok(true)
}
