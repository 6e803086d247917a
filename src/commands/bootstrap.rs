use crate::*;
use std::collections::BTreeMap;

fn render_setup(report: &SetupReport) -> String {
    let mut lines = vec![format!("interpreter: {}", report.interpreter)];
    for s in &report.steps {
        lines.push(format!("{}\t{}\t{}", s.name, s.status.as_str(), s.path));
    }
    lines.push("setup complete".to_string());
    lines.join("\n")
}

fn render_plan(plan: &LaunchPlan) -> String {
    format!(
        "{} {}\nbind: {}\nworkdir: {}",
        plan.program,
        plan.args.join(" "),
        plan.bind,
        plan.workdir
    )
}

fn prepare_launch(project: &Project, args: &LaunchArgs) -> anyhow::Result<LaunchPlan> {
    // No launch without a populated config file.
    materialize_config(project)?;
    let ambient: BTreeMap<String, String> = std::env::vars().collect();
    let env = resolve_environment(project, &ambient, args.port.as_deref())?;
    plan_launch(project, &env, args.mode)
}

fn hand_over(plan: &LaunchPlan) -> anyhow::Result<()> {
    let code = launch(plan)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

pub fn handle_bootstrap_commands(cli: &Cli, project: &Project) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Setup => {
            let report = run_setup(project)?;
            print_one(cli.json, report, render_setup)?;
        }
        Commands::Run { launch } => {
            let plan = prepare_launch(project, launch)?;
            if launch.dry_run {
                print_one(cli.json, plan, render_plan)?;
            } else {
                hand_over(&plan)?;
            }
        }
        Commands::Up { launch } => {
            let report = run_setup(project)?;
            let plan = prepare_launch(project, launch)?;
            if launch.dry_run {
                print_one(
                    cli.json,
                    serde_json::json!({ "setup": report, "plan": plan }),
                    |_| format!("{}\n{}", render_setup(&report), render_plan(&plan)),
                )?;
            } else {
                hand_over(&plan)?;
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
