//! Command handlers: resolve configuration, run the manager, print the report.
use crate::cli::GlobalArgs;
use crate::config::DemoConfig;
use crate::lifecycle::{AppAction, AppLifecycleManager, AppSet, LifecycleReport};
use crate::marathon::{MarathonClient, UreqTransport};
use crate::templates::TemplateStore;
use anyhow::{Context, Result};

fn build_manager(marathon_api: &str, global: &GlobalArgs) -> AppLifecycleManager<UreqTransport> {
    AppLifecycleManager::new(
        MarathonClient::new(marathon_api, UreqTransport::new()),
        AppSet::default(),
        TemplateStore::new(global.templates_dir.clone()),
    )
}

pub fn run_create(global: &GlobalArgs) -> Result<()> {
    let config = DemoConfig::from_env()?;
    let manager = build_manager(&config.marathon_api, global);
    let report = manager.create_all(&config)?;
    tracing::info!(
        created = report.count(AppAction::Created),
        skipped = report.count(AppAction::Skipped),
        "create finished"
    );
    emit_report(&report, global.json)
}

pub fn run_destroy(global: &GlobalArgs) -> Result<()> {
    let marathon_api = DemoConfig::marathon_api_from_env()?;
    let manager = build_manager(&marathon_api, global);
    let report = manager.delete_all()?;
    tracing::info!(
        deleted = report.count(AppAction::Deleted),
        absent = report.count(AppAction::Absent),
        "destroy finished"
    );
    emit_report(&report, global.json)
}

pub fn run_status(global: &GlobalArgs) -> Result<()> {
    let marathon_api = DemoConfig::marathon_api_from_env()?;
    let report = build_manager(&marathon_api, global).status()?;
    emit_report(&report, global.json)
}

pub fn run_leader(global: &GlobalArgs) -> Result<()> {
    let marathon_api = DemoConfig::marathon_api_from_env()?;
    let leader = build_manager(&marathon_api, global)
        .resolve_leader()
        .with_context(|| format!("resolve leader via {marathon_api}"))?;
    if global.json {
        let text = serde_json::to_string_pretty(&serde_json::json!({ "leader": leader }))
            .context("serialize leader")?;
        println!("{text}");
    } else {
        println!("{leader}");
    }
    Ok(())
}

fn emit_report(report: &LifecycleReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{text}");
        return Ok(());
    }
    for outcome in &report.apps {
        let action = outcome.action.as_str();
        match (&outcome.status, &outcome.error) {
            (Some(status), _) => println!("{:<14} {action} (HTTP {status})", outcome.app),
            (None, Some(err)) => println!("{:<14} {action} (error: {err})", outcome.app),
            (None, None) => println!("{:<14} {action}", outcome.app),
        }
    }
    Ok(())
}
