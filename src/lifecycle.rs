//! Create and destroy the demo app set with check-then-act semantics.
//!
//! Each app is either present or absent in Marathon's current listing; there is
//! no pending state and no local cache. Every existence check re-lists the
//! apps. Create and delete responses are logged and reported but never change
//! control flow, and nothing is rolled back when a run stops partway.
use crate::config::DemoConfig;
use crate::marathon::{MarathonClient, Transport, Unchecked};
use crate::templates::{token_values, AppTemplate, TemplateStore};
use anyhow::Result;
use serde::Serialize;

/// Deployment order: queue-facing apps first, the scaling agent last.
pub const DEPLOY_ORDER: [&str; 5] = ["producer", "consumer", "queue", "remainder", "microscaling"];

/// The fixed, ordered set of apps the demo manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSet {
    names: Vec<String>,
}

impl Default for AppSet {
    fn default() -> Self {
        Self {
            names: DEPLOY_ORDER.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl AppSet {
    /// Names in deployment order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names in teardown order (reverse of deployment).
    pub fn teardown_order(&self) -> impl Iterator<Item = &String> {
        self.names.iter().rev()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppAction {
    Created,
    Skipped,
    Deleted,
    Absent,
    Present,
}

impl AppAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AppAction::Created => "created",
            AppAction::Skipped => "skipped",
            AppAction::Deleted => "deleted",
            AppAction::Absent => "absent",
            AppAction::Present => "present",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppOutcome {
    pub app: String,
    pub action: AppAction,
    /// HTTP status of the create/delete call, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppOutcome {
    fn observed(app: &str, action: AppAction) -> Self {
        Self {
            app: app.to_string(),
            action,
            status: None,
            error: None,
        }
    }

    fn acted(app: &str, action: AppAction, result: Unchecked) -> Self {
        let (status, error) = match result {
            Unchecked::Status(status) => (Some(status), None),
            Unchecked::Failed(err) => (None, Some(err)),
        };
        Self {
            app: app.to_string(),
            action,
            status,
            error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LifecycleReport {
    pub operation: &'static str,
    pub marathon_api: String,
    /// Marathon address substituted into templates (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised_api: Option<String>,
    pub apps: Vec<AppOutcome>,
}

impl LifecycleReport {
    fn new(operation: &'static str, marathon_api: &str) -> Self {
        Self {
            operation,
            marathon_api: marathon_api.to_string(),
            advertised_api: None,
            apps: Vec::new(),
        }
    }

    pub fn count(&self, action: AppAction) -> usize {
        self.apps.iter().filter(|app| app.action == action).count()
    }
}

pub struct AppLifecycleManager<T> {
    client: MarathonClient<T>,
    apps: AppSet,
    templates: TemplateStore,
}

impl<T: Transport> AppLifecycleManager<T> {
    pub fn new(client: MarathonClient<T>, apps: AppSet, templates: TemplateStore) -> Self {
        Self {
            client,
            apps,
            templates,
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &MarathonClient<T> {
        &self.client
    }

    /// Create every app that Marathon does not already report.
    ///
    /// All templates are loaded before the first request so a missing template
    /// never leaves a partial deployment behind.
    pub fn create_all(&self, config: &DemoConfig) -> Result<LifecycleReport> {
        let templates = self
            .apps
            .names()
            .iter()
            .map(|name| self.templates.load(name))
            .collect::<Result<Vec<AppTemplate>>>()?;

        let advertised_api = self.advertised_api();
        let values = token_values(config, &advertised_api);

        let mut report = LifecycleReport::new("create", self.client.base_url());
        report.advertised_api = Some(advertised_api);
        for template in &templates {
            let name = template.name.as_str();
            if self.app_exists(name)? {
                tracing::info!(app = name, "app already exists; skipping");
                report.apps.push(AppOutcome::observed(name, AppAction::Skipped));
                continue;
            }
            let descriptor = template.render(&values);
            tracing::info!(
                app = %descriptor.name,
                bytes = descriptor.json_body.len(),
                "creating app"
            );
            let result = self.client.create_app(&descriptor.json_body);
            log_unchecked("create", name, &result);
            report
                .apps
                .push(AppOutcome::acted(name, AppAction::Created, result));
        }
        Ok(report)
    }

    /// Delete every app that Marathon currently reports, in teardown order.
    pub fn delete_all(&self) -> Result<LifecycleReport> {
        let mut report = LifecycleReport::new("destroy", self.client.base_url());
        for name in self.apps.teardown_order() {
            if !self.app_exists(name)? {
                tracing::info!(app = %name, "app not found; nothing to delete");
                report.apps.push(AppOutcome::observed(name, AppAction::Absent));
                continue;
            }
            tracing::info!(app = %name, "deleting app");
            let result = self.client.delete_app(name);
            log_unchecked("delete", name, &result);
            report
                .apps
                .push(AppOutcome::acted(name, AppAction::Deleted, result));
        }
        Ok(report)
    }

    /// Present/absent for each app from a single listing.
    pub fn status(&self) -> Result<LifecycleReport> {
        let deployed = self.client.list_app_names()?;
        let mut report = LifecycleReport::new("status", self.client.base_url());
        for name in self.apps.names() {
            let action = if deployed.contains(name) {
                AppAction::Present
            } else {
                AppAction::Absent
            };
            report.apps.push(AppOutcome::observed(name, action));
        }
        Ok(report)
    }

    /// True when `name` matches a deployed app id with its leading `/` removed.
    pub fn app_exists(&self, name: &str) -> Result<bool> {
        let deployed = self.client.list_app_names()?;
        Ok(deployed.iter().any(|id| id == name))
    }

    pub fn resolve_leader(&self) -> Result<String> {
        self.client.leader()
    }

    /// Leader URL when discovery works, the configured base URL otherwise.
    fn advertised_api(&self) -> String {
        match self.resolve_leader() {
            Ok(leader) => {
                tracing::debug!(leader = %leader, "resolved marathon leader");
                format!("http://{leader}")
            }
            Err(err) => {
                tracing::warn!(
                    error = %format!("{err:#}"),
                    fallback = self.client.base_url(),
                    "leader discovery failed; using configured marathon api"
                );
                self.client.base_url().to_string()
            }
        }
    }
}

fn log_unchecked(operation: &str, app: &str, result: &Unchecked) {
    match result {
        Unchecked::Status(status) if result.is_success() => {
            tracing::debug!(operation, app, status, "request accepted");
        }
        Unchecked::Status(status) => {
            tracing::warn!(operation, app, status, "request returned non-success status");
        }
        Unchecked::Failed(err) => {
            tracing::warn!(operation, app, error = %err, "request failed");
        }
    }
}
