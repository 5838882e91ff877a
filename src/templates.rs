//! Marathon app templates and placeholder substitution.
//!
//! Templates are opaque JSON text. Rendering replaces every occurrence of each
//! token, in `TOKENS` order, with no escaping and no check that the token was
//! present.
use crate::config::DemoConfig;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;

pub const PRODUCER_JSON: &str = include_str!("../templates/marathon/producer.json");
pub const CONSUMER_JSON: &str = include_str!("../templates/marathon/consumer.json");
pub const QUEUE_JSON: &str = include_str!("../templates/marathon/queue.json");
pub const REMAINDER_JSON: &str = include_str!("../templates/marathon/remainder.json");
pub const MICROSCALING_JSON: &str = include_str!("../templates/marathon/microscaling.json");

pub const USER_ID_TOKEN: &str = "__MSS_USER_ID__";
pub const API_ADDRESS_TOKEN: &str = "__MSS_API_ADDRESS__";
pub const MARATHON_API_TOKEN: &str = "__MSS_MARATHON_API__";
pub const STORAGE_ACCOUNT_NAME_TOKEN: &str = "__AZURE_STORAGE_ACCOUNT_NAME__";
pub const STORAGE_ACCOUNT_KEY_TOKEN: &str = "__AZURE_STORAGE_ACCOUNT_KEY__";
pub const STORAGE_QUEUE_NAME_TOKEN: &str = "__AZURE_STORAGE_QUEUE_NAME__";

/// Substitution order.
pub const TOKENS: [&str; 6] = [
    USER_ID_TOKEN,
    API_ADDRESS_TOKEN,
    MARATHON_API_TOKEN,
    STORAGE_ACCOUNT_NAME_TOKEN,
    STORAGE_ACCOUNT_KEY_TOKEN,
    STORAGE_QUEUE_NAME_TOKEN,
];

/// Raw template text for one app.
#[derive(Debug, Clone)]
pub struct AppTemplate {
    pub name: String,
    pub raw: String,
}

/// A rendered app definition, ready to POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub name: String,
    pub json_body: String,
}

/// Replace every occurrence of `token` in `raw` with `value`.
pub fn render_template(raw: &str, token: &str, value: &str) -> String {
    raw.replace(token, value)
}

/// Token/value pairs in substitution order.
pub fn token_values(config: &DemoConfig, marathon_api: &str) -> Vec<(&'static str, String)> {
    let values = [
        config.user_id.clone(),
        config.api_address.clone(),
        marathon_api.to_string(),
        config.storage.account_name.clone(),
        config.storage.account_key.clone(),
        config.storage.queue_name.clone(),
    ];
    TOKENS.into_iter().zip(values).collect()
}

impl AppTemplate {
    pub fn render(&self, values: &[(&'static str, String)]) -> AppDescriptor {
        let json_body = values
            .iter()
            .fold(self.raw.clone(), |body, (token, value)| {
                render_template(&body, token, value)
            });
        AppDescriptor {
            name: self.name.clone(),
            json_body,
        }
    }
}

/// Where app templates are read from.
#[derive(Debug, Clone)]
pub enum TemplateStore {
    /// Templates compiled into the binary.
    Embedded,
    /// `<dir>/<name>.json` on disk.
    Dir(PathBuf),
}

impl TemplateStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => TemplateStore::Dir(dir),
            None => TemplateStore::Embedded,
        }
    }

    pub fn load(&self, name: &str) -> Result<AppTemplate> {
        let raw = match self {
            TemplateStore::Embedded => embedded(name)
                .ok_or_else(|| anyhow!("no embedded template for app {name}"))?
                .to_string(),
            TemplateStore::Dir(dir) => {
                let path = dir.join(format!("{name}.json"));
                fs::read_to_string(&path)
                    .with_context(|| format!("read template {}", path.display()))?
            }
        };
        Ok(AppTemplate {
            name: name.to_string(),
            raw,
        })
    }
}

fn embedded(name: &str) -> Option<&'static str> {
    match name {
        "producer" => Some(PRODUCER_JSON),
        "consumer" => Some(CONSUMER_JSON),
        "queue" => Some(QUEUE_JSON),
        "remainder" => Some(REMAINDER_JSON),
        "microscaling" => Some(MICROSCALING_JSON),
        _ => None,
    }
}

/// Tokens still present in a rendered body.
#[cfg(test)]
pub fn unresolved_tokens(body: &str) -> Vec<&'static str> {
    TOKENS
        .iter()
        .copied()
        .filter(|token| body.contains(token))
        .collect()
}
