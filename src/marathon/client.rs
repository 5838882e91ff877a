//! Typed calls against the Marathon `/v2` endpoints.
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AppListing {
    #[serde(default)]
    apps: Vec<AppSummary>,
}

#[derive(Debug, Deserialize)]
struct AppSummary {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LeaderInfo {
    leader: String,
}

/// Outcome of a call whose response does not influence control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unchecked {
    Status(u16),
    Failed(String),
}

impl Unchecked {
    fn from_result(result: Result<ApiResponse>) -> Self {
        match result {
            Ok(response) => Unchecked::Status(response.status),
            Err(err) => Unchecked::Failed(format!("{err:#}")),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Unchecked::Status(status) if (200..300).contains(status))
    }
}

pub struct MarathonClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> MarathonClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Names of deployed apps, with one leading `/` stripped from each id.
    ///
    /// A non-success status yields an empty list; only a transport failure is
    /// an error.
    pub fn list_app_names(&self) -> Result<Vec<String>> {
        let request = ApiRequest {
            method: Method::Get,
            url: self.url("/v2/apps/"),
            body: None,
        };
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                "app listing failed; treating app set as empty"
            );
            return Ok(Vec::new());
        }
        let listing: AppListing =
            serde_json::from_str(&response.body).context("parse app listing")?;
        Ok(listing
            .apps
            .into_iter()
            .map(|app| app.id.strip_prefix('/').unwrap_or(&app.id).to_string())
            .collect())
    }

    pub fn create_app(&self, json_body: &str) -> Unchecked {
        let request = ApiRequest {
            method: Method::Post,
            url: self.url("/v2/apps/"),
            body: Some(json_body.to_string()),
        };
        Unchecked::from_result(self.transport.send(&request))
    }

    pub fn delete_app(&self, name: &str) -> Unchecked {
        let request = ApiRequest {
            method: Method::Delete,
            url: self.url(&format!("/v2/apps/{name}")),
            body: None,
        };
        Unchecked::from_result(self.transport.send(&request))
    }

    /// Address advertised by `/v2/leader/`, e.g. `10.0.0.5:8080`.
    pub fn leader(&self) -> Result<String> {
        let request = ApiRequest {
            method: Method::Get,
            url: self.url("/v2/leader/"),
            body: None,
        };
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            anyhow::bail!("leader lookup returned status {}", response.status);
        }
        let info: LeaderInfo =
            serde_json::from_str(&response.body).context("parse leader response")?;
        Ok(info.leader)
    }
}
