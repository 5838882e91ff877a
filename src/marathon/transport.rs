//! Blocking HTTP transport for the Marathon REST API.
//!
//! Status codes are returned to the caller rather than turned into errors, so
//! the lifecycle logic decides which responses matter. An `Err` here means the
//! request never produced a response (connection refused, DNS, I/O).
use anyhow::{Context, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON body; only sent with `POST`.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// `ureq` agent with transport-default timeouts.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = request.url.as_str();
        let result = match request.method {
            Method::Get => self.agent.get(url).call(),
            Method::Delete => self
                .agent
                .delete(url)
                .header("Content-Type", "application/json")
                .call(),
            Method::Post => self
                .agent
                .post(url)
                .header("Content-Type", "application/json")
                .send(request.body.as_deref().unwrap_or_default()),
        };
        let mut response = result.with_context(|| format!("{} {}", request.method, url))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("read response body from {} {}", request.method, url))?;
        Ok(ApiResponse { status, body })
    }
}
