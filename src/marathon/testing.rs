//! In-memory Marathon used by unit tests.
//!
//! Records every request and answers from a small mutable app set. A
//! successful `POST` adds the body's `id`; a successful `DELETE` removes it.
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use anyhow::{anyhow, Result};
use std::cell::RefCell;

#[derive(Debug)]
struct State {
    app_ids: Vec<String>,
    listing_status: u16,
    listing_body: Option<String>,
    mutation_status: u16,
    leader: Option<String>,
    unreachable: bool,
}

#[derive(Debug)]
pub struct FakeTransport {
    state: RefCell<State>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    /// Marathon reporting `names` as deployed (ids get a leading `/`).
    pub fn with_apps(names: &[&str]) -> Self {
        Self {
            state: RefCell::new(State {
                app_ids: names.iter().map(|name| format!("/{name}")).collect(),
                listing_status: 200,
                listing_body: None,
                mutation_status: 201,
                leader: Some("leader.internal:8080".to_string()),
                unreachable: false,
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_listing_body(body: &str) -> Self {
        let transport = Self::with_apps(&[]);
        transport.state.borrow_mut().listing_body = Some(body.to_string());
        transport
    }

    /// Every request fails before a response is received.
    pub fn unreachable() -> Self {
        let transport = Self::with_apps(&[]);
        transport.state.borrow_mut().unreachable = true;
        transport
    }

    pub fn set_listing_status(&self, status: u16) {
        self.state.borrow_mut().listing_status = status;
    }

    pub fn set_mutation_status(&self, status: u16) {
        self.state.borrow_mut().mutation_status = status;
    }

    /// `None` makes `/v2/leader/` answer 404.
    pub fn set_leader(&self, leader: Option<&str>) {
        self.state.borrow_mut().leader = leader.map(str::to_string);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    pub fn posted_bodies(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == Method::Post)
            .filter_map(|request| request.body.clone())
            .collect()
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == Method::Delete)
            .map(|request| request.url.clone())
            .collect()
    }

    fn respond(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.borrow_mut();
        match request.method {
            Method::Get if request.url.ends_with("/v2/leader/") => match &state.leader {
                Some(leader) => ok(200, serde_json::json!({ "leader": leader }).to_string()),
                None => ok(404, String::new()),
            },
            Method::Get => {
                let body = state.listing_body.clone().unwrap_or_else(|| {
                    let apps: Vec<_> = state
                        .app_ids
                        .iter()
                        .map(|id| serde_json::json!({ "id": id, "instances": 1 }))
                        .collect();
                    serde_json::json!({ "apps": apps }).to_string()
                });
                ok(state.listing_status, body)
            }
            Method::Post => {
                let status = state.mutation_status;
                if (200..300).contains(&status) {
                    if let Some(id) = request
                        .body
                        .as_deref()
                        .and_then(|body| serde_json::from_str::<serde_json::Value>(body).ok())
                        .and_then(|value| value["id"].as_str().map(str::to_string))
                    {
                        state.app_ids.push(format!("/{}", id.trim_start_matches('/')));
                    }
                }
                ok(status, String::new())
            }
            Method::Delete => {
                let status = state.mutation_status;
                if (200..300).contains(&status) {
                    if let Some((_, name)) = request.url.rsplit_once("/v2/apps/") {
                        let id = format!("/{name}");
                        state.app_ids.retain(|existing| existing != &id);
                    }
                }
                ok(status, String::new())
            }
        }
    }
}

fn ok(status: u16, body: String) -> ApiResponse {
    ApiResponse { status, body }
}

impl Transport for FakeTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        if self.state.borrow().unreachable {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.respond(request))
    }
}
