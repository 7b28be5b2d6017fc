//! Request Router
//!
//! Maps a method and path to a [`Route`] and runs it, producing a transport
//! independent [`Reply`]. Paths are matched by substring so the surface can be
//! mounted under any prefix (`/db/api/list`, `/api/list`, ...).
//!
//! Every failure is caught here and turned into `{"error": message}`; nothing
//! is retried.

use crate::api::{KeyPayload, Operation, WatchApi};
use crate::dashboard;
use serde_json::{json, Value};
use tracing::error;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Resolved request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Api(Operation),
}

impl Route {
    /// Resolve a request. Returns `None` for unmatched method/path pairs.
    ///
    /// Checks run in a fixed order; the first match wins.
    pub fn resolve(method: &str, path: &str, body: &[u8]) -> Option<Route> {
        let payload = || KeyPayload::parse(body);
        let route = match method {
            "GET" if path.contains("/ui") => Route::Dashboard,
            "GET" if path.contains("/api/list") => Route::Api(Operation::List),
            "POST" if path.contains("/api/get") => Route::Api(Operation::Get(payload())),
            "POST" if path.contains("/api/watch") => Route::Api(Operation::Watch(payload())),
            "POST" if path.contains("/api/unwatch") => Route::Api(Operation::Unwatch(payload())),
            "POST" if path.contains("/api/update") => Route::Api(Operation::Update(payload())),
            "POST" if path.contains("/api/delete") => Route::Api(Operation::Delete(payload())),
            _ => return None,
        };
        Some(route)
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Json(Value),
    Html(&'static str),
}

/// Transport independent response
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: ReplyBody,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Reply {
            status,
            body: ReplyBody::Json(body),
        }
    }

    pub fn not_found() -> Self {
        Reply::json(404, json!({ "error": "Not Found" }))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Reply::json(500, json!({ "error": message.into() }))
    }

    pub fn content_type(&self) -> &'static str {
        match self.body {
            ReplyBody::Json(_) => JSON_CONTENT_TYPE,
            ReplyBody::Html(_) => HTML_CONTENT_TYPE,
        }
    }

    /// Serialized body bytes
    pub fn body_string(&self) -> String {
        match &self.body {
            ReplyBody::Json(value) => value.to_string(),
            ReplyBody::Html(html) => html.to_string(),
        }
    }
}

/// Resolve and run one request against the API.
pub fn handle(api: &WatchApi, method: &str, path: &str, body: &[u8]) -> Reply {
    match Route::resolve(method, path, body) {
        Some(Route::Dashboard) => Reply {
            status: 200,
            body: ReplyBody::Html(dashboard::DASHBOARD_HTML),
        },
        Some(Route::Api(operation)) => {
            let name = operation.name();
            match api.execute(operation) {
                Ok(outcome) => Reply::json(200, outcome.to_json()),
                Err(e) => {
                    error!(operation = name, error = %e, "Operation failed");
                    Reply::error(e.to_string())
                }
            }
        }
        None => Reply::not_found(),
    }
}
