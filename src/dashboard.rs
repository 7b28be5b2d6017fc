//! Dashboard document served at `.../ui`.
//!
//! A static page that talks to the JSON API through relative URLs, so it works
//! under whatever prefix the API is mounted.

pub const DASHBOARD_HTML: &str = include_str!("dashboard.html");
