//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to the operation API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_entries_text, format_entry_text, format_json};
pub use route::{run, RunContext};
