//! CLI domain: parse, route, and presentation only.
//! No migration logic; a single route table dispatches to the run and
//! discovery services.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands};
pub use presentation::{format_candidates_text, format_run_summary_text};
pub use route::RunContext;
