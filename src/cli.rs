//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the library.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_chain_json, format_chain_text, format_tree_json, format_tree_text};
pub use route::RunContext;
