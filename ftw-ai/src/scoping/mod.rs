mod api;
mod generator;
mod parse;

pub use api::MessagesApiClient;
pub use generator::{select_tier, ScopeGenerator, ScopeTier, CHEAP_MODEL};
pub use parse::{parse_json_scope, parse_labeled_scope};
