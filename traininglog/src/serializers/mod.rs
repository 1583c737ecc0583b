mod canonical;
mod text;

pub use canonical::{from_canonical, from_json_str, to_canonical, to_json_compact, to_json_string};
pub use text::{render, technique_call};
