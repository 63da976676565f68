//! Small utilities shared by the crates in this workspace: logging setup, counting, values that
//! carry warnings, and JSON file IO.

mod collections;
mod io;
pub mod logger;
mod logs;
mod utils;

pub use crate::collections::Counter;
pub use crate::io::{read_json, slurp_file, to_json};
pub use crate::logs::Warn;
pub use crate::utils::{plain_list_names, prettyprint_usize};
