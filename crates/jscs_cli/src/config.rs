//! Configuration file support.
//!
//! The config is the flat rule-option mapping of a `.jscsrc` file (JSON).
//! Discovery walks from the current directory upward; an explicit path wins.

use serde_json::{Map, Value};
use std::env::current_dir;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// The name of the config file to search for.
pub const CONFIG_NAME: &str = ".jscsrc";

/// Load a config mapping from an explicit path or by discovery.
/// Returns `None` with a printed warning when nothing usable is found.
pub fn load_config(explicit: Option<&Path>) -> Option<Map<String, Value>> {
    let path = match explicit {
        Some(path) => path.to_owned(),
        None => find_config()?,
    };
    let source = match read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            crate::lint_err!("failed to read config `{}`: {}", path.display(), err);
            return None;
        }
    };
    match serde_json::from_str::<Value>(&source) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            crate::lint_err!("config `{}` must be a JSON object", path.display());
            None
        }
        Err(err) => {
            crate::lint_err!("invalid JSON in `{}`: {}", path.display(), err);
            None
        }
    }
}

fn find_config() -> Option<PathBuf> {
    let mut dir = current_dir().ok()?;
    loop {
        let candidate = dir.join(CONFIG_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
