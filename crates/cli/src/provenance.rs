use serde::Serialize;
use serde_json::{json, Value};
use std::panic::Location;
use std::process::Command;

/// Metadata for a run summary printed by `report`.
pub struct Payload {
    pub params: Value,
    pub results: Value,
}

impl Payload {
    pub fn new(params: impl Serialize, results: Value) -> serde_json::Result<Self> {
        Ok(Self {
            params: serde_json::to_value(params)?,
            results,
        })
    }
}

/// JSON block with the code revision, callsite, parameters and results.
#[track_caller]
pub fn document(payload: Payload) -> Value {
    let callsite = Location::caller();
    json!({
        "code_rev": current_git_rev(),
        "version": miller::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "results": payload.results
    })
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
