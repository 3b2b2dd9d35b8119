//! Shared test utilities for the lintscope workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime, and because `lintscope-git` and `lintscope-cli` both need real
//! throwaway repositories for their integration tests.

mod fixture;

pub use fixture::GitFixture;

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like a report envelope (has `schema`,
///    `tool`, `run`, `base` and `plan`).
///
/// 2. **Recursive**: timestamp keys (`started_at`, `ended_at`) and
///    `duration_ms` are normalized at any depth because their placeholder
///    values are fixed and cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "base", "plan"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

/// Replace every occurrence of `root` inside string values with `<ROOT>`.
///
/// Temporary repositories live at random paths; reports embed them.
pub fn normalize_root(mut value: Value, root: &str) -> Value {
    replace_root_recursive(&mut value, root);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

fn replace_root_recursive(value: &mut Value, root: &str) {
    match value {
        Value::String(s) if !root.is_empty() && s.contains(root) => {
            *s = s.replace(root, "<ROOT>");
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                replace_root_recursive(val, root);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                replace_root_recursive(val, root);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_only_touches_envelope_tool_version() {
        let input = json!({
            "schema": "lintscope.report.v1",
            "tool": { "name": "lintscope", "version": "0.1.0" },
            "run": { "started_at": "2025-01-01T00:00:00Z", "ended_at": "2025-01-01T00:00:01Z", "duration_ms": 1000 },
            "base": { "reference": "refs/heads/develop" },
            "plan": { "kind": "nothing", "files": [] }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "lintscope");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["ended_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["duration_ms"], 0);
        assert_eq!(result["base"]["reference"], "refs/heads/develop");
    }

    #[test]
    fn root_without_envelope_keys_keeps_version() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "run": { "started_at": "2025-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
    }

    #[test]
    fn normalize_root_rewrites_nested_paths() {
        let input = json!({
            "scope_root": "/tmp/abc",
            "plan": { "files": ["/tmp/abc/src/a.js", "/elsewhere/b.js"] }
        });

        let result = normalize_root(input, "/tmp/abc");

        assert_eq!(result["scope_root"], "<ROOT>");
        assert_eq!(result["plan"]["files"][0], "<ROOT>/src/a.js");
        assert_eq!(result["plan"]["files"][1], "/elsewhere/b.js");
    }
}
