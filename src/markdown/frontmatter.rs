//! `---` fenced YAML front-matter.
//!
//! ```text
//! ---
//! title: Roadmapping 101
//! keywords: [roadmap, planning]
//! ---
//! # Body starts here
//! ```
//!
//! The opening fence must be the first line. A block that is never closed
//! is not front-matter: the whole input is treated as body.

use crate::log;
use serde_json::{Map, Value};

/// Split `raw` into `(yaml, body)`.
pub fn split(raw: &str) -> (Option<&str>, &str) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = raw.strip_prefix("---") else {
        return (None, raw);
    };
    let Some(rest) = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
    else {
        return (None, raw);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end();
        if fence == "---" || fence == "..." {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, raw)
}

/// Parse front-matter YAML into a data bag.
///
/// Invalid YAML or a non-mapping document is logged and yields an empty bag.
pub fn parse(yaml: &str) -> Map<String, Value> {
    if yaml.trim().is_empty() {
        return Map::new();
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Object(map)) => map,
        Ok(Value::Null) => Map::new(),
        Ok(_) => {
            log!("warn"; "front-matter is not a key/value mapping, ignored");
            Map::new()
        }
        Err(err) => {
            log!("warn"; "invalid front-matter, ignored: {err}");
            Map::new()
        }
    }
}
