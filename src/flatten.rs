use serde_json::{Map, Value};

/// Flatten a nested JSON document into a single-level mapping with
/// dot-joined keys.
///
/// Mapping keys and stringified sequence indices are joined with `.`, so
/// `{"a": [10, 20]}` becomes `{"a.0": 10, "a.1": 20}`. Empty mappings and
/// sequences contribute no leaf at all, so that information is lost. A key
/// containing a literal dot can collide with a composed path; the
/// later-visited leaf wins. Recursion depth is bounded only by the call
/// stack; input is assumed to be tree-shaped.
pub fn flatten_json(document: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(document, String::new(), &mut out);
    out
}

fn flatten_into(value: &Value, path: String, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, join(&path, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, join(&path, &index.to_string()), out);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}
