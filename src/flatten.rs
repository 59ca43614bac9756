use serde_json::{Map, Value};

/// Separator placed between the keys of a nested path.
pub const DELIMITER: &str = ".";

/// Flatten a nested JSON value into a single-level map keyed by the
/// `.`-joined path of keys leading to each leaf.
///
/// See [`flatten_with_delimiter`].
pub fn flatten(value: &Value) -> Map<String, Value> {
    flatten_with_delimiter(value, DELIMITER)
}

/// Flatten a nested JSON value using a custom path delimiter.
///
/// **Behavior**
/// - Objects are walked in insertion order; every non-object value is a
///   leaf stored under its joined path.
/// - When two paths join to the same key, the one visited later wins.
/// - An empty nested object contributes no entry at all.
/// - A non-object top-level value yields a single entry under the empty
///   key `""`.
///
/// Each call starts from a fresh accumulator.
pub fn flatten_with_delimiter(value: &Value, delimiter: &str) -> Map<String, Value> {
    let mut out = Map::new();
    let mut path = String::new();
    flatten_into(value, &mut path, delimiter, &mut out);
    out
}

fn flatten_into(value: &Value, path: &mut String, delimiter: &str, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let restore = path.len();
                path.push_str(key);
                path.push_str(delimiter);
                flatten_into(child, path, delimiter, out);
                path.truncate(restore);
            }
        }
        leaf => {
            // `path` always ends with one trailing delimiter, unless empty.
            let key = path.strip_suffix(delimiter).unwrap_or(path.as_str());
            out.insert(key.to_string(), leaf.clone());
        }
    }
}
