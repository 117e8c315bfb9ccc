use serde::{Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::{fs, path::Path};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted at every depth, so records written
/// by different runs diff cleanly.
pub fn jsonify<T>(obj: &T) -> String
where
    T: Serialize,
{
    to_string(&jsonify_internal(
        &to_value(obj).expect("to_value failed on serializable object"),
    ))
    .expect("to_string failed on serializable object")
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}

/// Accepts either an inline JSON object or a path ending in `.json`.
pub fn load_json_object(json_or_path: &str) -> anyhow::Result<Map<String, Value>> {
    let content = if json_or_path.ends_with(".json") {
        fs::read_to_string(Path::new(json_or_path))
            .map_err(|e| anyhow::anyhow!("Failed to read json file {}: {}", json_or_path, e))?
    } else {
        json_or_path.to_string()
    };
    match dejsonify::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!("Expected a json object, got {}", other)),
    }
}
