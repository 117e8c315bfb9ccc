use ikp_utils::*;
use serde_json::json;

#[test]
fn test_jsonify_sorts_keys() {
    let value = json!({"total_profit": "1024", "runtime": 0.5, "nested": {"b": 1, "a": 2}});
    assert_eq!(
        jsonify(&value),
        r#"{"nested":{"a":2,"b":1},"runtime":0.5,"total_profit":"1024"}"#
    );
}

#[test]
fn test_load_json_object_inline() {
    let map = load_json_object(r#"{"modulo": 10, "exponents": [1, 0]}"#).unwrap();
    assert_eq!(map.get("modulo"), Some(&json!(10)));
    assert_eq!(map.get("exponents"), Some(&json!([1, 0])));
}

#[test]
fn test_load_json_object_rejects_non_objects() {
    assert!(load_json_object("[1, 2, 3]").is_err());
    assert!(load_json_object("not json").is_err());
}

#[test]
fn test_load_json_object_from_file() {
    let path = std::env::temp_dir().join(format!("ikp-utils-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"modulo": 3}"#).unwrap();
    let map = load_json_object(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(map.get("modulo"), Some(&json!(3)));
}
