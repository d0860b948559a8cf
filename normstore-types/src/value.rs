//! Structural helpers over JSON objects and key lists.

use crate::Object;
use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

/// Reads `key` from `object`, falling back to `default` when the key is absent.
/// A present key is returned as-is, even when it holds `null` or `false`.
pub fn get<'a>(object: &'a Object, key: &str, default: &'a Value) -> &'a Value {
    object.get(key).unwrap_or(default)
}

/// Copies the listed keys that exist on `object`, in list order.
pub fn pick<S: AsRef<str>>(object: &Object, keys: &[S]) -> Object {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            object.get(key).map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

/// Copies every entry of a string-keyed map except the listed keys.
pub fn omit<'a, M, V, S>(map: &'a M, keys: &[S]) -> M
where
    &'a M: IntoIterator<Item = (&'a String, &'a V)>,
    M: FromIterator<(String, V)>,
    V: Clone + 'a,
    S: AsRef<str>,
{
    map.into_iter()
        .filter(|(key, _)| !keys.iter().any(|k| k.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Removes repeats, keeping the first occurrence of each item in order.
pub fn dedupe<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Returns `list` without any entry equal to `item`.
pub fn without(list: &[String], item: &str) -> Vec<String> {
    list.iter().filter(|entry| *entry != item).cloned().collect()
}

/// Whether a value counts as blank: `null`, `false`, `0`, an empty string,
/// an empty array or an empty object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Renders a scalar identifier as a string. Objects, arrays and blanks are
/// not identifiers.
pub fn as_identifier(value: &Value) -> Option<String> {
    if is_blank(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
