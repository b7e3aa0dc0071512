//! Debugger state at a single pause point.
//!
//! The backend forwards what the native debugger reports, so the payload is
//! loosely typed: line numbers arrive as strings, values as whatever JSON
//! the backend produced, and the heap as an object whose key order carries
//! no meaning. The deserializers here normalize all of that into ordered,
//! string-valued rows.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::types::SessionId;

/// Wire names of the fields that make up a snapshot, aliases included
pub const SNAPSHOT_FIELDS: &[&str] =
    &["line", "currentLine", "stack", "stackFrames", "heap", "heapEntries"];

/// The debugger's observable state at one pause point
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    /// 1-indexed line in the session's source, if the backend reported one
    #[serde(default, alias = "currentLine", deserialize_with = "de_line")]
    pub line: Option<u32>,
    /// Source file the debugger stopped in
    #[serde(default)]
    pub file: Option<String>,
    /// Function the debugger stopped in
    #[serde(default, alias = "frameName")]
    pub frame_name: Option<String>,
    /// Local variables, in server order
    #[serde(default, alias = "stackFrames", deserialize_with = "de_stack")]
    pub stack: Vec<StackVariable>,
    /// Heap cells reachable from the locals
    #[serde(default, alias = "heapEntries", deserialize_with = "de_heap")]
    pub heap: Vec<HeapEntry>,
}

/// A local variable in the current frame
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StackVariable {
    /// Variable name
    pub name: String,
    /// Rendered value
    #[serde(default, deserialize_with = "de_display")]
    pub value: String,
}

/// A heap cell keyed by its address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry {
    /// Address as reported by the backend (e.g. `0x7ffc2a1c`)
    pub address: String,
    /// Rendered contents
    pub value: String,
}

impl HeapEntry {
    /// Create a heap entry
    pub fn new(address: impl Into<String>, value: impl Into<String>) -> Self {
        Self { address: address.into(), value: value.into() }
    }
}

/// Successful reply to a start request: the new session plus its first snapshot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Started {
    /// Identifier of the newly opened session
    #[serde(alias = "sessionId")]
    pub session_id: SessionId,
    /// Full program text, one entry per line
    #[serde(default, alias = "sourceLines", alias = "source_lines")]
    pub source_code: Vec<String>,
    /// Where the program is paused right after start
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Render any JSON value the way it should appear in a pane
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn de_line<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let line = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(line)
}

fn de_display<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.as_ref().map(display_value).unwrap_or_default())
}

fn de_stack<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<StackVariable>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Vec::<StackVariable>::deserialize(value).map_err(de::Error::custom),
    }
}

fn de_heap<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<HeapEntry>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        // Object key order means nothing; sort so every render is reproducible
        Some(Value::Object(map)) => {
            let mut entries: Vec<_> = map
                .iter()
                .map(|(address, value)| HeapEntry::new(address, display_value(value)))
                .collect();
            entries.sort_by(|a, b| a.address.cmp(&b.address));
            Ok(entries)
        }
        // An explicit sequence is already ordered by the backend
        Some(Value::Array(items)) => {
            items.iter().map(heap_entry_from_item::<D::Error>).collect()
        }
        Some(other) => {
            Err(de::Error::custom(format!("heap must be an object or an array, got {other}")))
        }
    }
}

fn heap_entry_from_item<E: de::Error>(item: &Value) -> Result<HeapEntry, E> {
    match item {
        Value::Array(pair) if pair.len() == 2 => {
            Ok(HeapEntry::new(display_value(&pair[0]), display_value(&pair[1])))
        }
        Value::Object(fields) => {
            let address = fields
                .get("address")
                .or_else(|| fields.get("addr"))
                .ok_or_else(|| E::custom("heap entry is missing its address"))?;
            let value = fields.get("value").or_else(|| fields.get("contents"));
            Ok(HeapEntry::new(display_value(address), value.map(display_value).unwrap_or_default()))
        }
        other => Err(E::custom(format!("unsupported heap entry: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_accepts_numbers_and_numeric_strings() {
        let from_string: Snapshot = serde_json::from_value(json!({ "line": "6" })).unwrap();
        assert_eq!(from_string.line, Some(6));

        let from_number: Snapshot = serde_json::from_value(json!({ "currentLine": 2 })).unwrap();
        assert_eq!(from_number.line, Some(2));

        let garbage: Snapshot = serde_json::from_value(json!({ "line": "??" })).unwrap();
        assert_eq!(garbage.line, None);

        let missing: Snapshot = serde_json::from_value(json!({ "stack": [] })).unwrap();
        assert_eq!(missing.line, None);
    }

    #[test]
    fn test_stack_keeps_server_order() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "line": "7",
            "stack": [
                { "name": "num", "value": "305419896" },
                { "name": "c", "value": "0x7ffd5c1c \"xV4\\022\"" },
                { "name": "lilendian", "value": 1 },
                { "name": "b" }
            ]
        }))
        .unwrap();

        let names: Vec<_> = snapshot.stack.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["num", "c", "lilendian", "b"]);
        assert_eq!(snapshot.stack[2].value, "1");
        assert_eq!(snapshot.stack[3].value, "");
    }

    #[test]
    fn test_object_heap_is_sorted_by_address() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "line": 3,
            "heap": { "0x7ffd0020": "78563412", "0x5555a000": "00000000" }
        }))
        .unwrap();

        assert_eq!(
            snapshot.heap,
            vec![HeapEntry::new("0x5555a000", "00000000"), HeapEntry::new("0x7ffd0020", "78563412")]
        );
    }

    #[test]
    fn test_array_heap_keeps_server_order() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "heapEntries": [
                { "address": "0x9", "value": "b" },
                ["0x1", "a"]
            ]
        }))
        .unwrap();

        assert_eq!(snapshot.heap, vec![HeapEntry::new("0x9", "b"), HeapEntry::new("0x1", "a")]);
    }

    #[test]
    fn test_heap_rejects_scalars() {
        let result = serde_json::from_value::<Snapshot>(json!({ "heap": 42 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_started_reads_backend_and_alias_names() {
        let backend: Started = serde_json::from_value(json!({
            "session_id": "abc",
            "source_code": ["int main(){", "  return 0;", "}"],
            "line": "2",
            "file": "byteshow.c",
            "frame_name": "main",
            "stack": [],
            "heap": {}
        }))
        .unwrap();
        assert_eq!(backend.session_id, SessionId::new("abc"));
        assert_eq!(backend.source_code.len(), 3);
        assert_eq!(backend.snapshot.line, Some(2));
        assert_eq!(backend.snapshot.frame_name.as_deref(), Some("main"));

        let aliased: Started = serde_json::from_value(json!({
            "sessionId": "abc",
            "sourceLines": ["int main(){", "  return 0;", "}"],
            "currentLine": 2,
            "stackFrames": [],
            "heapEntries": {}
        }))
        .unwrap();
        assert_eq!(aliased.session_id, backend.session_id);
        assert_eq!(aliased.source_code, backend.source_code);
        assert_eq!(aliased.snapshot.line, Some(2));
    }
}
