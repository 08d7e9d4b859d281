//! Tests for Singer output

use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;

fn lines(bytes: &[u8]) -> Vec<Value> {
    std::str::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_schema_message_shape() {
    let msg = SingerMessage::schema(
        "invoices",
        json!({"type": "object"}),
        vec!["invoice_id".to_string()],
        vec!["last_modified_time".to_string()],
    );
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "SCHEMA",
            "stream": "invoices",
            "schema": {"type": "object"},
            "key_properties": ["invoice_id"],
            "bookmark_properties": ["last_modified_time"]
        })
    );
}

#[test]
fn test_schema_without_bookmarks_omits_field() {
    let msg = SingerMessage::schema("organization_id", json!({}), vec![], vec![]);
    let value = serde_json::to_value(&msg).unwrap();
    assert!(value.get("bookmark_properties").is_none());
    assert_eq!(value["key_properties"], json!([]));
}

#[test]
fn test_record_message_shape() {
    let msg = SingerMessage::record("items", json!({"item_id": "1"}));
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value["type"], "RECORD");
    assert_eq!(value["stream"], "items");
    assert_eq!(value["record"], json!({"item_id": "1"}));
    let extracted = value["time_extracted"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(extracted).is_ok());
}

#[test]
fn test_writer_emits_json_lines() {
    let mut writer = MessageWriter::new(Vec::new());
    writer
        .write(&SingerMessage::schema("items", json!({}), vec![], vec![]))
        .unwrap();
    writer
        .write(&SingerMessage::record("items", json!({"a": 1})))
        .unwrap();
    writer
        .write(&SingerMessage::state(json!({"bookmarks": {}})))
        .unwrap();

    assert_eq!(writer.records_written(), 1);
    let out = lines(&writer.into_inner());
    assert_eq!(out.len(), 3);
    assert_eq!(out[0]["type"], "SCHEMA");
    assert_eq!(out[1]["type"], "RECORD");
    assert_eq!(out[2], json!({"type": "STATE", "value": {"bookmarks": {}}}));
}

/// Sink that records how often it was flushed
#[derive(Default)]
struct CountingSink {
    data: Vec<u8>,
    flushes: usize,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[test]
fn test_state_is_flushed() {
    let mut writer = MessageWriter::new(CountingSink::default());
    writer
        .write(&SingerMessage::record("items", json!({})))
        .unwrap();
    assert_eq!(writer.into_inner().flushes, 0);

    let mut writer = MessageWriter::new(CountingSink::default());
    writer.write(&SingerMessage::state(json!({}))).unwrap();
    assert_eq!(writer.into_inner().flushes, 1);
}

#[test]
fn test_message_round_trip_from_line() {
    let msg: SingerMessage =
        serde_json::from_str(r#"{"type": "STATE", "value": {"bookmarks": {"a": {}}}}"#).unwrap();
    assert!(msg.is_state());
    assert_eq!(msg.stream(), None);
}
