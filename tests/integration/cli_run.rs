//! Integration tests for the CLI route table: run and list commands in text
//! and JSON formats.

use relayout::cli::{Commands, RunContext};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

use crate::integration::write_candidate;

fn context_for(root: &std::path::Path) -> RunContext {
    RunContext::new(Some(root.to_path_buf()), None).unwrap()
}

#[test]
fn test_run_command_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_candidate(
        root,
        "sy_album",
        &json!({"data": {"canvas": {"rects": [{}]}}}).to_string(),
    );

    let out = context_for(root)
        .execute(&Commands::Run {
            dry_run: false,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("1 updated"));
    assert!(out.contains("sy_album"));
}

#[test]
fn test_run_command_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_candidate(
        root,
        "sy_album",
        &json!({"data": {"canvas": {"rects": []}}}).to_string(),
    );

    let out = context_for(root)
        .execute(&Commands::Run {
            dry_run: false,
            format: "json".to_string(),
        })
        .unwrap();
    let summary: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["updated"], 1);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_run_dry_run_does_not_write() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let before = json!({"data": {"canvas": {"rects": [{}]}}}).to_string();
    let file = write_candidate(root, "sy_album", &before);

    let out = context_for(root)
        .execute(&Commands::Run {
            dry_run: true,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("dry run"));
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_list_command_text_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_candidate(root, "sy_one", "{}");
    write_candidate(root, "sy_two", "{}");

    let ctx = context_for(root);
    let text = ctx
        .execute(&Commands::List {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("sy_one"));
    assert!(text.contains("sy_two"));

    let json_out = ctx
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: Value = serde_json::from_str(&json_out).unwrap();
    assert_eq!(parsed["candidates"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_command_empty_root() {
    let temp_dir = TempDir::new().unwrap();
    let out = context_for(temp_dir.path())
        .execute(&Commands::List {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("No candidate documents"));
}
