//! Integration tests for the migration run: end-to-end edits, idempotence,
//! and the non-destructive skip guarantees.

use relayout::config::MigrateConfig;
use relayout::run::{run_migration, ReportStatus};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

use crate::integration::write_candidate;

fn config_for(root: &std::path::Path) -> MigrateConfig {
    MigrateConfig {
        root_dir: root.to_path_buf(),
        ..MigrateConfig::default()
    }
}

#[test]
fn test_well_formed_tree_fully_migrated() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let file = write_candidate(
        root,
        "sy_album",
        &json!({
            "data": {
                "canvas": {
                    "rects": [
                        {
                            "textPieces": [{"text": "one"}, {"layoutMode": 3}],
                            "imagePieces": [{"src": "a.png"}],
                            "cells": [
                                {"textPiece": {}, "imagePiece": {"src": "b.png"}}
                            ]
                        },
                        {"layoutMode": 1}
                    ]
                }
            }
        })
        .to_string(),
    );

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.updated, 1);

    let doc: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["data"]["version"], "0.0.1");
    let rects = doc["data"]["canvas"]["rects"].as_array().unwrap();
    for rect in rects {
        assert_eq!(rect["layoutMode"], 1);
    }
    assert_eq!(rects[0]["textPieces"][0]["layoutMode"], 0);
    assert_eq!(rects[0]["textPieces"][1]["layoutMode"], 0);
    assert_eq!(rects[0]["imagePieces"][0]["layoutMode"], 0);
    assert_eq!(rects[0]["cells"][0]["textPiece"]["layoutMode"], 1);
    assert_eq!(rects[0]["cells"][0]["imagePiece"]["layoutMode"], 0);
}

#[test]
fn test_second_run_reports_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let file = write_candidate(
        root,
        "sy_album",
        &json!({"data": {"canvas": {"rects": [{"layoutMode": 0}]}}}).to_string(),
    );

    let first = run_migration(&config_for(root), false).unwrap();
    assert_eq!(first.updated, 1);
    let after_first = fs::read_to_string(&file).unwrap();

    let second = run_migration(&config_for(root), false).unwrap();
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
}

#[test]
fn test_missing_canvas_left_byte_for_byte_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    // Oddly formatted on purpose; a rewrite would normalize it.
    let before = "{\"data\":    {\"name\":\"no canvas\"}}";
    let file = write_candidate(root, "sy_album", before);

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_staged_version_bump_not_persisted_on_invalid_canvas() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    // `data` is a valid mapping (eligible for the version bump) but `canvas`
    // is empty, so the whole file must remain untouched.
    let before = r#"{"data": {"title": "x", "canvas": {}}}"#;
    let file = write_candidate(root, "sy_album", before);

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_malformed_rects_left_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let before = r#"{"data": {"canvas": {"rects": "wrong"}}}"#;
    let file = write_candidate(root, "sy_album", before);

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_invalid_json_skipped_without_write() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let before = "{ definitely not json";
    let file = write_candidate(root, "sy_album", before);

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.skipped, 1);
    assert!(matches!(summary.files[0].status, ReportStatus::Skipped(_)));
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_output_is_two_space_indented_with_literal_unicode() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let file = write_candidate(
        root,
        "sy_album",
        &json!({
            "data": {
                "canvas": {"rects": [{"textPieces": [{"text": "星夜相机"}]}]}
            }
        })
        .to_string(),
    );

    run_migration(&config_for(root), false).unwrap();
    let written = fs::read_to_string(&file).unwrap();
    assert!(written.contains("星夜相机"), "non-ASCII must stay literal");
    assert!(!written.contains("\\u"), "non-ASCII must not be escaped");
    assert!(
        written.contains("\n  \"data\""),
        "top-level keys should be indented by two spaces"
    );
}

#[test]
fn test_missing_rects_persists_version_bump_alone() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let file = write_candidate(
        root,
        "sy_album",
        r#"{"data": {"canvas": {"background": "white"}}}"#,
    );

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.updated, 1);
    let doc: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["data"]["version"], "0.0.1");
    assert_eq!(doc["data"]["canvas"], json!({"background": "white"}));
}

#[test]
fn test_one_bad_file_does_not_stop_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_candidate(root, "sy_a_broken", "not json");
    let good = write_candidate(
        root,
        "sy_b_good",
        &json!({"data": {"canvas": {"rects": [{}]}}}).to_string(),
    );

    let summary = run_migration(&config_for(root), false).unwrap();
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.updated, 1);
    let doc: Value = serde_json::from_str(&fs::read_to_string(&good).unwrap()).unwrap();
    assert_eq!(doc["data"]["canvas"]["rects"][0]["layoutMode"], 1);
}
