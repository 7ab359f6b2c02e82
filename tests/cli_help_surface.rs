mod common;

use std::process::Command;

use anyhow::{Context, Result};
use serde_json::json;

fn run_explorer(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_catalog-explorer"))
        .args(args)
        .env_remove("EGERIA_PLATFORM_URL")
        .env_remove("EGERIA_VIEW_SERVER")
        .env_remove("EGERIA_TOKEN")
        .output()
        .with_context(|| format!("run catalog-explorer {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "catalog-explorer {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_explorer(&["--help"])?;
    assert!(help.contains("Usage: catalog-explorer"));
    assert!(help.contains("[COMMAND]"));
    assert!(help.contains("explore"));
    assert!(help.contains("list"));
    assert!(help.contains("members"));
    assert!(help.contains("normalize"));
    assert!(help.contains("--fixture"));
    Ok(())
}

#[test]
fn normalize_prints_a_table_for_a_saved_payload() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_json(dir.path(), "payload.json", &common::root_payload())?;
    let path = path.to_string_lossy().to_string();

    let out = run_explorer(&["normalize", &path])?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Display Name"));
    assert!(lines[1].contains("Catalog A"));
    assert!(lines[2].contains("Catalog B"));

    let raw = dir.path().join("scalar.json");
    std::fs::write(&raw, "42")?;
    let raw = raw.to_string_lossy().to_string();
    let out = run_explorer(&["normalize", &raw])?;
    assert!(out.contains("Error"));
    assert!(out.contains("unknown shape"));
    Ok(())
}

#[test]
fn list_and_members_read_from_a_fixture() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = common::write_json(
        dir.path(),
        "fixture.json",
        &json!({
            "Digital-Product-Catalog-MyE": {"*": common::root_payload()}
        }),
    )?;
    let fixture = fixture.to_string_lossy().to_string();

    let listed = run_explorer(&["list", "--json", "--fixture", &fixture])?;
    let records: serde_json::Value = serde_json::from_str(&listed)?;
    assert_eq!(records.as_array().map(Vec::len), Some(2));
    assert_eq!(records[0]["Qualified Name"], json!("qa"));

    let members = run_explorer(&["members", "qa", "--fixture", &fixture])?;
    assert_eq!(members.lines().collect::<Vec<_>>(), vec!["m1", "m2"]);

    let leaf = run_explorer(&["members", "qb", "--fixture", &fixture])?;
    assert_eq!(leaf.trim(), "qb has no members");
    Ok(())
}
