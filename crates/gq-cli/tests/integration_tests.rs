//! End-to-end tests for the `gq` binary against `tests/fixtures/sample_gallery`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled gq binary
fn gq_bin() -> String {
    env!("CARGO_BIN_EXE_gq").to_string()
}

/// Copy the sample project so each test gets its own store file.
fn sample_project() -> TempDir {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_gallery");
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture.join("gallery.yml"), dir.path().join("gallery.yml")).unwrap();

    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    for entry in std::fs::read_dir(fixture.join("data")).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), data.join(entry.file_name())).unwrap();
    }
    dir
}

/// Run `gq` in `project` and return (stdout, stderr, exit code).
fn run_gq(project: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let output: Output = Command::new(gq_bin())
        .arg("--project-dir")
        .arg(project)
        .args(args)
        .env_remove("GQ_TARGET")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute gq with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

fn query_json(project: &Path, names: &[&str]) -> serde_json::Value {
    let mut args = vec!["query", "--json"];
    args.extend_from_slice(names);
    let (stdout, stderr, code) = run_gq(project, &args);
    assert_eq!(code, Some(0), "query failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

// ── list ─────────────────────────────────────────────────────────────────

#[test]
fn test_list_shows_catalog() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_gq(dir.path(), &["list"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("NAME"));
    assert!(stdout.contains("top_subjects"));
    assert!(stdout.contains("dedup_product_size"));
    assert!(stdout.contains("delete_invalid_museum_hours"));
}

#[test]
fn test_list_json() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_gq(dir.path(), &["list", "--json"]);
    assert_eq!(code, Some(0));

    let entries: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    let subjects = entries
        .iter()
        .find(|e| e["name"] == "top_subjects")
        .expect("top_subjects listed");
    assert_eq!(subjects["kind"], "read");
    assert_eq!(subjects["columns"], serde_json::json!(["subject", "cnt_subject"]));

    let dedup = entries.iter().find(|e| e["name"] == "dedup_work").unwrap();
    assert_eq!(dedup["kind"], "dedup");
    assert_eq!(dedup["columns"], serde_json::json!(["table", "rows_removed"]));
}

// ── load ─────────────────────────────────────────────────────────────────

#[test]
fn test_load_all_configured_sources() {
    let project = sample_project();
    let (stdout, stderr, code) = run_gq(project.path(), &["load"]);
    assert_eq!(code, Some(0), "load failed: {stderr}");
    assert!(stdout.contains("✓ museum (4 rows)"), "{stdout}");
    assert!(stdout.contains("✓ museum_hours (13 rows)"), "{stdout}");
    assert!(stdout.contains("Loaded 8 sources"), "{stdout}");
    assert!(project.path().join("gallery.duckdb").exists());
}

#[test]
fn test_load_selected_sources() {
    let project = sample_project();
    let (stdout, _, code) = run_gq(project.path(), &["load", "--sources", "work, museum"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("✓ work (8 rows)"));
    assert!(stdout.contains("Loaded 2 sources (12 total rows)"));
}

#[test]
fn test_load_discovered_sources() {
    let project = sample_project();
    std::fs::write(
        project.path().join("data/curator.csv"),
        "curator_id,name\n1,Ada\n",
    )
    .unwrap();

    let (stdout, _, code) = run_gq(project.path(), &["load", "--all"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("✓ curator (1 rows)"));
    assert!(stdout.contains("Loaded 9 sources"));
}

#[test]
fn test_load_failure_exits_with_code_4() {
    let project = sample_project();
    let (stdout, _, code) = run_gq(project.path(), &["load", "--sources", "museum,sculpture"]);
    assert_eq!(code, Some(4));
    assert!(stdout.contains("✓ museum (4 rows)"));
    assert!(stdout.contains("✗ sculpture"));
    assert!(stdout.contains("[L001]"));
}

#[test]
fn test_load_rejects_invalid_source_name() {
    let project = sample_project();
    let (_, stderr, code) = run_gq(project.path(), &["load", "--sources", "bad-name"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Invalid source name 'bad-name'"));
}

#[test]
fn test_load_without_config_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_gq(dir.path(), &["load"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[E001]"));
}

#[test]
fn test_load_into_memory_target() {
    let project = sample_project();
    let (stdout, _, code) = run_gq(project.path(), &["load", "--target", "memory"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Loaded 8 sources"));
    assert!(!project.path().join("gallery.duckdb").exists());
}

#[test]
fn test_mysql_target_not_implemented() {
    let project = sample_project();
    let (_, stderr, code) = run_gq(project.path(), &["load", "--target", "warehouse"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[D005]"), "{stderr}");
}

#[test]
fn test_target_from_environment() {
    let project = sample_project();
    let output = Command::new(gq_bin())
        .arg("--project-dir")
        .arg(project.path())
        .arg("load")
        .env("GQ_TARGET", "memory")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!project.path().join("gallery.duckdb").exists());
}

#[test]
fn test_unknown_target_lists_available() {
    let project = sample_project();
    let (_, stderr, code) = run_gq(project.path(), &["load", "--target", "staging"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Available targets: memory, warehouse"), "{stderr}");
}

// ── query ────────────────────────────────────────────────────────────────

#[test]
fn test_query_after_load() {
    let project = sample_project();
    assert_eq!(run_gq(project.path(), &["load"]).2, Some(0));

    let results = query_json(project.path(), &["unexhibited_paintings", "museums_open_every_day"]);
    assert_eq!(results[0]["query"], "unexhibited_paintings");
    assert_eq!(
        results[0]["rows"],
        serde_json::json!([{"name": "The Starry Night"}])
    );
    assert_eq!(results[1]["rows"][0]["cnt_open_every_day"], 1);
}

#[test]
fn test_query_table_output() {
    let project = sample_project();
    run_gq(project.path(), &["load"]);

    let (stdout, _, code) = run_gq(project.path(), &["query", "top_subjects"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("== top_subjects =="));
    assert!(stdout.contains("subject"));
    assert!(stdout.contains("Portraits"));
    assert!(stdout.contains("(4 rows)"));
}

#[test]
fn test_query_all_reads() {
    let project = sample_project();
    run_gq(project.path(), &["load"]);

    let (stdout, stderr, code) = run_gq(project.path(), &["query", "--all", "--json"]);
    assert_eq!(code, Some(0), "{stderr}");
    let results: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert!(results.iter().all(|r| r["query"] != "dedup_work"));
    assert!(results.iter().any(|r| r["query"] == "longest_open_museum_day"));
}

#[test]
fn test_query_all_reports_every_failing_read() {
    let project = sample_project();
    let (list, _, _) = run_gq(project.path(), &["list", "--json"]);
    let entries: Vec<serde_json::Value> = serde_json::from_str(&list).unwrap();
    let reads = entries.iter().filter(|e| e["kind"] == "read").count();

    let (_, stderr, code) = run_gq(project.path(), &["query", "--all"]);
    assert_eq!(code, Some(4));
    let failed = stderr.lines().filter(|l| l.starts_with("✗ [Q002]")).count();
    assert_eq!(failed, reads, "{stderr}");
}

#[test]
fn test_dedup_and_delete_are_idempotent() {
    let project = sample_project();
    run_gq(project.path(), &["load"]);

    let first = query_json(project.path(), &["dedup_work", "delete_invalid_museum_hours"]);
    assert_eq!(
        first[0]["rows"],
        serde_json::json!([{"table": "work", "rows_removed": 1}])
    );
    assert_eq!(first[1]["rows"][0]["rows_removed"], 2);

    let second = query_json(project.path(), &["dedup_work", "delete_invalid_museum_hours"]);
    assert_eq!(second[0]["rows"][0]["rows_removed"], 0);
    assert_eq!(second[1]["rows"][0]["rows_removed"], 0);
}

#[test]
fn test_query_unknown_name() {
    let project = sample_project();
    let (_, stderr, code) = run_gq(project.path(), &["query", "no_such_query"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[Q001]"), "{stderr}");
}

#[test]
fn test_query_before_load_names_failing_query() {
    let project = sample_project();
    let (_, stderr, code) = run_gq(project.path(), &["query", "top_subjects"]);
    assert_eq!(code, Some(4));
    assert!(stderr.contains("[Q002] Query 'top_subjects' failed"), "{stderr}");
}

#[test]
fn test_config_flag_overrides_project_file() {
    let project = sample_project();
    let alt: PathBuf = project.path().join("alt.yml");
    std::fs::write(&alt, "name: alt\nsources: [museum]\n").unwrap();

    let (stdout, _, code) = run_gq(
        project.path(),
        &["load", "--config", alt.to_str().unwrap()],
    );
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Loaded 1 sources (4 total rows)"));
}
