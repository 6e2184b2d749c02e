//! CLI integration tests for the attendance commands.

mod common;

use tempfile::TempDir;

use common::{add_record, json_lines, run_cli, run_cli_success};

fn add(data_dir: &std::path::Path, name: &str, id: &str, date: &str, status: &str) -> String {
    add_record(
        &[
            "attendance", "add", "--name", name, "--id", id, "--date", date, "--status", status,
        ],
        data_dir,
    )
}

#[test]
fn test_attendance_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    let id = add(data, "Ann", "s001", "2024-01-01", "Present");

    let stdout = run_cli_success(
        &["attendance", "list", "--status", "Present", "--json"],
        data,
    );
    let records = json_lines(&stdout);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["studentId"], "S001");
    assert_eq!(records[0]["id"].to_string(), id);

    run_cli_success(&["attendance", "edit", &id, "--status", "late"], data);
    let stdout = run_cli_success(&["attendance", "list", "--status", "Late", "--json"], data);
    assert_eq!(json_lines(&stdout).len(), 1);

    run_cli_success(&["attendance", "remove", &id], data);
    let stdout = run_cli_success(&["attendance", "list", "--json"], data);
    assert!(json_lines(&stdout).is_empty());

    assert!(data.join("attendanceRecords.json").exists());
}

#[test]
fn test_attendance_duplicate_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    add(data, "Ann", "s001", "2024-01-01", "Present");

    let output = run_cli(
        &[
            "attendance", "add", "--name", "Ann", "--id", "S001", "--date", "2024-01-01",
            "--status", "Absent",
        ],
        data,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("already exists for this student on this date"),
        "unexpected stderr: {}",
        stderr
    );

    let stdout = run_cli_success(&["attendance", "list", "--json"], data);
    assert_eq!(json_lines(&stdout).len(), 1);
}

#[test]
fn test_attendance_validation_lists_every_message() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(
        &[
            "attendance", "add", "--name", "A", "--id", "s1", "--date", "2024-01-01", "--status",
            "Present",
        ],
        temp_dir.path(),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Name must be at least 2 characters"));
    assert!(stderr.contains("ID must be at least 3 characters"));
}

#[test]
fn test_attendance_pagination_clamps() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    for i in 0..25 {
        add(data, "Student", &format!("s{:03}", i), "2024-01-01", "Present");
    }

    let first = json_lines(&run_cli_success(&["attendance", "list", "--json"], data));
    assert_eq!(first.len(), 10);
    // Newest first.
    assert_eq!(first[0]["studentId"], "S024");

    let last = json_lines(&run_cli_success(
        &["attendance", "list", "--json", "--page", "3"],
        data,
    ));
    assert_eq!(last.len(), 5);

    let beyond = json_lines(&run_cli_success(
        &["attendance", "list", "--json", "--page", "99"],
        data,
    ));
    assert_eq!(beyond, last);
}

#[test]
fn test_attendance_stats() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    add(data, "Ann", "s001", "2024-03-10", "Present");
    add(data, "Bob", "s002", "2024-03-10", "Late");
    add(data, "Cy", "s003", "2024-03-09", "Absent");

    let stdout = run_cli_success(
        &["attendance", "stats", "--date", "2024-03-10", "--json"],
        data,
    );
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["day_total"], 2);
    assert_eq!(stats["present"], 1);
    assert_eq!(stats["late"], 1);
}

#[test]
fn test_edit_unknown_record_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(
        &["attendance", "edit", "12345", "--status", "Late"],
        temp_dir.path(),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_corrupted_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();
    std::fs::write(data.join("attendanceRecords.json"), "{{{").unwrap();

    let stdout = run_cli_success(&["attendance", "list", "--json"], data);
    assert!(json_lines(&stdout).is_empty());

    add(data, "Ann", "s001", "2024-01-01", "Present");
    let stdout = run_cli_success(&["attendance", "export"], data);
    let exported: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(exported.len(), 1);
}

#[test]
fn test_attendance_add_defaults_to_local_date() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    let before = chrono::Local::now().date_naive().to_string();
    add_record(
        &["attendance", "add", "--name", "Ann", "--id", "S001", "--status", "Present"],
        data,
    );
    let after = chrono::Local::now().date_naive().to_string();

    let records = json_lines(&run_cli_success(&["attendance", "list", "--json"], data));
    assert_eq!(records.len(), 1);
    let date = records[0]["date"].as_str().unwrap();
    assert!(date == before || date == after, "unexpected date {date}");
}

#[test]
fn test_attendance_reads_records_without_update_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    std::fs::write(
        data.join("attendanceRecords.json"),
        r#"[{"id":1704067200000,"studentName":"Ann","studentId":"S001","date":"2024-01-01","status":"Present","remarks":"","createdAt":"2024-01-01T09:00:00.000Z"}]"#,
    )
    .unwrap();

    let records = json_lines(&run_cli_success(&["attendance", "list", "--json"], data));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["studentName"], "Ann");
    assert_eq!(records[0]["updatedAt"], records[0]["createdAt"]);
}
