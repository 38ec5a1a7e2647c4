use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn taba(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taba").expect("binary");
    cmd.env("TABA_DATA_DIR", data_dir.path());
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().expect("run taba");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json envelope")
}

#[test]
fn project_lifecycle() {
    let dir = TempDir::new().expect("tempdir");

    let created = json_output(taba(&dir).args(["project", "add", "Alpha", "--color", "#112233"]));
    assert_eq!(created["schema_version"], "taba.v1");
    assert_eq!(created["command"], "project add");
    assert_eq!(created["status"], "success");
    assert_eq!(created["data"]["name"], "Alpha");
    assert_eq!(created["data"]["color"], "#112233");
    let alpha_id = created["data"]["id"].as_str().expect("id").to_string();

    let beta = json_output(taba(&dir).args(["project", "add", "Beta"]));
    let beta_id = beta["data"]["id"].as_str().expect("id").to_string();

    // First project became current on creation.
    let listed = json_output(taba(&dir).args(["project", "list"]));
    let rows = listed["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], alpha_id.as_str());
    assert_eq!(rows[0]["current"], true);
    assert_eq!(rows[1]["current"], false);

    let selected = json_output(taba(&dir).args(["project", "use", "Beta"]));
    assert_eq!(selected["data"]["id"], beta_id.as_str());

    // Deleting the current project falls back to the first remaining one.
    taba(&dir).args(["project", "rm", &beta_id]).assert().success();
    let listed = json_output(taba(&dir).args(["project", "list"]));
    let rows = listed["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["current"], true);
}

#[test]
fn data_dir_flag_overrides_env() {
    let env_dir = TempDir::new().expect("tempdir");
    let flag_dir = TempDir::new().expect("tempdir");

    taba(&env_dir)
        .args(["--data-dir"])
        .arg(flag_dir.path())
        .args(["project", "add", "Flagged"])
        .assert()
        .success();

    assert!(flag_dir.path().join("board.json").exists());
    assert!(!env_dir.path().join("board.json").exists());
}

#[test]
fn unknown_project_is_a_user_error() {
    let dir = TempDir::new().expect("tempdir");

    taba(&dir)
        .args(["project", "use", "nope"])
        .assert()
        .code(2)
        .stderr(contains("Project not found"));
}

#[test]
fn task_lifecycle_logs_activity() {
    let dir = TempDir::new().expect("tempdir");
    taba(&dir).args(["project", "add", "Alpha"]).assert().success();

    let created = json_output(taba(&dir).args([
        "task",
        "add",
        "Ship release",
        "--priority",
        "high",
        "--due",
        "2026-09-01",
        "--tag",
        "release",
    ]));
    assert_eq!(created["data"]["title"], "Ship release");
    assert_eq!(created["data"]["status"], "Todo");
    assert_eq!(created["data"]["priority"], "High");
    let task_id = created["data"]["id"].as_str().expect("id").to_string();

    let moved = json_output(taba(&dir).args(["task", "move", &task_id, "doing"]));
    assert_eq!(moved["data"]["moved"], true);
    assert_eq!(moved["data"]["status"], "Doing");

    // Same-status move is a no-op with no activity entry.
    let again = json_output(taba(&dir).args(["task", "move", &task_id, "doing"]));
    assert_eq!(again["data"]["moved"], false);

    let edited = json_output(taba(&dir).args(["task", "edit", &task_id, "--title", "Ship v2"]));
    assert_eq!(edited["data"]["title"], "Ship v2");

    taba(&dir).args(["task", "rm", &task_id]).assert().success();

    let log = json_output(taba(&dir).args(["log", "show", "--limit", "10"]));
    let details: Vec<String> = log["data"]
        .as_array()
        .expect("entries")
        .iter()
        .map(|entry| entry["details"].as_str().expect("details").to_string())
        .collect();
    // Newest first; the edit entry records the pre-edit title.
    assert_eq!(
        details,
        vec![
            "Deleted task \"Ship v2\"".to_string(),
            "Updated task \"Ship release\"".to_string(),
            "Moved task \"Ship release\" to Doing".to_string(),
            "Created task \"Ship release\"".to_string(),
            "Created project \"Alpha\"".to_string(),
        ]
    );
}

#[test]
fn task_add_without_project_synthesizes_default() {
    let dir = TempDir::new().expect("tempdir");

    taba(&dir).args(["task", "add", "Orphan"]).assert().success();

    let listed = json_output(taba(&dir).args(["project", "list"]));
    let rows = listed["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "General");
    assert_eq!(rows[0]["color"], "#6366f1");
    assert_eq!(rows[0]["current"], true);
    assert_eq!(rows[0]["tasks"], 1);

    // Synthesizing the project is not logged; the task creation is.
    let log = json_output(taba(&dir).args(["log", "show"]));
    let entries = log["data"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["details"], "Created task \"Orphan\"");
}

#[test]
fn task_list_filters_and_sorts() {
    let dir = TempDir::new().expect("tempdir");
    taba(&dir).args(["project", "add", "Alpha"]).assert().success();
    taba(&dir)
        .args(["task", "add", "fix login page", "--priority", "high"])
        .assert()
        .success();
    taba(&dir)
        .args(["task", "add", "write docs", "--priority", "low"])
        .assert()
        .success();
    taba(&dir)
        .args(["task", "add", "fix logout", "--priority", "medium"])
        .assert()
        .success();

    let found = json_output(taba(&dir).args(["task", "list", "--search", "FIX"]));
    let titles: Vec<&str> = found["data"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["fix login page", "fix logout"]);

    let sorted = json_output(taba(&dir).args(["task", "list", "--sort", "priority"]));
    let titles: Vec<&str> = sorted["data"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["fix login page", "fix logout", "write docs"]);

    let high_only = json_output(taba(&dir).args(["task", "list", "--priority", "high"]));
    assert_eq!(high_only["data"].as_array().expect("rows").len(), 1);
}

#[test]
fn reset_clears_only_current_project() {
    let dir = TempDir::new().expect("tempdir");
    taba(&dir).args(["project", "add", "Alpha"]).assert().success();
    taba(&dir).args(["task", "add", "keep me not"]).assert().success();
    taba(&dir).args(["project", "add", "Beta"]).assert().success();

    // Alpha is still current; Beta's tasks must survive the reset.
    taba(&dir).args(["project", "use", "Beta"]).assert().success();
    taba(&dir).args(["task", "add", "survivor"]).assert().success();
    taba(&dir).args(["project", "use", "Alpha"]).assert().success();

    let reset = json_output(taba(&dir).args(["reset"]));
    assert_eq!(reset["data"]["reset"], true);
    assert_eq!(reset["data"]["removed"], 1);

    let remaining = json_output(taba(&dir).args(["task", "list", "--all-projects"]));
    let rows = remaining["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "survivor");

    let log = json_output(taba(&dir).args(["log", "show", "--limit", "1"]));
    assert_eq!(
        log["data"][0]["details"],
        "Reset tasks in the current project"
    );
}

#[test]
fn log_clear_empties_the_log() {
    let dir = TempDir::new().expect("tempdir");
    taba(&dir).args(["project", "add", "Alpha"]).assert().success();

    let cleared = json_output(taba(&dir).args(["log", "clear"]));
    assert_eq!(cleared["data"]["cleared"], 1);

    let log = json_output(taba(&dir).args(["log", "show"]));
    assert_eq!(log["data"].as_array().expect("entries").len(), 0);
}

#[test]
fn login_whoami_logout_roundtrip() {
    let dir = TempDir::new().expect("tempdir");

    taba(&dir)
        .args(["login", "intern@demo.com", "wrong"])
        .assert()
        .code(2)
        .stderr(contains("Invalid email or password"));

    let user = json_output(taba(&dir).args(["login", "intern@demo.com", "intern123"]));
    assert_eq!(user["data"]["name"], "Intern User");
    assert_eq!(user["data"]["email"], "intern@demo.com");

    let who = json_output(taba(&dir).args(["whoami"]));
    assert_eq!(who["data"]["id"], "1");

    taba(&dir).args(["logout"]).assert().success();
    taba(&dir)
        .args(["whoami"])
        .assert()
        .code(2)
        .stderr(contains("Not logged in"));
}

#[test]
fn legacy_snapshot_without_projects_is_migrated() {
    let dir = TempDir::new().expect("tempdir");

    // A pre-projects snapshot: tasks exist but no project owns them.
    let legacy = serde_json::json!({
        "schemaVersion": "taba.board.v1",
        "projects": [],
        "currentProjectId": null,
        "tasks": [{
            "id": "legacy-1",
            "title": "Old task",
            "status": "Todo",
            "priority": "Medium",
            "createdAt": "2024-01-01T00:00:00Z"
        }]
    });
    std::fs::write(
        dir.path().join("board.json"),
        serde_json::to_string_pretty(&legacy).expect("serialize"),
    )
    .expect("seed snapshot");

    let listed = json_output(taba(&dir).args(["project", "list"]));
    let rows = listed["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "General");
    assert_eq!(rows[0]["color"], "#FCD535");
    assert_eq!(rows[0]["current"], true);
    assert_eq!(rows[0]["tasks"], 1);

    let tasks = json_output(taba(&dir).args(["task", "list"]));
    assert_eq!(tasks["data"][0]["title"], "Old task");
}

#[test]
fn activity_log_keeps_newest_fifty() {
    let dir = TempDir::new().expect("tempdir");
    taba(&dir).args(["project", "add", "Alpha"]).assert().success();

    for idx in 0..55 {
        taba(&dir)
            .args(["task", "add", &format!("task {idx}")])
            .assert()
            .success();
    }

    let log = json_output(taba(&dir).args(["log", "show", "--limit", "100"]));
    let entries = log["data"].as_array().expect("entries");
    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0]["details"], "Created task \"task 54\"");
}

#[test]
fn events_flag_writes_jsonl() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    let events_arg = events.to_string_lossy().to_string();

    taba(&dir)
        .args(["--events", &events_arg, "project", "add", "Alpha"])
        .assert()
        .success();
    taba(&dir)
        .args(["--events", &events_arg, "task", "add", "Emit me"])
        .assert()
        .success();

    // The sink appends, so both invocations land in one file.
    let content = std::fs::read_to_string(&events).expect("events file");
    let kinds: Vec<String> = content
        .lines()
        .map(|line| {
            let event: Value = serde_json::from_str(line).expect("event json");
            assert_eq!(event["schema_version"], "taba.event.v1");
            event["event"].as_str().expect("kind").to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["project_created", "task_created"]);
}

#[test]
fn json_error_envelope_on_stdout() {
    let dir = TempDir::new().expect("tempdir");

    let output = taba(&dir)
        .args(["--json", "task", "rm", "ghost"])
        .output()
        .expect("run taba");
    assert_eq!(output.status.code(), Some(2));

    let envelope: Value = serde_json::from_slice(&output.stdout).expect("json error");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["command"], "task rm");
    assert_eq!(envelope["error"]["code"], 2);
    assert_eq!(envelope["error"]["kind"], "user_error");
    assert_eq!(envelope["next_steps"][0], "taba task list");
}
