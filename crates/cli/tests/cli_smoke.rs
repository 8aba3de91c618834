use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn scope() -> Command {
    let mut cmd = Command::cargo_bin("scope").expect("binary");
    cmd.env_remove("SCOPE_WORKSPACE_ROOT")
        .env_remove("SCOPE_MAX_CONCURRENCY")
        .env_remove("SCOPE_STRICT_SYNTAX");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write(
        root,
        "src/router.ts",
        "export function navigate(to: string): void {}\n",
    );
    write(
        root,
        "src/app.ts",
        "import { navigate } from './router';\nexport class App {\n  start() { navigate('/'); }\n}\n",
    );
    write(root, "node_modules/pkg/router.js", "export const hidden = 1;\n");
    temp
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn parse_prints_intent_and_scope() {
    let body = run_json(scope().args(["parse", "Add unit tests for the tokenizer"]));
    assert_eq!(body["intent"], "test");
    assert_eq!(
        body["scope"],
        serde_json::json!(["unit", "tests", "tokenizer"])
    );
    assert_eq!(body["title"], "Add unit tests for the tokenizer");
}

#[test]
fn parse_rejects_blank_descriptions() {
    scope()
        .args(["parse", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description is empty"));
}

#[test]
fn analyze_skips_dependency_dirs() {
    let repo = setup_repo();
    let body = run_json(
        scope()
            .arg("analyze")
            .arg(repo.path())
            .arg("--stats"),
    );

    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files
        .iter()
        .all(|f| !f["path"].as_str().unwrap().contains("node_modules")));
    assert_eq!(body["stats"]["files"], 2);

    let patterns = body["patterns"].as_array().unwrap();
    assert!(patterns
        .iter()
        .any(|p| p["type"] == "class" && p["name"] == "App" && p["location"] == "src/app.ts"));
}

#[test]
fn rank_orders_by_score_and_honours_limit() {
    let repo = setup_repo();
    let body = run_json(
        scope()
            .args(["rank", "Improve the router"])
            .arg("--root")
            .arg(repo.path())
            .args(["--limit", "1"]),
    );

    assert_eq!(body["task"]["intent"], "refactor");
    assert_eq!(body["totalFiles"], 2);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["path"].as_str().unwrap().ends_with("router.ts"));
    assert_eq!(files[0]["score"], 15);
}

#[test]
fn structure_reports_functions_and_missing_files() {
    let repo = setup_repo();
    let body = run_json(
        scope()
            .args(["structure", "src/router.ts", "--root"])
            .arg(repo.path()),
    );
    assert_eq!(body["functions"][0]["name"], "navigate");
    assert_eq!(body["functions"][0]["returnType"], "void");

    scope()
        .args(["structure", "src/missing.ts", "--root"])
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn relative_roots_with_parent_segments_resolve() {
    let repo = setup_repo();
    let body = run_json(
        scope()
            .current_dir(repo.path().join("src"))
            .args(["analyze", "../src/.."]),
    );
    assert_eq!(
        body["rootPath"].as_str().unwrap(),
        repo.path().to_str().unwrap()
    );
    assert!(body["files"]
        .as_array()
        .unwrap()
        .iter()
        .all(|f| !f["path"].as_str().unwrap().contains("..")));

    let body = run_json(
        scope()
            .current_dir(repo.path().join("src"))
            .args(["structure", "src/router.ts", "--root", ".."]),
    );
    assert_eq!(body["functions"][0]["name"], "navigate");
}
