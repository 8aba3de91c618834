use pretty_assertions::assert_eq;
use scope_engine::{
    EngineConfig, EngineError, Intent, PatternKind, ScopeEngine, TaskError, WorkspaceError,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

fn engine_for(root: &Path) -> ScopeEngine {
    ScopeEngine::new(EngineConfig {
        workspace_root: Some(root.to_path_buf()),
        ..Default::default()
    })
    .unwrap()
}

const LOGIN_TS: &str = r#"export function authenticateUser(user: string, password: string): boolean {
  return user.length > 0 && password.length > 0;
}
"#;

#[tokio::test]
async fn fix_authentication_bug_keeps_login_in_results() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/auth/login.ts", LOGIN_TS);
    write(root, "src/app.ts", "export const start = () => 0;\n");

    let engine = engine_for(root);
    let task = engine.parse_task_description("Fix authentication bug").unwrap();
    assert_eq!(task.intent, Intent::Bugfix);
    assert!(task.scope.iter().any(|k| k == "authentication"));

    // "authenticateUser" does not contain "authentication", so nothing
    // scores and every file is returned
    let files = engine.find_relevant_files(&task, None).await.unwrap();
    let paths: Vec<String> = files.iter().map(|f| relative(root, &f.path)).collect();
    assert!(paths.contains(&"src/auth/login.ts".to_string()));

    let login = files
        .iter()
        .find(|f| f.path.ends_with("src/auth/login.ts"))
        .unwrap();
    assert_eq!(login.exports, vec!["authenticateUser"]);
    assert!(login.imports.is_empty());
}

#[tokio::test]
async fn authentication_directory_ranks_login_first() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/app.ts", "export const start = () => 0;\n");
    write(root, "src/authentication/login.ts", LOGIN_TS);

    let engine = engine_for(root);
    let task = engine.parse_task_description("Fix authentication bug").unwrap();
    let scored = engine.find_relevant_scored(&task, None).await.unwrap();

    assert_eq!(scored.len(), 1);
    assert_eq!(relative(root, &scored[0].file.path), "src/authentication/login.ts");
    assert!(scored[0].score > 0);
}

#[tokio::test]
async fn base_name_match_outranks_import_match() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "src/app.ts",
        "import { navigate } from './router';\nexport const app = () => navigate();\n",
    );
    write(root, "src/router.ts", "export function navigate() {}\n");
    write(root, "src/unrelated.ts", "export const x = 1;\n");

    let engine = engine_for(root);
    let task = engine.parse_task_description("Improve router").unwrap();
    assert_eq!(task.intent, Intent::Refactor);
    assert_eq!(task.scope, vec!["router"]);

    let scored = engine.find_relevant_scored(&task, None).await.unwrap();
    let ranked: Vec<(String, u32)> = scored
        .iter()
        .map(|s| (relative(root, &s.file.path), s.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("src/router.ts".to_string(), 15),
            ("src/app.ts".to_string(), 3)
        ]
    );
}

#[tokio::test]
async fn scope_less_task_returns_every_file_in_discovery_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "b.ts", "export const b = 1;\n");
    write(root, "a.ts", "export const a = 1;\n");
    write(root, "docs/notes.md", "# notes\n");

    let engine = engine_for(root);
    let task = engine.parse_task_description("Fix this").unwrap();
    assert!(task.scope.is_empty());

    let analysis = engine.analyze_workspace(None).await.unwrap();
    let files = engine.find_relevant_files(&task, None).await.unwrap();
    assert_eq!(files, analysis.files);
}

#[tokio::test]
async fn invalid_task_descriptions_are_rejected() {
    let temp = TempDir::new().unwrap();
    let engine = engine_for(temp.path());

    let err = engine.parse_task_description("   ").unwrap_err();
    assert!(matches!(err, EngineError::Task(TaskError::Empty)));
    assert!(err.is_invalid_task());

    let err = engine.parse_task_description("?!").unwrap_err();
    assert!(matches!(err, EngineError::Task(TaskError::NoAlphanumeric)));
}

#[tokio::test]
async fn clear_cache_picks_up_new_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/cart.ts", "export class Cart {}\n");

    let engine = engine_for(root);
    let before = engine.analyze_workspace(None).await.unwrap();
    write(root, "src/checkout.ts", "export function checkout() {}\n");

    let task = engine.parse_task_description("Fix checkout").unwrap();
    let stale = engine.find_relevant_files(&task, None).await.unwrap();
    assert!(stale.iter().all(|f| !f.path.ends_with("src/checkout.ts")));

    engine.clear_cache().await;
    let fresh = engine.find_relevant_files(&task, None).await.unwrap();
    assert!(fresh[0].path.ends_with("src/checkout.ts"));

    let after = engine.analyze_workspace(None).await.unwrap();
    assert_eq!(before.files.len(), 1);
    assert_eq!(after.files.len(), 2);
    assert!(after
        .patterns
        .iter()
        .any(|p| p.kind == PatternKind::Function && p.name == "checkout"));
    assert_eq!(engine.last_stats().await.unwrap().files, 2);
}

#[tokio::test]
async fn engine_without_root_reports_no_workspace() {
    let engine = ScopeEngine::new(EngineConfig::default()).unwrap();
    let err = engine.analyze_workspace(None).await.unwrap_err();
    assert!(matches!(err, EngineError::Workspace(WorkspaceError::NoWorkspace)));
}

#[tokio::test]
async fn directed_file_analysis_surfaces_errors() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/auth/login.ts", LOGIN_TS);
    let engine = engine_for(root);

    let structure = engine
        .analyze_file(Path::new("src/auth/login.ts"))
        .await
        .unwrap();
    assert_eq!(structure.functions[0].name, "authenticateUser");
    assert_eq!(structure.functions[0].params, vec!["user", "password"]);
    assert_eq!(structure.functions[0].return_type.as_deref(), Some("boolean"));

    let err = engine
        .analyze_file(Path::new("src/auth/logout.ts"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Workspace(WorkspaceError::FileNotFound { .. })
    ));
    assert!(err.to_string().contains("logout.ts"));
}
