//! End-to-end review runs against one axum server that plays both GitLab
//! and Ollama.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use ai_llm_service::LlmService;
use ai_llm_service::config::default_config::config_ollama;
use git_context_engine::context::AssembleOptions;
use git_context_engine::git_providers::{ChangeRequestId, ProviderConfig};
use mr_reviewer::{ReviewConfig, ReviewRun, ReviewerError, run_review};

const TOKEN: &str = "glpat-pipeline";

struct Mock {
    changes: Value,
    model_status: StatusCode,
    model_reply: String,
    prompts: Mutex<Vec<Value>>,
    model_calls: AtomicUsize,
}

impl Mock {
    fn new(changes: Value, model_reply: &str) -> Self {
        Self {
            changes,
            model_status: StatusCode::OK,
            model_reply: model_reply.into(),
            prompts: Mutex::new(Vec::new()),
            model_calls: AtomicUsize::new(0),
        }
    }
}

async fn changes(
    State(s): State<Arc<Mock>>,
    Path((_project, _iid)): Path<(String, u64)>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let ok = headers
        .get("PRIVATE-TOKEN")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == TOKEN);
    if !ok {
        return (
            StatusCode::UNAUTHORIZED,
            r#"{"message":"401 Unauthorized"}"#.into(),
        );
    }
    (StatusCode::OK, s.changes.to_string())
}

async fn raw_file(Path((_project, file)): Path<(String, String)>) -> (StatusCode, String) {
    match file.as_str() {
        "src/app.py" => (StatusCode::OK, "def handler():\n    return 1\n".into()),
        _ => (StatusCode::NOT_FOUND, "404 File Not Found".into()),
    }
}

async fn generate(State(s): State<Arc<Mock>>, Json(body): Json<Value>) -> (StatusCode, String) {
    s.model_calls.fetch_add(1, Ordering::SeqCst);
    s.prompts.lock().unwrap().push(body);
    if s.model_status != StatusCode::OK {
        return (s.model_status, "model crashed".into());
    }
    (
        StatusCode::OK,
        json!({ "model": "m", "response": s.model_reply, "done": true }).to_string(),
    )
}

async fn spawn(state: Arc<Mock>) -> String {
    let app = Router::new()
        .route(
            "/api/v4/projects/{project}/merge_requests/{iid}/changes",
            get(changes),
        )
        .route(
            "/api/v4/projects/{project}/repository/files/{file}/raw",
            get(raw_file),
        )
        .route("/api/generate", post(generate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn change(path: &str, diff: &str) -> Value {
    json!({
        "old_path": path,
        "new_path": path,
        "new_file": false,
        "renamed_file": false,
        "deleted_file": false,
        "diff": diff,
    })
}

fn setup(base: &str, token: &str, report: std::path::PathBuf) -> (ReviewConfig, LlmService) {
    let cfg = ReviewConfig {
        provider: ProviderConfig {
            base_url: base.to_string(),
            token: token.into(),
        },
        id: ChangeRequestId {
            project: "team/service".into(),
            iid: 42,
        },
        assemble: AssembleOptions::default(),
        report_path: report,
    };
    let llm = LlmService::from_config(config_ollama("deepseek-r1:32b", base)).unwrap();
    (cfg, llm)
}

#[tokio::test]
async fn passed_review_writes_clean_report() {
    let state = Arc::new(Mock::new(
        json!({
            "source_branch": "feature/x",
            "changes": [
                change("src/app.py", "@@ -1 +1 @@\n-return 0\n+return 1"),
                change("README.md", "+docs"),
            ]
        }),
        "## Summary\nLooks fine.\n\nFINAL_STATUS: PASSED",
    ));
    let base = spawn(state.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("review.md");
    let (cfg, llm) = setup(&base, TOKEN, report.clone());

    let run = run_review(&cfg, &llm).await.unwrap();

    match run {
        ReviewRun::Completed {
            outcome,
            report_path,
        } => {
            assert!(outcome.is_ok);
            assert_eq!(outcome.report, "## Summary\nLooks fine.");
            assert_eq!(report_path, report);
        }
        other => panic!("unexpected run: {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(&report).unwrap(),
        "## Summary\nLooks fine."
    );

    let prompts = state.prompts.lock().unwrap();
    let prompt = prompts[0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("FILENAME: src/app.py"));
    assert!(prompt.contains("def handler():"));
    assert!(prompt.contains("FINAL_STATUS"));
    assert!(!prompt.contains("README.md"));
    assert!(prompts[0]["system"].is_string());
}

#[tokio::test]
async fn failed_marker_produces_failed_verdict() {
    let state = Arc::new(Mock::new(
        json!({
            "source_branch": "main",
            "changes": [ change("src/app.py", "+x") ]
        }),
        "SQL injection in handler.\nFINAL_STATUS: FAILED",
    ));
    let base = spawn(state).await;
    let dir = tempfile::tempdir().unwrap();
    let (cfg, llm) = setup(&base, TOKEN, dir.path().join("r.md"));

    let run = run_review(&cfg, &llm).await.unwrap();
    let ReviewRun::Completed { outcome, .. } = run else {
        panic!("expected completed run, got {run:?}");
    };
    assert!(!outcome.is_ok);
    assert_eq!(outcome.report, "SQL injection in handler.");
}

#[tokio::test]
async fn no_matching_files_skips_model() {
    let state = Arc::new(Mock::new(
        json!({
            "source_branch": "main",
            "changes": [ change("docs/guide.md", "+text"), change("Cargo.lock", "+x") ]
        }),
        "unused",
    ));
    let base = spawn(state.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("r.md");
    let (cfg, llm) = setup(&base, TOKEN, report.clone());

    let run = run_review(&cfg, &llm).await.unwrap();
    assert_eq!(run, ReviewRun::NoMatchingFiles);
    assert_eq!(state.model_calls.load(Ordering::SeqCst), 0);
    assert!(!report.exists());
}

#[tokio::test]
async fn model_failure_is_reported_without_writing() {
    let mut mock = Mock::new(
        json!({
            "source_branch": "main",
            "changes": [ change("src/app.py", "+x") ]
        }),
        "",
    );
    mock.model_status = StatusCode::INTERNAL_SERVER_ERROR;
    let state = Arc::new(mock);
    let base = spawn(state.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("r.md");
    let (cfg, llm) = setup(&base, TOKEN, report.clone());

    let run = run_review(&cfg, &llm).await.unwrap();
    let ReviewRun::ModelFailed { error } = run else {
        panic!("expected model failure, got {run:?}");
    };
    assert!(error.contains("500"), "error was: {error}");
    assert_eq!(state.model_calls.load(Ordering::SeqCst), 1);
    assert!(!report.exists());
}

#[tokio::test]
async fn gitlab_auth_failure_aborts_before_model() {
    let state = Arc::new(Mock::new(
        json!({ "source_branch": "main", "changes": [ change("src/app.py", "+x") ] }),
        "FINAL_STATUS: PASSED",
    ));
    let base = spawn(state.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("r.md");
    let (cfg, llm) = setup(&base, "wrong-token", report.clone());

    let err = run_review(&cfg, &llm).await.unwrap_err();
    assert!(matches!(err, ReviewerError::Context(_)));
    assert!(err.is_auth_failure());
    assert!(err.to_string().contains("401"), "error was: {err}");
    assert_eq!(state.model_calls.load(Ordering::SeqCst), 0);
    assert!(!report.exists());
}
