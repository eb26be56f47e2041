use snipbox::DispatchOutcome;

use super::{rooted_runner, test_runner};

#[tokio::test]
async fn python_hello_world() {
    let runner = test_runner();
    let outcome = runner.dispatch(r#"print("Hello, Python!")"#, "python").await;
    assert_eq!(outcome, DispatchOutcome::output("Hello, Python!\n"));
}

#[tokio::test]
async fn ruby_hello_world() {
    let runner = test_runner();
    let outcome = runner.dispatch(r#"puts "Hello, Ruby!""#, "ruby").await;
    assert_eq!(outcome, DispatchOutcome::output("Hello, Ruby!\n"));
}

#[tokio::test]
async fn go_hello_world() {
    let runner = test_runner();
    let code = "package main\nimport \"fmt\"\nfunc main() { fmt.Println(\"Hello, Go!\") }";
    let outcome = runner.dispatch(code, "go").await;
    assert_eq!(outcome, DispatchOutcome::output("Hello, Go!\n"));
}

#[tokio::test]
async fn python_syntax_error_reports_diagnostic() {
    let runner = test_runner();
    let outcome = runner.dispatch("print(", "python").await;

    match outcome {
        DispatchOutcome::Error { error } => assert!(!error.is_empty()),
        DispatchOutcome::Output { output } => {
            panic!("expected a compiler diagnostic, got output {output:?}")
        }
    }
}

#[tokio::test]
async fn unregistered_language_is_rejected() {
    let runner = test_runner();
    let outcome = runner.dispatch("fn main() {}", "rust").await;
    assert_eq!(
        outcome,
        DispatchOutcome::error("Unsupported language: rust")
    );
}

#[tokio::test]
async fn python_runtime_error_reports_stderr() {
    let runner = test_runner();
    let outcome = runner
        .dispatch("raise RuntimeError('deliberate')", "python")
        .await;

    match outcome {
        DispatchOutcome::Error { error } => assert!(error.contains("deliberate")),
        other => panic!("expected error outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn no_workspace_survives_any_dispatch() {
    let root = tempfile::tempdir().unwrap();
    let runner = rooted_runner(root.path());

    let _ = runner.dispatch(r#"print("ok")"#, "python").await;
    let _ = runner.dispatch("print(", "python").await;
    let _ = runner.dispatch("x", "rust").await;

    let entries: Vec<_> = std::fs::read_dir(root.path()).unwrap().collect();
    assert!(entries.is_empty(), "workspaces leaked: {entries:?}");
}

#[tokio::test]
async fn concurrent_dispatches_see_only_their_own_code() {
    let runner = test_runner();

    let (a, b) = tokio::join!(
        runner.dispatch(r#"print("from a")"#, "python"),
        runner.dispatch(r#"print("from b")"#, "python"),
    );

    assert_eq!(a, DispatchOutcome::output("from a\n"));
    assert_eq!(b, DispatchOutcome::output("from b\n"));
}

#[tokio::test]
async fn go_compile_error_reports_diagnostic() {
    let runner = test_runner();
    let outcome = runner.dispatch("package main\nfunc main() {", "go").await;

    match outcome {
        DispatchOutcome::Error { error } => assert!(!error.is_empty()),
        other => panic!("expected error outcome, got {other:?}"),
    }
}
