//! Integration tests for the public scratch creation surface.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use scratchlite::{CancellationToken, CreateScratchOptions, ScratchClient, ScratchError};
use scratchlite_test_utils::{RecordingLauncher, Scripted};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn client_with(launcher: &Arc<RecordingLauncher>) -> ScratchClient {
    ScratchClient::with_launcher(launcher.clone())
}

// ============================================================================
// ARGUMENT TESTS
// ============================================================================

#[tokio::test]
async fn create_scratch_sends_only_destpath() {
    let launcher = Arc::new(RecordingLauncher::new());
    let client = client_with(&launcher);

    client
        .create_scratch(&CancellationToken::new(), "/tmp/x.vhdx")
        .await
        .unwrap();

    assert_eq!(
        launcher.single_call(),
        vec!["create-scratch", "--destpath", "/tmp/x.vhdx"]
    );
}

#[tokio::test]
async fn create_scratch_matches_options_variant_with_none() {
    let plain = Arc::new(RecordingLauncher::new());
    let with_none = Arc::new(RecordingLauncher::new());
    let cancel = CancellationToken::new();

    client_with(&plain)
        .create_scratch(&cancel, "/tmp/x.vhdx")
        .await
        .unwrap();
    client_with(&with_none)
        .create_scratch_with_options(&cancel, "/tmp/x.vhdx", None)
        .await
        .unwrap();

    assert_eq!(plain.calls(), with_none.calls());
}

#[tokio::test]
async fn size_and_virtual_memory_example() {
    let launcher = Arc::new(RecordingLauncher::new());
    let opts = CreateScratchOptions {
        size_gb: 20,
        cache_file: None,
        use_virtual_memory: true,
    };

    client_with(&launcher)
        .create_scratch_with_options(&CancellationToken::new(), "/d/scratch.vhdx", Some(&opts))
        .await
        .unwrap();

    assert_eq!(
        launcher.single_call(),
        vec![
            "create-scratch",
            "--destpath",
            "/d/scratch.vhdx",
            "--sizeGB",
            "20",
            "--use-virtual-memory",
        ]
    );
}

#[tokio::test]
async fn cache_file_is_sent_as_absolute_path() {
    let launcher = Arc::new(RecordingLauncher::new());
    let opts = CreateScratchOptions::default().with_cache_file("templates/scratch.vhdx");

    client_with(&launcher)
        .create_scratch_with_options(&CancellationToken::new(), "/d/scratch.vhdx", Some(&opts))
        .await
        .unwrap();

    let call = launcher.single_call();
    assert_eq!(call[3], "--cache-path");
    let expected = std::env::current_dir()
        .unwrap()
        .join("templates")
        .join("scratch.vhdx");
    assert_eq!(PathBuf::from(&call[4]), expected);
    assert_eq!(call.len(), 5);
}

// ============================================================================
// VALIDATION TESTS
// ============================================================================

#[tokio::test]
async fn negative_size_never_reaches_launcher() {
    let launcher = Arc::new(RecordingLauncher::new());
    let opts = CreateScratchOptions::default().with_size_gb(-1);

    let err = client_with(&launcher)
        .create_scratch_with_options(&CancellationToken::new(), "/d/scratch.vhdx", Some(&opts))
        .await
        .unwrap_err();

    assert!(matches!(err, ScratchError::InvalidArgument(_)));
    assert_eq!(launcher.call_count(), 0);
}

// ============================================================================
// OUTCOME TESTS
// ============================================================================

#[tokio::test]
async fn exit_status_one_is_process_failure() {
    let launcher = Arc::new(RecordingLauncher::with_script([Scripted::Exit(
        1,
        "failed to create scratch: access denied\n".into(),
    )]));

    let err = client_with(&launcher)
        .create_scratch(&CancellationToken::new(), "/d/scratch.vhdx")
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(1));
    assert_eq!(
        err.to_string(),
        "exit status 1: failed to create scratch: access denied"
    );
}

#[tokio::test]
async fn launch_failure_is_returned_verbatim() {
    let launcher = Arc::new(RecordingLauncher::with_script([Scripted::LaunchFailure(
        io::ErrorKind::PermissionDenied,
    )]));

    let err = client_with(&launcher)
        .create_scratch(&CancellationToken::new(), "/d/scratch.vhdx")
        .await
        .unwrap_err();

    match err {
        ScratchError::Launch { source, .. } => {
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failures_are_not_retried() {
    let launcher = Arc::new(RecordingLauncher::with_script([Scripted::Exit(
        2,
        String::new(),
    )]));

    let result = client_with(&launcher)
        .create_scratch(&CancellationToken::new(), "/d/scratch.vhdx")
        .await;

    assert!(result.is_err());
    assert_eq!(launcher.call_count(), 1);
}

// ============================================================================
// CANCELLATION TESTS
// ============================================================================

#[tokio::test]
async fn pre_cancelled_context_prevents_launch() {
    let launcher = Arc::new(RecordingLauncher::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client_with(&launcher)
        .create_scratch(&cancel, "/d/scratch.vhdx")
        .await
        .unwrap_err();

    assert!(err.is_cancellation());
    assert_eq!(launcher.call_count(), 0);
}

#[tokio::test]
async fn cancel_during_run_returns_cancelled() {
    let launcher = Arc::new(RecordingLauncher::with_script([Scripted::Hang]));
    let client = client_with(&launcher);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        client.create_scratch(&cancel, "/d/scratch.vhdx"),
    )
    .await
    .expect("cancellation should return promptly")
    .unwrap_err();

    assert!(matches!(err, ScratchError::Cancelled));
    assert_eq!(launcher.call_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_are_independent() {
    let launcher = Arc::new(RecordingLauncher::new());
    let client = client_with(&launcher);
    let cancel = CancellationToken::new();

    let a = client.create_scratch(&cancel, "/d/a.vhdx");
    let b = client.create_scratch(&cancel, "/d/a.vhdx");
    let (a, b) = tokio::join!(a, b);

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(launcher.call_count(), 2);
}
