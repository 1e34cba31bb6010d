//! Integration tests for the search session.
//!
//! These tests use an async-aware MPSC channel from `tokio::sync` to receive
//! the events a frontend would render.

use folder_search::app::{self, events::UserEvent, proxy::EventProxy, state::AppState};
use folder_search::config::AppConfig;
use folder_search::core::EmptyReason;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Contains the test infrastructure.
mod helpers {
    use super::*;
    use folder_search::utils::test_helpers::setup_test_logging;
    use std::fs;

    /// A test double for the frontend using a tokio MPSC channel.
    #[derive(Clone)]
    pub struct TestEventProxy {
        pub sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            if let Err(e) = self.sender.send(event) {
                // Panic in a test if the receiver is dropped, as it indicates a test setup error.
                panic!("Test receiver dropped: {}", e);
            }
        }
    }

    /// `TestHarness` sets up a complete, isolated environment for each test case.
    pub struct TestHarness {
        pub state: Arc<Mutex<AppState>>,
        pub proxy: TestEventProxy,
        pub event_rx: mpsc::UnboundedReceiver<UserEvent>,
        pub root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        /// Creates a new test harness with a short debounce delay.
        pub fn new() -> Self {
            setup_test_logging();
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().to_path_buf();
            let (event_tx, event_rx) = mpsc::unbounded_channel();

            let config = AppConfig {
                keyword_debounce_ms: 20,
                ..Default::default()
            };

            Self {
                state: Arc::new(Mutex::new(AppState::new(config))),
                proxy: TestEventProxy { sender: event_tx },
                event_rx,
                root_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the temporary test directory.
        pub fn create_file(&self, path: &str, content: &[u8]) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up a small document folder for testing.
        pub fn setup_basic_folder(&self) {
            self.create_file("notes/Zebra.txt", b"Meeting notes: budget approved");
            self.create_file("notes/alpha.md", b"# Budget\nDraft numbers");
            self.create_file("readme.txt", b"Nothing relevant here");
            self.create_file("data/export.json", b"{\"budget\": 1200}");
            self.create_file("image.bin", b"budget budget budget");
            self.create_file("broken.pdf", b"%PDF-1.7 this is not a real document");
        }

        /// Receives events until one satisfies `done`, returning everything seen.
        pub async fn collect_until<F>(&mut self, done: F) -> Vec<UserEvent>
        where
            F: Fn(&UserEvent) -> bool,
        {
            let mut seen = Vec::new();
            loop {
                match tokio::time::timeout(Duration::from_secs(5), self.event_rx.recv()).await {
                    Ok(Some(event)) => {
                        let finished = done(&event);
                        seen.push(event);
                        if finished {
                            return seen;
                        }
                    }
                    _ => panic!(
                        "Expected event did not arrive within timeout; saw {:?}",
                        seen
                    ),
                }
            }
        }

        /// Collects whatever else arrives within `window`.
        pub async fn drain_for(&mut self, window: Duration) -> Vec<UserEvent> {
            let mut seen = Vec::new();
            while let Ok(Some(event)) = tokio::time::timeout(window, self.event_rx.recv()).await {
                seen.push(event);
            }
            seen
        }

        pub async fn select_root(&mut self) -> Vec<UserEvent> {
            app::tasks::select_directory(
                self.root_path.clone(),
                self.proxy.clone(),
                self.state.clone(),
            );
            self.collect_until(|e| {
                matches!(
                    e,
                    UserEvent::EmptyState { .. }
                        | UserEvent::Results { .. }
                        | UserEvent::ShowError { .. }
                )
            })
            .await
        }
    }

    pub fn result_names(event: &UserEvent) -> Option<Vec<String>> {
        match event {
            UserEvent::Results { files, .. } => {
                Some(files.iter().map(|f| f.name.clone()).collect())
            }
            _ => None,
        }
    }
}

use helpers::{result_names, TestHarness};

#[tokio::test]
async fn test_selecting_directory_without_keyword_reports_no_keyword() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();

    let events = harness.select_root().await;

    match &events[0] {
        UserEvent::DirectorySelected {
            total_files,
            eligible_files,
            ..
        } => {
            assert_eq!(*total_files, 6);
            // image.bin is the only file that cannot be searched.
            assert_eq!(*eligible_files, 5);
        }
        other => panic!("expected DirectorySelected first, got {other:?}"),
    }
    assert!(matches!(
        events.last(),
        Some(UserEvent::EmptyState {
            reason: EmptyReason::NoKeyword,
            ..
        })
    ));
}

#[tokio::test]
async fn test_keyword_search_reports_sorted_matches() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();
    harness.select_root().await;

    app::tasks::update_keyword(
        "  BUDGET ".to_string(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let events = harness
        .collect_until(|e| matches!(e, UserEvent::Results { .. }))
        .await;

    assert!(events
        .iter()
        .any(|e| matches!(e, UserEvent::Loading { active: true, .. })));
    let names = result_names(events.last().unwrap()).unwrap();
    assert_eq!(names, ["alpha.md", "export.json", "Zebra.txt"]);

    let state = harness.state.lock().unwrap();
    assert_eq!(state.last_results.len(), 3);
    assert!(!state.is_searching);
}

#[tokio::test]
async fn test_rapid_keystrokes_run_a_single_search() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();
    harness.select_root().await;

    for typed in ["b", "bu", "bud", "budg", "budget"] {
        app::tasks::update_keyword(
            typed.to_string(),
            harness.proxy.clone(),
            harness.state.clone(),
        );
    }

    let mut events = harness
        .collect_until(|e| matches!(e, UserEvent::Results { .. }))
        .await;
    events.extend(harness.drain_for(Duration::from_millis(200)).await);

    let searches_started = events
        .iter()
        .filter(|e| matches!(e, UserEvent::Loading { active: true, .. }))
        .count();
    let result_lists: Vec<_> = events.iter().filter_map(result_names).collect();

    assert_eq!(searches_started, 1);
    assert_eq!(result_lists, [vec!["alpha.md", "export.json", "Zebra.txt"]]);
}

#[tokio::test]
async fn test_no_matches_reports_empty_state() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();
    harness.select_root().await;

    app::tasks::update_keyword(
        "nonexistent-term".to_string(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let events = harness
        .collect_until(|e| matches!(e, UserEvent::EmptyState { .. }))
        .await;

    assert!(events.iter().any(|e| result_names(e) == Some(vec![])));
    assert!(matches!(
        events.last(),
        Some(UserEvent::EmptyState {
            reason: EmptyReason::NoMatches,
            ..
        })
    ));
}

#[tokio::test]
async fn test_clear_reports_no_keyword_immediately() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();
    harness.select_root().await;

    app::tasks::update_keyword(
        "budget".to_string(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    app::tasks::clear_search(harness.proxy.clone(), harness.state.clone());

    let events = harness
        .collect_until(|e| matches!(e, UserEvent::EmptyState { .. }))
        .await;
    assert!(matches!(
        events.last(),
        Some(UserEvent::EmptyState {
            reason: EmptyReason::NoKeyword,
            ..
        })
    ));

    // The debounced "budget" search was dropped by the clear.
    let later = harness.drain_for(Duration::from_millis(200)).await;
    assert!(later.iter().all(|e| result_names(e).is_none()), "{later:?}");
}

#[tokio::test]
async fn test_keyword_without_directory_reports_no_directory() {
    let mut harness = TestHarness::new();

    app::tasks::update_keyword(
        "budget".to_string(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let events = harness
        .collect_until(|e| matches!(e, UserEvent::EmptyState { .. }))
        .await;

    assert!(matches!(
        events.last(),
        Some(UserEvent::EmptyState {
            reason: EmptyReason::NoDirectory,
            ..
        })
    ));
}

#[tokio::test]
async fn test_selecting_missing_directory_shows_error() {
    let mut harness = TestHarness::new();
    let missing = harness.root_path.join("does-not-exist");

    app::tasks::select_directory(missing, harness.proxy.clone(), harness.state.clone());
    let events = harness
        .collect_until(|e| matches!(e, UserEvent::ShowError { .. }))
        .await;

    match events.last() {
        Some(UserEvent::ShowError { message }) => {
            assert!(message.contains("not a valid directory"))
        }
        other => panic!("expected an error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reselecting_directory_searches_new_files() {
    let mut harness = TestHarness::new();
    harness.setup_basic_folder();
    harness.select_root().await;

    app::tasks::update_keyword(
        "budget".to_string(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    harness
        .collect_until(|e| matches!(e, UserEvent::Results { .. }))
        .await;

    harness.create_file("later/budget-2025.txt", b"Budget for next year");
    let events = harness.select_root().await;

    let names = events.iter().find_map(result_names).unwrap();
    assert_eq!(
        names,
        ["alpha.md", "budget-2025.txt", "export.json", "Zebra.txt"]
    );
}
