use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::lock_state;
use super::proxy::EventProxy;
use super::state::AppState;

use crate::core::{
    DirectoryScanner, ScanProgress, SearchEngine, SearchOutcome, SearchRequest, SearchToken,
};
use crate::utils::file_detection::is_searchable;

/// Selects a directory and searches it right away with the current keyword.
pub fn select_directory<P: EventProxy>(path: PathBuf, proxy: P, state: Arc<Mutex<AppState>>) {
    tokio::spawn(async move {
        let ignore_patterns = lock_state(&state).config.ignore_patterns.clone();
        let scanner = DirectoryScanner::new(ignore_patterns);

        let selection = match scanner.select_directory(&path).await {
            Ok(selection) => selection,
            Err(e) => {
                tracing::error!("Directory selection failed: {}", e);
                proxy.send_event(UserEvent::ShowError {
                    message: e.to_string(),
                });
                return;
            }
        };

        let total_files = selection.files.len();
        let eligible_files = selection.files.iter().filter(|f| is_searchable(f)).count();
        {
            let mut state_guard = lock_state(&state);
            state_guard.cancel_pending_keyword_search();
            state_guard.directory_label = Some(selection.label.clone());
            state_guard.config.last_directory = Some(selection.root.clone());
            state_guard.directory_root = Some(selection.root);
            state_guard.files = Arc::new(selection.files);
        }

        proxy.send_event(UserEvent::DirectorySelected {
            label: selection.label,
            total_files,
            eligible_files,
        });
        start_search(proxy, state);
    });
}

/// Records a keystroke. The search starts once the debounce delay passes
/// without another keystroke; whatever is running now is made stale at once.
pub fn update_keyword<P: EventProxy>(keyword: String, proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = lock_state(&state);
    state_guard.keyword = keyword;
    state_guard.cancel_pending_keyword_search();
    state_guard.supersede_current_search();

    let delay = state_guard.keyword_debounce();
    let task_state = Arc::clone(&state);
    state_guard.debounce_task = Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        start_search(proxy, task_state);
    }));
}

/// Clears the keyword and reports the empty state immediately.
pub fn clear_search<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    {
        let mut state_guard = lock_state(&state);
        state_guard.keyword.clear();
        state_guard.cancel_pending_keyword_search();
    }
    start_search(proxy, state);
}

/// Starts a new search generation over the current selection and keyword.
pub fn start_search<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = lock_state(&state);
    let token = state_guard.generation.begin();
    let request = SearchRequest::new(&state_guard.keyword, Arc::clone(&state_guard.files));
    let engine = Arc::clone(&state_guard.engine);
    state_guard.is_searching = request.empty_reason().is_none();
    state_guard.last_results.clear();

    tracing::info!("Starting search {} for {:?}", token.id(), request.keyword);
    let task_state = Arc::clone(&state);
    state_guard.search_task = Some(tokio::spawn(async move {
        search_task(request, token, engine, proxy, task_state).await;
    }));
}

async fn search_task<P: EventProxy>(
    request: SearchRequest,
    token: SearchToken,
    engine: Arc<SearchEngine>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let id = token.id();
    if request.empty_reason().is_none() {
        proxy.send_event(UserEvent::Loading {
            token: id,
            active: true,
        });
    }

    let progress_proxy = proxy.clone();
    let progress_callback = move |progress: ScanProgress| {
        progress_proxy.send_event(UserEvent::MatchCount {
            token: progress.token,
            count: progress.matches,
        });
    };

    let outcome = engine.run_search(&request, &token, progress_callback).await;

    // Reporting happens under the lock: a newer search cannot begin between
    // the staleness check and the send.
    let mut state_guard = lock_state(&state);
    if !token.is_current() {
        tracing::debug!("Search {} finished after being superseded; dropping", id);
        return;
    }
    state_guard.is_searching = false;

    match outcome {
        Ok(SearchOutcome::Empty(reason)) => {
            proxy.send_event(UserEvent::EmptyState { token: id, reason });
        }
        Ok(SearchOutcome::Completed(files)) => {
            state_guard.last_results = files.clone();
            proxy.send_event(UserEvent::Loading {
                token: id,
                active: false,
            });
            let empty = files.is_empty();
            proxy.send_event(UserEvent::Results { token: id, files });
            if empty {
                proxy.send_event(UserEvent::EmptyState {
                    token: id,
                    reason: crate::core::EmptyReason::NoMatches,
                });
            }
        }
        Ok(SearchOutcome::Superseded) => {}
        Err(e) => {
            tracing::error!("Search {} failed: {}", id, e);
            proxy.send_event(UserEvent::Loading {
                token: id,
                active: false,
            });
            proxy.send_event(UserEvent::ShowError {
                message: e.to_string(),
            });
        }
    }
}
