//! Defines the central, mutable state of a search session.

use crate::config::AppConfig;
use crate::core::{FileHandle, FileHandler, SearchEngine, SearchGeneration};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds the complete, mutable state of the session.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so the command loop and the
/// spawned search tasks can share it. The lock is never held across an await.
pub struct AppState {
    /// The session's configuration settings.
    pub config: AppConfig,
    /// Label of the selected directory, if any.
    pub directory_label: Option<String>,
    pub directory_root: Option<PathBuf>,
    /// Every file handed over by the last directory selection.
    pub files: Arc<Vec<FileHandle>>,
    /// The keyword as typed, before normalization.
    pub keyword: String,
    /// Source of search tokens. Only the search-starting path writes to it.
    pub generation: SearchGeneration,
    pub engine: Arc<SearchEngine>,
    /// The most recently spawned search. Older ones may still be winding down.
    pub search_task: Option<JoinHandle<()>>,
    /// A pending debounced keyword search.
    pub debounce_task: Option<JoinHandle<()>>,
    /// Matches of the last completed search, in display order.
    pub last_results: Vec<FileHandle>,
    pub is_searching: bool,
}

impl AppState {
    /// Creates a session reading from disk with the `lopdf` engine.
    pub fn new(config: AppConfig) -> Self {
        Self::with_handler(config, Arc::new(FileHandler::from_disk()))
    }

    pub fn with_handler(config: AppConfig, handler: Arc<FileHandler>) -> Self {
        let engine = Arc::new(SearchEngine::from_config(&config, handler));
        Self {
            config,
            directory_label: None,
            directory_root: None,
            files: Arc::new(Vec::new()),
            keyword: String::new(),
            generation: SearchGeneration::new(),
            engine,
            search_task: None,
            debounce_task: None,
            last_results: Vec::new(),
            is_searching: false,
        }
    }

    pub fn keyword_debounce(&self) -> Duration {
        Duration::from_millis(self.config.keyword_debounce_ms)
    }

    /// Drops a debounced search that has not fired yet.
    pub fn cancel_pending_keyword_search(&mut self) {
        if let Some(handle) = self.debounce_task.take() {
            handle.abort();
        }
    }

    /// Makes any in-flight search stale. It keeps running until its next
    /// check point and then exits without reporting.
    pub fn supersede_current_search(&mut self) {
        self.generation.supersede();
        self.is_searching = false;
        self.last_results.clear();
    }
}
