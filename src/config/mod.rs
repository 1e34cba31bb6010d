pub mod settings;

use crate::core::search::DEFAULT_BATCH_SIZE;
use crate::core::YieldStrategy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_KEYWORD_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Files extracted concurrently per batch.
    pub batch_size: usize,
    /// Quiet period after the last keystroke before a keyword search starts.
    pub keyword_debounce_ms: u64,
    pub yield_strategy: YieldStrategy,
    /// Gitignore-style patterns pruned while selecting a directory.
    pub ignore_patterns: HashSet<String>,
    pub last_directory: Option<PathBuf>,
    pub auto_load_last_directory: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            keyword_debounce_ms: DEFAULT_KEYWORD_DEBOUNCE_MS,
            yield_strategy: YieldStrategy::default(),
            ignore_patterns: [".git/".to_string()].into_iter().collect(),
            last_directory: None,
            auto_load_last_directory: false,
        }
    }
}
