//! The batched, cancellable keyword scan.

use super::cancellation::SearchToken;
use super::error::CoreError;
use super::file_handler::FileHandler;
use super::ordering::sort_by_name;
use super::{FileHandle, ScanProgress, SearchOutcome, SearchRequest};
use crate::config::AppConfig;
use crate::utils::file_detection::is_searchable;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5;

/// What happens at the yield point between batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldStrategy {
    /// Hand control back to the runtime once.
    #[default]
    Cooperative,
    /// Sleep for the given number of milliseconds.
    Sleep(u64),
    /// No suspension, for callers that already run on their own thread.
    Disabled,
}

impl YieldStrategy {
    pub async fn yield_point(self) {
        match self {
            YieldStrategy::Cooperative => tokio::task::yield_now().await,
            YieldStrategy::Sleep(millis) => tokio::time::sleep(Duration::from_millis(millis)).await,
            YieldStrategy::Disabled => {}
        }
    }
}

/// Runs keyword searches over a selected file set.
///
/// Eligible files are split into fixed-size batches. Batches run one after
/// another; files inside a batch are extracted concurrently on the calling
/// task. The token is checked before and after every batch, so a superseded
/// search stops within one batch and never reports.
pub struct SearchEngine {
    handler: Arc<FileHandler>,
    batch_size: usize,
    yield_strategy: YieldStrategy,
}

impl SearchEngine {
    pub fn new(handler: Arc<FileHandler>, batch_size: usize, yield_strategy: YieldStrategy) -> Self {
        Self {
            handler,
            batch_size,
            yield_strategy,
        }
    }

    pub fn from_config(config: &AppConfig, handler: Arc<FileHandler>) -> Self {
        Self::new(handler, config.batch_size, config.yield_strategy)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn run_search<F>(
        &self,
        request: &SearchRequest,
        token: &SearchToken,
        progress_callback: F,
    ) -> Result<SearchOutcome, CoreError>
    where
        F: Fn(ScanProgress) + Send + Sync,
    {
        if self.batch_size == 0 {
            return Err(CoreError::InvalidRequest(
                "batch size must be at least 1".to_string(),
            ));
        }

        if let Some(reason) = request.empty_reason() {
            tracing::debug!("Search {} skipped: {:?}", token.id(), reason);
            return Ok(SearchOutcome::Empty(reason));
        }

        let eligible: Vec<&FileHandle> =
            request.files.iter().filter(|f| is_searchable(f)).collect();
        let batches: Vec<_> = eligible.chunks(self.batch_size).collect();
        let total_batches = batches.len();

        tracing::info!(
            "Search {} started: {:?} across {} eligible files in {} batches",
            token.id(),
            request.keyword,
            eligible.len(),
            total_batches
        );

        let mut matches: Vec<FileHandle> = Vec::new();
        let mut files_processed = 0;

        for (batch_idx, batch) in batches.into_iter().enumerate() {
            if !token.is_current() {
                tracing::info!("Search {} superseded before batch {}", token.id(), batch_idx + 1);
                return Ok(SearchOutcome::Superseded);
            }

            let results = join_all(
                batch
                    .iter()
                    .map(|file| self.file_matches(file, &request.keyword)),
            )
            .await;

            if !token.is_current() {
                tracing::info!("Search {} superseded during batch {}", token.id(), batch_idx + 1);
                return Ok(SearchOutcome::Superseded);
            }

            files_processed += batch.len();
            matches.extend(
                batch
                    .iter()
                    .zip(results)
                    .filter(|(_, hit)| *hit)
                    .map(|(file, _)| (*file).clone()),
            );

            tracing::debug!(
                "Search {}: batch {} of {} done, {} matches so far",
                token.id(),
                batch_idx + 1,
                total_batches,
                matches.len()
            );
            progress_callback(ScanProgress {
                token: token.id(),
                batch: batch_idx + 1,
                total_batches,
                files_processed,
                matches: matches.len(),
            });

            self.yield_strategy.yield_point().await;
        }

        if !token.is_current() {
            tracing::info!("Search {} superseded before reporting", token.id());
            return Ok(SearchOutcome::Superseded);
        }

        sort_by_name(&mut matches);
        tracing::info!(
            "Search {} completed: {} of {} files matched",
            token.id(),
            matches.len(),
            files_processed
        );
        Ok(SearchOutcome::Completed(matches))
    }

    /// Extraction failures count as "no match" and are only logged.
    async fn file_matches(&self, file: &FileHandle, keyword: &str) -> bool {
        match self.handler.extract_text(file).await {
            Ok(text) => text.to_lowercase().contains(keyword),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file.display_path(), e);
                false
            }
        }
    }
}
