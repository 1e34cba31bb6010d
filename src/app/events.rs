//! Defines the events sent from the search session to the presentation layer.

use crate::core::{EmptyReason, FileHandle};
use serde::Serialize;

/// Events for whoever renders the session.
///
/// Every search-related event carries the token of the search that produced
/// it, so a renderer can ignore anything older than what it last showed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UserEvent {
    /// A directory was picked and its files are now the search set.
    DirectorySelected {
        label: String,
        total_files: usize,
        eligible_files: usize,
    },
    /// The search has nothing to show.
    EmptyState { token: u64, reason: EmptyReason },
    /// A scan started (`true`) or finished (`false`).
    Loading { token: u64, active: bool },
    /// Running match count after a batch.
    MatchCount { token: u64, count: usize },
    /// The final, name-ordered matches.
    Results { token: u64, files: Vec<FileHandle> },
    /// An error message to be displayed to the user.
    ShowError { message: String },
}
