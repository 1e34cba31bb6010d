pub mod commands;
pub mod events;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;

use crate::core::EmptyReason;
use events::UserEvent;

/// Turns session events into terminal lines.
///
/// Tracks the newest search token seen and drops events from older searches,
/// so a late progress update can never overwrite a newer result list.
#[derive(Debug, Default)]
pub struct Renderer {
    latest_token: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, event: &UserEvent) -> Option<String> {
        if let Some(token) = event_token(event) {
            if token < self.latest_token {
                return None;
            }
            self.latest_token = token;
        }

        match event {
            UserEvent::DirectorySelected {
                label,
                total_files,
                eligible_files,
            } => Some(format!(
                "Directory: {} ({} files, {} searchable)",
                label, total_files, eligible_files
            )),
            UserEvent::EmptyState { reason, .. } => Some(
                match reason {
                    EmptyReason::NoDirectory => "Select a directory first (:dir PATH).",
                    EmptyReason::NoKeyword => "Type a keyword to search.",
                    EmptyReason::NoMatches => "No files contain that keyword.",
                }
                .to_string(),
            ),
            UserEvent::Loading { active: true, .. } => Some("Searching...".to_string()),
            UserEvent::Loading { active: false, .. } => None,
            UserEvent::MatchCount { count, .. } => Some(format!("  {} matches so far", count)),
            UserEvent::Results { files, .. } if files.is_empty() => None,
            UserEvent::Results { files, .. } => {
                let mut out = format!("{} matching files:", files.len());
                for (i, file) in files.iter().enumerate() {
                    out.push_str(&format!("\n  [{}] {}  ({})", i + 1, file.name, file.relative_path));
                }
                Some(out)
            }
            UserEvent::ShowError { message } => Some(format!("Error: {}", message)),
        }
    }
}

fn event_token(event: &UserEvent) -> Option<u64> {
    match event {
        UserEvent::EmptyState { token, .. }
        | UserEvent::Loading { token, .. }
        | UserEvent::MatchCount { token, .. }
        | UserEvent::Results { token, .. } => Some(*token),
        UserEvent::DirectorySelected { .. } | UserEvent::ShowError { .. } => None,
    }
}
