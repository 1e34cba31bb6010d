//! Command handlers for the interactive session.
//!
//! Each input line becomes a `Command`. Anything not starting with `:` is the
//! keyword as typed so far.

use super::events::UserEvent;
use super::helpers::lock_state;
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const HELP_TEXT: &str = "\
Type a keyword to search the selected directory.
  :dir PATH   select a directory
  :clear      clear the keyword
  :open N     open result number N
  :help       show this help
  :quit       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectDirectory(PathBuf),
    Keyword(String),
    Clear,
    Open(usize),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Keyword(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };

        match name {
            "dir" | "d" => {
                if arg.is_empty() {
                    bail!(":dir needs a path");
                }
                Ok(Command::SelectDirectory(PathBuf::from(arg)))
            }
            "clear" | "c" => Ok(Command::Clear),
            "open" | "o" => arg
                .parse::<usize>()
                .map(Command::Open)
                .map_err(|_| anyhow!(":open needs a result number, got {:?}", arg)),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => bail!("Unknown command :{}", other),
        }
    }
}

/// Dispatches a session command. `Help` and `Quit` belong to the frontend
/// and are ignored here.
pub fn handle_command<P: EventProxy>(command: Command, proxy: P, state: Arc<Mutex<AppState>>) {
    match command {
        Command::SelectDirectory(path) => tasks::select_directory(path, proxy, state),
        Command::Keyword(keyword) => tasks::update_keyword(keyword, proxy, state),
        Command::Clear => tasks::clear_search(proxy, state),
        Command::Open(number) => {
            if let Err(e) = open_result(number, &state) {
                tracing::warn!("Open failed: {}", e);
                proxy.send_event(UserEvent::ShowError {
                    message: e.to_string(),
                });
            }
        }
        Command::Help | Command::Quit => {}
    }
}

/// Resolves a 1-based result number against the last completed search.
pub fn result_location(number: usize, state: &Arc<Mutex<AppState>>) -> Result<PathBuf> {
    let state_guard = lock_state(state);
    number
        .checked_sub(1)
        .and_then(|i| state_guard.last_results.get(i))
        .map(|file| file.location.clone())
        .ok_or_else(|| {
            anyhow!(
                "No result #{} (last search returned {})",
                number,
                state_guard.last_results.len()
            )
        })
}

/// Hands a result to the platform's default viewer.
pub fn open_result(number: usize, state: &Arc<Mutex<AppState>>) -> Result<PathBuf> {
    let location = result_location(number, state)?;
    open::that(&location).map_err(|e| anyhow!("Could not open {}: {}", location.display(), e))?;
    tracing::info!("Opened {:?}", location);
    Ok(location)
}
