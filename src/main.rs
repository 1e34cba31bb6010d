use anyhow::Result;
use folder_search::app::commands::{handle_command, Command, HELP_TEXT};
use folder_search::app::helpers::lock_state;
use folder_search::app::state::AppState;
use folder_search::app::{self, events::UserEvent};
use folder_search::config::{self, AppConfig};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the result display.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let initial_directory = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        config
            .auto_load_last_directory
            .then(|| config.last_directory.clone())
            .flatten()
    });

    let (proxy, mut event_rx) = mpsc::unbounded_channel::<UserEvent>();
    let state = Arc::new(Mutex::new(AppState::new(config)));

    let render_task = tokio::spawn(async move {
        let mut renderer = app::Renderer::new();
        while let Some(event) = event_rx.recv().await {
            if let Some(line) = renderer.render(&event) {
                println!("{}", line);
            }
        }
    });

    println!("{}", HELP_TEXT);
    match initial_directory {
        Some(path) => handle_command(Command::SelectDirectory(path), proxy.clone(), state.clone()),
        None => println!("No directory selected yet."),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP_TEXT),
            Ok(command) => handle_command(command, proxy.clone(), state.clone()),
            Err(e) => println!("Error: {}", e),
        }
    }

    let final_config = lock_state(&state).config.clone();
    if final_config.auto_load_last_directory {
        if let Err(e) = config::settings::save_config(&final_config, None) {
            tracing::error!("Failed to save config on exit: {}", e);
        }
    }

    drop(proxy);
    drop(state);
    render_task.abort();
    tracing::info!("Session ended.");
    Ok(())
}
