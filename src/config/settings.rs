use anyhow::Result;
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "FolderSearch";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "foldersearch", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the configuration from `path`, or from the platform location.
///
/// A missing file yields the defaults without writing anything. A file that
/// does not parse as-is is migrated by filling absent keys from the defaults;
/// if that fails too, the defaults are used and a warning is logged.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_path(path)?;

    if !config_path.exists() {
        tracing::info!("No config file at {:?}, using defaults", config_path);
        return Ok(AppConfig::default());
    }

    let config_content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Attempting migration.",
                config_path,
                e
            );
            migrate_legacy_config(&config_content).or_else(|e| {
                tracing::warn!("Config migration failed: {}. Falling back to defaults.", e);
                Ok(AppConfig::default())
            })
        }
    }
}

/// Completes a partial or older config: every key that is missing or `null`
/// takes its default value, unknown keys are dropped.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let mut merged = match serde_json::to_value(AppConfig::default())? {
        Value::Object(map) => map,
        _ => return Err(anyhow::anyhow!("Default config did not serialize to an object")),
    };

    for (key, default_val) in merged.iter_mut() {
        match obj.get(key) {
            Some(Value::Null) | None => {}
            Some(value) => *default_val = value.clone(),
        }
    }

    let migrated_config: AppConfig = serde_json::from_value(Value::Object(merged))?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the provided configuration to `path`, or to the platform location.
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}
