use crate::core::{ContentSource, FileHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// This function is wrapped in a `Once` block to ensure that the global
/// subscriber is set exactly one time, even when tests are run in parallel.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Builds a handle whose name, relative path and location are all `name`.
pub fn file(name: &str, declared_type: &str) -> FileHandle {
    FileHandle::new(name, name, declared_type, 0, name)
}

/// An in-memory `ContentSource` that records every read it serves.
///
/// Handles are looked up by `location`. Unknown locations fail with
/// `NotFound`, which is how tests model a file removed after selection.
#[derive(Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
    reads: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, location: &str, content: &str) -> Self {
        self.with_bytes(location, content.as_bytes().to_vec())
    }

    pub fn with_bytes(mut self, location: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(PathBuf::from(location), bytes);
        self
    }

    /// Makes every read sleep first, so searches stay in flight for a while.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared log of the locations read so far, in call order.
    pub fn read_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn read(&self, file: &FileHandle) -> std::io::Result<Vec<u8>> {
        self.reads
            .lock()
            .unwrap()
            .push(file.location.display().to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.files.get(&file.location).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is no longer available", file.location.display()),
            )
        })
    }
}
