//! Fetching the index and documents
//!
//! The repository only needs "give me the text at this path". Sites on
//! disk go through [`DirTransport`]; [`MemoryTransport`] serves fixed
//! resources and records every request.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// A failed fetch
#[derive(Debug, Error)]
pub enum TransportError {
    /// The resource answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Something that can fetch text resources by relative path
pub trait Transport {
    /// Fetch the resource at `path` as text
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Reads resources from a directory on disk
#[derive(Debug, Clone)]
pub struct DirTransport {
    root: PathBuf,
}

impl DirTransport {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a request path below the root, refusing to climb out of it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl Transport for DirTransport {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, TransportError>> + Send {
        let resolved = self.resolve(path);
        let path = path.to_string();

        async move {
            let Some(file) = resolved else {
                tracing::warn!("Refusing to fetch {:?} outside the site directory", path);
                return Err(TransportError::Status(400));
            };

            tracing::debug!("Fetching {:?}", file);
            match tokio::fs::read_to_string(&file).await {
                Ok(text) => Ok(text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TransportError::Status(404)),
                Err(e) => Err(TransportError::Io(e)),
            }
        }
    }
}

/// Serves resources from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    resources: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style
    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: &str, body: &str) {
        self.resources.insert(path.to_string(), body.to_string());
    }

    /// Every path requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Transport for MemoryTransport {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, TransportError>> + Send {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path.to_string());
        }
        let found = self.resources.get(path).cloned();

        async move { found.ok_or(TransportError::Status(404)) }
    }
}
