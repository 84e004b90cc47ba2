//! Resource lookup by logical path
//!
//! Paths starting with `:` (`:styles/panel.css`, `:icons/light.png`) name
//! entries embedded in a [`ResourceBundle`]. Any other path is read from the
//! file system.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;

use crate::error::{ResourceError, Result};

/// Prefix marking an embedded resource key
pub const EMBEDDED_PREFIX: char = ':';

/// Embedded resources keyed by logical path
#[derive(Clone, Debug, Default)]
pub struct ResourceBundle {
    entries: HashMap<String, Arc<[u8]>>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(key, bytes);
        self
    }

    /// Register an embedded entry. Keys are normalized to start with `:`.
    pub fn insert(&mut self, key: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        let mut key = key.into();
        if !key.starts_with(EMBEDDED_PREFIX) {
            key.insert(0, EMBEDDED_PREFIX);
        }
        self.entries.insert(key, bytes.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a resource's bytes
    pub fn read(&self, path: &str) -> Result<Arc<[u8]>> {
        if path.starts_with(EMBEDDED_PREFIX) {
            return self
                .entries
                .get(path)
                .cloned()
                .ok_or_else(|| ResourceError::NotFound(path.to_string()));
        }

        // The file handle is dropped on every exit path, including read errors
        let mut file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::Io(err),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes.into())
    }

    /// Read a resource as UTF-8 text
    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ResourceError::Utf8(path.to_string()))
    }
}
