use std::collections::HashMap;

use crate::source::{Source, SourceError};

/// In-memory source, mostly for tests and for callers that already hold
/// their asset bytes.
pub struct MemSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemSource {
    pub fn new() -> Self {
        MemSource {
            assets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: &str, content: &[u8]) {
        self.assets.insert(id.to_string(), content.to_vec());
    }
}

impl Default for MemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for MemSource {
    fn read(&self, id: &str) -> Result<Vec<u8>, SourceError> {
        self.assets
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}
