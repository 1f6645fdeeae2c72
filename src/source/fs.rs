use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::source::{Source, SourceError};

/// Filesystem source rooted at one directory, identifiers are paths
/// relative to that root.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FsSource {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl Source for FsSource {
    fn read(&self, id: &str) -> Result<Vec<u8>, SourceError> {
        match std::fs::read(self.root.join(id)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
