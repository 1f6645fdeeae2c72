pub mod fs;
pub mod mem;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where raw asset bytes come from before packing. The packer asks for
/// one asset at a time by identifier and never caches across assets.
pub trait Source {
    fn read(&self, id: &str) -> Result<Vec<u8>, SourceError>;
}
