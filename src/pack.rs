use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::asset::AssetSpec;
use crate::compress;
use crate::frame::builder::FrameBuilder;
use crate::frame::FrameError;
use crate::seal::{SealError, Sealer};
use crate::source::{Source, SourceError};

#[derive(Error, Debug)]
pub enum PackError {
    #[error("asset {id}: {source}")]
    Source { id: String, source: SourceError },
    #[error(transparent)]
    Seal(#[from] SealError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Container writer. Drives source, compressor, sealer, and frame codec
/// per asset and appends the frames to the sink in input order.
///
/// Holds no state across assets besides the sealer and the sink, so a
/// failed pack leaves nothing to unwind, the bytes already flushed are
/// simply not a valid container.
pub struct Packer<W: Write> {
    sealer: Sealer,
    frames: FrameBuilder<W>,
}

impl<W: Write> Packer<W> {
    /// Key length is validated here, once per packer, not per record.
    pub fn new(writer: W, key: &[u8]) -> Result<Self, PackError> {
        Ok(Packer {
            sealer: Sealer::new(key)?,
            frames: FrameBuilder::new(writer),
        })
    }

    /// Pack every spec in order, the first failing stage aborts the run.
    ///
    /// Duplicate identifiers are not rejected, the reader resolves them
    /// last-write-wins.
    // TODO: compress+seal is independent per asset, could fan the
    // transform out across a pool ahead of the ordered frame flush
    pub fn pack<S: Source>(&mut self, source: &S, specs: &[AssetSpec]) -> Result<(), PackError> {
        for spec in specs {
            let content = source.read(&spec.id).map_err(|source| PackError::Source {
                id: spec.id.clone(),
                source,
            })?;

            let compressed = compress::compress(&content)?;
            let sealed = self.sealer.seal(&compressed)?;
            let written = self.frames.write_frame(&spec.id, &spec.kind, &sealed)?;

            debug!(
                "packed <{}> type {}, {} raw bytes, {} on the wire",
                spec.id,
                spec.kind,
                content.len(),
                written
            );
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.frames.into_inner()
    }
}

/// One-call form, packs straight into a new container file.
pub fn pack_assets<S: Source>(
    specs: &[AssetSpec],
    output: &Path,
    key: &[u8],
    source: &S,
) -> Result<(), PackError> {
    let file = File::create(output)?;

    let mut packer = Packer::new(BufWriter::new(file), key)?;
    packer.pack(source, specs)?;

    let mut out = packer.into_inner();
    out.flush()?;
    Ok(())
}
