use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::asset::Asset;
use crate::compress;
use crate::frame::reader::FrameReader;
use crate::frame::FrameError;
use crate::seal::{SealError, Sealer};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error(transparent)]
    Key(#[from] SealError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("asset {id}: {source}")]
    Unseal { id: String, source: SealError },
    #[error("asset {id}: corrupt compressed stream")]
    Corrupt { id: String, source: std::io::Error },
    #[error("asset not found: {id}")]
    NotFound { id: String },
}

/// The in-memory index over one fully parsed container.
///
/// Built in one pass at construction and immutable afterwards, lookup is
/// the only operation left.
pub struct Archive {
    assets: HashMap<String, Asset>,
}

impl Archive {
    /// Scan the stream to its end, unsealing and decompressing every
    /// frame into the index as a single fold. The first bad frame fails
    /// the whole load, a partially built index is never handed out.
    ///
    /// The format has no magic number, so a stream that was never a
    /// container and a corrupted container are indistinguishable, both
    /// surface as frame or authentication errors.
    pub fn load<R: Read>(reader: R, key: &[u8]) -> Result<Self, ArchiveError> {
        let sealer = Sealer::new(key)?;

        let mut assets = HashMap::new();
        for frame in FrameReader::new(reader) {
            let frame = frame?;

            let compressed =
                sealer
                    .open(&frame.payload)
                    .map_err(|source| ArchiveError::Unseal {
                        id: frame.id.clone(),
                        source,
                    })?;

            let content =
                compress::decompress(&compressed).map_err(|source| ArchiveError::Corrupt {
                    id: frame.id.clone(),
                    source,
                })?;

            debug!(
                "unpacked <{}> type {}, {} bytes",
                frame.id,
                frame.kind,
                content.len()
            );

            // Later record shadows an earlier one under the same id
            assets.insert(
                frame.id.clone(),
                Asset {
                    id: frame.id,
                    kind: frame.kind,
                    content,
                },
            );
        }

        Ok(Archive { assets })
    }

    /// Load a container held completely in memory.
    pub fn from_bytes(data: &[u8], key: &[u8]) -> Result<Self, ArchiveError> {
        Self::load(data, key)
    }

    /// Load a container file.
    pub fn open<P: AsRef<Path>>(path: P, key: &[u8]) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file), key)
    }

    pub fn get(&self, id: &str) -> Result<&Asset, ArchiveError> {
        self.assets.get(id).ok_or_else(|| ArchiveError::NotFound {
            id: id.to_string(),
        })
    }
}


#[cfg(test)]
mod test_archive_failures {
    use super::*;
    use crate::asset::AssetSpec;
    use crate::frame::builder::FrameBuilder;
    use crate::pack::Packer;
    use crate::seal::NONCE_SIZE;
    use crate::source::mem::MemSource;
    use std::io::Cursor;

    const KEY: [u8; 16] = [1; 16];

    fn pack_one(id: &str, content: &[u8]) -> Vec<u8> {
        let mut source = MemSource::new();
        source.insert(id, content);

        let mut packer = Packer::new(Cursor::new(Vec::new()), &KEY).unwrap();
        packer.pack(&source, &[AssetSpec::new(id, "bin")]).unwrap();
        packer.into_inner().into_inner()
    }

    // Offset of the sealed payload within a single-frame container
    fn payload_start(data: &[u8]) -> usize {
        let mut delims = 0;
        for (i, b) in data.iter().enumerate() {
            if *b == b':' {
                delims += 1;
                if delims == 3 {
                    return i + 1;
                }
            }
        }
        panic!("not a frame");
    }

    #[test]
    fn invalid_key_rejected_at_construction() {
        assert!(matches!(
            Archive::from_bytes(&[], &[0u8; 17]),
            Err(ArchiveError::Key(SealError::InvalidKeyLength { len: 17 }))
        ));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let data = pack_one("a", b"secret stuff");

        let result = Archive::from_bytes(&data, &[2u8; 16]);
        assert!(matches!(
            result,
            Err(ArchiveError::Unseal {
                id,
                source: SealError::AuthenticationFailed,
            }) if id == "a"
        ));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let mut data = pack_one("a", b"secret stuff");

        // First ciphertext byte, right behind the nonce
        let target = payload_start(&data) + NONCE_SIZE;
        data[target] ^= 0x01;

        assert!(matches!(
            Archive::from_bytes(&data, &KEY),
            Err(ArchiveError::Unseal {
                source: SealError::AuthenticationFailed,
                ..
            })
        ));
    }

    #[test]
    fn tampered_tag_fails_authentication() {
        let mut data = pack_one("a", b"secret stuff");

        let last = data.len() - 1;
        data[last] ^= 0x01;

        assert!(matches!(
            Archive::from_bytes(&data, &KEY),
            Err(ArchiveError::Unseal {
                source: SealError::AuthenticationFailed,
                ..
            })
        ));
    }

    #[test]
    fn truncated_payload_fails_parse_not_lookup() {
        let data = pack_one("a", b"secret stuff");

        // Cut mid-payload, the declared length can no longer be honored
        let cut = payload_start(&data) + 4;
        let result = Archive::from_bytes(&data[..cut], &KEY);

        assert!(matches!(
            result,
            Err(ArchiveError::Frame(FrameError::TruncatedPayload { .. }))
        ));
    }

    #[test]
    fn truncated_header_fails_parse() {
        let data = pack_one("a", b"secret stuff");

        // Cut inside the header, before the third delimiter
        let result = Archive::from_bytes(&data[..3], &KEY);

        assert!(matches!(
            result,
            Err(ArchiveError::Frame(FrameError::TruncatedHeader { .. }))
        ));
    }

    #[test]
    fn garbage_stream_is_rejected() {
        // No magic number, a non-container stream fails as a bad frame
        let result = Archive::from_bytes(b"this was never a container", &KEY);
        assert!(matches!(result, Err(ArchiveError::Frame(_))));
    }

    #[test]
    fn authentic_but_not_gzip_is_corrupt_not_auth_failure() {
        // Seal bytes that were never compressed, the archive must report
        // this as a corrupt stream, distinct from an authentication error
        let sealer = Sealer::new(&KEY).unwrap();
        let sealed = sealer.seal(b"authentic but not gzip").unwrap();

        let mut builder = FrameBuilder::new(Cursor::new(Vec::new()));
        builder.write_frame("a", "bin", &sealed).unwrap();
        let data = builder.into_inner().into_inner();

        assert!(matches!(
            Archive::from_bytes(&data, &KEY),
            Err(ArchiveError::Corrupt { id, .. }) if id == "a"
        ));
    }

    #[test]
    fn bad_second_frame_fails_the_whole_load() {
        let mut data = pack_one("a", b"good frame");
        let second = pack_one("b", b"bad frame");

        // Append the second frame minus its last byte
        data.extend_from_slice(&second[..second.len() - 1]);

        // The first frame alone would parse, but the load is atomic
        assert!(Archive::from_bytes(&data, &KEY).is_err());
    }
}
