//! Encrypted asset container
//!
//! Packs a set of named, typed binary assets into one container stream
//! and loads such a stream back into an identifier-addressable, read-only
//! index. Each asset is gzip-compressed, then sealed with AES-GCM, then
//! framed; only the frame headers are in the clear.
//!
//! Writing walks the asset list in order and appends one frame per asset
//! to the sink. Reading scans the stream sequentially, every frame is
//! unsealed and decompressed as it is parsed, and the results fold into
//! the [`Archive`] index, which resolves duplicate identifiers
//! last-write-wins.
//!
//! # Container format
//!
//! A container is a bare concatenation of frames, no magic number,
//! version field, or trailing index. See [`frame`] for the byte-level
//! layout. The sealed payload of every frame is
//! `nonce(12) || ciphertext || tag(16)` over the gzip stream of the
//! asset content, under one symmetric key per container (16, 24, or 32
//! bytes, selecting the AES strength).
//!
//! ```
//! use apack::{pack::Packer, source::mem::MemSource, Archive, AssetSpec};
//!
//! let key = [7u8; 32];
//!
//! let mut source = MemSource::new();
//! source.insert("logo.png", b"png bytes");
//!
//! let mut packer = Packer::new(Vec::new(), &key).unwrap();
//! packer.pack(&source, &[AssetSpec::new("logo.png", "image/png")]).unwrap();
//! let container = packer.into_inner();
//!
//! let archive = Archive::from_bytes(&container, &key).unwrap();
//! assert_eq!(archive.get("logo.png").unwrap().content, b"png bytes");
//! ```
pub mod archive;
pub mod asset;
pub mod compress;
pub mod frame;
pub mod pack;
pub mod seal;
pub mod source;

pub use crate::archive::{Archive, ArchiveError};
pub use crate::asset::{Asset, AssetSpec};
pub use crate::pack::{pack_assets, PackError, Packer};
