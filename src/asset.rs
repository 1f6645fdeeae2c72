/// An unpacked asset, what the reader hands back after lookup.
///
/// Identifiers are the archive key. The container itself does not enforce
/// uniqueness, a duplicate identifier simply shadows the earlier record
/// once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub kind: String,
    pub content: Vec<u8>,
}

/// What the packer consumes. Content is not carried here, the packer
/// pulls it from a [`Source`](crate::source::Source) at pack time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub id: String,
    pub kind: String,
}

impl AssetSpec {
    pub fn new(id: &str, kind: &str) -> Self {
        AssetSpec {
            id: id.to_string(),
            kind: kind.to_string(),
        }
    }
}
