use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Gzip a payload. The output carries the deflate stream plus the gzip
/// CRC32 trailer, so a corrupted stream is caught at [`decompress`] time.
///
/// Incompressible input will come out slightly larger than it went in,
/// that is fine, the container format makes no size promises.
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inverse of [`compress`]. A stream that is not valid gzip surfaces as an
/// `io::Error` from the decoder, which the archive layer reports apart
/// from decryption failure.
pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod test_compress_roundtrip {
    use super::*;

    #[test]
    fn small_data_roundtrip() {
        let data = b"Hello World!";

        let comp = compress(data).unwrap();
        assert_ne!(&comp[..], &data[..]);

        assert_eq!(decompress(&comp).unwrap(), data);
    }

    #[test]
    fn empty_data_roundtrip() {
        let comp = compress(&[]).unwrap();
        assert!(!comp.is_empty());

        assert_eq!(decompress(&comp).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn repetitive_data_shrinks() {
        let data = b"Hello World!".repeat(512);

        let comp = compress(&data).unwrap();
        assert!(comp.len() < data.len());

        assert_eq!(decompress(&comp).unwrap(), data);
    }

    #[test]
    fn incompressible_data_grows_and_roundtrips() {
        // Cheap high-entropy bytes, xorshift keeps the test deterministic
        let mut state: u32 = 0x2545_f491;
        let data: Vec<u8> = (0..4096)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();

        let comp = compress(&data).unwrap();
        assert!(comp.len() >= data.len());

        assert_eq!(decompress(&comp).unwrap(), data);
    }

    #[test]
    fn corrupt_stream_is_an_error() {
        assert!(decompress(b"not a gzip stream").is_err());
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let comp = compress(b"Hello World!").unwrap();
        assert!(decompress(&comp[..comp.len() - 4]).is_err());
    }
}
