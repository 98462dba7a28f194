//! zlib-format deflate at maximum compression.

use std::io::Read;

use flate2::Compression;
use flate2::read::ZlibEncoder;

use crate::error::{GlyphtuneError, GlyphtuneResult};

/// Compress `data` into a zlib-format deflate stream at the highest level.
///
/// Empty input is valid and produces a (small, non-empty) well-formed zlib
/// stream. Any zlib-compatible inflater recovers the exact input bytes.
pub fn deflate_best(data: &[u8]) -> GlyphtuneResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::best());
    let mut compressed = Vec::new();
    encoder
        .read_to_end(&mut compressed)
        .map_err(|e| GlyphtuneError::encoding(format!("zlib compression failed: {e}")))?;
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut decoder = ZlibDecoder::new(data);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn roundtrip_recovers_input() {
        let data = b"15,0,0,4095,\r\n15,0,0,0,\r\n".repeat(40);
        let compressed = deflate_best(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(inflate(&compressed), data);
    }

    #[test]
    fn empty_input_compresses_without_error() {
        let compressed = deflate_best(b"").unwrap();
        assert!(!compressed.is_empty());
        assert_eq!(inflate(&compressed), b"");
    }

    #[test]
    fn output_carries_zlib_header() {
        // 0x78 is the zlib CMF byte for deflate with a 32 KiB window.
        let compressed = deflate_best(b"hello").unwrap();
        assert_eq!(compressed[0], 0x78);
    }
}
