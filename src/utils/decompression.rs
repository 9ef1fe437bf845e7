#[cfg(feature = "compression-gzip")]
use flate2::read::GzDecoder;
#[cfg(feature = "compression-gzip")]
use std::io::Read;

use crate::errors::{SourceError, SourceResult};

/// Compression formats detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Magic byte detection and decompression for playlist bodies
pub struct DecompressionService;

impl DecompressionService {
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data).map(|kind| kind.mime_type()) {
            Some("application/gzip") => CompressionFormat::Gzip,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress if needed and decode as UTF-8
    ///
    /// A leading byte order mark is stripped.
    pub fn decode_text(data: &[u8]) -> SourceResult<String> {
        let bytes = match Self::detect_compression_format(data) {
            CompressionFormat::Gzip => Self::decompress_gzip(data)?,
            CompressionFormat::Uncompressed => data.to_vec(),
        };

        let text = String::from_utf8(bytes)
            .map_err(|e| SourceError::decode(format!("playlist is not valid UTF-8: {e}")))?;

        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    #[cfg(feature = "compression-gzip")]
    fn decompress_gzip(data: &[u8]) -> SourceResult<Vec<u8>> {
        let mut decoder = GzDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| SourceError::decode(format!("Failed to decompress gzip data: {e}")))?;
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-gzip"))]
    fn decompress_gzip(_data: &[u8]) -> SourceResult<Vec<u8>> {
        Err(SourceError::decode(
            "gzip playlist received but gzip support is not compiled in",
        ))
    }
}
