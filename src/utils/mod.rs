//! Utility modules shared by the playlist sources and the web layer

pub mod decompression;
pub mod url;

pub use decompression::{CompressionFormat, DecompressionService};
pub use url::UrlUtils;
