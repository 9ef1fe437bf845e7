//! Playlist sources
//!
//! Concrete adapters behind the [`PlaylistSource`] trait: local file, remote
//! HTTP, embedded constant, ordered chain and the single-flight cache.

pub mod cached;
pub mod chain;
pub mod embedded;
pub mod factory;
pub mod file;
pub mod http;
pub mod traits;

pub use cached::CachedPlaylistSource;
pub use chain::ChainPlaylistSource;
pub use embedded::{EmbeddedPlaylistSource, SAMPLE_PLAYLIST};
pub use factory::PlaylistSourceFactory;
pub use file::FilePlaylistSource;
pub use http::HttpPlaylistSource;
pub use traits::PlaylistSource;
