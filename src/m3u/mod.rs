//! M3U playlist parsing
//!
//! The parser is a pure function over text: no I/O, no failure mode. See
//! [`M3uParser`] for the acceptance rules.

pub mod attributes;
pub mod parser;

pub use attributes::{AttributeTokenizer, ExtinfAttributes};
pub use parser::{M3uParser, MalformedEntry, ParseReport, RejectReason};
