//! M3U playlist parser
//!
//! Turns raw playlist text into ordinal-numbered channels. Parsing never
//! fails: records without a usable stream URL are dropped and reported in
//! [`ParseReport::rejected`], and they do not consume an ordinal.

use tracing::debug;

use super::attributes::ExtinfAttributes;
use crate::models::Channel;

const EXTINF_PREFIX: &str = "#EXTINF:";
const STREAM_URL_PREFIX: &str = "http";

/// Why an `#EXTINF` record was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The next non-blank line does not start with `http`
    NotHttp { candidate: String },
    /// The record is the last non-blank line of the input
    MissingUrl,
}

/// An `#EXTINF` record the parser dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// 1-based line number of the `#EXTINF` line
    pub line_number: usize,
    pub display_name: String,
    pub reason: RejectReason,
}

/// Outcome of a parse: accepted channels in source order plus diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub channels: Vec<Channel>,
    pub rejected: Vec<MalformedEntry>,
    /// The first non-blank line was not `#EXTM3U`
    pub missing_header: bool,
}

/// A parsed `#EXTINF` line before its URL is known
struct ExtinfRecord {
    display_name: String,
    attributes: ExtinfAttributes,
}

impl ExtinfRecord {
    /// Parse the text following `#EXTINF:`
    ///
    /// The display name is whatever follows the last comma on the line, quoted
    /// or not; everything before it is the duration and attribute section.
    fn parse(body: &str) -> Self {
        let (section, name) = match body.rfind(',') {
            Some(pos) => (&body[..pos], body[pos + 1..].trim()),
            None => (body, ""),
        };

        Self {
            display_name: name.to_string(),
            attributes: ExtinfAttributes::parse(section),
        }
    }

    fn into_channel(self, ordinal: u32, stream_url: &str) -> Channel {
        let display_name = if !self.display_name.is_empty() {
            self.display_name
        } else if !self.attributes.tvg_name.is_empty() {
            self.attributes.tvg_name.clone()
        } else {
            format!("Channel {ordinal}")
        };

        Channel {
            ordinal,
            display_name,
            stream_url: stream_url.to_string(),
            tvg_id: self.attributes.tvg_id,
            tvg_name: self.attributes.tvg_name,
            logo: self.attributes.tvg_logo,
            group_title: self.attributes.group_title,
        }
    }
}

/// Stateless M3U parser
pub struct M3uParser;

impl M3uParser {
    /// Parse raw text into channels, discarding diagnostics
    pub fn parse(raw: &str) -> Vec<Channel> {
        Self::parse_with_report(raw).channels
    }

    /// Parse raw text into channels and keep track of dropped records
    pub fn parse_with_report(raw: &str) -> ParseReport {
        let lines: Vec<&str> = raw.lines().map(str::trim).collect();
        let mut report = ParseReport {
            missing_header: !lines
                .iter()
                .find(|line| !line.is_empty())
                .is_some_and(|line| line.trim_start_matches('\u{feff}').starts_with("#EXTM3U")),
            ..ParseReport::default()
        };

        let mut next_ordinal: u32 = 1;
        let mut index = 0;

        while index < lines.len() {
            let Some(body) = lines[index].strip_prefix(EXTINF_PREFIX) else {
                index += 1;
                continue;
            };

            let record = ExtinfRecord::parse(body);
            let candidate = lines
                .iter()
                .enumerate()
                .skip(index + 1)
                .find(|(_, line)| !line.is_empty());

            match candidate {
                Some((url_index, url)) if url.starts_with(STREAM_URL_PREFIX) => {
                    report.channels.push(record.into_channel(next_ordinal, url));
                    next_ordinal += 1;
                    index = url_index + 1;
                }
                Some((_, other)) => {
                    debug!(
                        "Dropping EXTINF record '{}' at line {}: next line is not a stream URL",
                        record.display_name,
                        index + 1
                    );
                    report.rejected.push(MalformedEntry {
                        line_number: index + 1,
                        display_name: record.display_name,
                        reason: RejectReason::NotHttp {
                            candidate: other.to_string(),
                        },
                    });
                    // the candidate may itself open a new record
                    index += 1;
                }
                None => {
                    debug!(
                        "Dropping EXTINF record '{}' at line {}: no stream URL before end of input",
                        record.display_name,
                        index + 1
                    );
                    report.rejected.push(MalformedEntry {
                        line_number: index + 1,
                        display_name: record.display_name,
                        reason: RejectReason::MissingUrl,
                    });
                    index += 1;
                }
            }
        }

        debug!(
            "Parsed {} channels ({} rejected)",
            report.channels.len(),
            report.rejected.len()
        );
        report
    }
}
