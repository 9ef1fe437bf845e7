//! `#EXTINF` attribute tokenizer
//!
//! Splits the attribute section of an `#EXTINF` line into `key="value"`
//! pairs. Values are taken verbatim up to the closing quote, so `=` and `,`
//! inside a quoted value never start a new pair.

/// Iterator over `key=value` pairs in an `#EXTINF` attribute section
///
/// Bare tokens without `=` (such as the leading duration `-1`) are skipped.
/// An unterminated quoted value runs to the end of the input.
pub struct AttributeTokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> AttributeTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, ch)| !predicate(*ch))
            .map_or(rest.len(), |(idx, _)| idx);
        self.pos += len;
        &rest[..len]
    }

    fn skip_char(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.pos += ch.len_utf8();
        }
    }
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')
}

impl<'a> Iterator for AttributeTokenizer<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            if self.rest().is_empty() {
                return None;
            }

            let key = self.take_while(is_key_char);
            if key.is_empty() {
                // stray punctuation, e.g. an orphan quote
                self.skip_char();
                continue;
            }

            if !self.rest().starts_with('=') {
                // bare token such as the duration
                self.take_while(|ch| !ch.is_whitespace());
                continue;
            }
            self.pos += 1;

            let value = if self.rest().starts_with('"') {
                self.pos += 1;
                let rest = self.rest();
                match rest.find('"') {
                    Some(end) => {
                        self.pos += end + 1;
                        &rest[..end]
                    }
                    None => {
                        self.pos = self.input.len();
                        rest
                    }
                }
            } else {
                self.take_while(|ch| !ch.is_whitespace())
            };

            return Some((key, value));
        }
    }
}

/// The recognised attributes of an `#EXTINF` line
///
/// Missing attributes are empty strings. Keys outside the recognised set are
/// not mapped onto any field; their names are kept in `ignored`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtinfAttributes {
    pub tvg_id: String,
    pub tvg_name: String,
    pub tvg_logo: String,
    pub group_title: String,
    pub ignored: Vec<String>,
}

impl ExtinfAttributes {
    pub fn parse(section: &str) -> Self {
        let mut attributes = Self::default();

        for (key, value) in AttributeTokenizer::new(section) {
            let slot = match key.to_ascii_lowercase().as_str() {
                "tvg-id" => &mut attributes.tvg_id,
                "tvg-name" => &mut attributes.tvg_name,
                "tvg-logo" => &mut attributes.tvg_logo,
                "group-title" => &mut attributes.group_title,
                _ => {
                    attributes.ignored.push(key.to_string());
                    continue;
                }
            };
            *slot = value.trim().to_string();
        }

        attributes
    }
}
