//! Content line accumulation.

use almanac_core::constants::LINE_BREAK;

/// Accumulates CRLF-terminated content lines.
#[derive(Debug, Default, Clone)]
pub struct ContentLines {
    buf: String,
}

impl ContentLines {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one content line followed by CRLF.
    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(line.as_ref());
        self.buf.push_str(LINE_BREAK);
        self
    }

    /// Appends a `NAME:value` property line.
    pub fn property(&mut self, name: &str, value: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(name);
        self.buf.push(':');
        self.line(value)
    }

    /// Appends pre-rendered lines, which must already end in CRLF.
    pub fn raw(&mut self, block: &str) -> &mut Self {
        self.buf.push_str(block);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}
