// ============================================================
// PARSE ATTEMPT
// ============================================================
// Candidate parse parameters tried by the import resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character encodings the resolver knows how to try
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Strict UTF-8; malformed input rejects the candidate
    Utf8,
    /// Only tried when the input starts with a UTF-16LE byte-order mark
    Utf16Le,
    /// Only tried when the input starts with a UTF-16BE byte-order mark
    Utf16Be,
    /// Single-byte fallback that decodes any input
    Latin1,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field delimiters, in the order they are usually tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One combination of encoding, delimiter and header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseAttempt {
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,

    /// Zero-based line index of the header, once it has been located
    pub header_line: Option<usize>,
}

impl ParseAttempt {
    pub fn new(encoding: TextEncoding, delimiter: Delimiter) -> Self {
        Self {
            encoding,
            delimiter,
            header_line: None,
        }
    }

    pub fn at_line(mut self, header_line: usize) -> Self {
        self.header_line = Some(header_line);
        self
    }
}

impl fmt::Display for ParseAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.encoding, self.delimiter)?;
        if let Some(line) = self.header_line {
            write!(f, " (header on line {})", line)?;
        }
        Ok(())
    }
}

/// A rejected candidate and why it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptFailure {
    pub attempt: ParseAttempt,
    pub reason: String,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attempt, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_display() {
        let attempt = ParseAttempt::new(TextEncoding::Latin1, Delimiter::Semicolon);
        assert_eq!(attempt.to_string(), "latin-1/semicolon");
        assert_eq!(
            attempt.at_line(2).to_string(),
            "latin-1/semicolon (header on line 2)"
        );
    }

    #[test]
    fn test_delimiter_bytes() {
        assert_eq!(Delimiter::Comma.as_byte(), b',');
        assert_eq!(Delimiter::Semicolon.as_char(), ';');
        assert_eq!(Delimiter::Tab.as_byte(), b'\t');
    }
}
