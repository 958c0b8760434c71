use std::path::Path;

use xi_rope::Rope;

use crate::io::{self, IoError};

/// A single line of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number in the source text.
    pub number: usize,
    /// The line text without its terminator (`\n` or `\r\n`).
    pub text: String,
}

/// An immutable text document, read once and scanned line by line.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self, IoError> {
        io::read_file(path).map(|text| Self::from_text(&text))
    }

    /// Returns an iterator over the document's lines.
    ///
    /// A trailing newline does not produce an extra empty line.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        self.rope
            .lines_raw(..)
            .enumerate()
            .map(|(i, line)| LineRef {
                number: i + 1,
                text: line.trim_end_matches(['\r', '\n']).to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
