use crate::document::Document;

/// Joins the rewritten README with an appended document such as a changelog.
///
/// Headings of the appended document are pushed down `heading_shift` levels so
/// they nest under the README's own structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAssembler {
    heading_shift: usize,
}

impl DocumentAssembler {
    pub const HEADING_MARKER: char = '#';

    pub fn new(heading_shift: usize) -> Self {
        Self { heading_shift }
    }

    pub fn shift_heading(&self, line: &str) -> String {
        if line.starts_with(Self::HEADING_MARKER) {
            let mut shifted = Self::HEADING_MARKER.to_string().repeat(self.heading_shift);
            shifted.push_str(line);
            shifted
        } else {
            line.to_string()
        }
    }

    /// Serializes `lines` followed by two blank lines and the shifted `appendix`.
    ///
    /// Lines are joined with `\n`; no trailing newline is added.
    pub fn assemble(&self, lines: &[String], appendix: &Document) -> String {
        let mut out = lines.to_vec();
        out.push(String::new());
        out.push(String::new());
        out.extend(appendix.lines().map(|line| self.shift_heading(&line.text)));
        out.join("\n")
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(1)
    }
}
