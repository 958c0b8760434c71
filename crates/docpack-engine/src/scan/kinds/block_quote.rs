/// Blockquote lines, as far as the advisory preamble cares about them.
///
/// Only a marker in the very first column counts; indented `>` is ordinary text.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    pub fn is_quote_line(line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }
}
