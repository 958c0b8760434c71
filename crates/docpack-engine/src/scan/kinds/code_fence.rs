/// Backtick code fences.
///
/// Example fences are recognised by prefix only: ```` ```example ```` opens a
/// block, and any line starting with ```` ``` ```` closes it.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Whether `line` opens a fenced block tagged `tag`.
    pub fn opens(line: &str, tag: &str) -> bool {
        line.strip_prefix(Self::BACKTICKS)
            .is_some_and(|rest| rest.starts_with(tag))
    }

    /// Whether `line` closes the currently open fence.
    pub fn closes(line: &str) -> bool {
        line.starts_with(Self::BACKTICKS)
    }

    /// Replaces the language tag of an opening fence, keeping anything after it.
    ///
    /// Returns `None` if `line` does not open a block tagged `from`.
    pub fn retag(line: &str, from: &str, to: &str) -> Option<String> {
        let rest = line.strip_prefix(Self::BACKTICKS)?.strip_prefix(from)?;
        Some(format!("{}{to}{rest}", Self::BACKTICKS))
    }
}
