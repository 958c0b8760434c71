use super::{
    ExampleSyntax,
    kinds::{BlockQuote, CodeFence, Directive},
};

/// Where the scanner is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Still inside the leading advisory preamble. Never re-entered once left.
    #[default]
    BeforeContent,
    Passthrough,
    InExample,
}

/// What a single line means given the state it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Blank or blockquote line of the leading preamble; dropped.
    Advisory,
    FenceOpen,
    FenceClose,
    /// Example body line: shown in the output and kept as source.
    ExampleLine,
    /// Directive inside an example: kept as source only.
    ExampleDirective,
    Passthrough,
}

impl ScanState {
    /// The state after a line with `role` has been consumed.
    pub fn after(self, role: LineRole) -> ScanState {
        match role {
            LineRole::Advisory => ScanState::BeforeContent,
            LineRole::FenceOpen | LineRole::ExampleLine | LineRole::ExampleDirective => {
                ScanState::InExample
            }
            LineRole::FenceClose | LineRole::Passthrough => ScanState::Passthrough,
        }
    }
}

/// Classifies lines for the extraction phase.
pub struct LineClassifier<'a> {
    syntax: &'a ExampleSyntax,
}

impl<'a> LineClassifier<'a> {
    pub fn new(syntax: &'a ExampleSyntax) -> Self {
        Self { syntax }
    }

    /// Classifies `line` as read in `state`.
    ///
    /// The first line of real content seen in `BeforeContent` is classified as
    /// if already in `Passthrough`, so no line is lost on the transition.
    pub fn classify(&self, state: ScanState, line: &str) -> LineRole {
        match state {
            ScanState::BeforeContent => {
                if line.trim().is_empty() || BlockQuote::is_quote_line(line) {
                    LineRole::Advisory
                } else {
                    self.classify(ScanState::Passthrough, line)
                }
            }
            ScanState::Passthrough => {
                if CodeFence::opens(line, &self.syntax.example_tag) {
                    LineRole::FenceOpen
                } else {
                    LineRole::Passthrough
                }
            }
            ScanState::InExample => {
                if CodeFence::closes(line) {
                    LineRole::FenceClose
                } else if Directive::is_directive(line, &self.syntax.directive_marker) {
                    LineRole::ExampleDirective
                } else {
                    LineRole::ExampleLine
                }
            }
        }
    }
}
