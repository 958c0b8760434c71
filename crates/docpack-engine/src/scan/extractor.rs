use thiserror::Error;

use crate::{document::LineRef, linker::ImageLinker};

use super::{
    ExampleSyntax,
    classify::{LineClassifier, LineRole, ScanState},
    kinds::{CodeFence, Directive},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Failed to parse document: example block opened at line {line} is never closed")]
    Unterminated { line: usize },
}

/// One runnable example, sealed when its closing fence is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleBlock {
    /// 1-based position among the document's examples.
    pub index: usize,
    /// Body lines with directives already translated.
    pub source_lines: Vec<String>,
}

/// Result of scanning a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub output_lines: Vec<String>,
    pub examples: Vec<ExampleBlock>,
}

pub struct ExampleExtractor<'a> {
    syntax: &'a ExampleSyntax,
    classifier: LineClassifier<'a>,
    linker: &'a ImageLinker,
    state: ScanState,
    buffer: Vec<String>,
    /// Line number of the fence that opened the current example
    opened_at: usize,
    out: Extraction,
}

impl<'a> ExampleExtractor<'a> {
    pub fn new(syntax: &'a ExampleSyntax, linker: &'a ImageLinker) -> Self {
        Self {
            syntax,
            classifier: LineClassifier::new(syntax),
            linker,
            state: ScanState::default(),
            buffer: vec![],
            opened_at: 0,
            out: Extraction::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn push(&mut self, line: &LineRef) {
        let role = self.classifier.classify(self.state, &line.text);

        match role {
            LineRole::Advisory => {}
            LineRole::Passthrough => self.emit(&line.text),
            LineRole::FenceOpen => self.open_example(line),
            LineRole::FenceClose => self.close_example(&line.text),
            LineRole::ExampleLine => {
                self.emit(&line.text);
                self.buffer.push(line.text.clone());
            }
            LineRole::ExampleDirective => {
                if let Some(translated) = Directive::translate(
                    &line.text,
                    &self.syntax.directive_marker,
                    &self.syntax.renderer_directive,
                ) {
                    self.buffer.push(translated);
                }
            }
        }

        self.state = self.state.after(role);
    }

    pub fn finish(self) -> Result<Extraction, ExtractError> {
        if self.state == ScanState::InExample {
            return Err(ExtractError::Unterminated {
                line: self.opened_at,
            });
        }
        Ok(self.out)
    }

    fn emit(&mut self, line: &str) {
        self.out.output_lines.push(line.to_string());
    }

    fn open_example(&mut self, line: &LineRef) {
        let retagged = CodeFence::retag(
            &line.text,
            &self.syntax.example_tag,
            &self.syntax.rendered_tag,
        )
        .unwrap_or_else(|| line.text.clone());
        self.emit(&retagged);
        self.buffer.clear();
        self.opened_at = line.number;
    }

    fn close_example(&mut self, line: &str) {
        let index = self.out.examples.len() + 1;
        self.out.examples.push(ExampleBlock {
            index,
            source_lines: std::mem::take(&mut self.buffer),
        });

        self.emit(line);
        self.emit("");
        let reference = self.linker.reference(index);
        self.emit(&reference);
        self.emit("");
    }
}
