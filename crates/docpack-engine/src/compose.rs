use crate::scan::ExampleBlock;

/// Builds the single script handed to the renderer: a fixed preamble followed by
/// one page per example, in example order.
///
/// Example source is not validated here; the renderer reports broken examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptComposer {
    preamble: Vec<String>,
}

impl ScriptComposer {
    pub const PAGE_OPEN: &'static str = "#page[";
    pub const PAGE_CLOSE: &'static str = "];";

    pub fn new(preamble: Vec<String>) -> Self {
        Self { preamble }
    }

    pub fn compose(&self, examples: &[ExampleBlock]) -> String {
        let pages = examples.iter().map(|example| {
            format!(
                "{}{}{}",
                Self::PAGE_OPEN,
                example.source_lines.join("\n"),
                Self::PAGE_CLOSE
            )
        });

        self.preamble
            .iter()
            .cloned()
            .chain(pages)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ScriptComposer {
    fn default() -> Self {
        Self::new(vec![
            r#"#import "lib.typ": *;"#.to_string(),
            "#set page(width: auto, height: auto, margin: 0cm);".to_string(),
        ])
    }
}
