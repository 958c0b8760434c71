//! Fixture tests for example scanning.
//!
//! Fixtures (.md) and snapshots (.snap) are co-located in `fixtures/`. Each
//! fixture has a snapshot of the rewritten README and one of the composed script.

use crate::{
    compose::ScriptComposer,
    document::Document,
    linker::ImageLinker,
    scan::{ExampleSyntax, Extraction, extract_examples},
};

// Fixture-based snapshot tests

#[test]
fn fixture_board_readme() {
    assert_fixture("board_readme");
}

#[test]
fn fixture_directives_and_quotes() {
    assert_fixture("directives_and_quotes");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/scan/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let linker = ImageLinker::default();
    let extraction = extract_examples(
        &Document::from_text(&md),
        &ExampleSyntax::default(),
        &linker,
    )
    .unwrap();
    check_references(&extraction, &linker);

    let output = extraction.output_lines.join("\n");
    let script = ScriptComposer::default().compose(&extraction.examples);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, output);
        insta::assert_snapshot!(format!("{name}_script"), script);
    });
}

/// The Nth image reference in the output must name the Nth example.
fn check_references(extraction: &Extraction, linker: &ImageLinker) {
    let references: Vec<_> = extraction
        .output_lines
        .iter()
        .filter(|line| line.starts_with("![image]("))
        .cloned()
        .collect();
    let expected: Vec<_> = extraction
        .examples
        .iter()
        .map(|example| linker.reference(example.index))
        .collect();

    assert_eq!(references, expected);
    for (position, example) in extraction.examples.iter().enumerate() {
        assert_eq!(example.index, position + 1);
    }
}

// Invariant tests

/// Running the scanner twice over the same text gives identical results.
#[test]
fn extraction_is_deterministic() {
    let md = "> note\n\n# T\n```example\n%set x\ny\n```\n";
    let syntax = ExampleSyntax::default();
    let linker = ImageLinker::default();

    let first = extract_examples(&Document::from_text(md), &syntax, &linker).unwrap();
    let second = extract_examples(&Document::from_text(md), &syntax, &linker).unwrap();

    assert_eq!(first, second);
}

/// A document that is nothing but advisory produces no output at all.
#[test]
fn advisory_only_document() {
    let md = "\n> one\n>\n> two\n\n";
    let extraction = extract_examples(
        &Document::from_text(md),
        &ExampleSyntax::default(),
        &ImageLinker::default(),
    )
    .unwrap();

    assert!(extraction.output_lines.is_empty());
    assert!(extraction.examples.is_empty());
}

/// Custom image templates flow into the references.
#[test]
fn custom_template_references() {
    let md = "x\n```example\na\n```\n```example\nb\n```";
    let linker = ImageLinker::new("img/{n}.png").unwrap();
    let extraction =
        extract_examples(&Document::from_text(md), &ExampleSyntax::default(), &linker).unwrap();

    check_references(&extraction, &linker);
    assert!(extraction.output_lines.contains(&"![image](img/2.png)".to_string()));
}
