use docpack_engine::{
    Document, ExampleSyntax, ExtractError, Extraction, ImageLinker, ScriptComposer,
    extract_examples,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn extract(text: &str) -> Result<Extraction, ExtractError> {
    extract_examples(
        &Document::from_text(text),
        &ExampleSyntax::default(),
        &ImageLinker::default(),
    )
}

/// A document with `n` examples separated by prose.
fn document_with_examples(n: usize) -> String {
    let mut text = String::from("> advisory\n\n# Title\n");
    for i in 1..=n {
        text.push_str(&format!("\nParagraph {i}\n\n```example\n%set text(size: {i}pt)\n#board({i})\n```\n"));
    }
    text
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(7)]
#[case(12)]
fn index_correspondence(#[case] n: usize) {
    let linker = ImageLinker::default();
    let extraction = extract(&document_with_examples(n)).unwrap();

    let references: Vec<_> = extraction
        .output_lines
        .iter()
        .filter(|line| line.starts_with("![image]"))
        .cloned()
        .collect();

    assert_eq!(references.len(), n);
    assert_eq!(extraction.examples.len(), n);
    for (k, reference) in references.iter().enumerate() {
        assert_eq!(reference, &format!("![image]({})", linker.path(k + 1)));
        assert_eq!(extraction.examples[k].source_lines[1], format!("#board({})", k + 1));
    }
}

const MIXED: &str = concat!(
    "> advisory\n>\n\n",
    "# Title\n\n\nIntro\n\n",
    "```example\n%set text(size: 2pt)\n#board(1)\n```\n",
    "Right after\n\n> quoted later\n\n",
    "```rust\nfn main() {}\n```\n",
    "```example\n#board(2)\n```\n\n\nTail",
);

/// Source lines outside example blocks, after the leading advisory.
fn source_passthrough(text: &str) -> Vec<String> {
    let mut kept = vec![];
    let mut in_example = false;
    let lines = text
        .lines()
        .skip_while(|line| line.is_empty() || line.starts_with('>'));
    for line in lines {
        if in_example {
            in_example = !line.starts_with("```");
        } else if line.starts_with("```example") {
            in_example = true;
        } else {
            kept.push(line.to_string());
        }
    }
    kept
}

/// Output lines outside rendered blocks, minus the lines inserted after each block.
fn output_passthrough(lines: &[String], linker: &ImageLinker) -> Vec<String> {
    let mut kept = vec![];
    let mut examples = 0;
    let mut lines = lines.iter();
    while let Some(line) = lines.next() {
        if !line.starts_with("```typ") {
            kept.push(line.clone());
            continue;
        }
        for body in lines.by_ref() {
            if body.starts_with("```") {
                break;
            }
        }
        examples += 1;
        let inserted: Vec<_> = lines.by_ref().take(3).cloned().collect();
        assert_eq!(inserted, vec![String::new(), linker.reference(examples), String::new()]);
    }
    kept
}

#[test]
fn passthrough_lines_keep_their_order() {
    let linker = ImageLinker::default();
    let extraction = extract(MIXED).unwrap();

    let expected = vec![
        "# Title",
        "",
        "",
        "Intro",
        "",
        "Right after",
        "",
        "> quoted later",
        "",
        "```rust",
        "fn main() {}",
        "```",
        "",
        "",
        "Tail",
    ];
    assert_eq!(source_passthrough(MIXED), expected);
    assert_eq!(output_passthrough(&extraction.output_lines, &linker), expected);
}

#[rstest]
#[case(1)]
#[case(5)]
fn generated_passthrough_keeps_blank_lines(#[case] n: usize) {
    let text = document_with_examples(n);
    let extraction = extract(&text).unwrap();

    assert_eq!(
        output_passthrough(&extraction.output_lines, &ImageLinker::default()),
        source_passthrough(&text)
    );
}

#[test]
fn advisory_block_is_stripped() {
    let extraction = extract("\n\n> Generated file\n> do not edit\n\nFirst line\n> later quote").unwrap();

    assert_eq!(extraction.output_lines, vec!["First line", "> later quote"]);
}

#[test]
fn directive_is_translated_and_hidden() {
    let extraction = extract("Intro\n```example\n%set x = 1\nbody\n```").unwrap();
    let script = ScriptComposer::new(vec![]).compose(&extraction.examples);

    assert!(script.lines().any(|line| line.contains("#set x = 1")));
    assert!(!extraction.output_lines.iter().any(|line| line.contains("set x = 1")));
    assert!(extraction.output_lines.contains(&"body".to_string()));
}

#[test]
fn unterminated_block_is_structural_error() {
    let result = extract(&format!("{}```example\n#board()", document_with_examples(2)));

    assert!(matches!(result, Err(ExtractError::Unterminated { .. })));
}

#[test]
fn extraction_is_idempotent() {
    let text = document_with_examples(4);
    let composer = ScriptComposer::default();

    let first = extract(&text).unwrap();
    let second = extract(&text).unwrap();

    assert_eq!(first.output_lines.join("\n"), second.output_lines.join("\n"));
    assert_eq!(composer.compose(&first.examples), composer.compose(&second.examples));
}
