//! Batch parsing agrees with one-at-a-time parsing.

mod helpers;

use estree_bridge::{JsonSourceParser, ParseOptions, parse_batch, parse_for_lint};
use helpers::raw::*;
use serde_json::Value;

/// `name;` repeated programs with distinct identifiers
fn recorded(count: usize) -> Vec<(String, Value)> {
    (0..count)
        .map(|i| {
            let id = format!("v{i}");
            let text = format!("{id};");
            let end = text.len() as u32;
            let raw = file(
                program(vec![statement(ident(&id, 0), 0, end)], end, "module"),
                vec![name(&id, 0), punct(";", end - 1), eof(end)],
                vec![],
            );
            (text, raw)
        })
        .collect()
}

#[test]
fn test_batch_matches_sequential() {
    let programs = recorded(24);
    let mut parser = JsonSourceParser::new();
    for (text, raw) in &programs {
        parser.insert(text.clone(), raw.to_string());
    }
    let sources: Vec<&str> = programs.iter().map(|(text, _)| text.as_str()).collect();
    let options = ParseOptions::default();

    let batch = parse_batch(&parser, &sources, &options);
    assert_eq!(batch.len(), sources.len());
    for (source, result) in sources.iter().zip(batch) {
        let parallel = result.unwrap().to_json();
        let sequential = parse_for_lint(&parser, source, &options).unwrap().to_json();
        assert_eq!(parallel, sequential, "{source}");
    }
}

#[test]
fn test_empty_batch() {
    let parser = JsonSourceParser::new();
    let sources: [&str; 0] = [];
    assert!(parse_batch(&parser, &sources, &ParseOptions::default()).is_empty());
}
