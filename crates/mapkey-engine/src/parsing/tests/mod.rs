//! Scenario tests for the parsing module.
//!
//! Fixture files (`.pro`) live in `fixtures/`. Every scenario also runs the
//! invariant checks over the blocks and the full token stream.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    blocks::Segmented,
    definition::{MapkeyDefinition, build_definition},
    document_tokens, invariants,
    rope::span::Span,
    segment,
    tokens::{Token, TokenKind},
};

struct Parsed {
    seg: Segmented,
    tokens: Vec<Token>,
    defs: Vec<MapkeyDefinition>,
}

fn parse_checked(src: &str) -> Parsed {
    let rope = Rope::from(src);
    let seg = segment(&rope);
    let tokens = document_tokens(&seg);
    invariants::check(&rope, &seg.blocks, &tokens);
    let defs = seg.blocks.iter().map(build_definition).collect();
    Parsed { seg, tokens, defs }
}

fn load_fixture(name: &str) -> String {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(format!("{fixtures_dir}/{name}.pro")).unwrap()
}

fn kinds_of(tokens: &[Token], kind: TokenKind) -> Vec<&str> {
    tokens
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.value.as_str())
        .collect()
}

// Fixture scenarios

#[test]
fn fixture_drawing_definitions() {
    let p = parse_checked(&load_fixture("drawing"));

    let names: Vec<_> = p.defs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["$F2", "cc", "sv", "pl", "half"]);

    assert_eq!(p.defs[0].label.as_deref(), Some("Open a part"));
    assert_eq!(p.defs[0].description.as_deref(), Some("Open part"));
    assert_eq!(p.defs[0].called_names, vec!["cc"]);

    assert_eq!(p.defs[1].description.as_deref(), Some("Close current"));
    assert!(p.defs[1].called_names.is_empty());

    assert_eq!(p.defs[2].label.as_deref(), Some("Save view"));
    assert_eq!(p.defs[2].called_names, vec!["cc", "pl"]);

    assert_eq!(p.defs[3].system_instruction.as_deref(), Some("start plot.bat"));

    assert_eq!(p.defs[4].description.as_deref(), Some("Never finished"));
    assert!(!p.defs[4].terminated);
    assert!(p.defs[..4].iter().all(|d| d.terminated));
}

#[test]
fn fixture_drawing_document_tokens() {
    let p = parse_checked(&load_fixture("drawing"));

    assert_eq!(
        kinds_of(&p.seg.tokens, TokenKind::Comment),
        vec!["! Drawing shortcuts"]
    );
    assert_eq!(
        kinds_of(&p.seg.tokens, TokenKind::RegionStart),
        vec!["!#region Drawing mapkeys"]
    );
    assert_eq!(kinds_of(&p.seg.tokens, TokenKind::RegionEnd), vec!["!#endregion"]);
    assert!(p.seg.tokens.iter().all(|t| t.block_id.is_none()));

    // The comment inside `sv` belongs to its block.
    let inner: Vec<_> = p
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment && t.block_id.is_some())
        .collect();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].block_id, Some(2));
}

// Inline scenarios

#[test]
fn simple_record() {
    let src = "mapkey $F2 @MAPKEY_NAMEOpen part;@MAPKEY_LABELOpen;%cc;\n";
    let p = parse_checked(src);

    assert_eq!(p.defs.len(), 1);
    let d = &p.defs[0];
    assert_eq!(d.name, "$F2");
    assert_eq!(d.description.as_deref(), Some("Open part"));
    assert_eq!(d.label.as_deref(), Some("Open"));
    assert_eq!(d.called_names, vec!["cc"]);
    assert_eq!(d.range, Span::new(0, src.len() - 1));

    assert_eq!(kinds_of(&p.tokens, TokenKind::Keyword), vec!["mapkey"]);
    assert_eq!(kinds_of(&p.tokens, TokenKind::Name), vec!["$F2"]);
    assert_eq!(kinds_of(&p.tokens, TokenKind::Terminator).len(), 3);
}

#[test]
fn multiline_label_is_flattened() {
    let src = "mapkey $F2 @MAPKEY_NAMEOpen part;@MAPKEY_LABELOpen\\\n\
               mapkey(continued) a part;~ Command `ProCmdModelOpen`;\\\n\
               mapkey(continued) %cc;\n";
    let p = parse_checked(src);

    let label = p
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::Label)
        .unwrap();
    assert_eq!(label.value, "Open a part");
    assert_eq!(&src[label.span.start..label.span.start + 4], "Open");
    assert_eq!(&src[label.span.end..label.span.end + 1], ";");

    assert_eq!(kinds_of(&p.tokens, TokenKind::ContinuationMarker).len(), 2);
    assert_eq!(kinds_of(&p.tokens, TokenKind::Escape).len(), 2);
    assert_eq!(p.defs[0].called_names, vec!["cc"]);
}

#[test]
fn dangling_call_is_recorded() {
    let p = parse_checked("mapkey a %ghost;\n");
    assert_eq!(p.defs[0].called_names, vec!["ghost"]);
}

#[test]
fn unterminated_record_closes_at_blank_line() {
    let src = "mapkey a x\\\nmapkey(continued) y\\\n\nmapkey b z;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 2);
    let a = &p.seg.blocks[0];
    assert!(!a.terminated);
    assert_eq!(a.raw_text, "mapkey a x\\\nmapkey(continued) y\\");
    assert!(p.seg.blocks[1].terminated);
}

#[test]
fn adjacent_declarations_split_before_second() {
    let src = "mapkey a x\\\nmapkey b y;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 2);
    assert_eq!(p.seg.blocks[0].span, Span::new(0, 11));
    assert!(!p.seg.blocks[0].terminated);
    assert_eq!(p.seg.blocks[1].span, Span::new(12, 23));
    assert!(p.seg.blocks[1].terminated);
}

#[test]
fn comment_with_escaped_terminator_continues_record() {
    let src = "mapkey a %b;\\\n! note ;\\\nmapkey(continued) %c;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 1);
    assert_eq!(p.seg.blocks[0].lines.len(), 3);
    assert_eq!(p.defs[0].called_names, vec!["b", "c"]);
    assert_eq!(kinds_of(&p.tokens, TokenKind::Comment), vec!["! note ;\\"]);
}

#[test]
fn plain_comment_closes_record() {
    let src = "mapkey a %b;\\\n! done\nmapkey(continued) %c;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 1);
    assert!(p.seg.blocks[0].terminated);
    assert_eq!(p.seg.blocks[0].lines.len(), 2);
    assert_eq!(p.defs[0].called_names, vec!["b"]);
}

#[test]
fn continuation_extends_unescaped_declaration() {
    let src = "mapkey a x;\nmapkey(continued) %b;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 1);
    assert_eq!(p.seg.blocks[0].span, Span::new(0, src.len() - 1));
    assert_eq!(p.seg.blocks[0].lines.len(), 2);
    assert!(p.seg.blocks[0].terminated);
    assert_eq!(p.defs[0].called_names, vec!["b"]);
    assert_eq!(kinds_of(&p.tokens, TokenKind::ContinuationMarker).len(), 1);
}

#[test]
fn reopened_record_needs_its_own_terminator() {
    let src = "mapkey a x;\nmapkey(continued) %b;\\\n\nmapkey c y;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 2);
    assert!(!p.seg.blocks[0].terminated);
    assert_eq!(p.seg.blocks[0].raw_text, "mapkey a x;\nmapkey(continued) %b;\\");
    assert_eq!(p.defs[0].called_names, vec!["b"]);
}

#[test]
fn comment_after_unescaped_declaration_is_document_level() {
    let src = "mapkey a x;\n! note ;\\\nmapkey b y;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 2);
    assert_eq!(p.seg.blocks[0].lines.len(), 1);
    assert!(p.seg.blocks[0].terminated);
    assert_eq!(kinds_of(&p.seg.tokens, TokenKind::Comment), vec!["! note ;\\"]);
}

#[test]
fn region_marker_after_unescaped_declaration_keeps_it_terminated() {
    let p = parse_checked("mapkey a x;\n!#region R\n");
    assert_eq!(p.seg.blocks[0].span, Span::new(0, 11));
    assert!(p.seg.blocks[0].terminated);
    assert_eq!(kinds_of(&p.seg.tokens, TokenKind::RegionStart), vec!["!#region R"]);
}

#[test]
fn region_marker_interrupts_record() {
    let src = "mapkey a x\\\n!#region R\nmapkey(continued) y;\n";
    let p = parse_checked(src);

    assert_eq!(p.seg.blocks.len(), 1);
    assert_eq!(p.seg.blocks[0].span, Span::new(0, 11));
    assert!(!p.seg.blocks[0].terminated);
    assert_eq!(kinds_of(&p.seg.tokens, TokenKind::RegionStart), vec!["!#region R"]);
}

#[test]
fn record_open_at_end_of_document() {
    let p = parse_checked("mapkey a %b;\\");
    assert_eq!(p.seg.blocks.len(), 1);
    assert!(!p.seg.blocks[0].terminated);
    assert_eq!(p.defs[0].called_names, vec!["b"]);
}

#[test]
fn crlf_line_breaks_are_excluded_from_spans() {
    let src = "mapkey a x;\\\r\nmapkey(continued) %b;\r\n";
    let p = parse_checked(src);
    assert_eq!(p.seg.blocks[0].span, Span::new(0, src.len() - 2));
    assert_eq!(p.defs[0].called_names, vec!["b"]);
}

#[rstest]
#[case::keyword_upper("MAPKEY a x;\n", "a")]
#[case::keyword_mixed("MapKey b x;\n", "b")]
#[case::indented("   mapkey c x;\n", "c")]
#[case::tab_separated("mapkey\td x;\n", "d")]
fn declaration_forms(#[case] src: &str, #[case] name: &str) {
    let p = parse_checked(src);
    assert_eq!(p.defs.len(), 1);
    assert_eq!(p.defs[0].name, name);
}

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n\n")]
#[case::bare_keyword("mapkey\n")]
#[case::keyword_prefix("mapkeys a b;\n")]
#[case::orphan_continuation("mapkey(continued) %a;\n")]
#[case::other_settings("display_dimension_tips yes\n")]
fn degenerate_input_yields_no_blocks(#[case] src: &str) {
    let p = parse_checked(src);
    assert!(p.seg.blocks.is_empty());
    assert!(p.defs.is_empty());
}

#[test]
fn reparse_is_identical() {
    let src = load_fixture("drawing");
    let a = parse_checked(&src);
    let b = parse_checked(&src);
    assert_eq!(a.seg, b.seg);
    assert_eq!(a.tokens, b.tokens);
    assert_eq!(a.defs, b.defs);
}
