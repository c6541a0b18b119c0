//! Cursor locator tests: which key and which list element a cursor lands on.

use ortfols::frontmatter::Frontmatter;
use ortfols::locate::closest_element;
use ortfols::yaml::{self, Node};
use pretty_assertions::assert_eq;
use tower_lsp::lsp_types::Position;

fn frontmatter(text: &str) -> Frontmatter {
    Frontmatter::parse(text).expect("frontmatter should parse")
}

/// (key, value) found at a cursor, if any.
fn located(frontmatter: &Frontmatter, line: u32, character: u32) -> Option<(String, String)> {
    frontmatter
        .locate(Position::new(line, character))
        .map(|found| (found.key.to_string(), found.node.as_str().unwrap().to_string()))
}

fn pair(key: &str, value: &str) -> Option<(String, String)> {
    Some((key.to_string(), value.to_string()))
}

#[test]
fn test_scalar_claims_cursor_until_next_key() {
    let fm = frontmatter("---\ntitle: Hello world\nlayout: wide\n---\nbody\n");

    for character in 0..=20 {
        assert_eq!(located(&fm, 1, character), pair("title", "Hello world"));
    }
    assert_eq!(located(&fm, 2, 0), pair("layout", "wide"));
    assert_eq!(located(&fm, 2, 11), pair("layout", "wide"));
}

#[test]
fn test_gap_between_keys_belongs_to_earlier_key() {
    let fm = frontmatter("---\ntitle: Hello\n\n# a comment\n\nlayout: wide\n---\n");
    assert_eq!(located(&fm, 2, 0), pair("title", "Hello"));
    assert_eq!(located(&fm, 3, 4), pair("title", "Hello"));
    assert_eq!(located(&fm, 5, 0), pair("layout", "wide"));
}

#[test]
fn test_opening_separator_is_claimed_by_first_key() {
    let fm = frontmatter("---\ntitle: Hello\n---\n");
    assert_eq!(located(&fm, 0, 1), pair("title", "Hello"));
}

#[test]
fn test_block_sequence_resolves_by_line() {
    let fm = frontmatter(
        "---\ntags:\n  - sculpture\n\n  - digital\n  - print\nwip: yes\n---\n",
    );

    assert_eq!(located(&fm, 2, 0), pair("tags", "sculpture"));
    assert_eq!(located(&fm, 2, 30), pair("tags", "sculpture"));
    // blank line before the next item
    assert_eq!(located(&fm, 3, 0), pair("tags", "sculpture"));
    assert_eq!(located(&fm, 4, 10), pair("tags", "digital"));
    assert_eq!(located(&fm, 5, 2), pair("tags", "print"));
    assert_eq!(located(&fm, 6, 0), pair("wip", "yes"));
}

#[test]
fn test_flow_sequence_resolves_by_character() {
    // '[' at 11, Blender 12..19, "GIMP" 21..27, Krita 29..34
    let fm = frontmatter("---\nmade with: [Blender, \"GIMP\", Krita]\n---\n");

    assert_eq!(located(&fm, 1, 12), pair("made with", "Blender"));
    assert_eq!(located(&fm, 1, 18), pair("made with", "Blender"));
    assert_eq!(located(&fm, 1, 19), pair("made with", "Blender"));
    assert_eq!(located(&fm, 1, 20), pair("made with", "Blender"));
    assert_eq!(located(&fm, 1, 21), pair("made with", "GIMP"));
    assert_eq!(located(&fm, 1, 24), pair("made with", "GIMP"));
    assert_eq!(located(&fm, 1, 29), pair("made with", "Krita"));
    assert_eq!(located(&fm, 1, 40), pair("made with", "Krita"));
}

#[test]
fn test_flow_sequence_across_lines() {
    let fm = frontmatter("---\ntags: [one,\n  two, three]\n---\n");
    assert_eq!(located(&fm, 1, 12), pair("tags", "one"));
    assert_eq!(located(&fm, 2, 2), pair("tags", "two"));
    assert_eq!(located(&fm, 2, 7), pair("tags", "three"));
}

#[test]
fn test_cursor_after_frontmatter_is_not_found() {
    let fm = frontmatter("---\ntags: [a, b]\n---\ntags: [c]\n");
    assert_eq!(located(&fm, 2, 0), None);
    assert_eq!(located(&fm, 3, 8), None);
    assert_eq!(located(&fm, 100, 0), None);
}

#[test]
fn test_document_without_frontmatter_is_never_inside() {
    let fm = frontmatter("tags: [a]\nno separator at all\n");
    assert_eq!(located(&fm, 0, 7), None);
}

#[test]
fn test_unaddressable_values_are_not_found() {
    let nested = frontmatter("---\nlayout:\n  width: 3\n---\n");
    assert_eq!(located(&nested, 2, 4), None);

    let empty_list = frontmatter("---\ntags: []\n---\n");
    assert_eq!(located(&empty_list, 1, 7), None);

    let null_value = frontmatter("---\ntags:\n---\n");
    assert_eq!(located(&null_value, 1, 3), None);

    let nested_in_list = frontmatter("---\ntags:\n  - name: a\n---\n");
    assert_eq!(located(&nested_in_list, 2, 6), None);
}

#[test]
fn test_empty_value_before_another_key() {
    let fm = frontmatter("---\ntitle:\ntags: [a]\n---\n");
    assert_eq!(located(&fm, 1, 3), None);
    assert_eq!(located(&fm, 2, 7), pair("tags", "a"));

    let quoted_next = frontmatter("---\ntitle:\n\"tags\": [a]\n---\n");
    assert_eq!(located(&quoted_next, 1, 3), None);
}

#[test]
fn test_closest_element_on_empty_and_non_sequences() {
    let root: Node = yaml::parse("empty: []\nscalar: x\n").unwrap().unwrap();
    let cursor = Position::new(0, 8);
    assert!(closest_element(root.get("empty").unwrap(), cursor).is_none());
    assert!(closest_element(root.get("scalar").unwrap(), cursor).is_none());
}

#[test]
fn test_last_block_element_is_fallback() {
    let root: Node = yaml::parse("tags:\n  - a\n  - b\n").unwrap().unwrap();
    let tags = root.get("tags").unwrap();
    let found = closest_element(tags, Position::new(40, 0)).unwrap();
    assert_eq!(found.as_str(), Some("b"));
}

#[test]
fn test_broken_frontmatter_fails_to_parse() {
    assert!(Frontmatter::parse("---\ntags: [a, b\nmore: x\n---\n").is_err());
}
