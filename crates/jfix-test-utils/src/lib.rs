//! Utilities shared by jfix tests.
//!
//! Fixtures are Java snippets with selection markers: `/*start*/…/*end*/` for a range and `$0` for
//! a caret offset.

use jfix_core::{TextRange, TextSize};

const START_MARKER: &str = "/*start*/";
const END_MARKER: &str = "/*end*/";
const CARET_MARKER: &str = "$0";

/// Extracts a byte range selection from a fixture containing `/*start*/` and
/// `/*end*/` markers.
///
/// Returns the fixture with markers removed and the selection `TextRange`
/// pointing at the extracted region.
pub fn extract_range(fixture: &str) -> (String, TextRange) {
    let (text, ranges) = extract_ranges(fixture);
    assert_eq!(
        ranges.len(),
        1,
        "fixture must contain exactly one /*start*/…/*end*/ pair"
    );
    (text, ranges[0])
}

/// Like [`extract_range`], for fixtures with several (non-nested) marker pairs.
pub fn extract_ranges(fixture: &str) -> (String, Vec<TextRange>) {
    let mut text = String::with_capacity(fixture.len());
    let mut ranges = Vec::new();
    let mut rest = fixture;

    while let Some(start) = rest.find(START_MARKER) {
        text.push_str(&rest[..start]);
        let range_start = text.len();
        rest = &rest[start + START_MARKER.len()..];

        let end = rest
            .find(END_MARKER)
            .expect("fixture has a /*start*/ marker without /*end*/");
        assert!(
            !rest[..end].contains(START_MARKER),
            "fixture ranges must not nest"
        );
        text.push_str(&rest[..end]);
        ranges.push(TextRange::new(
            TextSize::from(range_start as u32),
            TextSize::from(text.len() as u32),
        ));
        rest = &rest[end + END_MARKER.len()..];
    }
    assert!(
        !rest.contains(END_MARKER),
        "fixture has an /*end*/ marker without /*start*/"
    );
    text.push_str(rest);
    (text, ranges)
}

/// Extracts a caret offset from a fixture containing a single `$0` marker.
pub fn extract_offset(fixture: &str) -> (String, TextSize) {
    let offset = fixture
        .find(CARET_MARKER)
        .expect("fixture missing $0 marker");
    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..offset]);
    text.push_str(&fixture[offset + CARET_MARKER.len()..]);
    assert!(
        !text.contains(CARET_MARKER),
        "fixture must contain a single $0 marker"
    );
    (text, TextSize::from(offset as u32))
}

/// Text covered by `range`.
pub fn slice(text: &str, range: TextRange) -> &str {
    &text[range]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extract_range_strips_markers() {
        let (text, range) = extract_range("class /*start*/Shape/*end*/ {}");
        assert_eq!(text, "class Shape {}");
        assert_eq!(slice(&text, range), "Shape");
    }

    #[test]
    fn extract_ranges_keeps_source_order() {
        let (text, ranges) =
            extract_ranges("class /*start*/A/*end*/ {} class /*start*/Bee/*end*/ {}");
        assert_eq!(text, "class A {} class Bee {}");
        let slices: Vec<&str> = ranges.iter().map(|&r| slice(&text, r)).collect();
        assert_eq!(slices, vec!["A", "Bee"]);
    }

    #[test]
    fn extract_offset_finds_the_caret() {
        let (text, offset) = extract_offset("class Sh$0ape {}");
        assert_eq!(text, "class Shape {}");
        assert_eq!(offset, TextSize::from(8));
    }
}
