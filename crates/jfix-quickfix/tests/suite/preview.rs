use jfix_quickfix::preview;
use pretty_assertions::assert_eq;

use super::support::Fixture;

#[test]
fn preview_is_a_unified_diff_of_the_fix() {
    let fixture = Fixture::new(
        r#"package shapes;

interface Shape {
    int area();
}

class /*start*/Circle/*end*/ implements Shape {
}
"#,
    );
    let fix = fixture.add_fix(&fixture.diagnostic(0)).unwrap();
    let preview = preview("shapes/Circle.java", &fixture.tree, &fix, &fixture.settings).unwrap();

    assert_eq!(preview.label, "Add unimplemented methods");
    assert_eq!(
        preview.additional_info.as_deref(),
        Some("<b>1 method to implement:</b><ul><li>shapes.Shape.area()</li></ul>")
    );
    assert_eq!(preview.modified, fixture.apply(&fix));
    assert!(preview.unified_diff.starts_with("--- a/shapes/Circle.java\n+++ b/shapes/Circle.java\n"));
    assert!(preview.unified_diff.contains("+    public int area() {\n"));
    assert!(preview.unified_diff.contains(" class Circle implements Shape {\n"));

    let added = preview
        .unified_diff
        .lines()
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .count();
    assert_eq!(added, 8);
}
