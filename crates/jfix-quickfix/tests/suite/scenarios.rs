use jfix_config::CodeGenerationSettings;
use jfix_quickfix::{Diagnostic, EditOperation, ProblemKind};
use pretty_assertions::assert_eq;

use super::support::Fixture;

fn inserted_names(fix: &jfix_quickfix::CompositeFix) -> Vec<String> {
    fix.edits()
        .filter_map(|edit| match edit {
            EditOperation::InsertMember { stub, .. } => Some(stub.name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn single_missing_method() {
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
    assert_eq!(fix.label, "Add unimplemented methods");
    assert_eq!(
        fix.additional_info.as_deref(),
        Some("<b>1 method to implement:</b><ul><li>shapes.Shape.area()</li></ul>")
    );
    assert_eq!(inserted_names(&fix), vec!["area"]);
    assert_eq!(fix.operations.len(), 1);
    assert_eq!(fix.operations[0].label, "Add missing method");

    assert_eq!(
        fixture.apply(&fix),
        r#"package shapes;

interface Shape {
    int area();
}

class Circle implements Shape {
    /**
     * @see shapes.Shape#area()
     */
    @Override
    public int area() {
        // TODO Auto-generated method stub
        return 0;
    }
}
"#
    );
}

#[test]
fn only_the_unimplemented_method_of_three() {
    let fixture = Fixture::new(
        r#"package p;

interface I {
    void a();
    int b(String s);
    void c();
}

abstract class Base implements I {
    public void a() {}
}

class /*start*/Impl/*end*/ extends Base {
    public void c() {}
}
"#,
    );

    let fix = fixture.add_fix(&fixture.diagnostic(0)).unwrap();
    assert_eq!(inserted_names(&fix), vec!["b"]);
    assert_eq!(
        fixture.apply(&fix),
        r#"package p;

interface I {
    void a();
    int b(String s);
    void c();
}

abstract class Base implements I {
    public void a() {}
}

class Impl extends Base {
    public void c() {}

    /**
     * @see p.I#b(java.lang.String)
     */
    @Override
    public int b(String s) {
        // TODO Auto-generated method stub
        return 0;
    }
}
"#
    );
}

#[test]
fn anonymous_runnable_gets_an_uncommented_stub() {
    let fixture = Fixture::new(
        r#"class Host {
    void start() {
        Runnable r = new /*start*/Runnable/*end*/() {
        };
        r.run();
    }
}
"#,
    );

    let fix = fixture.add_fix(&fixture.diagnostic(0)).unwrap();
    let EditOperation::InsertMember { stub, .. } = fix.edits().next().unwrap() else {
        panic!("expected a member insertion first");
    };
    assert!(stub.doc_comment.is_empty());
    assert!(stub.body.is_empty());

    assert_eq!(
        fixture.apply(&fix),
        r#"class Host {
    void start() {
        Runnable r = new Runnable() {
            @Override
            public void run() {
            }
        };
        r.run();
    }
}
"#
    );
}

#[test]
fn enum_constant_without_body_gets_one() {
    let fixture = Fixture::new(
        r#"package p;

enum Color {
    /*start*/RED/*end*/;

    abstract String name();
}
"#,
    );
    let diagnostic = Diagnostic::new(
        fixture.spans[0],
        ProblemKind::EnumConstantMustImplementAbstractMethod,
    );

    let fix = fixture.add_fix(&diagnostic).unwrap();
    let edits: Vec<&EditOperation> = fix.edits().collect();
    assert!(matches!(
        edits[0],
        EditOperation::MaterializeAnonymousBody { .. }
    ));
    assert!(matches!(
        edits[1],
        EditOperation::InsertMember { stub, .. } if stub.name == "name" && stub.doc_comment.is_empty()
    ));
    assert_eq!(edits.len(), 2);

    assert_eq!(
        fixture.apply(&fix),
        r#"package p;

enum Color {
    RED {
        @Override
        String name() {
            return null;
        }
    };

    abstract String name();
}
"#
    );
}

#[test]
fn unresolvable_interfaces_have_no_fix() {
    let fixture = Fixture::new(
        r#"package p;

class /*start*/Widget/*end*/ implements Missing, AlsoMissing {
}
"#,
    );
    assert_eq!(fixture.add_fix(&fixture.diagnostic(0)), None);
}

#[test]
fn enum_declaration_describes_the_enum_fix() {
    let fixture = Fixture::new(
        r#"package p;

interface Op {
    int apply(int a, int b);
}

enum /*start*/Ops/*end*/ implements Op {
    PLUS, MINUS
}
"#,
    );
    let diagnostic = Diagnostic::new(
        fixture.spans[0],
        ProblemKind::EnumAbstractMethodMustBeImplemented,
    );

    let fix = fixture.add_fix(&diagnostic).unwrap();
    assert_eq!(
        fix.additional_info.as_deref(),
        Some("<b>Add the unimplemented methods to the enum type</b>")
    );
    assert_eq!(
        fixture.apply(&fix),
        r#"package p;

interface Op {
    int apply(int a, int b);
}

enum Ops implements Op {
    PLUS, MINUS;

    /**
     * @see p.Op#apply(int, int)
     */
    @Override
    public int apply(int a, int b) {
        // TODO Auto-generated method stub
        return 0;
    }
}
"#
    );
}

#[test]
fn members_follow_the_reading_order_of_the_hierarchy() {
    let fixture = Fixture::new(
        r#"package p;

interface Second {
    void fromSecond();
}

interface First {
    void one();
    void two();
}

abstract class Base implements Second {
    abstract void fromBase();
}

class /*start*/Impl/*end*/ extends Base implements First {
}
"#,
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    let fix = fixture.add_fix(&fixture.diagnostic(0)).unwrap();
    assert_eq!(
        inserted_names(&fix),
        vec!["fromBase", "fromSecond", "one", "two"]
    );
    assert_eq!(
        fix.additional_info.as_deref(),
        Some("<b>4 methods to implement:</b><ul><li>p.Base.fromBase()</li><li>p.Second.fromSecond()</li><li>p.First.one()</li><li>p.First.two()</li></ul>")
    );
}

#[test]
fn diagnostics_of_other_kinds_are_ignored() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); }
class /*start*/Circle/*end*/ implements Shape {}
"#,
    );
    let diagnostic = Diagnostic::new(fixture.spans[0], ProblemKind::Other);
    assert_eq!(fixture.add_fix(&diagnostic), None);
    assert_eq!(fixture.abstract_fix(&diagnostic), None);
}

#[test]
fn see_links_the_generic_declaration() {
    let fixture = Fixture::new(
        r#"package p;

interface Repo<T> {
    void save(T item);
}

class /*start*/Names/*end*/ implements Repo<String> {
}
"#,
    );

    assert_eq!(
        fixture.apply_add_fix(),
        r#"package p;

interface Repo<T> {
    void save(T item);
}

class Names implements Repo<String> {
    /**
     * @see p.Repo#save(java.lang.Object)
     */
    @Override
    public void save(String item) {
        // TODO Auto-generated method stub
    }
}
"#
    );
}

#[test]
fn re_abstracted_default_methods_need_stubs() {
    let fixture = Fixture::new(
        r#"package p;

interface Quiet {
    default void m() {}
}

interface Loud extends Quiet {
    void m();
}

interface Other {
    default void m() {}
}

class /*start*/Reabstracted/*end*/ implements Loud {}

class /*start*/Unrelated/*end*/ implements Loud, Other {}
"#,
    );

    for index in 0..2 {
        let fix = fixture
            .add_fix(&fixture.diagnostic(index))
            .expect("a default of another interface does not implement `m()`");
        assert_eq!(inserted_names(&fix), vec!["m"]);
    }
}
