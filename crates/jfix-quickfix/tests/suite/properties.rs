use jfix_quickfix::{Diagnostic, ProblemKind};
use pretty_assertions::assert_eq;

use super::support::{span_of, Fixture};

/// Fixture, plus the `prefix`/`name` pair locating the target again after the fix.
const COMPLETENESS_CASES: &[(&str, &str, &str)] = &[
    (
        r#"package p;

interface I {
    void a();
    int b(String s);
}

abstract class Base implements I {
    public void a() {}
    abstract long size();
}

class /*start*/Impl/*end*/ extends Base {
}
"#,
        "class ",
        "Impl",
    ),
    (
        r#"package p;

import java.util.Map;

class /*start*/Version/*end*/ implements Comparable<Version>, Map.Entry<String, Version> {
}
"#,
        "class ",
        "Version",
    ),
    (
        r#"package p;

import java.util.function.Function;

class Host {
    Function<String, Integer> parse = new /*start*/Function/*end*/<String, Integer>() {
    };
}
"#,
        "new ",
        "Function",
    ),
    (
        r#"package p;

enum Planet {
    /*start*/MERCURY/*end*/(1),
    VENUS(2);

    Planet(int order) {}

    abstract double gravity(double mass);
}
"#,
        "    ",
        "MERCURY",
    ),
];

#[test]
fn applying_the_fix_closes_the_gap() {
    for (source, prefix, name) in COMPLETENESS_CASES {
        let fixture = Fixture::new(source);
        let applied = fixture.apply_add_fix();

        let after = Fixture::new(&applied);
        let diagnostic = Diagnostic::new(
            span_of(after.text(), prefix, name),
            ProblemKind::AbstractMethodMustBeImplemented,
        );
        assert_eq!(
            after.add_fix(&diagnostic),
            None,
            "gap not closed for {name}; fixed text:\n{applied}"
        );
        assert!(
            after.tree.errors().is_empty(),
            "fixed text does not parse cleanly:\n{applied}"
        );
    }
}

#[test]
fn fix_computation_is_idempotent() {
    for (source, _, _) in COMPLETENESS_CASES {
        let fixture = Fixture::new(source);
        let first = fixture.add_fix(&fixture.diagnostic(0));
        let second = fixture.add_fix(&fixture.diagnostic(0));
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(fixture.apply(&first.unwrap()), fixture.apply(&second.unwrap()));
    }
}

#[test]
fn nothing_to_implement_means_no_fix() {
    let fixture = Fixture::new(
        r#"import java.util.Comparator;

class /*start*/ByLength/*end*/ implements Comparator<String> {
    public int compare(String a, String b) { return a.length() - b.length(); }
}

class /*start*/Plain/*end*/ {}

class /*start*/Worker/*end*/ implements Runnable {
    @Override
    public void run() {}
}
"#,
    );
    for diagnostic in fixture.diagnostics() {
        assert_eq!(fixture.add_fix(&diagnostic), None);
    }
}

#[test]
fn only_plain_classes_and_interfaces_can_be_made_abstract() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); }

public class /*start*/Circle/*end*/ implements Shape {}

enum /*start*/Kind/*end*/ implements Shape { ROUND }

record /*start*/Point/*end*/(int x, int y) implements Shape {}

abstract class /*start*/Base/*end*/ implements Shape {}

class Host {
    Shape s = new /*start*/Shape/*end*/() {};
}

enum Sized {
    /*start*/SMALL/*end*/;
    abstract int size();
}
"#,
    );

    let labels: Vec<Option<String>> = fixture
        .diagnostics()
        .iter()
        .map(|d| fixture.abstract_fix(d).map(|fix| fix.label))
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("Make type 'Circle' abstract".to_string()),
            None,
            None,
            None,
            None,
            None,
        ]
    );

    let fix = fixture.abstract_fix(&fixture.diagnostic(0)).unwrap();
    assert!(fixture
        .apply(&fix)
        .contains("public abstract class Circle implements Shape {}"));
}
