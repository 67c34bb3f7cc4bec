use jfix_config::{BodyStyle, CodeGenerationSettings};
use jfix_quickfix::materialize;
use jfix_test_utils::slice;
use pretty_assertions::assert_eq;

use super::support::Fixture;

#[test]
fn imports_go_after_the_last_import() {
    let fixture = Fixture::new(
        r#"package app;

import java.io.Closeable;

class /*start*/Resource/*end*/ implements Closeable {
}
"#,
    );
    assert_eq!(
        fixture.apply_add_fix(),
        r#"package app;

import java.io.Closeable;
import java.io.IOException;

class Resource implements Closeable {
    /**
     * @see java.io.Closeable#close()
     */
    @Override
    public void close() throws IOException {
        // TODO Auto-generated method stub
    }
}
"#
    );
}

#[test]
fn imports_go_after_the_package_declaration() {
    let fixture = Fixture::new(
        r#"package app;

class /*start*/Job/*end*/ implements java.util.concurrent.Callable<java.util.List<String>> {}
"#,
    )
    .with_library(
        "java/util/List.java",
        "package java.util; public interface List<E> extends Iterable<E> { int size(); }",
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    assert_eq!(
        fixture.apply_add_fix(),
        r#"package app;

import java.util.List;

class Job implements java.util.concurrent.Callable<java.util.List<String>> {
    @Override
    public List<String> call() throws Exception {
        return null;
    }
}
"#
    );
}

#[test]
fn imports_go_to_the_top_without_package_or_imports() {
    let fixture = Fixture::new(
        r#"class /*start*/ByValue/*end*/ implements java.util.Comparator<java.util.Map.Entry<String, Integer>> {}
"#,
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    assert_eq!(
        fixture.apply_add_fix(),
        r#"import java.util.Map;

class ByValue implements java.util.Comparator<java.util.Map.Entry<String, Integer>> {
    @Override
    public int compare(Map.Entry<String, Integer> o1, Map.Entry<String, Integer> o2) {
        return 0;
    }
}
"#
    );
}

#[test]
fn members_on_the_brace_line_are_kept() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); String name(); }
class /*start*/Square/*end*/ implements Shape { public String name() { return "square"; } }
"#,
    )
    .with_settings(CodeGenerationSettings {
        body_style: BodyStyle::ThrowUnsupported,
        indent_unit: "\t".to_string(),
        ..CodeGenerationSettings::default().without_comments()
    });

    assert_eq!(
        fixture.apply_add_fix(),
        "interface Shape { int area(); String name(); }
class Square implements Shape { public String name() { return \"square\"; }

\t@Override
\tpublic int area() {
\t\tthrow new UnsupportedOperationException(\"Unimplemented method 'area'\");
\t}
}
"
    );
}

#[test]
fn several_stubs_are_separated_by_blank_lines() {
    let fixture = Fixture::new(
        r#"import java.util.Iterator;

class /*start*/Countdown/*end*/ implements Iterator<Integer> {}
"#,
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    assert_eq!(
        fixture.apply_add_fix(),
        r#"import java.util.Iterator;

class Countdown implements Iterator<Integer> {
    @Override
    public boolean hasNext() {
        return false;
    }

    @Override
    public Integer next() {
        return null;
    }
}
"#
    );
}

#[test]
fn crlf_line_endings_are_preserved() {
    let fixture = Fixture::new(
        "interface Shape {\r\n    int area();\r\n}\r\n\r\nclass /*start*/Circle/*end*/ implements Shape {\r\n}\r\n",
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    assert_eq!(
        fixture.apply_add_fix(),
        "interface Shape {\r\n    int area();\r\n}\r\n\r\nclass Circle implements Shape {\r\n    @Override\r\n    public int area() {\r\n        return 0;\r\n    }\r\n}\r\n"
    );
}

#[test]
fn linked_modifier_range_is_in_fixed_coordinates() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); }

@Deprecated
public class /*start*/Circle/*end*/ implements Shape {}
"#,
    );
    let fix = fixture.abstract_fix(&fixture.diagnostic(0)).unwrap();
    let materialized = materialize(&fixture.tree, &fix, &fixture.settings).unwrap();
    assert_eq!(materialized.edits.len(), 1);
    assert_eq!(materialized.linked.len(), 1);
    assert_eq!(materialized.linked[0].group, "modifier");

    let applied = fixture.apply(&fix);
    assert_eq!(slice(&applied, materialized.linked[0].range), "abstract");
}

#[test]
fn linked_ranges_account_for_earlier_edits() {
    let fixture = Fixture::new(
        r#"class /*start*/First/*end*/ implements Runnable {}
class /*start*/Second/*end*/ implements Runnable {}
"#,
    );
    let fix = fixture
        .clean_up(jfix_quickfix::CleanUpMode::MakeAbstract)
        .unwrap();
    let materialized = materialize(&fixture.tree, &fix, &fixture.settings).unwrap();
    let applied = fixture.apply(&fix);

    assert_eq!(materialized.linked.len(), 2);
    for linked in &materialized.linked {
        assert_eq!(slice(&applied, linked.range), "abstract");
    }
    assert!(materialized.linked[0].range.start() < materialized.linked[1].range.start());
}

#[test]
fn a_comment_only_body_keeps_a_blank_line_before_the_stubs() {
    let fixture = Fixture::new(
        r#"class /*start*/Task/*end*/ implements Runnable {
    // keep me
}
"#,
    )
    .with_settings(CodeGenerationSettings::default().without_comments());

    assert_eq!(
        fixture.apply_add_fix(),
        r#"class Task implements Runnable {
    // keep me

    @Override
    public void run() {
    }
}
"#
    );
}
