use jfix_quickfix::{CleanUpMode, EditOperation, TargetNode};
use jfix_syntax::{AstNode, TypeDecl};
use pretty_assertions::assert_eq;

use super::support::Fixture;

const BATCH: &str = r#"package p;

interface Shape {
    int area();
}

class /*start*/A/*end*/ implements Shape {}

class /*start*/B/*end*/ implements Ghost {}

class /*start*/C/*end*/ implements Shape {}

class /*start*/D/*end*/ implements Phantom {}

class /*start*/E/*end*/ implements Shape {}
"#;

fn target_names(fixture: &Fixture, fix: &jfix_quickfix::CompositeFix) -> Vec<String> {
    fix.targets()
        .map(|target| {
            let TargetNode::NamedType { decl } = target else {
                panic!("expected named types, got {target:?}");
            };
            TypeDecl::cast(&fixture.tree, decl)
                .and_then(|decl| decl.name())
                .unwrap()
                .to_string()
        })
        .collect()
}

#[test]
fn batch_skips_unresolved_targets_and_keeps_input_order() {
    let fixture = Fixture::new(BATCH);
    assert_eq!(fixture.diagnostics().len(), 5);

    let fix = fixture.clean_up(CleanUpMode::AddMissingMembers).unwrap();
    assert_eq!(fix.label, "Add unimplemented methods");
    assert_eq!(fix.operations.len(), 3);
    assert_eq!(target_names(&fixture, &fix), vec!["A", "C", "E"]);
}

#[test]
fn make_abstract_batch_covers_every_named_class() {
    let fixture = Fixture::new(BATCH);
    let fix = fixture.clean_up(CleanUpMode::MakeAbstract).unwrap();
    assert_eq!(fix.label, "Make type abstract");
    assert_eq!(target_names(&fixture, &fix), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(fix.linked_groups(), vec!["modifier"]);

    let applied = fixture.apply(&fix);
    assert_eq!(applied.matches("abstract class").count(), 5);
}

#[test]
fn batch_never_mixes_modes() {
    let fixture = Fixture::new(BATCH);
    for mode in [CleanUpMode::AddMissingMembers, CleanUpMode::MakeAbstract] {
        let fix = fixture.clean_up(mode).unwrap();
        let adds_members = fix.edits().any(|edit| {
            matches!(
                edit,
                EditOperation::InsertMember { .. } | EditOperation::MaterializeAnonymousBody { .. }
            )
        });
        let adds_modifier = fix
            .edits()
            .any(|edit| matches!(edit, EditOperation::AddModifier { .. }));
        assert!(adds_members != adds_modifier, "{mode:?} mixed operations");
    }
}

#[test]
fn duplicate_diagnostics_fix_a_target_once() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); }
class /*start*/Circle/*end*/ implements /*start*/Shape/*end*/ {}
"#,
    );
    let mut diagnostics = fixture.diagnostics();
    diagnostics.push(diagnostics[0]);
    let fix = fixture
        .with_context(|ctx| {
            jfix_quickfix::create_clean_up(ctx, CleanUpMode::AddMissingMembers, &diagnostics)
        })
        .unwrap()
        .unwrap();
    assert_eq!(fix.operations.len(), 1);
}

#[test]
fn resolver_failure_only_drops_its_own_diagnostic() {
    let fixture = Fixture::new(
        r#"package p;

class /*start*/Loop/*end*/ extends Knot {}

class Knot extends Loop {}

interface Shape {
    int area();
}

class /*start*/Square/*end*/ implements Shape {}
"#,
    );

    assert_eq!(fixture.add_fix(&fixture.diagnostic(0)), None);
    let fix = fixture.clean_up(CleanUpMode::AddMissingMembers).unwrap();
    assert_eq!(target_names(&fixture, &fix), vec!["Square"]);
}

#[test]
fn empty_batches_have_no_fix() {
    let fixture = Fixture::new(
        r#"interface Shape { int area(); }
class /*start*/Square/*end*/ implements Shape { public int area() { return 4; } }
"#,
    );
    assert_eq!(fixture.clean_up(CleanUpMode::AddMissingMembers), None);
    assert_eq!(
        fixture.with_context(|ctx| jfix_quickfix::create_clean_up(
            ctx,
            CleanUpMode::MakeAbstract,
            &[]
        )),
        Ok(None)
    );
}
