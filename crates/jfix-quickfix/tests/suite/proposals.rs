use jfix_core::TextRange;
use jfix_quickfix::{quick_fix_proposals, Diagnostic, ProblemKind, ProposalKind};
use pretty_assertions::assert_eq;

use super::support::Fixture;

const SOURCE: &str = r#"interface Shape { int area(); }

class /*start*/Circle/*end*/ implements Shape {}

class /*start*/Square/*end*/ implements Shape {}
"#;

fn kinds(fixture: &Fixture, diagnostics: &[Diagnostic], selection: TextRange) -> Vec<(ProposalKind, String)> {
    fixture
        .with_context(|ctx| quick_fix_proposals(ctx, diagnostics, selection))
        .unwrap()
        .into_iter()
        .map(|p| (p.kind, p.fix.label))
        .collect()
}

#[test]
fn add_methods_ranks_before_make_abstract() {
    let fixture = Fixture::new(SOURCE);
    let caret = TextRange::empty(fixture.spans[0].end());
    assert_eq!(
        kinds(&fixture, &fixture.diagnostics(), caret),
        vec![
            (ProposalKind::AddUnimplementedMethods, "Add unimplemented methods".to_string()),
            (ProposalKind::MakeTypeAbstract, "Make type 'Circle' abstract".to_string()),
        ]
    );
}

#[test]
fn selection_spanning_two_diagnostics_sorts_by_relevance() {
    let fixture = Fixture::new(SOURCE);
    let selection = TextRange::new(fixture.spans[0].start(), fixture.spans[1].end());
    let proposals = fixture
        .with_context(|ctx| quick_fix_proposals(ctx, &fixture.diagnostics(), selection))
        .unwrap();
    let relevance: Vec<u32> = proposals.iter().map(|p| p.relevance).collect();
    assert_eq!(relevance, vec![10, 10, 5, 5]);
    assert_eq!(proposals[2].fix.label, "Make type 'Circle' abstract");
    assert_eq!(proposals[3].fix.label, "Make type 'Square' abstract");
}

#[test]
fn repeated_diagnostics_are_proposed_once() {
    let fixture = Fixture::new(SOURCE);
    let diagnostic = fixture.diagnostic(0);
    let enum_flavoured = Diagnostic::new(
        diagnostic.range,
        ProblemKind::EnumAbstractMethodMustBeImplemented,
    );
    let proposals = kinds(
        &fixture,
        &[diagnostic, enum_flavoured, diagnostic],
        diagnostic.range,
    );
    assert_eq!(proposals.len(), 2);
}

#[test]
fn selections_away_from_diagnostics_get_nothing() {
    let fixture = Fixture::new(SOURCE);
    assert_eq!(kinds(&fixture, &fixture.diagnostics(), TextRange::empty(0.into())), vec![]);

    let other = Diagnostic::new(fixture.spans[0], ProblemKind::Other);
    assert_eq!(kinds(&fixture, &[other], fixture.spans[0]), vec![]);
}
