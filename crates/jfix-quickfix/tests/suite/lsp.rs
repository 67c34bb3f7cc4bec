use jfix_quickfix::{code_action, code_actions, quick_fix_proposals};
use jfix_test_utils::extract_offset;
use lsp_types::{CodeActionKind, CodeActionOrCommand, Position, Uri};
use pretty_assertions::assert_eq;

use jfix_core::TextRange;

use super::support::Fixture;

fn uri() -> Uri {
    "file:///work/Circle.java".parse().unwrap()
}

#[test]
fn proposals_become_quickfix_code_actions() {
    let fixture = Fixture::new(
        r#"import java.io.Closeable;

// ünïcödé comment
class /*start*/Circle/*end*/ implements Closeable {
}
"#,
    );
    let (_, caret) = extract_offset("import java.io.Closeable;\n\n// ünïcödé comment\nclass Ci$0rcle");
    let proposals = fixture
        .with_context(|ctx| {
            quick_fix_proposals(ctx, &fixture.diagnostics(), TextRange::empty(caret))
        })
        .unwrap();
    assert_eq!(proposals.len(), 2);

    let action = code_action(&uri(), &fixture.tree, &proposals[0], &fixture.settings).unwrap();
    assert_eq!(action.title, "Add unimplemented methods");
    assert_eq!(action.kind, Some(CodeActionKind::QUICKFIX));
    assert_eq!(action.is_preferred, Some(true));

    let changes = action.edit.unwrap().changes.unwrap();
    let edits = &changes[&uri()];
    assert_eq!(edits.len(), 2);
    // Reverse document order: the body insertion first, then the import.
    assert_eq!(edits[0].range.start, Position::new(4, 0));
    assert_eq!(edits[1].range.start, Position::new(0, 25));
    assert_eq!(edits[1].new_text, "\nimport java.io.IOException;");

    let abstract_action =
        code_action(&uri(), &fixture.tree, &proposals[1], &fixture.settings).unwrap();
    assert_eq!(abstract_action.title, "Make type 'Circle' abstract");
    assert_eq!(abstract_action.is_preferred, Some(false));
    let changes = abstract_action.edit.unwrap().changes.unwrap();
    assert_eq!(changes[&uri()][0].range.start, Position::new(3, 0));
    assert_eq!(changes[&uri()][0].new_text, "abstract ");
}

#[test]
fn code_actions_convert_every_proposal() {
    let fixture = Fixture::new(
        r#"class Host {
    Runnable r = new /*start*/Runnable/*end*/() {};
}
"#,
    );
    let proposals = fixture
        .with_context(|ctx| quick_fix_proposals(ctx, &fixture.diagnostics(), fixture.spans[0]))
        .unwrap();
    let actions = code_actions(&uri(), &fixture.tree, &proposals, &fixture.settings);
    assert_eq!(actions.len(), 1);
    let CodeActionOrCommand::CodeAction(action) = &actions[0] else {
        panic!("expected a code action");
    };
    assert_eq!(action.title, "Add unimplemented methods");
}
