//! LSP code actions for quick-fix proposals.

use std::collections::HashMap;

use lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, TextEdit as LspTextEdit, Uri,
    WorkspaceEdit as LspWorkspaceEdit,
};

use jfix_config::CodeGenerationSettings;
use jfix_core::LineIndex;
use jfix_syntax::SourceTree;

use crate::materialize::{materialize, MaterializeError};
use crate::proposals::QuickFixProposal;

/// Convert a proposal into a `quickfix` code action editing `uri`.
pub fn code_action(
    uri: &Uri,
    tree: &SourceTree,
    proposal: &QuickFixProposal,
    settings: &CodeGenerationSettings,
) -> Result<CodeAction, MaterializeError> {
    let text = tree.text();
    let materialized = materialize(tree, &proposal.fix, settings)?;
    let index = LineIndex::new(text);

    let mut edits: Vec<LspTextEdit> = materialized
        .edits
        .iter()
        .map(|edit| LspTextEdit {
            range: index.range(text, edit.range).into(),
            new_text: edit.replacement.clone(),
        })
        .collect();

    // Reverse document order, so clients applying edits one by one never see shifted offsets.
    edits.sort_by(|a, b| {
        b.range
            .start
            .line
            .cmp(&a.range.start.line)
            .then_with(|| b.range.start.character.cmp(&a.range.start.character))
    });

    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    Ok(CodeAction {
        title: proposal.label().to_string(),
        kind: Some(CodeActionKind::QUICKFIX),
        edit: Some(LspWorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }),
        is_preferred: Some(proposal.is_preferred()),
        ..Default::default()
    })
}

/// Code actions for all proposals; proposals that cannot be materialized are dropped.
pub fn code_actions(
    uri: &Uri,
    tree: &SourceTree,
    proposals: &[QuickFixProposal],
    settings: &CodeGenerationSettings,
) -> Vec<CodeActionOrCommand> {
    proposals
        .iter()
        .filter_map(|proposal| match code_action(uri, tree, proposal, settings) {
            Ok(action) => Some(CodeActionOrCommand::CodeAction(action)),
            Err(err) => {
                tracing::warn!(
                    target = "jfix.quickfix",
                    label = proposal.label(),
                    error = %err,
                    "dropping quick fix that cannot be applied"
                );
                None
            }
        })
        .collect()
}
