//! Reference edit application: structural fixes to text edits.

use std::collections::BTreeSet;

use jfix_config::CodeGenerationSettings;
use jfix_core::{
    apply_text_edits, normalize_text_edits, text_size, EditError, TextEdit, TextRange, TextSize,
};
use jfix_syntax::{
    AstNode, Body, CompilationUnit, EnumConstant, NodeId, SourceTree, SyntaxKind, TypeDecl,
};
use thiserror::Error;

use crate::fix::{BodyRef, CompositeFix, EditOperation};
use crate::stub::MethodStub;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("node {node:?} is not a {expected}")]
    UnknownNode {
        node: NodeId,
        expected: &'static str,
    },
    #[error("body of {0:?} has no closing brace")]
    MissingBody(NodeId),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// A linked-position range in the text produced by applying the edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRange {
    pub group: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFix {
    /// Normalized: sorted and non-overlapping.
    pub edits: Vec<TextEdit>,
    pub linked: Vec<LinkedRange>,
}

/// Convert a structural fix into text edits against `tree`'s text.
pub fn materialize(
    tree: &SourceTree,
    fix: &CompositeFix,
    settings: &CodeGenerationSettings,
) -> Result<MaterializedFix, MaterializeError> {
    let text = tree.text();
    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let unit = settings.indent_unit.as_str();

    let mut bodies: Vec<(BodyRef, Vec<&MethodStub>)> = Vec::new();
    let mut materialized: Vec<NodeId> = Vec::new();
    let mut modifiers: Vec<(NodeId, &'static str, Option<&str>)> = Vec::new();
    let mut imports: BTreeSet<&str> = BTreeSet::new();

    for edit in fix.edits() {
        match edit {
            EditOperation::MaterializeAnonymousBody { constant } => {
                if !materialized.contains(constant) {
                    materialized.push(*constant);
                }
            }
            EditOperation::InsertMember { body, stub } => {
                match bodies.iter_mut().find(|(existing, _)| existing == body) {
                    Some((_, stubs)) => stubs.push(stub),
                    None => bodies.push((*body, vec![stub])),
                }
            }
            EditOperation::AddModifier {
                declaration,
                modifier,
                linked,
            } => modifiers.push((*declaration, *modifier, linked.as_deref())),
            EditOperation::AddImport { qualified_name } => {
                imports.insert(qualified_name.as_str());
            }
        }
    }

    let mut edits: Vec<TextEdit> = Vec::new();

    for (body, stubs) in &bodies {
        match *body {
            BodyRef::Existing(body) => {
                insert_into_body(tree, body, stubs, unit, eol, &mut edits)?;
            }
            BodyRef::Materialized { constant } => {
                if !materialized.contains(&constant) {
                    return Err(MaterializeError::MissingBody(constant));
                }
                edits.push(materialize_body(tree, constant, stubs, unit, eol)?);
            }
        }
    }
    for &constant in &materialized {
        let has_stubs = bodies
            .iter()
            .any(|(body, _)| *body == BodyRef::Materialized { constant });
        if !has_stubs {
            edits.push(materialize_body(tree, constant, &[], unit, eol)?);
        }
    }

    let mut pending_links = Vec::new();
    for (declaration, modifier, linked) in modifiers {
        let keyword = TypeDecl::cast(tree, declaration)
            .and_then(|decl| decl.keyword())
            .ok_or(MaterializeError::UnknownNode {
                node: declaration,
                expected: "type declaration",
            })?;
        let offset = tree.range(keyword).start();
        if let Some(group) = linked {
            pending_links.push((edits.len(), group, offset, TextSize::of(modifier)));
        }
        edits.push(TextEdit::insert(offset, format!("{modifier} ")));
    }

    if let Some(edit) = import_edit(tree, &imports, eol) {
        edits.push(edit);
    }

    let linked = pending_links
        .into_iter()
        .map(|(index, group, offset, len)| LinkedRange {
            group: group.to_string(),
            range: TextRange::at(shifted(&edits, index, offset), len),
        })
        .collect();

    normalize_text_edits(text, &mut edits)?;
    Ok(MaterializedFix { edits, linked })
}

/// Apply `fix` to `tree`'s text and return the new text.
pub fn apply_fix(
    tree: &SourceTree,
    fix: &CompositeFix,
    settings: &CodeGenerationSettings,
) -> Result<String, MaterializeError> {
    let materialized = materialize(tree, fix, settings)?;
    Ok(apply_text_edits(tree.text(), &materialized.edits)?)
}

/// Append `stubs` before the closing brace of `body`.
fn insert_into_body(
    tree: &SourceTree,
    body: NodeId,
    stubs: &[&MethodStub],
    unit: &str,
    eol: &str,
    edits: &mut Vec<TextEdit>,
) -> Result<(), MaterializeError> {
    let text = tree.text();
    let view = Body::cast(tree, body).ok_or(MaterializeError::UnknownNode {
        node: body,
        expected: "type body",
    })?;
    let (Some(l_brace), Some(r_brace)) = (view.l_brace(), view.r_brace()) else {
        return Err(MaterializeError::MissingBody(body));
    };

    let base = line_indent(text, l_brace);
    let rendered = render_members(stubs, &format!("{base}{unit}"), unit, eol);
    let constants = view.enum_constants();
    let close = u32::from(r_brace) as usize;
    // Comments count as content.
    let inner = &text[u32::from(l_brace) as usize + 1..close];
    let separator = if inner.trim().is_empty() { "" } else { eol };

    // Constants need a `;` before the first member.
    if !constants.is_empty() && tree.child_of_kind(body, SyntaxKind::Semicolon).is_none() {
        if let Some(last) = last_significant_child(tree, body) {
            edits.push(TextEdit::insert(tree.range(last).end(), ";"));
        }
    }

    let line_start = text[..close].rfind('\n').map_or(0, |i| i + 1);
    if text[line_start..close].trim().is_empty() {
        edits.push(TextEdit::insert(
            text_size(line_start),
            format!("{separator}{rendered}{eol}"),
        ));
    } else {
        let ws_start = text[..close].trim_end_matches([' ', '\t']).len();
        edits.push(TextEdit::new(
            TextRange::new(text_size(ws_start), r_brace),
            format!("{eol}{separator}{rendered}{eol}{base}"),
        ));
    }
    Ok(())
}

/// ` { ... }` after the constant's name and arguments.
fn materialize_body(
    tree: &SourceTree,
    constant: NodeId,
    stubs: &[&MethodStub],
    unit: &str,
    eol: &str,
) -> Result<TextEdit, MaterializeError> {
    let view = EnumConstant::cast(tree, constant).ok_or(MaterializeError::UnknownNode {
        node: constant,
        expected: "enum constant",
    })?;
    let anchor = view
        .arguments()
        .or_else(|| view.name_node())
        .map_or_else(|| view.range().end(), |node| tree.range(node).end());

    if stubs.is_empty() {
        return Ok(TextEdit::insert(anchor, " {}"));
    }
    let base = line_indent(tree.text(), view.range().start());
    let rendered = render_members(stubs, &format!("{base}{unit}"), unit, eol);
    Ok(TextEdit::insert(anchor, format!(" {{{eol}{rendered}{eol}{base}}}")))
}

fn render_members(stubs: &[&MethodStub], indent: &str, unit: &str, eol: &str) -> String {
    let blank = format!("{eol}{eol}");
    stubs
        .iter()
        .map(|stub| stub.render(indent, unit, eol))
        .collect::<Vec<_>>()
        .join(&blank)
}

/// New imports after the last import, else after the package declaration, else at the top.
fn import_edit(tree: &SourceTree, imports: &BTreeSet<&str>, eol: &str) -> Option<TextEdit> {
    let unit = CompilationUnit::root(tree);
    let existing = unit.imports();
    let new: Vec<&str> = imports
        .iter()
        .copied()
        .filter(|name| {
            !existing
                .iter()
                .any(|import| !import.is_static() && !import.is_on_demand() && import.path() == *name)
        })
        .collect();
    if new.is_empty() {
        return None;
    }
    let lines: Vec<String> = new.iter().map(|name| format!("import {name};")).collect();

    if let Some(last) = existing.last() {
        let text: String = lines.iter().map(|line| format!("{eol}{line}")).collect();
        return Some(TextEdit::insert(last.range().end(), text));
    }
    let block = lines.join(eol);
    match unit.package_decl() {
        Some(package) => Some(TextEdit::insert(
            tree.range(package).end(),
            format!("{eol}{eol}{block}"),
        )),
        None => Some(TextEdit::insert(
            TextSize::from(0),
            format!("{block}{eol}{eol}"),
        )),
    }
}

/// Position of `offset` once the edits before it (and earlier inserts at it) are applied.
fn shifted(edits: &[TextEdit], own: usize, offset: TextSize) -> TextSize {
    let mut delta: i64 = 0;
    for (index, edit) in edits.iter().enumerate() {
        if index == own {
            continue;
        }
        let before = edit.range.end() < offset
            || (edit.range.end() == offset && (!edit.is_insert() || index < own));
        if before {
            delta += i64::from(u32::from(TextSize::of(edit.replacement.as_str())))
                - i64::from(u32::from(edit.range.len()));
        }
    }
    text_size((i64::from(u32::from(offset)) + delta).max(0) as usize)
}

fn last_significant_child(tree: &SourceTree, body: NodeId) -> Option<NodeId> {
    tree.children(body)
        .iter()
        .copied()
        .filter(|&child| {
            let kind = tree.kind(child);
            !kind.is_trivia() && kind != SyntaxKind::RBrace
        })
        .last()
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(text: &str, offset: TextSize) -> String {
    let offset = u32::from(offset) as usize;
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}
