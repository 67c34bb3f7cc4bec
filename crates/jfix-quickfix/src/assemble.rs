//! Choosing and building fixes for missing-implementation problems.

use std::collections::HashSet;

use jfix_config::CodeGenerationSettings;
use jfix_syntax::{AstNode, SourceTree, SyntaxKind, TypeDecl, TypeDeclKind};
use jfix_types::{MemberSignature, TypeResolver};

use crate::diagnostic::Diagnostic;
use crate::fix::{BodyRef, CompositeFix, EditOperation, FixOperation};
use crate::imports::ImportContext;
use crate::target::{self, TargetNode};
use crate::{gap, order, stub, QuickFixError};

pub const ADD_UNIMPLEMENTED_METHODS: &str = "Add unimplemented methods";
pub const MAKE_TYPE_ABSTRACT: &str = "Make type abstract";
const ADD_MISSING_METHOD_GROUP: &str = "Add missing method";
const MODIFIER_GROUP: &str = "modifier";

/// Everything fix computation reads. Nothing in it is mutated.
#[derive(Clone, Copy)]
pub struct FixContext<'a> {
    pub tree: &'a SourceTree,
    pub resolver: &'a dyn TypeResolver,
    pub settings: &'a CodeGenerationSettings,
}

impl<'a> FixContext<'a> {
    pub fn new(
        tree: &'a SourceTree,
        resolver: &'a dyn TypeResolver,
        settings: &'a CodeGenerationSettings,
    ) -> Self {
        Self {
            tree,
            resolver,
            settings,
        }
    }
}

/// The fix applied to every diagnostic of a clean-up batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanUpMode {
    AddMissingMembers,
    MakeAbstract,
}

/// Stubs for every abstract member the diagnosed type still lacks.
///
/// `Ok(None)` when the target cannot be found or resolved, or has nothing to implement.
pub fn compute_add_missing_members_fix(
    ctx: &FixContext<'_>,
    diagnostic: &Diagnostic,
) -> Result<Option<CompositeFix>, QuickFixError> {
    Ok(add_missing_members(ctx, diagnostic)?.map(|operation| CompositeFix {
        label: ADD_UNIMPLEMENTED_METHODS.to_string(),
        additional_info: operation.additional_info.clone(),
        operations: vec![operation],
    }))
}

/// Mark the diagnosed class or interface `abstract`. Purely syntactic.
pub fn compute_make_abstract_fix(
    ctx: &FixContext<'_>,
    diagnostic: &Diagnostic,
) -> Result<Option<CompositeFix>, QuickFixError> {
    let Some(operation) = make_abstract(ctx, diagnostic)? else {
        return Ok(None);
    };
    let TargetNode::NamedType { decl } = operation.target else {
        return Ok(None);
    };
    let name = TypeDecl::cast(ctx.tree, decl)
        .and_then(|decl| decl.name())
        .unwrap_or_default();
    Ok(Some(CompositeFix {
        label: format!("Make type '{name}' abstract"),
        additional_info: None,
        operations: vec![operation],
    }))
}

/// One fix for a whole batch of diagnostics, all handled with `mode`.
///
/// Diagnostics are processed in order; the ones without a fix are skipped, and a target shared
/// by several diagnostics is fixed once.
pub fn create_clean_up(
    ctx: &FixContext<'_>,
    mode: CleanUpMode,
    diagnostics: &[Diagnostic],
) -> Result<Option<CompositeFix>, QuickFixError> {
    let mut seen = HashSet::new();
    let mut operations = Vec::new();
    for diagnostic in diagnostics {
        let operation = match mode {
            CleanUpMode::AddMissingMembers => add_missing_members(ctx, diagnostic)?,
            CleanUpMode::MakeAbstract => make_abstract(ctx, diagnostic)?,
        };
        let Some(operation) = operation else {
            continue;
        };
        if seen.insert(operation.target) {
            operations.push(operation);
        }
    }

    if operations.is_empty() {
        return Ok(None);
    }
    let label = match mode {
        CleanUpMode::AddMissingMembers => ADD_UNIMPLEMENTED_METHODS,
        CleanUpMode::MakeAbstract => MAKE_TYPE_ABSTRACT,
    };
    tracing::debug!(
        target = "jfix.quickfix",
        ?mode,
        diagnostics = diagnostics.len(),
        operations = operations.len(),
        "built clean-up fix"
    );
    Ok(Some(CompositeFix {
        label: label.to_string(),
        additional_info: None,
        operations,
    }))
}

fn add_missing_members(
    ctx: &FixContext<'_>,
    diagnostic: &Diagnostic,
) -> Result<Option<FixOperation>, QuickFixError> {
    let Some(node) = fixable_target(ctx, diagnostic)? else {
        return Ok(None);
    };
    let target = match target::bind(ctx.tree, node, ctx.resolver) {
        Ok(target) => target,
        Err(err) => {
            tracing::warn!(
                target = "jfix.quickfix",
                range = ?diagnostic.range,
                error = %err,
                "type resolution failed; no fix for this diagnostic"
            );
            return Ok(None);
        }
    };
    let Some(descriptor) = &target.descriptor else {
        tracing::debug!(
            target = "jfix.quickfix",
            range = ?diagnostic.range,
            "target type has no binding"
        );
        return Ok(None);
    };

    let gap = gap::gap(&target);
    if gap.is_empty() {
        return Ok(None);
    }
    let members = order::order(descriptor, &gap.members);

    let (body, scope) = match (node.body(ctx.tree), node) {
        (Some(body), _) => (BodyRef::Existing(body), body),
        (None, TargetNode::EnumConstant { constant, .. }) => {
            (BodyRef::Materialized { constant }, constant)
        }
        (None, _) => return Ok(None),
    };

    // Anonymous and enum constant bodies never get comments.
    let settings = if node.is_named_type() {
        ctx.settings.clone()
    } else {
        ctx.settings.without_comments()
    };

    let mut imports = ImportContext::new(ctx.tree, scope);
    let mut edits = Vec::with_capacity(members.len() + 1);
    if let BodyRef::Materialized { constant } = body {
        edits.push(EditOperation::MaterializeAnonymousBody { constant });
    }
    for member in &members {
        let stub = stub::synthesize(
            member,
            &settings,
            &mut imports,
            descriptor.non_null_by_default,
        );
        edits.push(EditOperation::InsertMember { body, stub });
    }
    edits.extend(
        imports
            .added_imports()
            .into_iter()
            .map(|qualified_name| EditOperation::AddImport { qualified_name }),
    );

    let is_enum_declaration = matches!(
        node,
        TargetNode::NamedType { decl } if ctx.tree.kind(decl) == SyntaxKind::EnumDeclaration
    );
    let additional_info = if is_enum_declaration {
        "<b>Add the unimplemented methods to the enum type</b>".to_string()
    } else {
        members_to_implement_info(&members)
    };

    Ok(Some(FixOperation {
        label: ADD_MISSING_METHOD_GROUP.to_string(),
        target: node,
        additional_info: Some(additional_info),
        edits,
    }))
}

fn make_abstract(
    ctx: &FixContext<'_>,
    diagnostic: &Diagnostic,
) -> Result<Option<FixOperation>, QuickFixError> {
    let Some(node) = fixable_target(ctx, diagnostic)? else {
        return Ok(None);
    };
    let TargetNode::NamedType { decl } = node else {
        return Ok(None);
    };
    let Some(view) = TypeDecl::cast(ctx.tree, decl) else {
        return Ok(None);
    };
    let eligible = matches!(view.kind(), TypeDeclKind::Class | TypeDeclKind::Interface);
    if !eligible || view.is_abstract() {
        return Ok(None);
    }

    Ok(Some(FixOperation {
        label: MAKE_TYPE_ABSTRACT.to_string(),
        target: node,
        additional_info: None,
        edits: vec![EditOperation::AddModifier {
            declaration: decl,
            modifier: "abstract",
            linked: Some(MODIFIER_GROUP.to_string()),
        }],
    }))
}

fn fixable_target(
    ctx: &FixContext<'_>,
    diagnostic: &Diagnostic,
) -> Result<Option<TargetNode>, QuickFixError> {
    if !diagnostic.kind.is_missing_implementation() {
        tracing::debug!(
            target = "jfix.quickfix",
            kind = ?diagnostic.kind,
            "ignoring diagnostic that is not about missing implementations"
        );
        return Ok(None);
    }
    let target = target::resolve(ctx.tree, diagnostic.range)?;
    if target.is_none() {
        tracing::debug!(
            target = "jfix.quickfix",
            range = ?diagnostic.range,
            "no structural target for diagnostic"
        );
    }
    Ok(target)
}

fn members_to_implement_info(members: &[MemberSignature]) -> String {
    let mut info = if members.len() == 1 {
        "<b>1 method to implement:</b><ul>".to_string()
    } else {
        format!("<b>{} methods to implement:</b><ul>", members.len())
    };
    for member in members {
        info.push_str("<li>");
        info.push_str(&escape_html(&member.label()));
        info.push_str("</li>");
    }
    info.push_str("</ul>");
    info
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfix_types::{DeclaringType, JavaType, Nullness, ParamSignature, Visibility};
    use pretty_assertions::assert_eq;

    fn member(name: &str, param: Option<JavaType>) -> MemberSignature {
        MemberSignature {
            declaring_type: DeclaringType {
                qualified_name: "p.Store".to_string(),
                position: None,
            },
            name: name.to_string(),
            type_params: Vec::new(),
            params: param
                .into_iter()
                .map(|ty| ParamSignature {
                    ty,
                    name: None,
                    nullness: Nullness::Unspecified,
                })
                .collect(),
            declared_param_keys: Vec::new(),
            varargs: false,
            return_type: JavaType::Void,
            return_nullness: Nullness::Unspecified,
            thrown: Vec::new(),
            visibility: Visibility::Public,
            index: 0,
        }
    }

    #[test]
    fn info_lists_escaped_member_labels() {
        let list = JavaType::Class(jfix_types::ClassType {
            args: vec![JavaType::class("java.lang.String")],
            ..jfix_types::ClassType::from_qualified("java.util.List")
        });
        assert_eq!(
            members_to_implement_info(&[member("clear", None)]),
            "<b>1 method to implement:</b><ul><li>p.Store.clear()</li></ul>"
        );
        assert_eq!(
            members_to_implement_info(&[member("clear", None), member("putAll", Some(list))]),
            "<b>2 methods to implement:</b><ul><li>p.Store.clear()</li><li>p.Store.putAll(java.util.List&lt;java.lang.String&gt;)</li></ul>"
        );
    }
}
