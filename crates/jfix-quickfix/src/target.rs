//! Locating the type a missing-implementation problem is about.

use jfix_core::TextRange;
use jfix_syntax::{AstNode, EnumConstant, NodeId, SourceTree, SyntaxKind};
use jfix_types::{ResolveError, TypeDescriptor, TypeResolver};

use crate::QuickFixError;

/// The structural node a fix applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetNode {
    /// A class, interface, enum, record or annotation declaration.
    NamedType { decl: NodeId },
    /// A class instance creation with an anonymous body.
    AnonymousClass { creation: NodeId, body: NodeId },
    /// An enum constant. A missing body is only created by the accepted fix.
    EnumConstant {
        constant: NodeId,
        body: Option<NodeId>,
    },
}

impl TargetNode {
    /// The node the target is identified by: the declaration, the creation or the constant.
    pub fn node(&self) -> NodeId {
        match *self {
            TargetNode::NamedType { decl } => decl,
            TargetNode::AnonymousClass { creation, .. } => creation,
            TargetNode::EnumConstant { constant, .. } => constant,
        }
    }

    /// The body members get inserted into, if it exists yet.
    pub fn body(&self, tree: &SourceTree) -> Option<NodeId> {
        match *self {
            TargetNode::NamedType { decl } => tree
                .children(decl)
                .iter()
                .copied()
                .find(|&child| tree.kind(child) == SyntaxKind::ClassBody),
            TargetNode::AnonymousClass { body, .. } => Some(body),
            TargetNode::EnumConstant { body, .. } => body,
        }
    }

    pub fn is_named_type(&self) -> bool {
        matches!(self, TargetNode::NamedType { .. })
    }
}

/// A target bound to its semantic description.
#[derive(Debug, Clone)]
pub struct StructuralTarget<'a> {
    pub tree: &'a SourceTree,
    pub node: TargetNode,
    pub descriptor: Option<TypeDescriptor>,
}

impl<'a> StructuralTarget<'a> {
    /// Only resolved targets are eligible for stub generation.
    pub fn is_resolved(&self) -> bool {
        self.descriptor.is_some()
    }
}

/// Map a problem span to its structural target.
///
/// `Ok(None)` means the span does not denote a fixable type.
pub fn resolve(tree: &SourceTree, span: TextRange) -> Result<Option<TargetNode>, QuickFixError> {
    let Some(mut node) = tree.covering_node(span) else {
        return Ok(None);
    };

    match tree.kind(node) {
        SyntaxKind::AnonymousClassBody => {
            let Some(parent) = tree.parent(node) else {
                return Ok(None);
            };
            match tree.kind(parent) {
                SyntaxKind::ClassInstanceCreation | SyntaxKind::EnumConstant => node = parent,
                kind => {
                    debug_assert!(false, "anonymous body under unexpected node {kind:?}");
                    return Err(QuickFixError::UnknownTargetNode {
                        kind,
                        range: tree.range(parent),
                    });
                }
            }
        }
        SyntaxKind::SimpleName | SyntaxKind::TypeRef => {
            if let Some(parent) = tree.parent(node) {
                let retarget = match tree.kind(node) {
                    SyntaxKind::SimpleName => tree.kind(parent) == SyntaxKind::EnumConstant,
                    _ => tree.kind(parent) == SyntaxKind::ClassInstanceCreation,
                };
                if retarget {
                    node = parent;
                }
            }
        }
        _ => {}
    }

    Ok(classify(tree, node))
}

fn classify(tree: &SourceTree, node: NodeId) -> Option<TargetNode> {
    match tree.kind(node) {
        SyntaxKind::SimpleName => {
            let parent = tree.parent(node)?;
            tree.kind(parent)
                .is_type_declaration()
                .then_some(TargetNode::NamedType { decl: parent })
        }
        SyntaxKind::ClassInstanceCreation => {
            let body = tree.child_of_kind(node, SyntaxKind::AnonymousClassBody)?;
            Some(TargetNode::AnonymousClass {
                creation: node,
                body,
            })
        }
        SyntaxKind::EnumConstant => {
            let constant = EnumConstant::cast(tree, node)?;
            Some(TargetNode::EnumConstant {
                constant: node,
                body: constant.body().map(|body| body.node()),
            })
        }
        _ => None,
    }
}

/// Attach the resolved descriptor. An unresolvable binding leaves `descriptor` empty.
pub fn bind<'a, R: TypeResolver + ?Sized>(
    tree: &'a SourceTree,
    node: TargetNode,
    resolver: &R,
) -> Result<StructuralTarget<'a>, ResolveError> {
    let descriptor = match node {
        TargetNode::NamedType { decl } => resolver.resolve_type(tree, decl)?,
        TargetNode::AnonymousClass { creation, .. } => resolver.resolve_type(tree, creation)?,
        TargetNode::EnumConstant { constant, .. } => {
            resolver.resolve_enum_constant(tree, constant)?
        }
    };
    Ok(StructuralTarget {
        tree,
        node,
        descriptor,
    })
}
