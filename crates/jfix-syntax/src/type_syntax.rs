//! Structured view of a `TypeRef` node: the type as written, before any name resolution.

use std::fmt;

use crate::ast::support;
use crate::syntax_kind::SyntaxKind;
use crate::tree::{NodeId, SourceTree};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    /// `int`, `boolean`, ...
    Primitive(String),
    Void,
    /// A possibly qualified name, each segment with its own type arguments (`Outer<A>.Inner<B>`).
    Named {
        segments: Vec<TypeSegment>,
        annotations: Vec<String>,
    },
    Array(Box<TypeSyntax>),
    Wildcard(Option<WildcardBound>),
    /// The parser recovered from a malformed type.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSegment {
    pub name: String,
    pub args: Vec<TypeSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<TypeSyntax>),
    Super(Box<TypeSyntax>),
}

impl TypeSyntax {
    /// Lower a `TypeRef` (or `WildcardType`) node.
    pub fn from_node(tree: &SourceTree, node: NodeId) -> TypeSyntax {
        match tree.kind(node) {
            SyntaxKind::TypeRef => lower_type_ref(tree, node),
            SyntaxKind::WildcardType => lower_wildcard(tree, node),
            _ => TypeSyntax::Missing,
        }
    }

    pub fn named(name: &str) -> TypeSyntax {
        TypeSyntax::Named {
            segments: name
                .split('.')
                .map(|segment| TypeSegment {
                    name: segment.to_string(),
                    args: Vec::new(),
                })
                .collect(),
            annotations: Vec::new(),
        }
    }

    /// Dotted name without type arguments, e.g. `java.util.Map.Entry`.
    pub fn dotted_name(&self) -> Option<String> {
        match self {
            TypeSyntax::Named { segments, .. } => Some(
                segments
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join("."),
            ),
            _ => None,
        }
    }

    pub fn annotations(&self) -> &[String] {
        match self {
            TypeSyntax::Named { annotations, .. } => annotations,
            TypeSyntax::Array(element) => element.annotations(),
            _ => &[],
        }
    }
}

fn lower_type_ref(tree: &SourceTree, node: NodeId) -> TypeSyntax {
    let mut base: Option<TypeSyntax> = None;
    let mut segments: Vec<TypeSegment> = Vec::new();
    let mut annotations = Vec::new();
    let mut dims = 0usize;

    for &child in tree.children(node) {
        match tree.kind(child) {
            SyntaxKind::Annotation => {
                if let Some(name) = support::annotation_name(tree, child) {
                    annotations.push(name);
                }
            }
            SyntaxKind::VoidKw => base = Some(TypeSyntax::Void),
            kind if kind.is_primitive_type() => {
                base = Some(TypeSyntax::Primitive(tree.node_text(child).to_string()))
            }
            kind if kind.is_identifier_like() => segments.push(TypeSegment {
                name: tree.node_text(child).to_string(),
                args: Vec::new(),
            }),
            SyntaxKind::TypeArguments => {
                let args = tree
                    .child_nodes(child)
                    .map(|arg| TypeSyntax::from_node(tree, arg))
                    .collect();
                if let Some(last) = segments.last_mut() {
                    last.args = args;
                }
            }
            SyntaxKind::LBracket => dims += 1,
            _ => {}
        }
    }

    let mut ty = match base {
        Some(base) => base,
        None if segments.is_empty() => TypeSyntax::Missing,
        None => TypeSyntax::Named {
            segments,
            annotations,
        },
    };
    for _ in 0..dims {
        ty = TypeSyntax::Array(Box::new(ty));
    }
    ty
}

fn lower_wildcard(tree: &SourceTree, node: NodeId) -> TypeSyntax {
    let bound_type = tree
        .child_of_kind(node, SyntaxKind::TypeRef)
        .map(|ty| Box::new(lower_type_ref(tree, ty)));
    let bound = match bound_type {
        Some(ty) if tree.child_of_kind(node, SyntaxKind::SuperKw).is_some() => {
            Some(WildcardBound::Super(ty))
        }
        Some(ty) => Some(WildcardBound::Extends(ty)),
        None => None,
    };
    TypeSyntax::Wildcard(bound)
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Primitive(name) => f.write_str(name),
            TypeSyntax::Void => f.write_str("void"),
            TypeSyntax::Named { segments, .. } => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name)?;
                    if !segment.args.is_empty() {
                        f.write_str("<")?;
                        for (j, arg) in segment.args.iter().enumerate() {
                            if j > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{arg}")?;
                        }
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            TypeSyntax::Array(element) => write!(f, "{element}[]"),
            TypeSyntax::Wildcard(None) => f.write_str("?"),
            TypeSyntax::Wildcard(Some(WildcardBound::Extends(ty))) => write!(f, "? extends {ty}"),
            TypeSyntax::Wildcard(Some(WildcardBound::Super(ty))) => write!(f, "? super {ty}"),
            TypeSyntax::Missing => f.write_str("?missing?"),
        }
    }
}
