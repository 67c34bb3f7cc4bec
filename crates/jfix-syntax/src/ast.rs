//! Typed views over [`SourceTree`] nodes.
//!
//! Views are `Copy` handles (`tree` + `NodeId`); they never own or mutate the tree.

use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;
use crate::tree::{NodeId, SourceTree};
use crate::type_syntax::TypeSyntax;

pub trait AstNode<'a>: Sized + Copy {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(tree: &'a SourceTree, node: NodeId) -> Option<Self>;
    fn tree(&self) -> &'a SourceTree;
    fn node(&self) -> NodeId;

    fn range(&self) -> TextRange {
        self.tree().range(self.node())
    }

    fn text(&self) -> &'a str {
        self.tree().node_text(self.node())
    }
}

pub mod support {
    use super::AstNode;
    use crate::syntax_kind::SyntaxKind;
    use crate::tree::{NodeId, SourceTree};

    pub fn child<'a, N: AstNode<'a>>(tree: &'a SourceTree, node: NodeId) -> Option<N> {
        tree.children(node)
            .iter()
            .find_map(|&child| N::cast(tree, child))
    }

    pub fn children<'a, N: AstNode<'a>>(tree: &'a SourceTree, node: NodeId) -> Vec<N> {
        tree.children(node)
            .iter()
            .filter_map(|&child| N::cast(tree, child))
            .collect()
    }

    /// Text of the `SimpleName` child, if any.
    pub fn simple_name(tree: &SourceTree, node: NodeId) -> Option<&str> {
        tree.child_of_kind(node, SyntaxKind::SimpleName)
            .map(|name| tree.node_text(name))
    }

    /// Identifier segments of a `Name` node joined with `.`, ignoring interleaved trivia.
    pub fn dotted_name(tree: &SourceTree, name: NodeId) -> String {
        tree.children(name)
            .iter()
            .filter(|&&child| tree.kind(child).is_identifier_like())
            .map(|&child| tree.node_text(child))
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn annotation_name(tree: &SourceTree, annotation: NodeId) -> Option<String> {
        tree.child_of_kind(annotation, SyntaxKind::Name)
            .map(|name| dotted_name(tree, name))
    }

    /// Package plus enclosing type names of a type declaration, e.g. `java.util.Map.Entry`.
    ///
    /// Local types (and types nested in them) are named as if declared at the package level.
    pub fn qualified_type_name(tree: &SourceTree, decl: NodeId) -> String {
        let mut names = Vec::new();
        for anc in tree.ancestors(decl) {
            let kind = tree.kind(anc);
            if kind.is_type_declaration() {
                if let Some(name) = simple_name(tree, anc) {
                    names.push(name);
                }
            } else if matches!(
                kind,
                SyntaxKind::Block
                    | SyntaxKind::AnonymousClassBody
                    | SyntaxKind::Expression
                    | SyntaxKind::Arguments
            ) {
                break;
            }
        }
        names.reverse();

        let package = super::CompilationUnit::root(tree).package_name();
        if package.is_empty() {
            names.join(".")
        } else {
            format!("{package}.{}", names.join("."))
        }
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            tree: &'a SourceTree,
            node: NodeId,
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.tree, other.tree) && self.node == other.node
            }
        }

        impl Eq for $name<'_> {}

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?}@{:?})", stringify!($name), self.node, self.range())
            }
        }

        impl<'a> AstNode<'a> for $name<'a> {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(tree: &'a SourceTree, node: NodeId) -> Option<Self> {
                Self::can_cast(tree.kind(node)).then_some(Self { tree, node })
            }

            fn tree(&self) -> &'a SourceTree {
                self.tree
            }

            fn node(&self) -> NodeId {
                self.node
            }
        }
    };
}

ast_node!(CompilationUnit, CompilationUnit);
ast_node!(ImportDecl, ImportDeclaration);
ast_node!(
    /// Class, interface, enum, record or annotation type declaration.
    TypeDecl,
    ClassDeclaration | InterfaceDeclaration | EnumDeclaration | RecordDeclaration | AnnotationTypeDeclaration
);
ast_node!(Modifiers, Modifiers);
ast_node!(Annotation, Annotation);
ast_node!(
    /// A named type's body or an anonymous class body (creation expression or enum constant).
    Body,
    ClassBody | AnonymousClassBody
);
ast_node!(Method, MethodDeclaration);
ast_node!(Parameter, Parameter);
ast_node!(TypeParam, TypeParameter);
ast_node!(EnumConstant, EnumConstant);
ast_node!(ClassInstanceCreation, ClassInstanceCreation);

impl<'a> CompilationUnit<'a> {
    pub fn root(tree: &'a SourceTree) -> Self {
        Self {
            tree,
            node: tree.root(),
        }
    }

    pub fn package_decl(&self) -> Option<NodeId> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::PackageDeclaration)
    }

    /// Dotted package name, or `""` for the default package.
    pub fn package_name(&self) -> String {
        self.package_decl()
            .and_then(|decl| self.tree.child_of_kind(decl, SyntaxKind::Name))
            .map(|name| support::dotted_name(self.tree, name))
            .unwrap_or_default()
    }

    pub fn imports(&self) -> Vec<ImportDecl<'a>> {
        support::children(self.tree, self.node)
    }

    pub fn type_declarations(&self) -> Vec<TypeDecl<'a>> {
        support::children(self.tree, self.node)
    }

    /// Every type declaration in the unit, nested and local ones included, in source order.
    pub fn all_type_declarations(&self) -> Vec<TypeDecl<'a>> {
        self.tree
            .descendants(self.node)
            .into_iter()
            .filter_map(|node| TypeDecl::cast(self.tree, node))
            .collect()
    }
}

impl<'a> ImportDecl<'a> {
    pub fn is_static(&self) -> bool {
        self.tree
            .child_of_kind(self.node, SyntaxKind::StaticKw)
            .is_some()
    }

    /// `import a.b.*;`
    pub fn is_on_demand(&self) -> bool {
        self.tree
            .children(self.node)
            .iter()
            .any(|&child| self.tree.node_text(child) == "*")
    }

    /// The imported name without the trailing `.*`.
    pub fn path(&self) -> String {
        self.tree
            .child_of_kind(self.node, SyntaxKind::Name)
            .map(|name| support::dotted_name(self.tree, name))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl<'a> TypeDecl<'a> {
    pub fn kind(&self) -> TypeDeclKind {
        match self.tree.kind(self.node) {
            SyntaxKind::InterfaceDeclaration => TypeDeclKind::Interface,
            SyntaxKind::EnumDeclaration => TypeDeclKind::Enum,
            SyntaxKind::RecordDeclaration => TypeDeclKind::Record,
            SyntaxKind::AnnotationTypeDeclaration => TypeDeclKind::Annotation,
            _ => TypeDeclKind::Class,
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        support::simple_name(self.tree, self.node)
    }

    pub fn name_node(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::SimpleName)
    }

    pub fn modifiers(&self) -> Option<Modifiers<'a>> {
        support::child(self.tree, self.node)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers()
            .map_or(false, |m| m.has(SyntaxKind::AbstractKw))
    }

    /// The `class` / `interface` / `enum` / `record` keyword token.
    pub fn keyword(&self) -> Option<NodeId> {
        self.tree.children(self.node).iter().copied().find(|&child| {
            matches!(
                self.tree.kind(child),
                SyntaxKind::ClassKw
                    | SyntaxKind::InterfaceKw
                    | SyntaxKind::EnumKw
                    | SyntaxKind::RecordKw
                    | SyntaxKind::At
            )
        })
    }

    pub fn type_parameters(&self) -> Vec<TypeParam<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::TypeParameters)
            .map(|params| support::children(self.tree, params))
            .unwrap_or_default()
    }

    /// `TypeRef` nodes of the `extends` clause (several for interfaces).
    pub fn extends_types(&self) -> Vec<NodeId> {
        self.clause_types(SyntaxKind::ExtendsClause)
    }

    pub fn implements_types(&self) -> Vec<NodeId> {
        self.clause_types(SyntaxKind::ImplementsClause)
    }

    fn clause_types(&self, clause: SyntaxKind) -> Vec<NodeId> {
        self.tree
            .child_of_kind(self.node, clause)
            .map(|clause| {
                self.tree
                    .children_of_kind(clause, SyntaxKind::TypeRef)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn record_components(&self) -> Vec<Parameter<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::RecordComponents)
            .map(|components| support::children(self.tree, components))
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Body<'a>> {
        support::child(self.tree, self.node)
    }

    /// Innermost type declaration, anonymous body or enum constant body around this one.
    pub fn enclosing_type_node(&self) -> Option<NodeId> {
        self.tree
            .ancestors(self.node)
            .skip(1)
            .find(|&n| self.tree.kind(n).is_type_declaration() || self.tree.kind(n).is_body())
            .map(|n| match self.tree.kind(n) {
                SyntaxKind::ClassBody => self.tree.parent(n).unwrap_or(n),
                _ => n,
            })
    }

    pub fn qualified_name(&self) -> String {
        support::qualified_type_name(self.tree, self.node)
    }

    /// Local classes (declared inside a method or initializer body).
    pub fn is_local(&self) -> bool {
        self.tree
            .ancestors(self.node)
            .skip(1)
            .take_while(|&n| !self.tree.kind(n).is_type_declaration())
            .any(|n| self.tree.kind(n) == SyntaxKind::Block)
    }
}

impl<'a> Modifiers<'a> {
    pub fn has(&self, keyword: SyntaxKind) -> bool {
        self.tree.child_of_kind(self.node, keyword).is_some()
    }

    pub fn keywords(&self) -> Vec<SyntaxKind> {
        self.tree
            .children(self.node)
            .iter()
            .map(|&child| self.tree.kind(child))
            .filter(|kind| kind.is_modifier_keyword())
            .collect()
    }

    pub fn annotations(&self) -> Vec<Annotation<'a>> {
        support::children(self.tree, self.node)
    }

    /// Simple or qualified names of the annotations, as written.
    pub fn annotation_names(&self) -> Vec<String> {
        self.annotations().iter().filter_map(|a| a.name()).collect()
    }
}

impl<'a> Annotation<'a> {
    pub fn name(&self) -> Option<String> {
        support::annotation_name(self.tree, self.node)
    }
}

impl<'a> Body<'a> {
    pub fn is_anonymous(&self) -> bool {
        self.tree.kind(self.node) == SyntaxKind::AnonymousClassBody
    }

    /// Declaration, creation expression or enum constant owning this body.
    pub fn owner(&self) -> Option<NodeId> {
        self.tree.parent(self.node)
    }

    pub fn l_brace(&self) -> Option<TextSize> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::LBrace)
            .map(|brace| self.tree.range(brace).start())
    }

    /// Offset of the closing `}`; `None` when the parser had to recover.
    pub fn r_brace(&self) -> Option<TextSize> {
        let last = *self.tree.children(self.node).last()?;
        (self.tree.kind(last) == SyntaxKind::RBrace).then(|| self.tree.range(last).start())
    }

    pub fn members(&self) -> Vec<NodeId> {
        self.tree
            .child_nodes(self.node)
            .filter(|&child| {
                !matches!(
                    self.tree.kind(child),
                    SyntaxKind::EnumConstant | SyntaxKind::EmptyDeclaration | SyntaxKind::ErrorNode
                )
            })
            .collect()
    }

    pub fn methods(&self) -> Vec<Method<'a>> {
        support::children(self.tree, self.node)
    }

    pub fn enum_constants(&self) -> Vec<EnumConstant<'a>> {
        support::children(self.tree, self.node)
    }
}

impl<'a> Method<'a> {
    pub fn name(&self) -> Option<&'a str> {
        support::simple_name(self.tree, self.node)
    }

    pub fn modifiers(&self) -> Option<Modifiers<'a>> {
        support::child(self.tree, self.node)
    }

    pub fn has_modifier(&self, keyword: SyntaxKind) -> bool {
        self.modifiers().map_or(false, |m| m.has(keyword))
    }

    pub fn type_parameters(&self) -> Vec<TypeParam<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::TypeParameters)
            .map(|params| support::children(self.tree, params))
            .unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::TypeRef)
    }

    /// Return type including C-style dims after the parameter list (`int foo()[]`).
    pub fn return_type_syntax(&self) -> TypeSyntax {
        let mut ty = self
            .return_type()
            .map_or(TypeSyntax::Missing, |ty| TypeSyntax::from_node(self.tree, ty));
        for _ in 0..dims_count(self.tree, self.node) {
            ty = TypeSyntax::Array(Box::new(ty));
        }
        ty
    }

    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::ParameterList)
            .map(|list| support::children(self.tree, list))
            .unwrap_or_default()
    }

    pub fn thrown_types(&self) -> Vec<NodeId> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::ThrowsClause)
            .map(|clause| {
                self.tree
                    .children_of_kind(clause, SyntaxKind::TypeRef)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_body(&self) -> bool {
        self.tree.child_of_kind(self.node, SyntaxKind::Block).is_some()
    }
}

impl<'a> Parameter<'a> {
    pub fn name(&self) -> Option<&'a str> {
        support::simple_name(self.tree, self.node)
    }

    pub fn modifiers(&self) -> Option<Modifiers<'a>> {
        support::child(self.tree, self.node)
    }

    pub fn is_varargs(&self) -> bool {
        self.tree
            .child_of_kind(self.node, SyntaxKind::Ellipsis)
            .is_some()
    }

    /// Declared type, with `int a[]` style dims folded in. Varargs are *not* folded in.
    pub fn type_syntax(&self) -> TypeSyntax {
        let mut ty = self
            .tree
            .child_of_kind(self.node, SyntaxKind::TypeRef)
            .map_or(TypeSyntax::Missing, |ty| TypeSyntax::from_node(self.tree, ty));
        for _ in 0..dims_count(self.tree, self.node) {
            ty = TypeSyntax::Array(Box::new(ty));
        }
        ty
    }

    /// Receiver parameters (`Foo this`) are not real parameters.
    pub fn is_receiver(&self) -> bool {
        self.name().is_none()
            && self
                .tree
                .children(self.node)
                .iter()
                .any(|&child| self.tree.node_text(child) == "this")
    }
}

impl<'a> TypeParam<'a> {
    pub fn name(&self) -> Option<&'a str> {
        support::simple_name(self.tree, self.node)
    }

    pub fn bounds(&self) -> Vec<TypeSyntax> {
        self.tree
            .children_of_kind(self.node, SyntaxKind::TypeRef)
            .map(|bound| TypeSyntax::from_node(self.tree, bound))
            .collect()
    }
}

impl<'a> EnumConstant<'a> {
    pub fn name(&self) -> Option<&'a str> {
        support::simple_name(self.tree, self.node)
    }

    pub fn name_node(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::SimpleName)
    }

    pub fn arguments(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::Arguments)
    }

    pub fn body(&self) -> Option<Body<'a>> {
        support::child(self.tree, self.node)
    }

    /// The enum declaration owning this constant.
    pub fn enum_decl(&self) -> Option<TypeDecl<'a>> {
        let body = self.tree.parent(self.node)?;
        TypeDecl::cast(self.tree, self.tree.parent(body)?)
    }
}

impl<'a> ClassInstanceCreation<'a> {
    pub fn type_ref(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::TypeRef)
    }

    pub fn body(&self) -> Option<Body<'a>> {
        support::child(self.tree, self.node)
    }
}

fn dims_count(tree: &SourceTree, node: NodeId) -> usize {
    tree.child_of_kind(node, SyntaxKind::Dims)
        .map_or(0, |dims| tree.children_of_kind(dims, SyntaxKind::LBracket).count())
}
