use std::collections::{HashMap, HashSet};

use jfix_syntax::ast::support;
use jfix_syntax::{
    AstNode, Body, ClassInstanceCreation, CompilationUnit, EnumConstant, Method, NodeId,
    SourceTree, SyntaxKind, TypeDecl, TypeDeclKind, TypeParam, TypeSyntax,
};

use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::member::{
    DeclaringType, MemberSignature, NullAnnotationNames, Nullness, ParamSignature, SourcePosition,
    Visibility,
};
use crate::store::{TypeStore, JAVA_LANG_NAMES};
use crate::ty::{ClassType, JavaType, PrimitiveType, TypeParameter, TypeVariable, WildcardBound};
use crate::{ResolveError, TypeResolver};

const MAX_HIERARCHY_DEPTH: usize = 64;

/// Reference [`TypeResolver`] over the tree being fixed plus a [`TypeStore`] of library types.
///
/// Resolution is best effort: names that cannot be bound become [`JavaType::Unresolved`] and
/// supertypes without a declaration contribute no members.
pub struct SourceResolver<'s> {
    store: &'s TypeStore,
    null_annotations: Option<NullAnnotationNames>,
}

impl<'s> SourceResolver<'s> {
    pub fn new(store: &'s TypeStore) -> Self {
        Self {
            store,
            null_annotations: None,
        }
    }

    /// Enable annotation-based nullness: parameter and return nullness, and the
    /// non-null-by-default context flag.
    pub fn with_null_annotations(mut self, names: Option<NullAnnotationNames>) -> Self {
        self.null_annotations = names;
        self
    }

    fn env<'r>(&'r self, input: &'r SourceTree) -> Env<'r> {
        let unit = Unit {
            name: "",
            tree: input,
        };
        let mut index = HashMap::new();
        for decl in CompilationUnit::root(input).all_type_declarations() {
            let name = qualified_name_of(unit, decl.node());
            index.entry(name).or_insert(decl.node());
        }
        Env {
            store: self.store,
            input: unit,
            input_index: index,
            nulls: self.null_annotations.as_ref(),
        }
    }
}

impl TypeResolver for SourceResolver<'_> {
    fn resolve_type(
        &self,
        tree: &SourceTree,
        node: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError> {
        if node.index() >= tree.len() {
            return Err(ResolveError::ForeignNode(node));
        }
        let env = self.env(tree);
        match tree.kind(node) {
            kind if kind.is_type_declaration() => {
                let decl = Decl {
                    unit: env.input,
                    node,
                };
                match env.named_type_info(decl) {
                    Some(info) => env.describe(info).map(Some),
                    None => Ok(None),
                }
            }
            SyntaxKind::ClassInstanceCreation => env.describe_anonymous(node),
            SyntaxKind::EnumConstant => self.resolve_enum_constant(tree, node),
            SyntaxKind::AnonymousClassBody => match tree.parent(node) {
                Some(owner) => self.resolve_type(tree, owner),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn resolve_enum_constant(
        &self,
        tree: &SourceTree,
        constant: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError> {
        if constant.index() >= tree.len() {
            return Err(ResolveError::ForeignNode(constant));
        }
        let env = self.env(tree);
        let Some(constant) = EnumConstant::cast(tree, constant) else {
            return Ok(None);
        };
        let Some(enum_decl) = constant.enum_decl() else {
            return Ok(None);
        };
        let enum_decl = Decl {
            unit: env.input,
            node: enum_decl.node(),
        };
        match constant.body() {
            Some(body) => {
                let enum_type = JavaType::Class(env.class_type_of(enum_decl));
                let info = TypeInfo {
                    decl: Decl {
                        unit: env.input,
                        node: constant.node(),
                    },
                    body: Some(body.node()),
                    qualified_name: anonymous_name(env.input, body.node()),
                    kind: TypeKind::Anonymous,
                    is_abstract: false,
                    superclass: Some(enum_type),
                    interfaces: Vec::new(),
                    type_params: Vec::new(),
                };
                env.describe(info).map(Some)
            }
            None => match env.named_type_info(enum_decl) {
                Some(info) => env.describe(info).map(Some),
                None => Ok(None),
            },
        }
    }
}

#[derive(Clone, Copy)]
struct Unit<'r> {
    name: &'r str,
    tree: &'r SourceTree,
}

#[derive(Clone, Copy)]
struct Decl<'r> {
    unit: Unit<'r>,
    node: NodeId,
}

/// A type seen during resolution, in its own declaration context (nothing substituted).
struct TypeInfo<'r> {
    decl: Decl<'r>,
    body: Option<NodeId>,
    qualified_name: String,
    kind: TypeKind,
    is_abstract: bool,
    superclass: Option<JavaType>,
    interfaces: Vec<JavaType>,
    type_params: Vec<TypeVariable>,
}

struct Visited<'r> {
    info: TypeInfo<'r>,
    subst: HashMap<String, JavaType>,
    /// Reached from the root through superclass edges only.
    class_chain: bool,
    /// Qualified names of the direct supertypes.
    supertypes: Vec<String>,
}

struct MethodInfo {
    sig: MemberSignature,
    is_abstract: bool,
    is_static: bool,
    is_private: bool,
}

struct Walk<'r> {
    stack: Vec<String>,
    seen: HashSet<String>,
    hierarchy: Vec<String>,
    visited: Vec<Visited<'r>>,
}

struct Env<'r> {
    store: &'r TypeStore,
    input: Unit<'r>,
    input_index: HashMap<String, NodeId>,
    nulls: Option<&'r NullAnnotationNames>,
}

impl<'r> Env<'r> {
    fn find(&self, qualified: &str) -> Option<Decl<'r>> {
        if let Some(&node) = self.input_index.get(qualified) {
            return Some(Decl {
                unit: self.input,
                node,
            });
        }
        let (lib, node) = self.store.lookup(qualified)?;
        Some(Decl {
            unit: Unit {
                name: &lib.name,
                tree: &lib.tree,
            },
            node,
        })
    }

    fn describe(&self, root: TypeInfo<'r>) -> Result<TypeDescriptor, ResolveError> {
        let mut walk = Walk {
            stack: vec![root.qualified_name.clone()],
            seen: HashSet::from([root.qualified_name.clone()]),
            hierarchy: vec![root.qualified_name.clone()],
            visited: Vec::new(),
        };
        if let Some(superclass) = &root.superclass {
            self.visit(superclass, true, &mut walk)?;
        }
        for interface in &root.interfaces {
            self.visit(interface, false, &mut walk)?;
        }

        let (inherited, of_input) = self.compute_gap(&root, &walk.visited);

        let mut descriptor = TypeDescriptor::new(root.qualified_name.clone(), root.kind)
            .with_abstract_members(inherited, of_input);
        descriptor.package = package_of(root.decl.unit);
        descriptor.is_abstract = root.is_abstract;
        descriptor.superclass = root.superclass.clone();
        descriptor.interfaces = root.interfaces.clone();
        descriptor.hierarchy = walk.hierarchy;
        descriptor.non_null_by_default = self.non_null_by_default(root.decl.unit, root.decl.node);
        descriptor.position = Some(SourcePosition {
            unit: root.decl.unit.name.to_string(),
            offset: u32::from(root.decl.unit.tree.range(root.decl.node).start()),
        });
        Ok(descriptor)
    }

    /// Depth-first, pre-order: superclass before interfaces, every supertype once.
    fn visit(
        &self,
        ty: &JavaType,
        class_chain: bool,
        walk: &mut Walk<'r>,
    ) -> Result<(), ResolveError> {
        let JavaType::Class(class) = ty else {
            return Ok(());
        };
        let qualified = class.qualified_name();
        if walk.stack.contains(&qualified) {
            return Err(ResolveError::CyclicHierarchy(qualified));
        }
        if walk.stack.len() > MAX_HIERARCHY_DEPTH {
            return Err(ResolveError::HierarchyTooDeep(walk.stack[0].clone()));
        }
        if !walk.seen.insert(qualified.clone()) {
            return Ok(());
        }
        walk.hierarchy.push(qualified.clone());

        let Some(info) = self.find(&qualified).and_then(|decl| self.named_type_info(decl)) else {
            tracing::debug!(
                target = "jfix.types",
                supertype = %qualified,
                "no declaration for supertype; it contributes no members"
            );
            return Ok(());
        };
        let subst = type_arguments(&info.type_params, &class.args);
        let superclass = info.superclass.as_ref().map(|t| t.substitute(&subst));
        let interfaces: Vec<JavaType> = info.interfaces.iter().map(|t| t.substitute(&subst)).collect();
        let supertypes = superclass
            .iter()
            .chain(&interfaces)
            .filter_map(JavaType::as_class)
            .map(ClassType::qualified_name)
            .collect();
        walk.visited.push(Visited {
            info,
            subst,
            class_chain,
            supertypes,
        });

        walk.stack.push(qualified);
        if let Some(superclass) = superclass {
            self.visit(&superclass, class_chain, walk)?;
        }
        for interface in &interfaces {
            self.visit(interface, false, walk)?;
        }
        walk.stack.pop();
        Ok(())
    }

    /// `(inherited, of_input)` abstract members, in reading order.
    fn compute_gap(
        &self,
        root: &TypeInfo<'r>,
        visited: &[Visited<'r>],
    ) -> (Vec<MemberSignature>, Vec<MemberSignature>) {
        // The first class in the chain declaring a signature decides whether it is implemented.
        let mut settled: Vec<(MemberSignature, bool, bool)> = Vec::new();
        for method in self.methods_of(root) {
            if method.is_static || method.is_private {
                continue;
            }
            settled.push((method.sig, method.is_abstract, true));
        }
        for v in visited.iter().filter(|v| v.class_chain) {
            for method in self.methods_of(&v.info) {
                if method.is_static || method.is_private {
                    continue;
                }
                let sig = method.sig.substitute(&v.subst);
                if settled.iter().any(|(s, _, _)| s.overrides(&sig)) {
                    continue;
                }
                settled.push((sig, method.is_abstract, false));
            }
        }

        // Interface members keep their declaring interface: a default only implements abstract
        // methods of its own supertypes.
        let mut defaults: Vec<(&str, MemberSignature)> = Vec::new();
        let mut interface_abstract: Vec<(&str, MemberSignature)> = Vec::new();
        for v in visited.iter().filter(|v| !v.class_chain) {
            let owner = v.info.qualified_name.as_str();
            for method in self.methods_of(&v.info) {
                if method.is_static || method.is_private {
                    continue;
                }
                let sig = method.sig.substitute(&v.subst);
                if method.is_abstract {
                    interface_abstract.push((owner, sig));
                } else {
                    defaults.push((owner, sig));
                }
            }
        }

        let mut inherited: Vec<MemberSignature> = Vec::new();
        for (sig, is_abstract, own) in &settled {
            if *is_abstract && !own {
                push_unique(&mut inherited, sig.clone());
            }
        }
        for (owner, sig) in interface_abstract {
            let implemented = settled.iter().any(|(s, _, _)| s.overrides(&sig))
                || defaults.iter().any(|(default_owner, d)| {
                    d.overrides(&sig) && is_proper_subtype(visited, default_owner, owner)
                });
            if !implemented {
                push_unique(&mut inherited, sig);
            }
        }

        let mut of_input: Vec<MemberSignature> = settled
            .iter()
            .filter(|(_, is_abstract, own)| *is_abstract && *own)
            .map(|(sig, _, _)| sig.clone())
            .collect();
        for sig in &inherited {
            push_unique(&mut of_input, sig.clone());
        }
        (inherited, of_input)
    }

    fn named_type_info(&self, decl: Decl<'r>) -> Option<TypeInfo<'r>> {
        let tree = decl.unit.tree;
        let view = TypeDecl::cast(tree, decl.node)?;
        let qualified_name = qualified_name_of(decl.unit, decl.node);
        let vars = self.type_vars_in_scope(decl.unit, decl.node);
        let own_params: Vec<TypeVariable> = view
            .type_parameters()
            .iter()
            .filter_map(|tp| tp.name())
            .filter_map(|name| vars.iter().find(|v| v.name == name).cloned())
            .collect();
        let resolve = |node: NodeId| {
            self.resolve_syntax(
                decl.unit,
                decl.node,
                &TypeSyntax::from_node(tree, node),
                &vars,
            )
        };

        let implements: Vec<JavaType> = view.implements_types().into_iter().map(resolve).collect();
        let (kind, superclass, interfaces) = match view.kind() {
            TypeDeclKind::Class => {
                let superclass = if qualified_name == crate::JAVA_LANG_OBJECT {
                    None
                } else {
                    Some(
                        view.extends_types()
                            .first()
                            .map(|&node| resolve(node))
                            .unwrap_or_else(JavaType::object),
                    )
                };
                (TypeKind::Class, superclass, implements)
            }
            TypeDeclKind::Interface => (
                TypeKind::Interface,
                None,
                view.extends_types().into_iter().map(resolve).collect(),
            ),
            TypeDeclKind::Enum => {
                let self_type = JavaType::Class(self.class_type_of(decl));
                let enum_type = JavaType::Class(ClassType::new("java.lang", "Enum", vec![self_type]));
                (TypeKind::Enum, Some(enum_type), implements)
            }
            TypeDeclKind::Record => (
                TypeKind::Record,
                Some(JavaType::class("java.lang.Record")),
                implements,
            ),
            TypeDeclKind::Annotation => (TypeKind::Annotation, None, Vec::new()),
        };

        let is_abstract = match kind {
            TypeKind::Interface | TypeKind::Annotation => true,
            TypeKind::Class => view.is_abstract(),
            _ => false,
        };

        Some(TypeInfo {
            decl,
            body: view.body().map(|body| body.node()),
            qualified_name,
            kind,
            is_abstract,
            superclass,
            interfaces,
            type_params: own_params,
        })
    }

    fn describe_anonymous(&self, creation: NodeId) -> Result<Option<TypeDescriptor>, ResolveError> {
        let unit = self.input;
        let tree = unit.tree;
        let Some(view) = ClassInstanceCreation::cast(tree, creation) else {
            return Ok(None);
        };
        let (Some(body), Some(type_ref)) = (view.body(), view.type_ref()) else {
            return Ok(None);
        };
        let vars = self.type_vars_in_scope(unit, creation);
        let supertype =
            self.resolve_syntax(unit, creation, &TypeSyntax::from_node(tree, type_ref), &vars);
        let JavaType::Class(class) = &supertype else {
            tracing::debug!(
                target = "jfix.types",
                supertype = %supertype,
                "anonymous class supertype does not resolve"
            );
            return Ok(None);
        };

        let is_interface = self
            .find(&class.qualified_name())
            .and_then(|decl| TypeDecl::cast(decl.unit.tree, decl.node))
            .map_or(false, |decl| {
                matches!(decl.kind(), TypeDeclKind::Interface | TypeDeclKind::Annotation)
            });
        let (superclass, interfaces) = if is_interface {
            (JavaType::object(), vec![supertype.clone()])
        } else {
            (supertype.clone(), Vec::new())
        };

        let info = TypeInfo {
            decl: Decl {
                unit,
                node: creation,
            },
            body: Some(body.node()),
            qualified_name: anonymous_name(unit, body.node()),
            kind: TypeKind::Anonymous,
            is_abstract: false,
            superclass: Some(superclass),
            interfaces,
            type_params: Vec::new(),
        };
        self.describe(info).map(Some)
    }

    fn methods_of(&self, info: &TypeInfo<'r>) -> Vec<MethodInfo> {
        let tree = info.decl.unit.tree;
        let Some(body) = info.body.and_then(|node| Body::cast(tree, node)) else {
            return Vec::new();
        };
        let is_interface = matches!(info.kind, TypeKind::Interface | TypeKind::Annotation);

        let mut out = Vec::new();
        for (index, method) in body.methods().into_iter().enumerate() {
            let is_static = method.has_modifier(SyntaxKind::StaticKw);
            let is_private = method.has_modifier(SyntaxKind::PrivateKw);
            let is_abstract = if is_interface {
                !method.has_body()
                    && !is_static
                    && !is_private
                    && !method.has_modifier(SyntaxKind::DefaultKw)
            } else {
                method.has_modifier(SyntaxKind::AbstractKw)
            };
            out.push(MethodInfo {
                sig: self.member_signature(info, method, index as u32, is_interface),
                is_abstract,
                is_static,
                is_private,
            });
        }

        if info.kind == TypeKind::Record {
            out.extend(self.implicit_record_members(info, out.len() as u32));
        }
        out
    }

    /// Accessors plus `equals`, `hashCode` and `toString`, all implemented by the compiler.
    fn implicit_record_members(&self, info: &TypeInfo<'r>, first_index: u32) -> Vec<MethodInfo> {
        let tree = info.decl.unit.tree;
        let Some(view) = TypeDecl::cast(tree, info.decl.node) else {
            return Vec::new();
        };
        let vars = self.type_vars_in_scope(info.decl.unit, info.decl.node);
        let mut implicit: Vec<(String, Vec<JavaType>, JavaType)> = view
            .record_components()
            .iter()
            .filter_map(|component| {
                let name = component.name()?.to_string();
                let ty = self.resolve_syntax(
                    info.decl.unit,
                    info.decl.node,
                    &component.type_syntax(),
                    &vars,
                );
                Some((name, Vec::new(), ty))
            })
            .collect();
        implicit.push((
            "equals".to_string(),
            vec![JavaType::object()],
            JavaType::Primitive(PrimitiveType::Boolean),
        ));
        implicit.push((
            "hashCode".to_string(),
            Vec::new(),
            JavaType::Primitive(PrimitiveType::Int),
        ));
        implicit.push((
            "toString".to_string(),
            Vec::new(),
            JavaType::class("java.lang.String"),
        ));

        implicit
            .into_iter()
            .enumerate()
            .map(|(i, (name, params, return_type))| MethodInfo {
                sig: MemberSignature {
                    declaring_type: self.declaring_type(info),
                    name,
                    type_params: Vec::new(),
                    declared_param_keys: params.iter().map(JavaType::erased_key).collect(),
                    params: params
                        .into_iter()
                        .map(|ty| ParamSignature {
                            ty,
                            name: None,
                            nullness: Nullness::Unspecified,
                        })
                        .collect(),
                    varargs: false,
                    return_type,
                    return_nullness: Nullness::Unspecified,
                    thrown: Vec::new(),
                    visibility: Visibility::Public,
                    index: first_index + i as u32,
                },
                is_abstract: false,
                is_static: false,
                is_private: false,
            })
            .collect()
    }

    fn member_signature(
        &self,
        info: &TypeInfo<'r>,
        method: Method<'_>,
        index: u32,
        is_interface: bool,
    ) -> MemberSignature {
        let unit = info.decl.unit;
        let tree = unit.tree;
        let context = method.node();
        let vars = self.type_vars_in_scope(unit, context);
        let resolve = |ty: &TypeSyntax| self.resolve_syntax(unit, context, ty, &vars);

        let type_params = method
            .type_parameters()
            .iter()
            .filter_map(|tp| {
                Some(TypeParameter {
                    name: tp.name()?.to_string(),
                    bounds: tp.bounds().iter().map(resolve).collect(),
                })
            })
            .collect();

        let declared: Vec<_> = method
            .parameters()
            .into_iter()
            .filter(|p| !p.is_receiver())
            .collect();
        let varargs = declared.last().map_or(false, |p| p.is_varargs());
        let params: Vec<ParamSignature> = declared
            .iter()
            .map(|p| {
                let syntax = p.type_syntax();
                let mut ty = resolve(&syntax);
                if p.is_varargs() {
                    ty = JavaType::Array(Box::new(ty));
                }
                let mut annotations = p
                    .modifiers()
                    .map(|m| m.annotation_names())
                    .unwrap_or_default();
                annotations.extend(syntax.annotations().iter().cloned());
                ParamSignature {
                    ty,
                    name: p.name().map(str::to_string),
                    nullness: self.nullness(&annotations),
                }
            })
            .collect();

        let return_syntax = method.return_type_syntax();
        let mut return_annotations = method
            .modifiers()
            .map(|m| m.annotation_names())
            .unwrap_or_default();
        return_annotations.extend(return_syntax.annotations().iter().cloned());

        let visibility = if method.has_modifier(SyntaxKind::PublicKw) || is_interface {
            Visibility::Public
        } else if method.has_modifier(SyntaxKind::ProtectedKw) {
            Visibility::Protected
        } else if method.has_modifier(SyntaxKind::PrivateKw) {
            Visibility::Private
        } else {
            Visibility::Package
        };

        MemberSignature {
            declaring_type: self.declaring_type(info),
            name: method.name().unwrap_or_default().to_string(),
            type_params,
            declared_param_keys: params.iter().map(|p| p.ty.erased_key()).collect(),
            params,
            varargs,
            return_type: resolve(&return_syntax),
            return_nullness: self.nullness(&return_annotations),
            thrown: method
                .thrown_types()
                .into_iter()
                .map(|node| resolve(&TypeSyntax::from_node(tree, node)))
                .collect(),
            visibility,
            index,
        }
    }

    fn declaring_type(&self, info: &TypeInfo<'r>) -> DeclaringType {
        DeclaringType {
            qualified_name: info.qualified_name.clone(),
            position: Some(SourcePosition {
                unit: info.decl.unit.name.to_string(),
                offset: u32::from(info.decl.unit.tree.range(info.decl.node).start()),
            }),
        }
    }

    fn nullness(&self, annotations: &[String]) -> Nullness {
        self.nulls.map_or(Nullness::Unspecified, |names| {
            names.nullness_of(annotations.iter().map(String::as_str))
        })
    }

    /// The declaration (or any enclosing type or method) carries the non-null-by-default
    /// annotation.
    fn non_null_by_default(&self, unit: Unit<'r>, node: NodeId) -> bool {
        let Some(names) = self.nulls else {
            return false;
        };
        let tree = unit.tree;
        tree.ancestors(node).any(|anc| {
            let kind = tree.kind(anc);
            if !(kind.is_type_declaration() || kind == SyntaxKind::MethodDeclaration) {
                return false;
            }
            tree.child_of_kind(anc, SyntaxKind::Modifiers)
                .and_then(|m| jfix_syntax::Modifiers::cast(tree, m))
                .map_or(false, |m| {
                    m.annotation_names()
                        .iter()
                        .any(|name| names.is_non_null_by_default(name))
                })
        })
    }

    /// Type variables visible at `context`, innermost first.
    fn type_vars_in_scope(&self, unit: Unit<'r>, context: NodeId) -> Vec<TypeVariable> {
        let tree = unit.tree;
        let mut vars: Vec<TypeVariable> = Vec::new();
        for anc in tree.ancestors(context) {
            let kind = tree.kind(anc);
            let declares_params = kind.is_type_declaration()
                || matches!(
                    kind,
                    SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration
                );
            if !declares_params {
                continue;
            }
            let Some(params) = tree.child_of_kind(anc, SyntaxKind::TypeParameters) else {
                continue;
            };
            let declared: Vec<TypeParam<'_>> = support::children(tree, params);
            let mut scope: Vec<TypeVariable> = Vec::new();
            for tp in &declared {
                let Some(name) = tp.name() else {
                    continue;
                };
                let erasure = match tp.bounds().first().and_then(TypeSyntax::dotted_name) {
                    None => crate::JAVA_LANG_OBJECT.to_string(),
                    Some(bound) => {
                        let sibling = declared
                            .iter()
                            .any(|other| other.name() == Some(bound.as_str()));
                        if sibling || vars.iter().any(|v| v.name == bound) {
                            // Bounded by another type variable; erase to that variable's bound.
                            vars.iter()
                                .find(|v| v.name == bound)
                                .map_or_else(|| crate::JAVA_LANG_OBJECT.to_string(), |v| v.erasure.clone())
                        } else {
                            self.resolve_class_name(unit, anc, &bound)
                                .map_or(bound, |class| class.qualified_name())
                        }
                    }
                };
                scope.push(TypeVariable {
                    name: name.to_string(),
                    erasure,
                });
            }
            vars.extend(scope);
        }
        vars
    }

    fn resolve_syntax(
        &self,
        unit: Unit<'r>,
        context: NodeId,
        ty: &TypeSyntax,
        vars: &[TypeVariable],
    ) -> JavaType {
        match ty {
            TypeSyntax::Primitive(keyword) => PrimitiveType::from_keyword(keyword)
                .map_or_else(|| JavaType::Unresolved(keyword.clone()), JavaType::Primitive),
            TypeSyntax::Void => JavaType::Void,
            TypeSyntax::Array(element) => {
                JavaType::Array(Box::new(self.resolve_syntax(unit, context, element, vars)))
            }
            TypeSyntax::Wildcard(None) => JavaType::Wildcard(WildcardBound::Unbounded),
            TypeSyntax::Wildcard(Some(jfix_syntax::WildcardBound::Extends(bound))) => {
                JavaType::Wildcard(WildcardBound::Extends(Box::new(
                    self.resolve_syntax(unit, context, bound, vars),
                )))
            }
            TypeSyntax::Wildcard(Some(jfix_syntax::WildcardBound::Super(bound))) => {
                JavaType::Wildcard(WildcardBound::Super(Box::new(
                    self.resolve_syntax(unit, context, bound, vars),
                )))
            }
            TypeSyntax::Missing => JavaType::Unresolved("Object".to_string()),
            TypeSyntax::Named { segments, .. } => {
                if let [single] = segments.as_slice() {
                    if single.args.is_empty() {
                        if let Some(var) = vars.iter().find(|v| v.name == single.name) {
                            return JavaType::TypeVar(var.clone());
                        }
                    }
                }
                let dotted = ty.dotted_name().unwrap_or_default();
                match self.resolve_class_name(unit, context, &dotted) {
                    Some(mut class) => {
                        class.args = segments
                            .last()
                            .map(|segment| {
                                segment
                                    .args
                                    .iter()
                                    .map(|arg| self.resolve_syntax(unit, context, arg, vars))
                                    .collect()
                            })
                            .unwrap_or_default();
                        JavaType::Class(class)
                    }
                    None => JavaType::Unresolved(ty.to_string()),
                }
            }
        }
    }

    /// Bind a (possibly qualified) type name as written at `context`.
    ///
    /// Lookup order: enclosing types and their member types, local types, single-type imports,
    /// the current package, on-demand imports, `java.lang`, then fully qualified names.
    fn resolve_class_name(&self, unit: Unit<'r>, context: NodeId, dotted: &str) -> Option<ClassType> {
        let segments: Vec<&str> = dotted.split('.').collect();
        let (first, rest) = segments.split_first()?;
        let tree = unit.tree;
        let package = package_of(unit);

        for anc in tree.ancestors(context) {
            let kind = tree.kind(anc);
            if kind.is_type_declaration() {
                let qualified = qualified_name_of(unit, anc);
                if support::simple_name(tree, anc) == Some(*first) {
                    return Some(self.class_for_qualified(&qualified, rest));
                }
                let member = format!("{qualified}.{first}");
                if self.find(&member).is_some() {
                    return Some(self.class_for_qualified(&member, rest));
                }
            } else if kind == SyntaxKind::Block {
                let local = tree
                    .child_nodes(anc)
                    .filter(|&child| tree.kind(child).is_type_declaration())
                    .find(|&child| support::simple_name(tree, child) == Some(*first));
                if let Some(local) = local {
                    return Some(self.class_for_qualified(&qualified_name_of(unit, local), rest));
                }
            }
        }

        let cu = CompilationUnit::root(tree);
        let imports: Vec<_> = cu.imports().into_iter().filter(|i| !i.is_static()).collect();
        for import in imports.iter().filter(|i| !i.is_on_demand()) {
            let path = import.path();
            if path.rsplit('.').next() == Some(*first) {
                return Some(self.class_for_qualified(&path, rest));
            }
        }

        let same_package = qualify(&package, first);
        if self.find(&same_package).is_some() {
            return Some(self.class_for_qualified(&same_package, rest));
        }

        for import in imports.iter().filter(|i| i.is_on_demand()) {
            let candidate = format!("{}.{}", import.path(), first);
            if self.find(&candidate).is_some() {
                return Some(self.class_for_qualified(&candidate, rest));
            }
        }

        let java_lang = format!("java.lang.{first}");
        if self.find(&java_lang).is_some() || JAVA_LANG_NAMES.contains(first) {
            return Some(self.class_for_qualified(&java_lang, rest));
        }

        if !rest.is_empty() {
            for end in (1..=segments.len()).rev() {
                let prefix = segments[..end].join(".");
                if self.find(&prefix).is_some() {
                    return Some(self.class_for_qualified(&prefix, &segments[end..]));
                }
            }
            if first.starts_with(|c: char| c.is_lowercase()) {
                return Some(ClassType::from_qualified(dotted));
            }
        }
        None
    }

    /// Class type for a qualified name (plus nested `rest` segments), taking the package from the
    /// declaration when one is known.
    fn class_for_qualified(&self, qualified: &str, rest: &[&str]) -> ClassType {
        let mut class = match self.find(qualified) {
            Some(decl) => {
                let package = package_of(decl.unit);
                let name = strip_package(qualified, &package).to_string();
                ClassType::new(package, name, Vec::new())
            }
            None => ClassType::from_qualified(qualified),
        };
        for segment in rest {
            class.name.push('.');
            class.name.push_str(segment);
        }
        class
    }

    fn class_type_of(&self, decl: Decl<'r>) -> ClassType {
        let package = package_of(decl.unit);
        let qualified = qualified_name_of(decl.unit, decl.node);
        let name = strip_package(&qualified, &package).to_string();
        ClassType::new(package, name, Vec::new())
    }
}

fn package_of(unit: Unit<'_>) -> String {
    CompilationUnit::root(unit.tree).package_name()
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

fn strip_package<'a>(qualified: &'a str, package: &str) -> &'a str {
    if package.is_empty() {
        return qualified;
    }
    qualified
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(qualified)
}

fn qualified_name_of(unit: Unit<'_>, decl: NodeId) -> String {
    support::qualified_type_name(unit.tree, decl)
}

/// `Outer$N`, numbering anonymous bodies in source order within the outermost type.
fn anonymous_name(unit: Unit<'_>, body: NodeId) -> String {
    let tree = unit.tree;
    let outermost = tree
        .ancestors(body)
        .filter(|&anc| tree.kind(anc).is_type_declaration())
        .last();
    let Some(outermost) = outermost else {
        return qualify(&package_of(unit), "$1");
    };
    let ordinal = tree
        .descendants(outermost)
        .into_iter()
        .filter(|&n| tree.kind(n) == SyntaxKind::AnonymousClassBody)
        .position(|n| n == body)
        .map_or(1, |i| i + 1);
    format!("{}${ordinal}", qualified_name_of(unit, outermost))
}

fn type_arguments(params: &[TypeVariable], args: &[JavaType]) -> HashMap<String, JavaType> {
    if params.len() == args.len() {
        params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name.clone(), arg.clone()))
            .collect()
    } else {
        // Raw (or malformed) reference: members are seen erased.
        params
            .iter()
            .map(|param| (param.name.clone(), JavaType::class(&param.erasure)))
            .collect()
    }
}

/// Whether `sub` reaches `sup` through the recorded supertype edges, `sub != sup`.
fn is_proper_subtype(visited: &[Visited<'_>], sub: &str, sup: &str) -> bool {
    let supertypes_of = |name: &str| {
        visited
            .iter()
            .find(|v| v.info.qualified_name == name)
            .map_or(&[][..], |v| v.supertypes.as_slice())
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = supertypes_of(sub).iter().map(String::as_str).collect();
    while let Some(next) = stack.pop() {
        if next == sup {
            return true;
        }
        if seen.insert(next) {
            stack.extend(supertypes_of(next).iter().map(String::as_str));
        }
    }
    false
}

fn push_unique(list: &mut Vec<MemberSignature>, sig: MemberSignature) {
    if !list.iter().any(|existing| existing.overrides(&sig)) {
        list.push(sig);
    }
}
