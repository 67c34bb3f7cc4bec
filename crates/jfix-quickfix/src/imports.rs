//! Position-sensitive type name rendering for generated code.

use std::collections::{BTreeSet, HashMap, HashSet};

use jfix_syntax::{AstNode, CompilationUnit, NodeId, SourceTree, SyntaxKind, TypeDecl};
use jfix_types::{is_java_lang_name, ClassType, JavaType, WildcardBound};

/// Decides how a type is written at an insertion point, and which imports that requires.
///
/// `java.lang` and same-package types use their simple name. A simple name that already means
/// something else in scope (a declared or imported type, a type variable) forces the qualified
/// form. Everything else is imported.
#[derive(Debug, Clone)]
pub struct ImportContext {
    package: String,
    /// Simple name to qualified name, for single-type imports and types declared in scope.
    visible: HashMap<String, String>,
    on_demand: HashSet<String>,
    type_vars: HashSet<String>,
    /// Names bound by rendering: same-package, on-demand and newly imported types.
    used: HashMap<String, String>,
    added: BTreeSet<String>,
}

impl ImportContext {
    /// Context for code inserted at `node` (a type body, a declaration or an enum constant).
    pub fn new(tree: &SourceTree, node: NodeId) -> Self {
        let unit = CompilationUnit::root(tree);
        let mut visible = HashMap::new();
        let mut on_demand = HashSet::new();
        for import in unit.imports() {
            if import.is_static() {
                continue;
            }
            let path = import.path();
            if import.is_on_demand() {
                on_demand.insert(path);
            } else if let Some(simple) = path.rsplit('.').next() {
                visible.insert(simple.to_string(), path.clone());
            }
        }

        // Declarations shadow imports.
        for decl in unit.type_declarations() {
            declare(&mut visible, decl);
        }
        let mut type_vars = HashSet::new();
        for anc in tree.ancestors(node) {
            let kind = tree.kind(anc);
            if let Some(decl) = TypeDecl::cast(tree, anc) {
                declare(&mut visible, decl);
                for member in decl.body().map(|body| body.members()).unwrap_or_default() {
                    if let Some(member) = TypeDecl::cast(tree, member) {
                        declare(&mut visible, member);
                    }
                }
            }
            if kind == SyntaxKind::Block {
                for local in tree.child_nodes(anc).filter_map(|n| TypeDecl::cast(tree, n)) {
                    declare(&mut visible, local);
                }
            }
            if kind.is_type_declaration() || kind == SyntaxKind::MethodDeclaration {
                if let Some(params) = tree.child_of_kind(anc, SyntaxKind::TypeParameters) {
                    for param in tree.children_of_kind(params, SyntaxKind::TypeParameter) {
                        if let Some(name) = tree.child_of_kind(param, SyntaxKind::SimpleName) {
                            type_vars.insert(tree.node_text(name).to_string());
                        }
                    }
                }
            }
        }

        Self {
            package: unit.package_name(),
            visible,
            on_demand,
            type_vars,
            used: HashMap::new(),
            added: BTreeSet::new(),
        }
    }

    /// Write `ty` for the insertion point, recording any import it needs.
    pub fn add_type(&mut self, ty: &JavaType) -> String {
        self.add_type_in(ty, &HashSet::new())
    }

    /// Like [`Self::add_type`], with the type parameters of the generated method in scope.
    pub(crate) fn add_type_in(&mut self, ty: &JavaType, method_vars: &HashSet<String>) -> String {
        match ty {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Void => "void".to_string(),
            JavaType::Array(element) => format!("{}[]", self.add_type_in(element, method_vars)),
            JavaType::TypeVar(var) => var.name.clone(),
            JavaType::Wildcard(WildcardBound::Unbounded) => "?".to_string(),
            JavaType::Wildcard(WildcardBound::Extends(bound)) => {
                format!("? extends {}", self.add_type_in(bound, method_vars))
            }
            JavaType::Wildcard(WildcardBound::Super(bound)) => {
                format!("? super {}", self.add_type_in(bound, method_vars))
            }
            JavaType::Unresolved(text) => text.clone(),
            JavaType::Class(class) => {
                let mut out = self.class_name(class, method_vars);
                if !class.args.is_empty() {
                    let args: Vec<String> = class
                        .args
                        .iter()
                        .map(|arg| self.add_type_in(arg, method_vars))
                        .collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                out
            }
        }
    }

    /// Qualified names of the imports recorded so far, sorted.
    pub fn added_imports(&self) -> Vec<String> {
        self.added.iter().cloned().collect()
    }

    fn class_name(&mut self, class: &ClassType, method_vars: &HashSet<String>) -> String {
        let top = class.top_level_name().to_string();
        let top_qualified = class.top_level_qualified_name();

        if method_vars.contains(&top) || self.type_vars.contains(&top) {
            return class.qualified_name();
        }
        if let Some(bound) = self.bound(&top) {
            return if bound == top_qualified {
                class.name.clone()
            } else {
                class.qualified_name()
            };
        }

        let implicit = class.package.is_empty()
            || class.package == self.package
            || class.package == "java.lang"
            || self.on_demand.contains(&class.package);
        if !implicit {
            self.added.insert(top_qualified.clone());
        }
        self.used.insert(top, top_qualified);
        class.name.clone()
    }

    /// What `simple` currently denotes, if anything.
    fn bound(&self, simple: &str) -> Option<String> {
        if let Some(qualified) = self.visible.get(simple).or_else(|| self.used.get(simple)) {
            return Some(qualified.clone());
        }
        is_java_lang_name(simple).then(|| format!("java.lang.{simple}"))
    }
}

fn declare(visible: &mut HashMap<String, String>, decl: TypeDecl<'_>) {
    if let Some(name) = decl.name() {
        visible.insert(name.to_string(), decl.qualified_name());
    }
}
