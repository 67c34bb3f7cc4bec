use crate::member::{MemberSignature, SourcePosition};
use crate::ty::{ClassType, JavaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    Anonymous,
}

/// Semantic description of a type, as produced by a [`crate::TypeResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub qualified_name: String,
    pub package: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub superclass: Option<JavaType>,
    pub interfaces: Vec<JavaType>,
    /// Qualified names of all supertypes in reading order: depth-first, pre-order, superclass
    /// before interfaces, each supertype once.
    pub hierarchy: Vec<String>,
    /// Declared within a non-null-by-default context.
    pub non_null_by_default: bool,
    pub position: Option<SourcePosition>,
    abstract_members: Vec<MemberSignature>,
    abstract_members_of_input: Vec<MemberSignature>,
}

impl TypeDescriptor {
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let package = ClassType::from_qualified(&qualified_name).package;
        Self {
            qualified_name,
            package,
            kind,
            is_abstract: matches!(kind, TypeKind::Interface | TypeKind::Annotation),
            superclass: None,
            interfaces: Vec::new(),
            hierarchy: Vec::new(),
            non_null_by_default: false,
            position: None,
            abstract_members: Vec::new(),
            abstract_members_of_input: Vec::new(),
        }
    }

    pub fn with_abstract_members(
        mut self,
        inherited: Vec<MemberSignature>,
        of_input: Vec<MemberSignature>,
    ) -> Self {
        self.abstract_members = inherited;
        self.abstract_members_of_input = of_input;
        self
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Abstract members reachable through the supertypes that nothing in the chain implements.
    pub fn abstract_members(&self) -> &[MemberSignature] {
        &self.abstract_members
    }

    /// Like [`Self::abstract_members`], plus the abstract methods the type declares itself.
    pub fn abstract_members_of_input(&self) -> &[MemberSignature] {
        &self.abstract_members_of_input
    }

    /// Rank of `qualified_name` in [`Self::hierarchy`].
    pub fn hierarchy_rank(&self, qualified_name: &str) -> Option<usize> {
        self.hierarchy.iter().position(|name| name == qualified_name)
    }
}
