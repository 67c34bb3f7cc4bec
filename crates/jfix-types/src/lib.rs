//! Semantic model consumed by the quick-fix engine: Java types, member signatures, type
//! descriptors, and the [`TypeResolver`] boundary.
//!
//! [`SourceResolver`] is a reference implementation over a parsed compilation unit plus a
//! [`TypeStore`] of library declarations.

mod descriptor;
mod member;
mod resolver;
mod store;
mod ty;

pub use descriptor::{TypeDescriptor, TypeKind};
pub use member::{
    DeclaringType, MemberSignature, NullAnnotationNames, Nullness, ParamSignature, SourcePosition,
    Visibility,
};
pub use resolver::SourceResolver;
pub use store::{is_java_lang_name, TypeStore};
pub use ty::{
    ClassType, JavaType, PrimitiveType, TypeParameter, TypeVariable, WildcardBound,
    JAVA_LANG_OBJECT,
};

use jfix_syntax::{NodeId, SourceTree};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cyclic type hierarchy through `{0}`")]
    CyclicHierarchy(String),
    #[error("type hierarchy of `{0}` is nested too deeply")]
    HierarchyTooDeep(String),
    #[error("node {0:?} does not belong to the tree being resolved")]
    ForeignNode(NodeId),
}

/// Type-resolution service boundary.
///
/// `Ok(None)` means "no binding" (unresolvable); `Err` is a failure of the service itself.
pub trait TypeResolver {
    /// Descriptor for a type declaration, a class-instance creation with an anonymous body, an
    /// anonymous body, or an enum constant.
    fn resolve_type(
        &self,
        tree: &SourceTree,
        node: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError>;

    /// For a constant with a body: the anonymous class of that body. Otherwise: the declaring
    /// enum.
    fn resolve_enum_constant(
        &self,
        tree: &SourceTree,
        constant: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve_type(
        &self,
        tree: &SourceTree,
        node: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError> {
        (**self).resolve_type(tree, node)
    }

    fn resolve_enum_constant(
        &self,
        tree: &SourceTree,
        constant: NodeId,
    ) -> Result<Option<TypeDescriptor>, ResolveError> {
        (**self).resolve_enum_constant(tree, constant)
    }
}
