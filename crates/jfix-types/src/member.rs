use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ty::{JavaType, TypeParameter};

/// Where a type is declared: the unit it was parsed from and the byte offset of its declaration.
///
/// The unit being fixed has the empty unit name, so it sorts before library units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    pub unit: String,
    pub offset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// The modifier keyword, or `None` for package-private.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Public => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Private => Some("private"),
            Visibility::Package => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Nullness {
    #[default]
    Unspecified,
    Nullable,
    NonNull,
}

/// Qualified names of the annotations used by annotation-based null analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NullAnnotationNames {
    pub nullable: String,
    pub non_null: String,
    pub non_null_by_default: String,
}

impl Default for NullAnnotationNames {
    fn default() -> Self {
        Self {
            nullable: "org.eclipse.jdt.annotation.Nullable".to_string(),
            non_null: "org.eclipse.jdt.annotation.NonNull".to_string(),
            non_null_by_default: "org.eclipse.jdt.annotation.NonNullByDefault".to_string(),
        }
    }
}

impl NullAnnotationNames {
    /// Nullness expressed by a set of annotation names as written in source.
    pub fn nullness_of<'a>(&self, annotations: impl IntoIterator<Item = &'a str>) -> Nullness {
        for name in annotations {
            if annotation_matches(name, &self.nullable) {
                return Nullness::Nullable;
            }
            if annotation_matches(name, &self.non_null) {
                return Nullness::NonNull;
            }
        }
        Nullness::Unspecified
    }

    pub fn is_non_null_by_default(&self, name: &str) -> bool {
        annotation_matches(name, &self.non_null_by_default)
    }
}

/// `written` may be the simple or the qualified name of `qualified`.
fn annotation_matches(written: &str, qualified: &str) -> bool {
    written == qualified || qualified.rsplit('.').next() == Some(written)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaringType {
    pub qualified_name: String,
    pub position: Option<SourcePosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSignature {
    pub ty: JavaType,
    /// Name as declared in source, when known.
    pub name: Option<String>,
    pub nullness: Nullness,
}

/// A method as seen from the type being fixed: type arguments of parameterized supertypes are
/// already substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub declaring_type: DeclaringType,
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub params: Vec<ParamSignature>,
    /// Erased parameter types as declared, before type arguments of the supertype are
    /// substituted. Javadoc links refer to these.
    pub declared_param_keys: Vec<String>,
    /// The last parameter is variable arity; its type is the array type.
    pub varargs: bool,
    pub return_type: JavaType,
    pub return_nullness: Nullness,
    pub thrown: Vec<JavaType>,
    pub visibility: Visibility,
    /// Declaration index of the member inside its declaring type.
    pub index: u32,
}

impl MemberSignature {
    pub fn erased_param_keys(&self) -> Vec<String> {
        self.params.iter().map(|p| p.ty.erased_key()).collect()
    }

    /// Two signatures are override-equivalent when names and erased parameter types match.
    pub fn overrides(&self, other: &MemberSignature) -> bool {
        self.name == other.name && self.erased_param_keys() == other.erased_param_keys()
    }

    /// Apply a substitution of the declaring type's type variables. Method type parameters shadow
    /// class type parameters of the same name.
    pub fn substitute(&self, map: &HashMap<String, JavaType>) -> MemberSignature {
        if map.is_empty() {
            return self.clone();
        }
        let mut map = map.clone();
        for tp in &self.type_params {
            map.remove(&tp.name);
        }
        MemberSignature {
            type_params: self.type_params.iter().map(|tp| tp.substitute(&map)).collect(),
            params: self
                .params
                .iter()
                .map(|p| ParamSignature {
                    ty: p.ty.substitute(&map),
                    ..p.clone()
                })
                .collect(),
            return_type: self.return_type.substitute(&map),
            thrown: self.thrown.iter().map(|t| t.substitute(&map)).collect(),
            ..self.clone()
        }
    }

    /// Fully qualified label, e.g. `com.example.Shape.area()`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemberSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_type.qualified_name, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match (&param.ty, self.varargs && i + 1 == self.params.len()) {
                (JavaType::Array(element), true) => write!(f, "{element}...")?,
                (ty, _) => write!(f, "{ty}")?,
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{PrimitiveType, TypeVariable};
    use pretty_assertions::assert_eq;

    fn member(name: &str, params: Vec<JavaType>) -> MemberSignature {
        MemberSignature {
            declaring_type: DeclaringType {
                qualified_name: "p.I".to_string(),
                position: None,
            },
            name: name.to_string(),
            type_params: Vec::new(),
            params: params
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
    fn override_equivalence_uses_erasure() {
        let generic = member(
            "put",
            vec![JavaType::Class(crate::ClassType::new(
                "java.util",
                "List",
                vec![JavaType::class("java.lang.String")],
            ))],
        );
        let raw = member("put", vec![JavaType::class("java.util.List")]);
        assert!(generic.overrides(&raw));
        assert!(!generic.overrides(&member("put", vec![])));
    }

    #[test]
    fn method_type_parameters_shadow_substitution() {
        let mut m = member("apply", vec![JavaType::type_var("T")]);
        m.type_params.push(TypeParameter {
            name: "T".to_string(),
            bounds: Vec::new(),
        });
        let map = HashMap::from([("T".to_string(), JavaType::class("java.lang.String"))]);
        assert_eq!(m.substitute(&map).params[0].ty, JavaType::type_var("T"));
    }

    #[test]
    fn label_is_fully_qualified_with_varargs() {
        let mut m = member(
            "log",
            vec![
                JavaType::class("java.lang.String"),
                JavaType::Array(Box::new(JavaType::Primitive(PrimitiveType::Int))),
            ],
        );
        m.varargs = true;
        assert_eq!(m.label(), "p.I.log(java.lang.String, int...)");

        let t = JavaType::TypeVar(TypeVariable {
            name: "T".to_string(),
            erasure: "java.lang.Object".to_string(),
        });
        assert_eq!(member("compareTo", vec![t]).label(), "p.I.compareTo(T)");
    }

    #[test]
    fn null_annotations_match_simple_or_qualified_names() {
        let names = NullAnnotationNames::default();
        assert_eq!(names.nullness_of(["Override", "Nullable"]), Nullness::Nullable);
        assert_eq!(
            names.nullness_of(["org.eclipse.jdt.annotation.NonNull"]),
            Nullness::NonNull
        );
        assert_eq!(names.nullness_of(["Deprecated"]), Nullness::Unspecified);
        assert!(names.is_non_null_by_default("NonNullByDefault"));
    }
}
