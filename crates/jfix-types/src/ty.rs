use std::collections::HashMap;
use std::fmt;

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn from_keyword(text: &str) -> Option<PrimitiveType> {
        Some(match text {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "char" => PrimitiveType::Char,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Literal of the default value, usable as a `return` expression.
    pub fn default_value(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "false",
            PrimitiveType::Long => "0L",
            PrimitiveType::Float => "0.0f",
            PrimitiveType::Double => "0.0",
            PrimitiveType::Char => "'\\0'",
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => "0",
        }
    }
}

/// A (possibly nested, possibly parameterized) class or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassType {
    /// Dotted package name; empty for the default package.
    pub package: String,
    /// Dotted name inside the package, e.g. `Map.Entry`.
    pub name: String,
    pub args: Vec<JavaType>,
}

impl ClassType {
    pub fn new(package: impl Into<String>, name: impl Into<String>, args: Vec<JavaType>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            args,
        }
    }

    /// Split a qualified name using the package-is-lowercase convention.
    ///
    /// `java.util.Map.Entry` becomes package `java.util`, name `Map.Entry`.
    pub fn from_qualified(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.split('.').collect();
        let split = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        Self::new(segments[..split].join("."), segments[split..].join("."), Vec::new())
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Outermost type's simple name (what an import would bring in scope).
    pub fn top_level_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    pub fn top_level_qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.top_level_name().to_string()
        } else {
            format!("{}.{}", self.package, self.top_level_name())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<JavaType>),
    Super(Box<JavaType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVariable {
    pub name: String,
    /// Qualified name of the erasure (the erased first bound, `java.lang.Object` by default).
    pub erasure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaType {
    Primitive(PrimitiveType),
    Void,
    Class(ClassType),
    Array(Box<JavaType>),
    TypeVar(TypeVariable),
    Wildcard(WildcardBound),
    /// A type the resolver could not bind; the text as written.
    Unresolved(String),
}

impl JavaType {
    pub fn object() -> JavaType {
        JavaType::Class(ClassType::new("java.lang", "Object", Vec::new()))
    }

    pub fn class(qualified: &str) -> JavaType {
        JavaType::Class(ClassType::from_qualified(qualified))
    }

    pub fn type_var(name: impl Into<String>) -> JavaType {
        JavaType::TypeVar(TypeVariable {
            name: name.into(),
            erasure: JAVA_LANG_OBJECT.to_string(),
        })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            JavaType::Unresolved(_) => false,
            JavaType::Array(element) => element.is_resolved(),
            JavaType::Class(class) => class.args.iter().all(JavaType::is_resolved),
            JavaType::Wildcard(WildcardBound::Extends(ty) | WildcardBound::Super(ty)) => {
                ty.is_resolved()
            }
            _ => true,
        }
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JavaType::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Type erasure (JLS 4.6).
    pub fn erasure(&self) -> JavaType {
        match self {
            JavaType::Class(class) => JavaType::Class(ClassType {
                args: Vec::new(),
                ..class.clone()
            }),
            JavaType::Array(element) => JavaType::Array(Box::new(element.erasure())),
            JavaType::TypeVar(var) => JavaType::class(&var.erasure),
            JavaType::Wildcard(WildcardBound::Extends(bound)) => bound.erasure(),
            JavaType::Wildcard(_) => JavaType::object(),
            JavaType::Unresolved(text) => {
                let base = text.split('<').next().unwrap_or(text).trim();
                let dims = text.matches("[]").count();
                JavaType::Unresolved(format!("{base}{}", "[]".repeat(dims)))
            }
            other => other.clone(),
        }
    }

    /// Key used to decide override equivalence: the erased type, fully qualified.
    pub fn erased_key(&self) -> String {
        self.erasure().to_string()
    }

    /// Replace type variables by name. Variables missing from `map` are left untouched.
    pub fn substitute(&self, map: &HashMap<String, JavaType>) -> JavaType {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            JavaType::TypeVar(var) => map.get(&var.name).cloned().unwrap_or_else(|| self.clone()),
            JavaType::Class(class) => JavaType::Class(ClassType {
                args: class.args.iter().map(|arg| arg.substitute(map)).collect(),
                ..class.clone()
            }),
            JavaType::Array(element) => JavaType::Array(Box::new(element.substitute(map))),
            JavaType::Wildcard(WildcardBound::Extends(bound)) => {
                JavaType::Wildcard(WildcardBound::Extends(Box::new(bound.substitute(map))))
            }
            JavaType::Wildcard(WildcardBound::Super(bound)) => {
                JavaType::Wildcard(WildcardBound::Super(Box::new(bound.substitute(map))))
            }
            other => other.clone(),
        }
    }

    /// Visit every class type mentioned by this type, outermost first.
    pub fn walk_classes<'a>(&'a self, f: &mut impl FnMut(&'a ClassType)) {
        match self {
            JavaType::Class(class) => {
                f(class);
                for arg in &class.args {
                    arg.walk_classes(f);
                }
            }
            JavaType::Array(element) => element.walk_classes(f),
            JavaType::Wildcard(WildcardBound::Extends(bound) | WildcardBound::Super(bound)) => {
                bound.walk_classes(f)
            }
            _ => {}
        }
    }
}

/// Fully qualified rendering, e.g. `java.util.List<java.lang.String>`.
impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Void => f.write_str("void"),
            JavaType::Class(class) => {
                f.write_str(&class.qualified_name())?;
                if !class.args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in class.args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            JavaType::Array(element) => write!(f, "{element}[]"),
            JavaType::TypeVar(var) => f.write_str(&var.name),
            JavaType::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            JavaType::Wildcard(WildcardBound::Extends(bound)) => write!(f, "? extends {bound}"),
            JavaType::Wildcard(WildcardBound::Super(bound)) => write!(f, "? super {bound}"),
            JavaType::Unresolved(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<JavaType>,
}

impl TypeParameter {
    pub fn erasure(&self) -> String {
        self.bounds
            .first()
            .map(|bound| match bound.erasure() {
                JavaType::Class(class) => class.qualified_name(),
                JavaType::Unresolved(text) => text,
                _ => JAVA_LANG_OBJECT.to_string(),
            })
            .unwrap_or_else(|| JAVA_LANG_OBJECT.to_string())
    }

    pub fn substitute(&self, map: &HashMap<String, JavaType>) -> TypeParameter {
        TypeParameter {
            name: self.name.clone(),
            bounds: self.bounds.iter().map(|b| b.substitute(map)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_qualified_names_by_convention() {
        let entry = ClassType::from_qualified("java.util.Map.Entry");
        assert_eq!(entry.package, "java.util");
        assert_eq!(entry.name, "Map.Entry");
        assert_eq!(entry.simple_name(), "Entry");
        assert_eq!(entry.top_level_qualified_name(), "java.util.Map");

        let default_pkg = ClassType::from_qualified("Shape");
        assert_eq!(default_pkg.package, "");
        assert_eq!(default_pkg.qualified_name(), "Shape");
    }

    #[test]
    fn substitution_reaches_nested_arguments() {
        let list_of_t = JavaType::Class(ClassType::new(
            "java.util",
            "List",
            vec![JavaType::Wildcard(WildcardBound::Extends(Box::new(
                JavaType::type_var("T"),
            )))],
        ));
        let map = HashMap::from([("T".to_string(), JavaType::class("java.lang.String"))]);
        assert_eq!(
            list_of_t.substitute(&map).to_string(),
            "java.util.List<? extends java.lang.String>"
        );
    }

    #[test]
    fn erasure_drops_arguments_and_binds_type_variables() {
        let var = JavaType::TypeVar(TypeVariable {
            name: "T".to_string(),
            erasure: "java.lang.Comparable".to_string(),
        });
        assert_eq!(JavaType::Array(Box::new(var)).erased_key(), "java.lang.Comparable[]");
        assert_eq!(
            JavaType::Unresolved("Foo<Bar>[]".to_string()).erased_key(),
            "Foo[]"
        );
    }
}
