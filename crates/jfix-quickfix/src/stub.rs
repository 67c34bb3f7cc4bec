//! Override stubs for abstract members.

use std::collections::HashSet;

use jfix_config::{BodyStyle, CodeGenerationSettings};
use jfix_types::{JavaType, MemberSignature, Nullness};

use crate::imports::ImportContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubParam {
    pub annotations: Vec<String>,
    pub ty: String,
    pub name: String,
}

/// A method declaration ready to be inserted; all types are already written for the insertion
/// point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStub {
    pub doc_comment: Vec<String>,
    /// Declaration annotations, one per line (`@Override`).
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub type_params: Vec<String>,
    /// Type annotations of the return type (`@Nullable`).
    pub return_annotations: Vec<String>,
    pub return_type: String,
    pub name: String,
    pub params: Vec<StubParam>,
    pub varargs: bool,
    pub throws: Vec<String>,
    pub body: Vec<String>,
}

impl MethodStub {
    /// Render with `indent` before every line and one more `unit` inside the body. Lines are
    /// joined by `eol`, without a trailing line break.
    pub fn render(&self, indent: &str, unit: &str, eol: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.extend(self.doc_comment.iter().map(|line| format!("{indent}{line}")));
        lines.extend(self.annotations.iter().map(|a| format!("{indent}{a}")));

        let type_params = self.type_params_clause();
        let mut words: Vec<&str> = self.modifiers.iter().copied().collect();
        words.extend(type_params.as_deref());
        words.extend(self.return_annotations.iter().map(String::as_str));

        let mut header = String::from(indent);
        for word in words {
            header.push_str(word);
            header.push(' ');
        }
        header.push_str(&self.return_type);
        header.push(' ');
        header.push_str(&self.name);
        header.push('(');
        let params: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let mut out = String::new();
                for annotation in &param.annotations {
                    out.push_str(annotation);
                    out.push(' ');
                }
                if self.varargs && i + 1 == self.params.len() {
                    let element = param.ty.strip_suffix("[]").unwrap_or(&param.ty);
                    out.push_str(element);
                    out.push_str("...");
                } else {
                    out.push_str(&param.ty);
                }
                out.push(' ');
                out.push_str(&param.name);
                out
            })
            .collect();
        header.push_str(&params.join(", "));
        header.push(')');
        if !self.throws.is_empty() {
            header.push_str(" throws ");
            header.push_str(&self.throws.join(", "));
        }
        header.push_str(" {");
        lines.push(header);

        lines.extend(self.body.iter().map(|line| format!("{indent}{unit}{line}")));
        lines.push(format!("{indent}}}"));
        lines.join(eol)
    }

    fn type_params_clause(&self) -> Option<String> {
        (!self.type_params.is_empty()).then(|| format!("<{}>", self.type_params.join(", ")))
    }
}

/// Build the override stub for `member`. Never fails: types the resolver could not bind are
/// written as they appear in the source.
pub fn synthesize(
    member: &MemberSignature,
    settings: &CodeGenerationSettings,
    imports: &mut ImportContext,
    non_null_by_default: bool,
) -> MethodStub {
    let method_vars: HashSet<String> = member.type_params.iter().map(|tp| tp.name.clone()).collect();

    let type_params = member
        .type_params
        .iter()
        .map(|tp| {
            let bounds: Vec<String> = tp
                .bounds
                .iter()
                .filter(|bound| !is_object(bound))
                .map(|bound| imports.add_type_in(bound, &method_vars))
                .collect();
            if bounds.is_empty() {
                tp.name.clone()
            } else {
                format!("{} extends {}", tp.name, bounds.join(" & "))
            }
        })
        .collect();

    let null_annotation = |imports: &mut ImportContext, nullness: Nullness| -> Vec<String> {
        let Some(names) = &settings.null_annotations else {
            return Vec::new();
        };
        let annotation = match nullness {
            Nullness::Nullable => &names.nullable,
            Nullness::NonNull if !non_null_by_default => &names.non_null,
            _ => return Vec::new(),
        };
        vec![format!("@{}", imports.add_type(&JavaType::class(annotation)))]
    };

    let return_annotations = null_annotation(imports, member.return_nullness);
    let return_type = imports.add_type_in(&member.return_type, &method_vars);

    let names = parameter_names(member);
    let params = member
        .params
        .iter()
        .zip(names)
        .map(|(param, name)| StubParam {
            annotations: null_annotation(imports, param.nullness),
            ty: imports.add_type_in(&param.ty, &method_vars),
            name,
        })
        .collect();

    let throws = member
        .thrown
        .iter()
        .map(|ty| imports.add_type_in(ty, &method_vars))
        .collect();

    let mut annotations = Vec::new();
    if settings.override_annotation {
        annotations.push("@Override".to_string());
    }

    let doc_comment = if settings.create_comments {
        vec![
            "/**".to_string(),
            format!(" * @see {}", see_reference(member)),
            " */".to_string(),
        ]
    } else {
        Vec::new()
    };

    MethodStub {
        doc_comment,
        annotations,
        modifiers: member.visibility.keyword().into_iter().collect(),
        type_params,
        return_annotations,
        return_type,
        name: member.name.clone(),
        params,
        varargs: member.varargs,
        throws,
        body: body_lines(member, settings),
    }
}

fn body_lines(member: &MemberSignature, settings: &CodeGenerationSettings) -> Vec<String> {
    let mut body = Vec::new();
    if settings.create_comments {
        body.push("// TODO Auto-generated method stub".to_string());
    }
    match settings.body_style {
        BodyStyle::ReturnDefault => match &member.return_type {
            JavaType::Void => {}
            JavaType::Primitive(p) => body.push(format!("return {};", p.default_value())),
            _ => body.push("return null;".to_string()),
        },
        BodyStyle::ThrowUnsupported => body.push(format!(
            "throw new UnsupportedOperationException(\"Unimplemented method '{}'\");",
            member.name
        )),
    }
    body
}

/// `Shape#area()`-style reference to the declaration, with its own erased parameter types.
fn see_reference(member: &MemberSignature) -> String {
    format!(
        "{}#{}({})",
        member.declaring_type.qualified_name,
        member.name,
        member.declared_param_keys.join(", ")
    )
}

fn is_object(ty: &JavaType) -> bool {
    matches!(ty, JavaType::Class(class) if class.qualified_name() == jfix_types::JAVA_LANG_OBJECT && class.args.is_empty())
}

/// Source names when known, otherwise derived from the type; unique within the stub.
fn parameter_names(member: &MemberSignature) -> Vec<String> {
    let mut used: HashSet<String> = member
        .params
        .iter()
        .filter_map(|p| p.name.clone())
        .collect();
    let mut seen_source = HashSet::new();

    member
        .params
        .iter()
        .map(|param| {
            if let Some(name) = &param.name {
                if seen_source.insert(name.clone()) {
                    return name.clone();
                }
            }
            let base = suggested_name(&param.ty);
            let name = unique_name(&base, &used);
            used.insert(name.clone());
            name
        })
        .collect()
}

fn suggested_name(ty: &JavaType) -> String {
    let base = match ty {
        JavaType::Primitive(p) => p.keyword()[..1].to_string(),
        JavaType::Array(element) => return suggested_name(element),
        JavaType::Class(class) => lower_first(class.simple_name()),
        JavaType::TypeVar(var) => var.name.to_lowercase(),
        JavaType::Unresolved(text) => {
            let base = text.split('<').next().unwrap_or(text).trim_end_matches("[]");
            lower_first(base.rsplit('.').next().unwrap_or(base))
        }
        JavaType::Void | JavaType::Wildcard(_) => String::new(),
    };
    if base.is_empty() || !base.chars().all(|c| c == '_' || c == '$' || c.is_alphanumeric()) {
        "arg".to_string()
    } else {
        base
    }
}

fn unique_name(base: &str, used: &HashSet<String>) -> String {
    if !is_keyword(base) && !used.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "abstract" | "assert" | "boolean" | "break" | "byte" | "case" | "catch" | "char"
            | "class" | "const" | "continue" | "default" | "do" | "double" | "else" | "enum"
            | "extends" | "final" | "finally" | "float" | "for" | "goto" | "if" | "implements"
            | "import" | "instanceof" | "int" | "interface" | "long" | "native" | "new"
            | "package" | "private" | "protected" | "public" | "return" | "short" | "static"
            | "strictfp" | "super" | "switch" | "synchronized" | "this" | "throw" | "throws"
            | "transient" | "try" | "void" | "volatile" | "while" | "true" | "false" | "null"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfix_config::NullAnnotationNames;
    use jfix_syntax::{parse_java, SyntaxKind};
    use jfix_types::{
        ClassType, DeclaringType, ParamSignature, PrimitiveType, TypeParameter, Visibility,
    };
    use pretty_assertions::assert_eq;

    fn member(name: &str, params: Vec<(JavaType, Option<&str>)>, ret: JavaType) -> MemberSignature {
        MemberSignature {
            declaring_type: DeclaringType {
                qualified_name: "com.acme.Shape".to_string(),
                position: None,
            },
            name: name.to_string(),
            type_params: Vec::new(),
            params: params
                .into_iter()
                .map(|(ty, name)| ParamSignature {
                    ty,
                    name: name.map(str::to_string),
                    nullness: Nullness::Unspecified,
                })
                .collect(),
            declared_param_keys: Vec::new(),
            varargs: false,
            return_type: ret,
            return_nullness: Nullness::Unspecified,
            thrown: Vec::new(),
            visibility: Visibility::Public,
            index: 0,
        }
    }

    fn imports_for(text: &str) -> ImportContext {
        let tree = parse_java(text);
        let body = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&n| tree.kind(n) == SyntaxKind::ClassBody)
            .unwrap();
        ImportContext::new(&tree, body)
    }

    #[test]
    fn renders_a_commented_stub_with_default_return() {
        let settings = CodeGenerationSettings::default();
        let mut imports = imports_for("package com.acme; class Circle {}");
        let stub = synthesize(
            &member("area", vec![], JavaType::Primitive(PrimitiveType::Double)),
            &settings,
            &mut imports,
            false,
        );
        assert_eq!(
            stub.render("    ", "    ", "\n"),
            "    /**\n     * @see com.acme.Shape#area()\n     */\n    @Override\n    public double area() {\n        // TODO Auto-generated method stub\n        return 0.0;\n    }"
        );
    }

    #[test]
    fn throws_unsupported_without_comments() {
        let settings = CodeGenerationSettings {
            body_style: BodyStyle::ThrowUnsupported,
            override_annotation: false,
            ..CodeGenerationSettings::default()
        }
        .without_comments();
        let mut imports = imports_for("class Impl {}");
        let mut m = member(
            "read",
            vec![(JavaType::class("java.nio.file.Path"), Some("path"))],
            JavaType::class("java.lang.String"),
        );
        m.thrown.push(JavaType::class("java.io.IOException"));
        m.visibility = Visibility::Protected;

        let stub = synthesize(&m, &settings, &mut imports, false);
        assert_eq!(
            stub.render("", "\t", "\n"),
            "protected String read(Path path) throws IOException {\n\tthrow new UnsupportedOperationException(\"Unimplemented method 'read'\");\n}"
        );
        assert_eq!(
            imports.added_imports(),
            vec!["java.io.IOException".to_string(), "java.nio.file.Path".to_string()]
        );
    }

    #[test]
    fn synthesized_parameter_names_are_unique_and_not_keywords() {
        let settings = CodeGenerationSettings::default().without_comments();
        let mut imports = imports_for("class Impl {}");
        let class_of_t = JavaType::Class(ClassType {
            args: vec![JavaType::type_var("T")],
            ..ClassType::from_qualified("java.lang.Class")
        });
        let mut m = member(
            "convert",
            vec![
                (class_of_t, None),
                (JavaType::class("java.lang.String"), None),
                (JavaType::class("java.lang.String"), Some("string")),
                (
                    JavaType::Array(Box::new(JavaType::Primitive(PrimitiveType::Int))),
                    None,
                ),
            ],
            JavaType::type_var("T"),
        );
        m.type_params.push(TypeParameter {
            name: "T".to_string(),
            bounds: vec![JavaType::class("java.lang.Number")],
        });
        m.varargs = true;

        let stub = synthesize(&m, &settings, &mut imports, false);
        assert_eq!(
            stub.render("", "  ", "\n"),
            "@Override\npublic <T extends Number> T convert(Class<T> class1, String string1, String string, int... i) {\n  return null;\n}"
        );
    }

    #[test]
    fn carries_nullness_annotations() {
        let settings = CodeGenerationSettings {
            null_annotations: Some(NullAnnotationNames::default()),
            ..CodeGenerationSettings::default()
        }
        .without_comments();
        let mut m = member(
            "find",
            vec![(JavaType::class("java.lang.String"), Some("key"))],
            JavaType::class("java.lang.Object"),
        );
        m.return_nullness = Nullness::Nullable;
        m.params[0].nullness = Nullness::NonNull;

        let mut imports = imports_for("class Impl {}");
        let stub = synthesize(&m, &settings, &mut imports, false);
        assert_eq!(stub.return_annotations, vec!["@Nullable".to_string()]);
        assert_eq!(stub.params[0].annotations, vec!["@NonNull".to_string()]);
        assert_eq!(
            imports.added_imports(),
            vec![
                "org.eclipse.jdt.annotation.NonNull".to_string(),
                "org.eclipse.jdt.annotation.Nullable".to_string(),
            ]
        );

        let mut imports = imports_for("class Impl {}");
        let stub = synthesize(&m, &settings, &mut imports, true);
        assert!(stub.params[0].annotations.is_empty());
        assert_eq!(
            stub.render("", "    ", "\n"),
            "@Override\npublic @Nullable Object find(String key) {\n    return null;\n}"
        );
    }
}
