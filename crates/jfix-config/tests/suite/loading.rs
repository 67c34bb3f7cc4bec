use jfix_config::{BodyStyle, ConfigError, JfixConfig, NullAnnotationNames};
use pretty_assertions::assert_eq;

#[test]
fn loads_codegen_and_logging_tables_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jfix.toml");
    std::fs::write(
        &path,
        r#"
[codegen]
create_comments = false
override_annotation = false
body_style = "throw_unsupported"
indent_unit = "\t"

[codegen.null_annotations]
nullable = "org.jspecify.annotations.Nullable"

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let config = JfixConfig::load_from_path(&path).unwrap();
    assert!(!config.codegen.create_comments);
    assert!(!config.codegen.override_annotation);
    assert_eq!(config.codegen.body_style, BodyStyle::ThrowUnsupported);
    assert_eq!(config.codegen.indent_unit, "\t");
    assert_eq!(
        config.codegen.null_annotations,
        Some(NullAnnotationNames {
            nullable: "org.jspecify.annotations.Nullable".to_owned(),
            ..NullAnnotationNames::default()
        })
    );
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = JfixConfig::load_from_str("[codegen]\ncreate_comment = true\n").unwrap_err();
    let ConfigError::Toml(message) = err else {
        panic!("expected a toml error, got {err:?}");
    };
    assert!(message.contains("unknown field"), "{message}");
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = JfixConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string())
        }
        other => panic!("expected an io error, got {other:?}"),
    }
}
