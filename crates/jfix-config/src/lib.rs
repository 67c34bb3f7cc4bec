//! Configuration for the quick-fix engine: code generation settings and logging, loaded from TOML.

use std::path::Path;
use std::sync::Once;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jfix_types::NullAnnotationNames;

mod schema;

pub use schema::json_schema;

/// Top-level configuration loaded from `jfix.toml`.
///
/// ```toml
/// [codegen]
/// create_comments = false
/// body_style = "throw_unsupported"
/// indent_unit = "\t"
///
/// [codegen.null_annotations]
/// nullable = "org.jspecify.annotations.Nullable"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct JfixConfig {
    /// How generated method stubs look.
    #[serde(default)]
    pub codegen: CodeGenerationSettings,

    /// Global logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What a generated stub body does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    /// `return <default value>;` (nothing for `void`).
    #[default]
    ReturnDefault,
    /// `throw new UnsupportedOperationException("Unimplemented method 'name'");`
    ThrowUnsupported,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CodeGenerationSettings {
    /// Emit a `@see` doc comment and a `// TODO` comment in generated stubs.
    ///
    /// Anonymous classes and enum constant bodies never get comments.
    #[serde(default = "default_true")]
    pub create_comments: bool,

    /// Annotate generated stubs with `@Override`.
    #[serde(default = "default_true")]
    pub override_annotation: bool,

    #[serde(default)]
    pub body_style: BodyStyle,

    /// One level of indentation, spaces or tabs only.
    #[serde(default = "CodeGenerationSettings::default_indent_unit")]
    pub indent_unit: String,

    /// Annotation-based null analysis. When set, nullness annotations of overridden members are
    /// carried over to the generated stubs.
    #[serde(default)]
    pub null_annotations: Option<NullAnnotationNames>,
}

fn default_true() -> bool {
    true
}

impl CodeGenerationSettings {
    fn default_indent_unit() -> String {
        "    ".to_owned()
    }

    /// Settings used for anonymous and enum constant bodies.
    pub fn without_comments(&self) -> Self {
        Self {
            create_comments: false,
            ..self.clone()
        }
    }
}

impl Default for CodeGenerationSettings {
    fn default() -> Self {
        Self {
            create_comments: true,
            override_annotation: true,
            body_style: BodyStyle::default(),
            indent_unit: Self::default_indent_unit(),
            null_annotations: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level, or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective `EnvFilter`; `RUST_LOG`, when set, is merged into it.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a snippet of the input; keep just the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl JfixConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// Load a config from a TOML string.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: JfixConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let indent = &self.codegen.indent_unit;
        if indent.is_empty() || !indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Invalid {
                field: "codegen.indent_unit",
                message: "must be a non-empty run of spaces or tabs".to_owned(),
            });
        }
        Ok(())
    }
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// Safe to call multiple times; only the first call installs a global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false);

        // `TestWriter` keeps `cargo test` output capture working in debug builds.
        let result = match (config.json, cfg!(debug_assertions)) {
            (true, true) => builder
                .json()
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .try_init(),
            (true, false) => builder.json().with_writer(std::io::stderr).try_init(),
            (false, true) => builder
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .try_init(),
            (false, false) => builder.with_writer(std::io::stderr).try_init(),
        };
        if let Err(err) = result {
            // Another subscriber is already installed (e.g. by the embedding application).
            tracing::debug!(target = "jfix.config", error = %err, "tracing already initialized");
        }
    });
}
