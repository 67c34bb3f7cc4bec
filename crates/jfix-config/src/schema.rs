use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::JfixConfig;

/// JSON schema for `jfix.toml`, for editor tooling and CI validation.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(JfixConfig)
}
