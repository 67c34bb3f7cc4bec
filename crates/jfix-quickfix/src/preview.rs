use similar::TextDiff;

use jfix_config::CodeGenerationSettings;
use jfix_syntax::SourceTree;

use crate::fix::CompositeFix;
use crate::materialize::{apply_fix, MaterializeError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixPreview {
    pub label: String,
    pub additional_info: Option<String>,
    pub modified: String,
    pub unified_diff: String,
}

/// Render `fix` as a unified diff of `file_name`.
pub fn preview(
    file_name: &str,
    tree: &SourceTree,
    fix: &CompositeFix,
    settings: &CodeGenerationSettings,
) -> Result<FixPreview, MaterializeError> {
    let original = tree.text();
    let modified = apply_fix(tree, fix, settings)?;

    let diff = TextDiff::from_lines(original, modified.as_str());
    let unified_diff = diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{file_name}"), &format!("b/{file_name}"))
        .to_string();

    Ok(FixPreview {
        label: fix.label.clone(),
        additional_info: fix.additional_info.clone(),
        modified,
        unified_diff,
    })
}
