//! Text edit primitives and utilities.

use crate::{TextRange, TextSize};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::empty(offset), text)
    }

    pub fn is_insert(&self) -> bool {
        self.range.is_empty()
    }
}

/// Why a set of edits cannot be applied to a source snapshot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EditError {
    /// The edit reaches past the end of the source, which usually means the edits were computed
    /// against a different snapshot.
    PastEnd { range: TextRange, source_len: TextSize },
    /// An edit boundary falls inside a multi-byte character.
    SplitsChar { offset: TextSize },
    /// Two edits replace overlapping text, e.g. two member insertions that both rewrite the
    /// whitespace before one closing brace.
    Conflict { first: TextRange, second: TextRange },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::PastEnd { range, source_len } => write!(
                f,
                "edit at {range:?} reaches past the end of the source ({} bytes)",
                u32::from(*source_len)
            ),
            EditError::SplitsChar { offset } => write!(
                f,
                "edit boundary {} splits a UTF-8 character",
                u32::from(*offset)
            ),
            EditError::Conflict { first, second } => {
                write!(f, "edits at {first:?} and {second:?} rewrite the same text")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Apply a list of edits to a text snapshot.
///
/// Edits are normalized first and applied from the end of the text backwards,
/// so the result does not depend on the input order.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_text_edits(text, &mut edits)?;

    let mut out = text.to_string();
    for edit in edits.into_iter().rev() {
        let start = u32::from(edit.range.start()) as usize;
        let end = u32::from(edit.range.end()) as usize;
        out.replace_range(start..end, &edit.replacement);
    }
    Ok(out)
}

/// Sort edits, merge inserts at the same offset, and check for overlaps and
/// out-of-bounds ranges.
///
/// Inserts sharing an offset keep their relative input order.
pub fn normalize_text_edits(text: &str, edits: &mut Vec<TextEdit>) -> Result<(), EditError> {
    // Stable sort: same-offset inserts stay in caller order.
    edits.sort_by_key(|e| (e.range.start(), e.range.end()));

    let text_len = TextSize::of(text);
    for edit in edits.iter() {
        if edit.range.end() > text_len {
            return Err(EditError::PastEnd {
                range: edit.range,
                source_len: text_len,
            });
        }
        for offset in [edit.range.start(), edit.range.end()] {
            if !text.is_char_boundary(u32::from(offset) as usize) {
                return Err(EditError::SplitsChar { offset });
            }
        }
    }

    let mut merged: Vec<TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits.drain(..) {
        if let Some(last) = merged.last_mut() {
            if last.is_insert() && edit.is_insert() && last.range == edit.range {
                last.replacement.push_str(&edit.replacement);
                continue;
            }
            if last.range.end() > edit.range.start() {
                return Err(EditError::Conflict {
                    first: last.range,
                    second: edit.range,
                });
            }
        }
        merged.push(edit);
    }
    *edits = merged;

    Ok(())
}
