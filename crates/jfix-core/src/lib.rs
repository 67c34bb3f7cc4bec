//! Core shared types for jfix.
//!
//! Text sizes and ranges, text edits and the line index used to talk to LSP
//! clients. This crate stays dependency-light; everything else builds on it.

mod edit;
mod text;

pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use text::{LineIndex, Position, Range, TextRange, TextSize};

/// Convert a `usize` byte offset into a [`TextSize`].
///
/// Source files handled by jfix are far below 4 GiB; larger offsets saturate.
#[inline]
pub fn text_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

/// Build a [`TextRange`] from `usize` byte offsets.
#[inline]
pub fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(text_size(start), text_size(end))
}
