//! Byte offsets and the UTF-16 positions LSP clients speak.

pub use text_size::{TextRange, TextSize};

/// Zero-based line and UTF-16 column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Line starts of one text snapshot. `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    /// `(start, end)` of every line, the end excluding the terminator.
    lines: Vec<(TextSize, TextSize)>,
    text_len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0usize;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let width = match c {
                '\n' => 1,
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                    chars.next();
                    2
                }
                '\r' => 1,
                _ => continue,
            };
            lines.push((size(start), size(i)));
            start = i + width;
        }
        lines.push((size(start), size(text.len())));

        Self {
            lines,
            text_len: size(text.len()),
        }
    }

    /// UTF-16 position of a byte offset; offsets past the end clamp to EOF and offsets inside a
    /// line terminator clamp to the end of that line.
    ///
    /// `text` must be the snapshot this index was built from.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        debug_assert_eq!(size(text.len()), self.text_len);
        let offset = offset.min(self.text_len);
        let line = self
            .lines
            .partition_point(|&(start, _)| start <= offset)
            .saturating_sub(1);
        let (start, end) = self.lines[line];
        let prefix = text
            .get(u32::from(start) as usize..u32::from(offset.min(end)) as usize)
            .unwrap_or("");

        Position::new(line as u32, prefix.encode_utf16().count() as u32)
    }

    pub fn range(&self, text: &str, range: TextRange) -> Range {
        Range {
            start: self.position(text, range.start()),
            end: self.position(text, range.end()),
        }
    }
}

fn size(offset: usize) -> TextSize {
    crate::text_size(offset)
}

#[cfg(feature = "lsp")]
impl From<Position> for lsp_types::Position {
    fn from(value: Position) -> Self {
        lsp_types::Position::new(value.line, value.character)
    }
}

#[cfg(feature = "lsp")]
impl From<Range> for lsp_types::Range {
    fn from(value: Range) -> Self {
        lsp_types::Range::new(value.start.into(), value.end.into())
    }
}
