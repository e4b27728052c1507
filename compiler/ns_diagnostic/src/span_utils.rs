//! Line and column lookup for diagnostics.
//!
//! Spans only store byte offsets; [`LineOffsetTable`] turns them into
//! 1-based line/column pairs with a binary search over line starts.

/// 1-based line and column (in characters) of a source position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Pre-computed byte offset of every line start.
///
/// ```
/// use ns_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "a\nbc\nd";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 3), (2, 2));
/// assert_eq!(table.offset_to_line_col(source, 5), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the first byte of line `i + 1`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)` of `offset`. Columns count characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(line_start);
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());

        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_col(&self, source: &str, offset: u32) -> LineCol {
        let (line, col) = self.offset_to_line_col(source, offset);
        LineCol { line, col }
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
