//! Byte offset to line/column lookup.

/// Fast line/column lookup using pre-calculated line offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: u32) -> usize {
        // Err(0) cannot happen since line_starts[0] == 0, but keep it total
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(0) => 1,
            Err(idx) => idx,
        }
    }

    /// 1-based line and 1-based column (in characters) of `offset`.
    pub fn line_column(&self, offset: u32, source: &str) -> (usize, usize) {
        let line = self.line(offset);
        let line_start = self.line_starts[line - 1] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, column + 1)
    }
}
