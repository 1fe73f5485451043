use crate::error::PositionError;
use modfix_types::Position;

/// Maps byte offsets in a manifest to protocol positions.
pub trait PositionMapper: Send + Sync {
    fn position(&self, offset: usize) -> Result<Position, PositionError>;
}

/// Line-start table over a text.
///
/// Lines are zero-based; columns count UTF-16 code units, as editors do.
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: String,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            text: text.to_string(),
            line_starts,
        }
    }
}

impl PositionMapper for LineIndex {
    fn position(&self, offset: usize) -> Result<Position, PositionError> {
        if offset > self.text.len() {
            return Err(PositionError::OutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(PositionError::NotCharBoundary { offset });
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character: usize = self.text[start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Ok(Position::new(line as u32, character as u32))
    }
}
