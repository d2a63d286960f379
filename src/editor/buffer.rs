/// Bytes typed after the basename for one target.
///
/// Grows and shrinks at the tail only. Separator bytes are accepted here and
/// rejected when the new name is composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixBuffer {
    bytes: Vec<u8>,
}

impl SuffixBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Remove the last byte; `None` when already empty.
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    /// Empty the buffer, returning how many bytes were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.bytes.len();
        self.bytes.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
