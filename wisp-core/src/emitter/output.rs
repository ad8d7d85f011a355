//! Byte-buffer utility for assembling binary payloads.
//!
//! Numbers follow the wasm binary conventions: LEB128 for integers
//! (unsigned for counts, indices and lengths; signed for constant
//! operands) and little-endian fixed width for floats.

/// Append-only byte buffer with wasm-flavored write helpers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputStream {
    bytes: Vec<u8>,
}

impl OutputStream {
    pub fn new() -> Self {
        OutputStream::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn push_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Unsigned LEB128.
    pub fn push_varuint32(&mut self, mut value: u32) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Signed LEB128.
    pub fn push_varint32(&mut self, value: i32) {
        self.push_varint64(i64::from(value));
    }

    /// Signed LEB128.
    pub fn push_varint64(&mut self, mut value: i64) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
            if !done {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if done {
                break;
            }
        }
    }

    pub fn push_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn push_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Length-prefixed UTF-8 string.
    pub fn push_str(&mut self, value: &str) {
        self.push_varuint32(value.len() as u32);
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Append another stream's bytes verbatim.
    pub fn write(&mut self, other: &OutputStream) {
        self.bytes.extend_from_slice(other.as_slice());
    }
}
