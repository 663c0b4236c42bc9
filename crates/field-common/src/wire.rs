//! Checked little-endian wire primitives.
//!
//! Both codecs read from a fully-loaded byte buffer. `ByteReader` keeps a
//! cursor over that buffer and verifies the remaining length before every
//! access, so a short or corrupt file surfaces as a typed error instead of
//! a panic.

use thiserror::Error;

/// Low-level decode failures shared by both file formats.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("truncated input: needed {needed} more bytes at offset {offset}, {remaining} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("non-ASCII string data at offset {offset}")]
    NonAscii { offset: usize },
}

/// Cursor over an in-memory byte buffer with length-checked reads.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::Truncated {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    pub fn i16_le(&mut self) -> Result<i16, WireError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u16_le(&mut self) -> Result<u16, WireError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn i32_le(&mut self) -> Result<i32, WireError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn u32_le(&mut self) -> Result<u32, WireError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn f32_le(&mut self) -> Result<f32, WireError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn f64_le(&mut self) -> Result<f64, WireError> {
        let b = self.take(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Raw byte run of exactly `n` bytes.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.take(n)
    }

    /// Null-terminated ASCII string; the cursor ends up past the terminator.
    pub fn cstring(&mut self) -> Result<String, WireError> {
        let start = self.pos;
        let rest = &self.buf[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::UnterminatedString { offset: start })?;
        let body = &rest[..nul];
        if !body.is_ascii() {
            return Err(WireError::NonAscii { offset: start });
        }
        self.pos += nul + 1;
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    pub fn f32_vec_le(&mut self, count: usize) -> Result<Vec<f32>, WireError> {
        let raw = self.take(count.saturating_mul(4))?;
        Ok(raw
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    pub fn u32_vec_le(&mut self, count: usize) -> Result<Vec<u32>, WireError> {
        let raw = self.take(count.saturating_mul(4))?;
        Ok(raw
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// True when `s` can be stored as a null-terminated ASCII string.
pub fn is_wire_string(s: &str) -> bool {
    s.is_ascii() && !s.bytes().any(|b| b == 0)
}

/// Append `s` as a null-terminated string. Callers validate with
/// [`is_wire_string`] before emission starts.
pub fn put_cstring(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    out.push(0);
}
