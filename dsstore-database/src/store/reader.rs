/*!
 A bounds-checked cursor over the bytes of a `.DS_Store` file.

 All multi-byte integers in the format are big-endian.
*/

use crate::error::store::StoreError;

/// Contains the buffer we are decoding and the position we are reading from
#[derive(Debug, Clone)]
pub struct StoreReader<'a> {
    /// The full contents of the file
    stream: &'a [u8],
    /// The current index we are at in the stream
    idx: usize,
}

impl<'a> StoreReader<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        Self { stream, idx: 0 }
    }

    /// The current position of the cursor
    pub fn position(&self) -> usize {
        self.idx
    }

    /// Move the cursor to an absolute position; reads past the end will fail, not this call
    pub fn seek(&mut self, idx: usize) {
        self.idx = idx;
    }

    pub fn len(&self) -> usize {
        self.stream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Read exactly `n` bytes from the stream
    pub fn read_exact_bytes(&mut self, n: usize) -> Result<&'a [u8], StoreError> {
        let end = self
            .idx
            .checked_add(n)
            .ok_or(StoreError::OutOfBounds(usize::MAX, self.stream.len()))?;
        let stream = self.stream;
        let range = stream
            .get(self.idx..end)
            .ok_or(StoreError::OutOfBounds(end, stream.len()))?;
        self.idx = end;
        Ok(range)
    }

    /// Read exactly `N` bytes into an array
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StoreError> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_exact_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, StoreError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, StoreError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, StoreError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read a four character code, such as a field or type code
    pub fn read_tag(&mut self) -> Result<String, StoreError> {
        Ok(String::from_utf8_lossy(self.read_exact_bytes(4)?).into_owned())
    }

    /// Read `units` UTF-16 code units stored big-endian
    pub fn read_utf16(&mut self, units: usize) -> Result<String, StoreError> {
        let length = units
            .checked_mul(2)
            .ok_or(StoreError::OutOfBounds(usize::MAX, self.stream.len()))?;
        Ok(decode_utf16_be(self.read_exact_bytes(length)?))
    }
}

/// Decode big-endian UTF-16, replacing invalid surrogates with U+FFFD
pub fn decode_utf16_be(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|ch| ch.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
