//! Append-only byte sink with auto-growing capacity.

/// Default growth chunk: 64 KiB.
pub const DEFAULT_ALLOC_SIZE: usize = 64 * 1024;

/// A binary buffer writer that grows automatically as needed.
///
/// Bytes are only ever appended; nothing already written is overwritten or
/// truncated. [`Writer::finalize`] consumes the writer and hands back every
/// byte written since construction.
///
/// # Example
///
/// ```
/// use typepack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.buf(&[0x02, 0x03]);
/// assert_eq!(*writer.finalize(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying byte buffer; `uint8.len()` is the current capacity.
    uint8: Vec<u8>,
    /// Current cursor position, equal to the number of bytes written.
    x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (64 KiB).
    pub fn new() -> Self {
        Self::with_alloc_size(DEFAULT_ALLOC_SIZE)
    }

    /// Creates a new writer with a custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let alloc_size = alloc_size.max(1);
        Self {
            uint8: vec![0u8; alloc_size],
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total_required = self.uint8.len() + capacity - remaining;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    /// Capacity hint; equivalent to [`Writer::ensure_capacity`].
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.ensure_capacity(additional);
    }

    fn grow(&mut self, new_size: usize) {
        let mut new_buf = vec![0u8; new_size];
        new_buf[..self.x].copy_from_slice(&self.uint8[..self.x]);
        self.uint8 = new_buf;
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    /// Bytes available before the next growth.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.uint8.len()
    }

    /// Everything written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    /// Consumes the writer and returns everything written as an immutable
    /// byte sequence.
    pub fn finalize(mut self) -> Box<[u8]> {
        self.uint8.truncate(self.x);
        self.uint8.into_boxed_slice()
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.ensure_capacity(8);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a 64-bit floating point number (big-endian).
    ///
    /// The raw bit pattern is written, so NaN payloads and the sign of zero
    /// survive.
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.ensure_capacity(8);
        let bytes = val.to_bits().to_be_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        self.buf(bytes);
        bytes.len()
    }
}
