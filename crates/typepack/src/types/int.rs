//! `int`: zig-zag mapped signed varint.

use typepack_buffers::{Reader, Writer};

use super::uint;
use crate::DecodeError;

/// Maps `0, -1, 1, -2, ...` to `0, 1, 2, 3, ...`.
#[inline]
pub fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub fn unzigzag(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

pub fn write(value: i64, writer: &mut Writer) {
    uint::write(zigzag(value), writer);
}

pub fn size(value: i64) -> usize {
    uint::size(zigzag(value))
}

pub fn read(reader: &mut Reader) -> Result<i64, DecodeError> {
    uint::read(reader).map(unzigzag)
}
