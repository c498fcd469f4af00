//! `uint`: unsigned LEB128 varint.
//!
//! Low 7 bits first, high bit set on every group but the last. The reader
//! only accepts the minimal encoding, so each value has exactly one byte
//! sequence.

use typepack_buffers::{Reader, Writer};

use crate::DecodeError;

/// Groups needed for the widest `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Writes `value` as a varint.
pub fn write(mut value: u64, writer: &mut Writer) {
    loop {
        let low7 = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            writer.u8(low7);
            return;
        }
        writer.u8(low7 | 0x80);
    }
}

/// Encoded length of `value` in bytes.
pub fn size(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Reads a varint. The cursor only moves once the whole chain validated.
pub fn read(reader: &mut Reader) -> Result<u64, DecodeError> {
    let rest = reader.rest();
    let mut value = 0u64;
    for (i, &byte) in rest.iter().take(MAX_VARINT_LEN).enumerate() {
        let group = u64::from(byte & 0x7f);
        // The tenth group carries bit 63 only.
        if i == MAX_VARINT_LEN - 1 && group > 1 {
            return Err(DecodeError::MalformedVarint);
        }
        value |= group << (7 * i);
        if byte & 0x80 == 0 {
            if i > 0 && group == 0 {
                return Err(DecodeError::MalformedVarint);
            }
            reader.skip(i + 1)?;
            return Ok(value);
        }
    }
    if rest.len() < MAX_VARINT_LEN {
        Err(DecodeError::Underflow {
            needed: rest.len() + 1,
            remaining: rest.len(),
        })
    } else {
        Err(DecodeError::MalformedVarint)
    }
}
