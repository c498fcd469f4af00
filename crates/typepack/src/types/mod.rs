//! Per-type codecs.
//!
//! Each module exposes strongly typed `write`/`read` functions over
//! [`Writer`](typepack_buffers::Writer) and [`Reader`](typepack_buffers::Reader).
//! [`crate::Type`] dispatches to them for dynamically typed [`crate::Value`]s.

pub mod boolean;
pub mod bytes;
pub mod color;
pub mod date;
pub mod float;
pub mod int;
pub mod json;
pub mod object_id;
pub mod regex;
pub mod string;
pub mod uint;

use typepack_buffers::Reader;

use crate::DecodeError;

/// Reads a `uint` length prefix. A length beyond `usize` saturates, which
/// the following bounds check then reports as an underflow.
pub(crate) fn read_len(reader: &mut Reader) -> Result<usize, DecodeError> {
    let len = uint::read(reader)?;
    Ok(usize::try_from(len).unwrap_or(usize::MAX))
}

/// Reads a `uint` length prefix and the payload it announces.
///
/// Callers wrap this in [`Reader::transact`] so a short payload does not leave
/// the prefix consumed.
pub(crate) fn read_prefixed<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], DecodeError> {
    let len = read_len(reader)?;
    Ok(reader.take(len)?)
}
