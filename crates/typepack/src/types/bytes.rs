//! `Buffer`: `uint` length followed by the raw bytes.

use typepack_buffers::{Reader, Writer};

use super::{read_prefixed, uint};
use crate::DecodeError;

pub fn write(value: &[u8], writer: &mut Writer) {
    uint::write(value.len() as u64, writer);
    writer.buf(value);
}

pub fn read(reader: &mut Reader) -> Result<Vec<u8>, DecodeError> {
    reader.transact(|r| read_prefixed(r).map(<[u8]>::to_vec))
}
