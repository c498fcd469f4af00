//! `string`: `uint` byte length followed by UTF-8.

use typepack_buffers::{Reader, Writer};

use super::{read_len, uint};
use crate::DecodeError;

pub fn write(value: &str, writer: &mut Writer) {
    uint::write(value.len() as u64, writer);
    writer.utf8(value);
}

pub fn read(reader: &mut Reader) -> Result<String, DecodeError> {
    reader.transact(|r| {
        let len = read_len(r)?;
        Ok(r.try_utf8(len)?.to_owned())
    })
}
