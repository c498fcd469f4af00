//! `boolean`: one byte, `0x00` or `0x01`.

use typepack_buffers::{Reader, Writer};

use crate::DecodeError;

pub fn write(value: bool, writer: &mut Writer) {
    writer.u8(u8::from(value));
}

/// Any byte other than `0x00`/`0x01` is rejected and left unread.
pub fn read(reader: &mut Reader) -> Result<bool, DecodeError> {
    let value = match reader.try_peek()? {
        0x00 => false,
        0x01 => true,
        byte => return Err(DecodeError::InvalidBoolean(byte)),
    };
    reader.skip(1)?;
    Ok(value)
}
