//! `float`: IEEE-754 binary64, 8 bytes big-endian.

use typepack_buffers::{Reader, Writer};

use crate::DecodeError;

pub fn write(value: f64, writer: &mut Writer) {
    writer.f64(value);
}

pub fn read(reader: &mut Reader) -> Result<f64, DecodeError> {
    Ok(reader.try_f64()?)
}
