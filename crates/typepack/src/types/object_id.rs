//! `oid`: 12-byte object identifier, written as 24 hex characters.

use std::fmt;
use std::str::FromStr;

use typepack_buffers::{Reader, Writer};

use crate::{DecodeError, EncodeError, Path};

pub const OBJECT_ID_LEN: usize = 12;

/// Text was not exactly 24 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("object id must be 24 hex characters")]
pub struct ParseObjectIdError;

/// Raw object id bytes. Parses either case, displays lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub [u8; OBJECT_ID_LEN]);

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.as_bytes();
        if text.len() != OBJECT_ID_LEN * 2 {
            return Err(ParseObjectIdError);
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        for (byte, pair) in bytes.iter_mut().zip(text.chunks_exact(2)) {
            let hi = (pair[0] as char).to_digit(16).ok_or(ParseObjectIdError)?;
            let lo = (pair[1] as char).to_digit(16).ok_or(ParseObjectIdError)?;
            *byte = (hi * 16 + lo) as u8;
        }
        Ok(ObjectId(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

pub fn write(text: &str, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    let id: ObjectId = text.parse().map_err(|_| EncodeError::InvalidObjectId {
        path: path.to_string(),
        input: text.to_string(),
    })?;
    writer.buf(&id.0);
    Ok(())
}

pub fn read(reader: &mut Reader) -> Result<String, DecodeError> {
    let bytes = reader.take(OBJECT_ID_LEN)?;
    let mut raw = [0u8; OBJECT_ID_LEN];
    raw.copy_from_slice(bytes);
    Ok(ObjectId(raw).to_string())
}
