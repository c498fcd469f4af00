//! The closed set of primitive Types and their dynamic dispatch.

use std::fmt;
use std::str::FromStr;

use typepack_buffers::{Reader, Writer};

use crate::types::{boolean, bytes, color, date, float, int, json, object_id, regex, string, uint};
use crate::{DecodeError, EncodeError, Path, UnknownTypeError, Value};

/// Initial allocation for the one-shot [`Type::encode`] helper.
const ENCODE_ALLOC_SIZE: usize = 256;

/// A primitive codec: a stateless `write`/`read` pair for one value class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Uint,
    Int,
    Float,
    String,
    Bytes,
    Boolean,
    Json,
    Rgb,
    Rgba,
    ObjectId,
    Regex,
    Date,
}

impl Type {
    pub const ALL: [Type; 12] = [
        Type::Uint,
        Type::Int,
        Type::Float,
        Type::String,
        Type::Bytes,
        Type::Boolean,
        Type::Json,
        Type::Rgb,
        Type::Rgba,
        Type::ObjectId,
        Type::Regex,
        Type::Date,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Type::Uint => "uint",
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Bytes => "Buffer",
            Type::Boolean => "boolean",
            Type::Json => "json",
            Type::Rgb => "rgb",
            Type::Rgba => "rgba",
            Type::ObjectId => "oid",
            Type::Regex => "regex",
            Type::Date => "date",
        }
    }

    /// Looks a Type up by registry name or one of its aliases.
    pub fn from_name(name: &str) -> Option<Type> {
        let found = match name {
            "bytes" => Some(Type::Bytes),
            "object-id" | "objectid" => Some(Type::ObjectId),
            _ => Type::ALL.into_iter().find(|t| t.name() == name),
        };
        if found.is_none() {
            tracing::trace!(name, "no type registered under name");
        }
        found
    }

    /// Appends the encoding of `value` to `writer`.
    ///
    /// On error nothing is appended and the error names `path`.
    pub fn write(self, value: &Value, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
        let result = self.write_inner(value, writer, path);
        if let Err(err) = &result {
            tracing::debug!(
                type_name = self.name(),
                path = %path,
                error = %err,
                "rejected value on write"
            );
        }
        result
    }

    fn write_inner(self, value: &Value, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
        match (self, value) {
            (Type::Uint, Value::Uint(v)) => uint::write(*v, writer),
            (Type::Uint, Value::Int(v)) => {
                let v = u64::try_from(*v).map_err(|_| self.out_of_range(path))?;
                uint::write(v, writer);
            }
            (Type::Int, Value::Int(v)) => int::write(*v, writer),
            (Type::Int, Value::Uint(v)) => {
                let v = i64::try_from(*v).map_err(|_| self.out_of_range(path))?;
                int::write(v, writer);
            }
            (Type::Float, Value::Float(v)) => float::write(*v, writer),
            (Type::Float, Value::Uint(v)) => float::write(*v as f64, writer),
            (Type::Float, Value::Int(v)) => float::write(*v as f64, writer),
            (Type::String, Value::Str(v)) => string::write(v, writer),
            (Type::Bytes, Value::Bytes(v)) => bytes::write(v, writer),
            (Type::Boolean, Value::Bool(v)) => boolean::write(*v, writer),
            (Type::Json, Value::Json(v)) => json::write(v, writer, path)?,
            (Type::Rgb, Value::Str(v)) => color::write_rgb(v, writer, path)?,
            (Type::Rgba, Value::Str(v)) => color::write_rgba(v, writer, path)?,
            (Type::ObjectId, Value::Str(v)) => object_id::write(v, writer, path)?,
            (Type::Regex, Value::Regex(v)) => regex::write(v, writer, path)?,
            (Type::Date, Value::Date(v)) => date::write(*v, writer, path)?,
            _ => {
                return Err(EncodeError::TypeMismatch {
                    path: path.to_string(),
                    expected: self.expected(),
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Reads one value. On error the cursor is left where it was.
    pub fn read(self, reader: &mut Reader) -> Result<Value, DecodeError> {
        let start = reader.offset();
        let result = reader.transact(|r| self.read_inner(r));
        if let Err(err) = &result {
            tracing::debug!(
                type_name = self.name(),
                offset = start,
                error = %err,
                "failed to read value"
            );
        }
        result
    }

    fn read_inner(self, reader: &mut Reader) -> Result<Value, DecodeError> {
        Ok(match self {
            Type::Uint => Value::Uint(uint::read(reader)?),
            Type::Int => Value::Int(int::read(reader)?),
            Type::Float => Value::Float(float::read(reader)?),
            Type::String => Value::Str(string::read(reader)?),
            Type::Bytes => Value::Bytes(bytes::read(reader)?),
            Type::Boolean => Value::Bool(boolean::read(reader)?),
            Type::Json => Value::Json(json::read(reader)?),
            Type::Rgb => Value::Str(color::read_rgb(reader)?),
            Type::Rgba => Value::Str(color::read_rgba(reader)?),
            Type::ObjectId => Value::Str(object_id::read(reader)?),
            Type::Regex => Value::Regex(regex::read(reader)?),
            Type::Date => Value::Date(date::read(reader)?),
        })
    }

    /// Encodes a single top-level value into a fresh byte vector.
    pub fn encode(self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::with_alloc_size(ENCODE_ALLOC_SIZE);
        self.write(value, &mut writer, &Path::root())?;
        Ok(writer.finalize().into_vec())
    }

    /// Decodes exactly one value; leftover bytes are an error.
    pub fn decode(self, data: &[u8]) -> Result<Value, DecodeError> {
        let mut reader = Reader::new(data);
        let value = self.read(&mut reader)?;
        if !reader.exhausted() {
            return Err(DecodeError::TrailingBytes(reader.size()));
        }
        Ok(value)
    }

    fn expected(self) -> &'static str {
        match self {
            Type::Uint => "unsigned integer",
            Type::Int => "integer",
            Type::Float => "number",
            Type::String => "string",
            Type::Bytes => "bytes",
            Type::Boolean => "boolean",
            Type::Json => "json",
            Type::Rgb => "rgb color string",
            Type::Rgba => "rgba color string",
            Type::ObjectId => "object id string",
            Type::Regex => "regex",
            Type::Date => "date",
        }
    }

    fn out_of_range(self, path: &Path) -> EncodeError {
        EncodeError::OutOfRange {
            path: path.to_string(),
            type_name: self.name(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Type {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Type::from_name(s).ok_or_else(|| UnknownTypeError(s.to_string()))
    }
}
