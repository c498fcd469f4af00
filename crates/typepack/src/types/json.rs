//! `json`: tagged recursive encoding of a JSON tree.
//!
//! One tag byte, then the payload:
//!
//! | tag | value   | payload                                       |
//! |-----|---------|-----------------------------------------------|
//! | 0   | null    | none                                          |
//! | 1   | boolean | `boolean`                                     |
//! | 2   | number  | `float`                                       |
//! | 3   | string  | `string`                                      |
//! | 4   | array   | `uint` count, then tagged items               |
//! | 5   | object  | `uint` count, then `string` key + tagged item |
//!
//! Object members keep insertion order. A key may appear only once per
//! object; a repeated key is rejected on read rather than collapsed.

use serde_json::{Map, Number, Value};
use typepack_buffers::{Reader, Writer};

use super::{boolean, float, read_len, string, uint};
use crate::{DecodeError, EncodeError, Path};

pub const TAG_NULL: u8 = 0;
pub const TAG_BOOLEAN: u8 = 1;
pub const TAG_NUMBER: u8 = 2;
pub const TAG_STRING: u8 = 3;
pub const TAG_ARRAY: u8 = 4;
pub const TAG_OBJECT: u8 = 5;

/// Deepest container nesting accepted on either side.
pub const MAX_JSON_DEPTH: usize = 128;

/// Largest integer a binary64 holds exactly, 2^53 - 1.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes `value`. The whole tree is validated first, so a rejected value
/// leaves `writer` untouched.
pub fn write(value: &Value, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    validate(value, path, 0)?;
    write_value(value, writer);
    Ok(())
}

fn validate(value: &Value, path: &Path, depth: usize) -> Result<(), EncodeError> {
    match value {
        Value::Number(n) if n.as_f64().is_none() => Err(EncodeError::OutOfRange {
            path: path.to_string(),
            type_name: "json",
        }),
        Value::Array(items) => {
            check_depth(depth, path)?;
            for (i, item) in items.iter().enumerate() {
                validate(item, &path.index(i), depth + 1)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            check_depth(depth, path)?;
            for (key, item) in map {
                validate(item, &path.key(key), depth + 1)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_depth(depth: usize, path: &Path) -> Result<(), EncodeError> {
    if depth >= MAX_JSON_DEPTH {
        return Err(EncodeError::NestingTooDeep {
            path: path.to_string(),
            limit: MAX_JSON_DEPTH,
        });
    }
    Ok(())
}

fn write_value(value: &Value, writer: &mut Writer) {
    match value {
        Value::Null => writer.u8(TAG_NULL),
        Value::Bool(b) => {
            writer.u8(TAG_BOOLEAN);
            boolean::write(*b, writer);
        }
        Value::Number(n) => {
            writer.u8(TAG_NUMBER);
            float::write(n.as_f64().unwrap_or(f64::NAN), writer);
        }
        Value::String(s) => {
            writer.u8(TAG_STRING);
            string::write(s, writer);
        }
        Value::Array(items) => {
            writer.u8(TAG_ARRAY);
            uint::write(items.len() as u64, writer);
            for item in items {
                write_value(item, writer);
            }
        }
        Value::Object(map) => {
            writer.u8(TAG_OBJECT);
            uint::write(map.len() as u64, writer);
            for (key, item) in map {
                string::write(key, writer);
                write_value(item, writer);
            }
        }
    }
}

pub fn read(reader: &mut Reader) -> Result<Value, DecodeError> {
    reader.transact(|r| read_value(r, 0))
}

fn read_value(reader: &mut Reader, depth: usize) -> Result<Value, DecodeError> {
    let tag = reader.try_u8()?;
    let value = match tag {
        TAG_NULL => Value::Null,
        TAG_BOOLEAN => Value::Bool(boolean::read(reader)?),
        TAG_NUMBER => Value::Number(number_from_f64(float::read(reader)?)?),
        TAG_STRING => Value::String(string::read(reader)?),
        TAG_ARRAY => {
            if depth >= MAX_JSON_DEPTH {
                return Err(DecodeError::NestingTooDeep(MAX_JSON_DEPTH));
            }
            let count = read_len(reader)?;
            // Each item takes at least one byte, so a garbage count cannot
            // force a huge allocation.
            let mut items = Vec::with_capacity(count.min(reader.size()));
            for _ in 0..count {
                items.push(read_value(reader, depth + 1)?);
            }
            Value::Array(items)
        }
        TAG_OBJECT => {
            if depth >= MAX_JSON_DEPTH {
                return Err(DecodeError::NestingTooDeep(MAX_JSON_DEPTH));
            }
            let count = read_len(reader)?;
            let mut map = Map::with_capacity(count.min(reader.size() / 2));
            for _ in 0..count {
                let key = string::read(reader)?;
                if map.contains_key(&key) {
                    return Err(DecodeError::DuplicateKey(key));
                }
                let item = read_value(reader, depth + 1)?;
                map.insert(key, item);
            }
            Value::Object(map)
        }
        t => return Err(DecodeError::UnknownTag(t)),
    };
    Ok(value)
}

/// Integral values in the exactly representable range come back as integer
/// numbers, so `17` reads as `17` rather than `17.0`. `-0.0` stays a float.
fn number_from_f64(f: f64) -> Result<Number, DecodeError> {
    if !f.is_finite() {
        return Err(DecodeError::NonFiniteNumber);
    }
    let negative_zero = f == 0.0 && f.is_sign_negative();
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER && !negative_zero {
        return Ok(Number::from(f as i64));
    }
    Number::from_f64(f).ok_or(DecodeError::NonFiniteNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &Value) -> Vec<u8> {
        let mut writer = Writer::new();
        write(value, &mut writer, &Path::root()).unwrap();
        writer.finalize().into_vec()
    }

    fn roundtrip(value: &Value) -> Value {
        let bytes = encode(value);
        let mut reader = Reader::new(&bytes);
        let out = read(&mut reader).unwrap();
        assert!(reader.exhausted());
        out
    }

    #[test]
    fn scalar_wire_matrix() {
        assert_eq!(encode(&json!(null)), [TAG_NULL]);
        assert_eq!(encode(&json!(true)), [TAG_BOOLEAN, 0x01]);
        assert_eq!(encode(&json!("Hi")), [TAG_STRING, 0x02, b'H', b'i']);
        assert_eq!(
            encode(&json!(1)),
            [TAG_NUMBER, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn container_wire_matrix() {
        assert_eq!(
            encode(&json!([null, false])),
            [TAG_ARRAY, 0x02, TAG_NULL, TAG_BOOLEAN, 0x00]
        );
        assert_eq!(
            encode(&json!({"a": null})),
            [TAG_OBJECT, 0x01, 0x01, b'a', TAG_NULL]
        );
    }

    #[test]
    fn roundtrip_matrix() {
        let cases = vec![
            json!(true),
            json!(17),
            json!(null),
            json!("Hello"),
            json!(-2.5),
            json!([true, 17, null, "Hi"]),
            json!({"a": 2, "b": {"c": ["hi"]}}),
            json!([]),
            json!({}),
        ];
        for case in cases {
            assert_eq!(roundtrip(&case), case);
        }
    }

    #[test]
    fn object_keeps_insertion_order() {
        let value = json!({"z": 1, "a": 2, "m": 3});
        let out = roundtrip(&value);
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn integral_floats_read_as_integers() {
        assert_eq!(roundtrip(&json!(3.0)), json!(3));
        let min_safe = json!(-9_007_199_254_740_991i64);
        assert_eq!(roundtrip(&min_safe), min_safe);
        let neg_zero = roundtrip(&json!(-0.0));
        assert!(neg_zero.as_f64().unwrap().is_sign_negative());
    }

    #[test]
    fn unknown_tag() {
        let mut reader = Reader::new(&[0x09]);
        assert_eq!(read(&mut reader), Err(DecodeError::UnknownTag(0x09)));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn unknown_tag_inside_array_rewinds_everything() {
        let mut reader = Reader::new(&[TAG_ARRAY, 0x02, TAG_NULL, 0x07]);
        assert_eq!(read(&mut reader), Err(DecodeError::UnknownTag(0x07)));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn repeated_object_key_is_rejected() {
        let bytes = [
            TAG_OBJECT, 0x02, 0x01, b'a', TAG_NULL, 0x01, b'a', TAG_NULL,
        ];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            read(&mut reader),
            Err(DecodeError::DuplicateKey("a".to_string()))
        );
        assert_eq!(reader.offset(), 0);

        let nested = [
            TAG_ARRAY, 0x01, TAG_OBJECT, 0x02, 0x01, b'k', TAG_NULL, 0x01, b'k',
            TAG_BOOLEAN, 0x01,
        ];
        let mut reader = Reader::new(&nested);
        assert_eq!(
            read(&mut reader),
            Err(DecodeError::DuplicateKey("k".to_string()))
        );
    }

    #[test]
    fn non_finite_number_is_rejected() {
        let mut writer = Writer::new();
        writer.u8(TAG_NUMBER);
        float::write(f64::NAN, &mut writer);
        let bytes = writer.finalize();
        let mut reader = Reader::new(&bytes);
        assert_eq!(read(&mut reader), Err(DecodeError::NonFiniteNumber));
    }

    #[test]
    fn garbage_count_underflows() {
        let bytes = [TAG_ARRAY, 0xff, 0xff, 0xff, 0xff, 0x0f];
        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            read(&mut reader),
            Err(DecodeError::Underflow { .. })
        ));
    }

    #[test]
    fn nesting_limit() {
        let mut value = json!(null);
        for _ in 0..MAX_JSON_DEPTH {
            value = json!([value]);
        }
        assert_eq!(roundtrip(&value), value);

        let too_deep = json!({"wrap": [value.clone()]});
        let mut writer = Writer::new();
        let err = write(&too_deep, &mut writer, &Path::root()).unwrap_err();
        assert!(matches!(err, EncodeError::NestingTooDeep { .. }));
        assert!(err.path().starts_with("wrap[0][0][0]"));
        assert!(writer.is_empty());

        let mut bytes = vec![TAG_ARRAY, 0x01];
        bytes.extend(encode(&value));
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            read(&mut reader),
            Err(DecodeError::NestingTooDeep(MAX_JSON_DEPTH))
        );
    }
}
