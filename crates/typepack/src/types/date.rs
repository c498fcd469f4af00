//! `date`: signed milliseconds since the Unix epoch, 8 bytes big-endian.

use time::OffsetDateTime;
use typepack_buffers::{Reader, Writer};

use crate::{DecodeError, EncodeError, Path};

/// Bound of the representable range in either direction: 100 million days.
pub const MAX_DATE_MS: i64 = 8_640_000_000_000_000;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Milliseconds since the epoch, rounded toward negative infinity.
pub fn to_millis(value: OffsetDateTime) -> Option<i64> {
    let millis = value.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI);
    i64::try_from(millis)
        .ok()
        .filter(|ms| (-MAX_DATE_MS..=MAX_DATE_MS).contains(ms))
}

/// The UTC instant `millis` after the epoch, if it is within range.
pub fn from_millis(millis: i64) -> Option<OffsetDateTime> {
    if !(-MAX_DATE_MS..=MAX_DATE_MS).contains(&millis) {
        return None;
    }
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI).ok()
}

pub fn write(value: OffsetDateTime, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    let millis = to_millis(value).ok_or_else(|| EncodeError::InvalidDate {
        path: path.to_string(),
    })?;
    writer.i64(millis);
    Ok(())
}

pub fn read(reader: &mut Reader) -> Result<OffsetDateTime, DecodeError> {
    reader.transact(|r| {
        let millis = r.try_i64()?;
        from_millis(millis).ok_or(DecodeError::InvalidDate(millis))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn roundtrip(value: OffsetDateTime) -> OffsetDateTime {
        let mut writer = Writer::new();
        write(value, &mut writer, &Path::root()).unwrap();
        let bytes = writer.finalize();
        assert_eq!(bytes.len(), 8);
        let mut reader = Reader::new(&bytes);
        let out = read(&mut reader).unwrap();
        assert!(reader.exhausted());
        out
    }

    #[test]
    fn millisecond_instants_roundtrip() {
        for value in [
            OffsetDateTime::UNIX_EPOCH,
            datetime!(2024-02-29 13:45:10.123 UTC),
            datetime!(1969-07-20 20:17:40.001 UTC),
            datetime!(1900-01-01 00:00 UTC),
        ] {
            assert_eq!(roundtrip(value), value);
        }
    }

    #[test]
    fn offset_is_normalized_to_utc() {
        let local = datetime!(2024-01-01 09:00 +09:00);
        let out = roundtrip(local);
        assert_eq!(out, local);
        assert_eq!(out.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn sub_millisecond_precision_floors() {
        let value = datetime!(1969-12-31 23:59:59.9999995 UTC);
        assert_eq!(to_millis(value), Some(-1));
        let value = datetime!(1970-01-01 00:00:00.000999 UTC);
        assert_eq!(to_millis(value), Some(0));
    }

    #[test]
    fn wire_layout() {
        let mut writer = Writer::new();
        write(
            datetime!(1970-01-01 00:00:00.258 UTC),
            &mut writer,
            &Path::root(),
        )
        .unwrap();
        assert_eq!(*writer.finalize(), [0, 0, 0, 0, 0, 0, 0x01, 0x02]);
    }

    #[test]
    fn range_limits() {
        assert!(from_millis(MAX_DATE_MS).is_some());
        assert!(from_millis(-MAX_DATE_MS).is_some());
        assert!(from_millis(MAX_DATE_MS + 1).is_none());

        let too_late = from_millis(MAX_DATE_MS).unwrap() + time::Duration::milliseconds(1);
        let mut writer = Writer::new();
        let err = write(too_late, &mut writer, &Path::named("expires")).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidDate {
                path: "expires".to_string()
            }
        );

        let bytes = (MAX_DATE_MS + 1).to_be_bytes();
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            read(&mut reader),
            Err(DecodeError::InvalidDate(MAX_DATE_MS + 1))
        );
        assert_eq!(reader.offset(), 0);
    }
}
