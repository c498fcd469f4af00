//! `regex`: pattern source and flag characters as two `string`s.

use typepack_buffers::{Reader, Writer};

use super::string;
use crate::{DecodeError, EncodeError, Path};

/// Flag characters accepted on write.
pub const VALID_FLAGS: &str = "dgimsuvy";

/// A regular expression as data: its source text and flags, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegexValue {
    pub source: String,
    pub flags: String,
}

impl RegexValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// True if each flag is known, appears once, and `u`/`v` are not combined.
    pub fn flags_valid(&self) -> bool {
        let mut seen = [false; 128];
        for c in self.flags.chars() {
            if !VALID_FLAGS.contains(c) || seen[c as usize] {
                return false;
            }
            seen[c as usize] = true;
        }
        !(seen['u' as usize] && seen['v' as usize])
    }

    /// Compiles the pattern. `i`, `m` and `s` become inline flags; the
    /// remaining flags govern how a match is driven, not what it matches.
    pub fn compile(&self) -> Result<regex::Regex, regex::Error> {
        let inline: String = self
            .flags
            .chars()
            .filter(|c| matches!(c, 'i' | 'm' | 's'))
            .collect();
        if inline.is_empty() {
            regex::Regex::new(&self.source)
        } else {
            regex::Regex::new(&format!("(?{inline}){}", self.source))
        }
    }
}

pub fn write(value: &RegexValue, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    if !value.flags_valid() {
        return Err(EncodeError::InvalidRegexFlags {
            path: path.to_string(),
            flags: value.flags.clone(),
        });
    }
    string::write(&value.source, writer);
    string::write(&value.flags, writer);
    Ok(())
}

pub fn read(reader: &mut Reader) -> Result<RegexValue, DecodeError> {
    reader.transact(|r| {
        let source = string::read(r)?;
        let flags = string::read(r)?;
        Ok(RegexValue { source, flags })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: &RegexValue) -> RegexValue {
        let mut writer = Writer::new();
        write(value, &mut writer, &Path::root()).unwrap();
        let bytes = writer.finalize();
        let mut reader = Reader::new(&bytes);
        let out = read(&mut reader).unwrap();
        assert!(reader.exhausted());
        out
    }

    #[test]
    fn roundtrip_matrix() {
        let plain = RegexValue::new("my-regex", "");
        assert_eq!(roundtrip(&plain), plain);
        let flagged = RegexValue::new(r"^\.{3,}[\]\[2-5-]|(?:2)$", "ig");
        assert_eq!(roundtrip(&flagged), flagged);
        let reordered = RegexValue::new("a", "gi");
        assert_eq!(roundtrip(&reordered).flags, "gi");
    }

    #[test]
    fn wire_layout() {
        let mut writer = Writer::new();
        write(&RegexValue::new("ab", "g"), &mut writer, &Path::root()).unwrap();
        assert_eq!(*writer.finalize(), [0x02, b'a', b'b', 0x01, b'g']);
    }

    #[test]
    fn flag_validation() {
        assert!(RegexValue::new("a", "dgimsuy").flags_valid());
        assert!(!RegexValue::new("a", "gg").flags_valid());
        assert!(!RegexValue::new("a", "q").flags_valid());
        assert!(!RegexValue::new("a", "uv").flags_valid());
        assert!(!RegexValue::new("a", "é").flags_valid());

        let mut writer = Writer::new();
        let err = write(&RegexValue::new("a", "gg"), &mut writer, &Path::named("re"))
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidRegexFlags {
                path: "re".to_string(),
                flags: "gg".to_string(),
            }
        );
    }

    #[test]
    fn compile_applies_inline_flags() {
        let re = RegexValue::new("^hello$", "im").compile().unwrap();
        assert!(re.is_match("x\nHELLO\ny"));
        let strict = RegexValue::new("^hello$", "g").compile().unwrap();
        assert!(!strict.is_match("HELLO"));
    }

    #[test]
    fn truncated_flags_rewind() {
        let bytes = [0x01, b'a', 0x03, b'g'];
        let mut reader = Reader::new(&bytes);
        assert!(read(&mut reader).is_err());
        assert_eq!(reader.offset(), 0);
    }
}
