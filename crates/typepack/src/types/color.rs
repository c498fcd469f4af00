//! `rgb` and `rgba`: colors stored as raw channel bytes.
//!
//! Parsing is strict and rendering is canonical, so `write` accepts several
//! notations while `read` always yields one: `#rrggbb` in lowercase for rgb
//! and `rgba(r, g, b, a)` for rgba.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use typepack_buffers::{Reader, Writer};

use crate::{DecodeError, EncodeError, Path};

/// Input text matched none of the accepted color notations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color notation")]
pub struct ParseColorError;

/// An opaque color: red, green, blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

/// A color with an 8-bit quantized alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: u8,
}

fn hex_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^#(?:([0-9a-fA-F]{6})|([0-9a-fA-F]{3}))$").unwrap()
    })
}

fn rgb_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(
            r"^rgb\(\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*\)$",
        )
        .unwrap()
    })
}

fn rgba_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(
            r"^rgba\(\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*\)$",
        )
        .unwrap()
    })
}

fn channel(text: &str) -> Result<u8, ParseColorError> {
    text.parse::<u8>().map_err(|_| ParseColorError)
}

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

/// Maps an alpha fraction in `[0, 1]` to its stored byte.
pub fn quantize_alpha(alpha: f64) -> u8 {
    (alpha * 255.0).round() as u8
}

/// Shortest decimal (at most three fractional digits) that quantizes back to
/// `alpha`, without trailing zeros.
pub fn render_alpha(alpha: u8) -> String {
    let exact = f64::from(alpha) / 255.0;
    for digits in 0..3 {
        let scale = 10f64.powi(digits);
        let candidate = (exact * scale).round() / scale;
        if quantize_alpha(candidate) == alpha {
            return trim_decimal(format!("{candidate:.prec$}", prec = digits as usize));
        }
    }
    trim_decimal(format!("{exact:.3}"))
}

fn trim_decimal(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#rrggbb`, `#rgb` and `rgb(r, g, b)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(caps) = hex_regex().captures(s) {
            if let Some(full) = caps.get(1) {
                let b = full.as_str().as_bytes();
                let pair = |i: usize| (hex_digit(b[i]) << 4) | hex_digit(b[i + 1]);
                return Ok(Rgb([pair(0), pair(2), pair(4)]));
            }
            if let Some(short) = caps.get(2) {
                let b = short.as_str().as_bytes();
                let double = |i: usize| hex_digit(b[i]) * 0x11;
                return Ok(Rgb([double(0), double(1), double(2)]));
            }
        }
        if let Some(caps) = rgb_regex().captures(s) {
            return Ok(Rgb([
                channel(&caps[1])?,
                channel(&caps[2])?,
                channel(&caps[3])?,
            ]));
        }
        Err(ParseColorError)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Accepts `rgba(r, g, b, a)` with `a` in `[0, 1]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = rgba_regex().captures(s).ok_or(ParseColorError)?;
        let alpha: f64 = caps[4].parse().map_err(|_| ParseColorError)?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ParseColorError);
        }
        Ok(Rgba {
            rgb: [
                channel(&caps[1])?,
                channel(&caps[2])?,
                channel(&caps[3])?,
            ],
            alpha: quantize_alpha(alpha),
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", render_alpha(self.alpha))
    }
}

fn invalid(text: &str, path: &Path) -> EncodeError {
    EncodeError::InvalidColor {
        path: path.to_string(),
        input: text.to_string(),
    }
}

pub fn write_rgb(text: &str, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    let color: Rgb = text.parse().map_err(|_| invalid(text, path))?;
    writer.buf(&color.0);
    Ok(())
}

pub fn read_rgb(reader: &mut Reader) -> Result<String, DecodeError> {
    let bytes = reader.take(3)?;
    Ok(Rgb([bytes[0], bytes[1], bytes[2]]).to_string())
}

pub fn write_rgba(text: &str, writer: &mut Writer, path: &Path) -> Result<(), EncodeError> {
    let color: Rgba = text.parse().map_err(|_| invalid(text, path))?;
    writer.buf(&color.rgb);
    writer.u8(color.alpha);
    Ok(())
}

pub fn read_rgba(reader: &mut Reader) -> Result<String, DecodeError> {
    let bytes = reader.take(4)?;
    Ok(Rgba {
        rgb: [bytes[0], bytes[1], bytes[2]],
        alpha: bytes[3],
    }
    .to_string())
}
