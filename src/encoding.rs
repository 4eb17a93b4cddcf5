//! Text encoding detection, validation and conversion.
//!
//! UTF-8 validation rides the simdutf8 crate, which is substantially
//! faster than the std validator on non-ASCII input; base64 rides the
//! base64 crate with the standard alphabet. The UTF-32 conversions follow
//! the two-phase shape used everywhere in this crate: measure, size the
//! output, then produce.
//!
//! All operations take caller-owned ranges and return a count, a boolean,
//! or an [`EncodingError`]; nothing here allocates.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::{DecodeSliceError, Engine as _};

use crate::simd;

/// Classification produced by [`detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Pure 7-bit ASCII; also valid UTF-8, but safe for byte-per-glyph
    /// fast paths.
    Ascii,
    /// Well-formed UTF-8 with at least one multi-byte sequence.
    Utf8,
    /// UTF-16 layout (BOM or alternating-null pattern).
    Utf16,
    /// UTF-32 layout (BOM or null-padded 4-byte groups).
    Utf32,
    /// None of the above.
    Unknown,
}

/// Failures reported by the conversion and decode operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The input is not well-formed UTF-8.
    InvalidUtf8,
    /// A UTF-32 unit is a surrogate or lies beyond U+10FFFF.
    InvalidScalar(u32),
    /// The output buffer cannot hold the converted content.
    OutputTooSmall { needed: usize, capacity: usize },
    /// The input is not valid base64.
    InvalidBase64,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidUtf8 => write!(f, "invalid utf-8 input"),
            EncodingError::InvalidScalar(value) => {
                write!(f, "invalid unicode scalar value {value:#x}")
            }
            EncodingError::OutputTooSmall { needed, capacity } => {
                write!(f, "output buffer too small: need {needed}, have {capacity}")
            }
            EncodingError::InvalidBase64 => write!(f, "invalid base64 input"),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Whether `bytes` is well-formed UTF-8.
#[inline]
pub fn validate_utf8(bytes: &[u8]) -> bool {
    simdutf8::basic::from_utf8(bytes).is_ok()
}

/// Whether `bytes` is pure 7-bit ASCII.
#[inline]
pub fn validate_ascii(bytes: &[u8]) -> bool {
    simd::is_all_ascii(bytes)
}

/// Classifies a byte range so callers can pick a decode fast path.
///
/// BOMs are authoritative (the UTF-32 BOMs are checked before their UTF-16
/// prefixes). Without one, NUL-free input is classified as ASCII or UTF-8;
/// input with embedded NULs is matched against the null-byte layout
/// BOM-less UTF-16/UTF-32 text leaves behind for Latin and BMP content.
/// Heuristic by nature; anything that matches none of the shapes
/// (including narrow text with stray NULs) is [`Charset::Unknown`].
pub fn detect(bytes: &[u8]) -> Charset {
    if bytes.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) || bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return Charset::Utf32;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Charset::Utf16;
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Charset::Utf8;
    }

    if simd::find_byte(bytes, 0) == bytes.len() {
        if validate_ascii(bytes) {
            return Charset::Ascii;
        }
        if validate_utf8(bytes) {
            return Charset::Utf8;
        }
        return Charset::Unknown;
    }

    // BMP text in 4-byte units keeps the high half of every unit zero.
    if bytes.len() >= 4 && bytes.len() % 4 == 0 {
        let le = bytes.chunks_exact(4).all(|unit| unit[2] == 0 && unit[3] == 0);
        let be = bytes.chunks_exact(4).all(|unit| unit[0] == 0 && unit[1] == 0);
        if le || be {
            return Charset::Utf32;
        }
    }
    // Latin text in 2-byte units zeroes every other byte.
    if bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let le = bytes.chunks_exact(2).all(|unit| unit[1] == 0);
        let be = bytes.chunks_exact(2).all(|unit| unit[0] == 0);
        if le || be {
            return Charset::Utf16;
        }
    }

    Charset::Unknown
}

/// Number of UTF-32 units `input` converts to; the measuring half of the
/// measure-then-convert pattern.
pub fn utf32_len_from_utf8(input: &[u8]) -> Result<usize, EncodingError> {
    if validate_ascii(input) {
        return Ok(input.len());
    }
    let text = simdutf8::basic::from_utf8(input).map_err(|_| EncodingError::InvalidUtf8)?;
    Ok(text.chars().count())
}

/// Converts UTF-8 to UTF-32, returning the number of units written.
///
/// Size `output` with [`utf32_len_from_utf8`] first.
pub fn convert_utf8_to_utf32(input: &[u8], output: &mut [u32]) -> Result<usize, EncodingError> {
    let text = simdutf8::basic::from_utf8(input).map_err(|_| EncodingError::InvalidUtf8)?;

    let mut written = 0;
    for ch in text.chars() {
        if written == output.len() {
            return Err(EncodingError::OutputTooSmall {
                needed: text.chars().count(),
                capacity: output.len(),
            });
        }
        output[written] = ch as u32;
        written += 1;
    }
    Ok(written)
}

/// Number of UTF-8 bytes `input` encodes to; the measuring half for the
/// inverse direction.
pub fn utf8_len_from_utf32(input: &[u32]) -> Result<usize, EncodingError> {
    input.iter().try_fold(0, |total, &unit| {
        let ch = char::from_u32(unit).ok_or(EncodingError::InvalidScalar(unit))?;
        Ok(total + ch.len_utf8())
    })
}

/// Converts UTF-32 to UTF-8, returning the number of bytes written.
///
/// Size `output` with [`utf8_len_from_utf32`] first. Surrogates and
/// out-of-range units are rejected, not replaced.
pub fn convert_utf32_to_utf8(input: &[u32], output: &mut [u8]) -> Result<usize, EncodingError> {
    let mut written = 0;
    for &unit in input {
        let ch = char::from_u32(unit).ok_or(EncodingError::InvalidScalar(unit))?;
        let width = ch.len_utf8();
        if written + width > output.len() {
            return Err(EncodingError::OutputTooSmall {
                needed: utf8_len_from_utf32(input)?,
                capacity: output.len(),
            });
        }
        ch.encode_utf8(&mut output[written..]);
        written += width;
    }
    Ok(written)
}

/// Conservative upper bound on the decoded size of a base64 payload, for
/// sizing the output buffer ahead of [`base64_decode`].
#[inline]
pub fn base64_decoded_len(input: &[u8]) -> usize {
    base64::decoded_len_estimate(input.len())
}

/// Decodes standard-alphabet base64 into `output`, returning the number of
/// bytes written.
///
/// Malformed input is an error, never a truncated count; check before
/// trusting the length.
pub fn base64_decode(input: &[u8], output: &mut [u8]) -> Result<usize, EncodingError> {
    BASE64.decode_slice(input, output).map_err(|err| match err {
        DecodeSliceError::DecodeError(_) => EncodingError::InvalidBase64,
        DecodeSliceError::OutputSliceTooSmall => EncodingError::OutputTooSmall {
            needed: base64::decoded_len_estimate(input.len()),
            capacity: output.len(),
        },
    })
}
