//! Encoded polyline codec
//!
//! Implements the widely used delta-encoded polyline format: every value is
//! a zig-zag encoded signed delta in 1e-5 degree units, split into 5-bit
//! groups offset by 63, with `0x20` marking a continuation. Values alternate
//! latitude, longitude.

use thiserror::Error;

use crate::value_objects::Coordinate;

/// Fixed-point scale of the encoding (five decimal places)
const PRECISION: f64 = 1e5;

/// Lowest and highest byte that can occur in an encoded polyline
const MIN_BYTE: u8 = 63;
const MAX_BYTE: u8 = 126;

const CONTINUATION: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;

/// Errors raised by [`decode_strict`]
///
/// Every variant keeps the coordinates decoded before the fault, so callers
/// can degrade to the valid prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    /// Input ended inside a value or between a latitude and its longitude
    #[error("Truncated polyline at byte {offset}")]
    Truncated {
        /// Byte offset where more input was expected
        offset: usize,
        /// Coordinates decoded before the fault
        decoded: Vec<Coordinate>,
    },

    /// A byte outside the encoding alphabet
    #[error("Invalid polyline byte {byte:#04x} at {offset}")]
    InvalidByte {
        /// Byte offset of the offending byte
        offset: usize,
        /// The offending byte
        byte: u8,
        /// Coordinates decoded before the fault
        decoded: Vec<Coordinate>,
    },

    /// A value with more continuation groups than fit in 64 bits
    #[error("Polyline value overflow at byte {offset}")]
    Overflow {
        /// Byte offset where the value became too long
        offset: usize,
        /// Coordinates decoded before the fault
        decoded: Vec<Coordinate>,
    },
}

impl PolylineError {
    /// Coordinates decoded before the fault
    #[must_use]
    pub fn decoded(&self) -> &[Coordinate] {
        match self {
            Self::Truncated { decoded, .. }
            | Self::InvalidByte { decoded, .. }
            | Self::Overflow { decoded, .. } => decoded,
        }
    }

    /// Consume the error, keeping the decoded prefix
    #[must_use]
    pub fn into_decoded(self) -> Vec<Coordinate> {
        match self {
            Self::Truncated { decoded, .. }
            | Self::InvalidByte { decoded, .. }
            | Self::Overflow { decoded, .. } => decoded,
        }
    }

    /// Byte offset of the fault
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Truncated { offset, .. }
            | Self::InvalidByte { offset, .. }
            | Self::Overflow { offset, .. } => *offset,
        }
    }
}

/// Where reading a single value went wrong
enum Fault {
    Truncated(usize),
    InvalidByte(usize, u8),
    Overflow(usize),
}

impl Fault {
    fn into_error(self, decoded: Vec<Coordinate>) -> PolylineError {
        match self {
            Self::Truncated(offset) => PolylineError::Truncated { offset, decoded },
            Self::InvalidByte(offset, byte) => PolylineError::InvalidByte {
                offset,
                byte,
                decoded,
            },
            Self::Overflow(offset) => PolylineError::Overflow { offset, decoded },
        }
    }
}

/// Read one zig-zag encoded value starting at `*index`
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, Fault> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(Fault::Truncated(*index));
        };
        if !(MIN_BYTE..=MAX_BYTE).contains(&byte) {
            return Err(Fault::InvalidByte(*index, byte));
        }
        if shift > 60 {
            return Err(Fault::Overflow(*index));
        }
        *index += 1;

        let chunk = i64::from(byte - MIN_BYTE);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk < CONTINUATION {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Decode a polyline, failing on malformed input
///
/// # Errors
///
/// Returns a [`PolylineError`] carrying the valid prefix when the input is
/// truncated, contains bytes outside the alphabet, or overflows.
#[allow(clippy::cast_precision_loss)]
pub fn decode_strict(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut coordinates = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let delta_lat = match next_value(bytes, &mut index) {
            Ok(v) => v,
            Err(fault) => return Err(fault.into_error(coordinates)),
        };
        let delta_lng = match next_value(bytes, &mut index) {
            Ok(v) => v,
            Err(fault) => return Err(fault.into_error(coordinates)),
        };

        lat = lat.wrapping_add(delta_lat);
        lng = lng.wrapping_add(delta_lng);

        coordinates.push(Coordinate::new_unchecked(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(coordinates)
}

/// Decode a polyline, stopping at the first malformed value
///
/// Returns every coordinate decoded before the fault. Empty input yields an
/// empty sequence.
#[must_use]
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    decode_strict(encoded).unwrap_or_else(PolylineError::into_decoded)
}

/// Encode coordinates as a polyline
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode(coordinates: &[Coordinate]) -> String {
    let mut encoded = String::with_capacity(coordinates.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for coordinate in coordinates {
        let lat = (coordinate.latitude() * PRECISION).round() as i64;
        let lng = (coordinate.longitude() * PRECISION).round() as i64;

        push_value(&mut encoded, lat - prev_lat);
        push_value(&mut encoded, lng - prev_lng);

        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn push_value(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };

    while value >= CONTINUATION {
        let chunk = ((value & CHUNK_MASK) | CONTINUATION) as u8 + MIN_BYTE;
        out.push(char::from(chunk));
        value >>= 5;
    }
    out.push(char::from(value as u8 + MIN_BYTE));
}
