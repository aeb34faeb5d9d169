//! Scalar packing and hex rendering for frame payloads.
//!
//! This module converts fixed-width integers into the little-endian byte
//! sequences written into a [`Frame`](crate::frame::Frame), and renders byte
//! slices as uppercase hex for logging or for modems that take the payload as
//! a hex string.
//!
//! ## Byte Order
//!
//! Every multi-byte value is stored least-significant byte first. Signed
//! values are packed by reinterpreting their two's-complement bit pattern as
//! the unsigned integer of the same width, so `-2i16` and `0xFFFEu16` produce
//! the same bytes. The receiver restores the sign by sign-extending from the
//! declared width.
//!
//! ## Functions
//!
//! - [`pack_u8`], [`pack_u16`], [`pack_u32`]: unsigned scalars to bytes
//! - [`pack_i8`], [`pack_i16`], [`pack_i32`]: signed scalars to bytes
//! - [`pack`]: runtime width and signedness, range checked
//! - [`unpack_le`] and [`sign_extend`]: the inverse, used for reporting values
//! - [`encode_hex`]: byte slice to uppercase hex digits
//!
//! ## Limitations
//!
//! - Only widths of 1, 2 and 4 bytes exist; [`pack`] rejects anything else
//! - [`pack`] rejects values that would need truncation instead of wrapping them

use crate::consts::MAX_SCALAR_WIDTH_USIZE;
use crate::error::{FrameError, FrameResult};

static HEX_DIGITS: [u8; 16] = *b"0123456789ABCDEF";

/// How a receiver should interpret the bytes of a value.
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Signedness {
    /// Plain binary magnitude.
    Unsigned,
    /// Two's complement; the top bit of the last byte is the sign.
    Signed,
}

/// Packs a `u8`.
pub const fn pack_u8(value: u8) -> [u8; 1] {
    [value]
}

/// Packs a `u16` little-endian.
pub const fn pack_u16(value: u16) -> [u8; 2] {
    [(value & 0xff) as u8, (value >> 8) as u8]
}

/// Packs a `u32` little-endian.
pub const fn pack_u32(value: u32) -> [u8; 4] {
    [
        (value & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        ((value >> 16) & 0xff) as u8,
        (value >> 24) as u8,
    ]
}

/// Packs an `i8` via its two's-complement bit pattern.
pub const fn pack_i8(value: i8) -> [u8; 1] {
    pack_u8(value as u8)
}

/// Packs an `i16` little-endian via its two's-complement bit pattern.
pub const fn pack_i16(value: i16) -> [u8; 2] {
    pack_u16(value as u16)
}

/// Packs an `i32` little-endian via its two's-complement bit pattern.
pub const fn pack_i32(value: i32) -> [u8; 4] {
    pack_u32(value as u32)
}

/// The packed bytes of one scalar, 1 to 4 bytes long.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Packed {
    bytes: [u8; MAX_SCALAR_WIDTH_USIZE],
    len: u8,
}

impl Packed {
    fn from_slice(src: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_SCALAR_WIDTH_USIZE];
        bytes[..src.len()].copy_from_slice(src);
        Self {
            bytes,
            len: src.len() as u8,
        }
    }

    /// The packed bytes, least-significant first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of packed bytes.
    pub fn width(&self) -> u8 {
        self.len
    }
}

impl AsRef<[u8]> for Packed {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width integer the frame knows how to append.
///
/// The width is a property of the Rust type, so an append can never write a
/// value at a width other than its declared one. Implemented for `u8`, `u16`,
/// `u32`, `i8`, `i16` and `i32`.
pub trait Scalar: Copy + sealed::Sealed {
    /// Encoded width in bytes.
    const WIDTH: u8;
    /// How the receiver interprets the bytes.
    const SIGNEDNESS: Signedness;
    /// Short label used in diagnostics, e.g. `uint16`.
    const LABEL: &'static str;

    /// Packs the value little-endian.
    fn pack(self) -> Packed;

    /// The value widened to `i64`, for reporting.
    fn widen(self) -> i64;
}

macro_rules! impl_scalar {
    ( $ty:ty, $width:literal, $signedness:ident, $label:literal, $packer:ident ) => {
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const WIDTH: u8 = $width;
            const SIGNEDNESS: Signedness = Signedness::$signedness;
            const LABEL: &'static str = $label;

            fn pack(self) -> Packed {
                Packed::from_slice(&$packer(self))
            }

            fn widen(self) -> i64 {
                i64::from(self)
            }
        }
    };
}

impl_scalar!(u8, 1, Unsigned, "uint8", pack_u8);
impl_scalar!(u16, 2, Unsigned, "uint16", pack_u16);
impl_scalar!(u32, 4, Unsigned, "uint32", pack_u32);
impl_scalar!(i8, 1, Signed, "int8", pack_i8);
impl_scalar!(i16, 2, Signed, "int16", pack_i16);
impl_scalar!(i32, 4, Signed, "int32", pack_i32);

/// Packs `value` into `width` bytes with the given signedness.
///
/// This is the runtime counterpart of the typed packers, for callers whose
/// width comes from data (e.g. the type registry).
///
/// # Errors
/// - [`FrameError::InvalidWidth`] if `width` is not 1, 2 or 4
/// - [`FrameError::ValueOutOfRange`] if `value` cannot be represented without truncation
pub fn pack(value: i64, width: u8, signedness: Signedness) -> FrameResult<Packed> {
    let bits = match width {
        1 | 2 | 4 => u32::from(width) * 8,
        _ => return Err(FrameError::InvalidWidth(width)),
    };
    let (min, max) = match signedness {
        Signedness::Unsigned => (0i64, (1i64 << bits) - 1),
        Signedness::Signed => (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1),
    };
    if value < min || value > max {
        return Err(FrameError::ValueOutOfRange { value, width });
    }
    let raw = pack_u32(value as u32);
    Ok(Packed::from_slice(&raw[..width as usize]))
}

/// Reassembles up to four little-endian bytes into an unsigned value.
///
/// Returns `None` for an empty slice or one longer than four bytes.
pub fn unpack_le(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > MAX_SCALAR_WIDTH_USIZE {
        return None;
    }
    Some(
        bytes
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i))),
    )
}

/// Sign-extends the low `width` bytes of `raw` to an `i32`.
///
/// Widths of 4 or more return `raw` reinterpreted as is.
pub fn sign_extend(raw: u32, width: u8) -> i32 {
    if width == 0 || usize::from(width) >= MAX_SCALAR_WIDTH_USIZE {
        return raw as i32;
    }
    let shift = 32 - u32::from(width) * 8;
    ((raw << shift) as i32) >> shift
}

/// Writes `input` into `output` as uppercase hex, two digits per byte.
///
/// # Arguments
/// - `&[u8]` : The input buffer slice
/// - `&mut [u8]` : The output buffer, receives ASCII digits
///
/// # Returns
/// The number of digits written, or `None` if `output` holds fewer than
/// `2 * input.len()` bytes. Nothing is written in that case.
pub fn encode_hex(input: &[u8], output: &mut [u8]) -> Option<usize> {
    let needed = input.len() * 2;
    if output.len() < needed {
        return None;
    }
    for (i, &byte) in input.iter().enumerate() {
        output[i * 2] = HEX_DIGITS[(byte >> 4) as usize];
        output[i * 2 + 1] = HEX_DIGITS[(byte & 0x0f) as usize];
    }
    Some(needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_is_little_endian() {
        assert_eq!(pack_u8(0xab), [0xab]);
        assert_eq!(pack_u16(0x1234), [0x34, 0x12]);
        assert_eq!(pack_u32(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_signed_pack_matches_bit_pattern() {
        assert_eq!(pack_i8(-1), [0xff]);
        assert_eq!(pack_i16(-2), pack_u16(0xfffe));
        assert_eq!(pack_i32(i32::MIN), [0x00, 0x00, 0x00, 0x80]);
        assert_eq!(pack_i16(-250), [0x06, 0xff]);
    }

    #[test]
    fn test_round_trip_all_widths() {
        for v in [0u8, 1, 0x7f, 0x80, 0xff] {
            assert_eq!(unpack_le(&pack_u8(v)), Some(u32::from(v)));
        }
        for v in [0u16, 1, 0x00ff, 0x0100, 0x7fff, 0x8000, 0xffff] {
            assert_eq!(unpack_le(&pack_u16(v)), Some(u32::from(v)));
        }
        for v in [0u32, 1, 0xff, 0x0001_0000, 0x7fff_ffff, 0xffff_ffff] {
            assert_eq!(unpack_le(&pack_u32(v)), Some(v));
        }
        for v in [i8::MIN, -1, 0, 1, i8::MAX] {
            let raw = unpack_le(&pack_i8(v)).unwrap();
            assert_eq!(sign_extend(raw, 1), i32::from(v));
        }
        for v in [i16::MIN, -300, -1, 0, 300, i16::MAX] {
            let raw = unpack_le(&pack_i16(v)).unwrap();
            assert_eq!(sign_extend(raw, 2), i32::from(v));
        }
        for v in [i32::MIN, -70_000, -1, 0, 70_000, i32::MAX] {
            let raw = unpack_le(&pack_i32(v)).unwrap();
            assert_eq!(sign_extend(raw, 4), v);
        }
    }

    #[test]
    fn test_scalar_trait_matches_free_functions() {
        assert_eq!(0x1234u16.pack().as_bytes(), &pack_u16(0x1234));
        assert_eq!((-5i32).pack().as_bytes(), &pack_i32(-5));
        assert_eq!(<u32 as Scalar>::WIDTH, 4);
        assert_eq!(<i8 as Scalar>::SIGNEDNESS, Signedness::Signed);
        assert_eq!(<i16 as Scalar>::LABEL, "int16");
    }

    #[test]
    fn test_runtime_pack_checks_width_and_range() {
        assert_eq!(pack(500, 2, Signedness::Unsigned).unwrap().as_bytes(), &[0xf4, 0x01]);
        assert_eq!(pack(-2, 2, Signedness::Signed).unwrap().as_bytes(), &[0xfe, 0xff]);
        assert_eq!(
            pack(0xffff_ffff, 4, Signedness::Unsigned).unwrap().as_bytes(),
            &[0xff; 4]
        );
        assert_eq!(pack(1, 3, Signedness::Unsigned), Err(FrameError::InvalidWidth(3)));
        assert_eq!(pack(1, 0, Signedness::Signed), Err(FrameError::InvalidWidth(0)));
        assert_eq!(
            pack(256, 1, Signedness::Unsigned),
            Err(FrameError::ValueOutOfRange {
                value: 256,
                width: 1,
            })
        );
        assert_eq!(
            pack(-1, 2, Signedness::Unsigned),
            Err(FrameError::ValueOutOfRange {
                value: -1,
                width: 2,
            })
        );
        assert_eq!(
            pack(128, 1, Signedness::Signed),
            Err(FrameError::ValueOutOfRange {
                value: 128,
                width: 1,
            })
        );
    }

    #[test]
    fn test_unpack_rejects_bad_lengths() {
        assert_eq!(unpack_le(&[]), None);
        assert_eq!(unpack_le(&[0; 5]), None);
    }

    #[test]
    fn test_encode_hex_uppercase() {
        let mut out = [0u8; 6];
        assert_eq!(encode_hex(&[0x34, 0x12, 0xaf], &mut out), Some(6));
        assert_eq!(&out, b"3412AF");
    }

    #[test]
    fn test_encode_hex_short_output_untouched() {
        let mut out = [b'x'; 3];
        assert_eq!(encode_hex(&[0x01, 0x02], &mut out), None);
        assert_eq!(&out, b"xxx");
    }
}
