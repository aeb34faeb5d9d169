//! Bounded payload frame with scalar and TNV appends.
//!
//! This module provides the [`Frame`] struct, a fixed 255-byte buffer with a
//! write cursor that telemetry firmware fills with readings before handing the
//! valid bytes to the radio.
//!
//! ## Append Semantics
//!
//! Every append is all-or-nothing. Before writing, the frame checks that the
//! whole operation fits (`len + required <= capacity`). If it does not, the
//! call returns [`FrameError::CapacityExceeded`] and neither the bytes nor the
//! cursor change; there is no truncation and no wraparound.
//!
//! ## TNV Records
//!
//! A TNV (Type-Number-Value) record is a wire code byte, an instance number
//! byte and the value bytes, whose width the receiver infers from the wire
//! code:
//!
//! ```text
//! [wire_code: 1][instance: 1][value: width_of(wire_code)]
//! ```
//!
//! The capacity check covers the header and the value together, so a record
//! is never left with a header and no value.
//!
//! ## Example
//!
//! ```rust
//! use tinyframe::frame::Frame;
//! use tinyframe::types::ValueType;
//!
//! let mut frame = Frame::new();
//! frame.append_u16(0x1234).unwrap();
//! frame
//!     .append_tnv(ValueType::VolumetricWaterContent, 3, 500u16)
//!     .unwrap();
//!
//! assert_eq!(frame.as_bytes(), &[0x34, 0x12, 0x03, 0x03, 0xF4, 0x01]);
//! assert_eq!(frame.size(), 6);
//! ```
//!
//! ## Design Notes
//!
//! A frame is a plain value owned by one encoding session and is not
//! synchronized. To share one between an interrupt handler and the main loop,
//! see [`crate::shared`] (feature `shared`).

#[cfg(feature = "std")]
use std::string::String;

use crate::consts::{
    FRAME_BUFFER_SIZE_USIZE, HEX_BUF_LEN, HEX_BYTES_PER_LINE, TNV_HEADER_LEN_USIZE,
};
use crate::diag::{self, DiagnosticSink, Diagnostics, NoopSink};
use crate::encoding::{Scalar, encode_hex};
use crate::error::{FrameError, FrameResult};
use crate::types::ValueType;

use core::fmt::Write;

/// Uppercase hex rendering of a frame, as returned by [`Frame::to_hex`].
#[cfg(feature = "std")]
pub type HexString = String;

/// Uppercase hex rendering of a frame, as returned by [`Frame::to_hex`].
#[cfg(not(feature = "std"))]
pub type HexString = heapless::String<HEX_BUF_LEN>;

/// A fixed-capacity telemetry payload.
///
/// `Frame` holds up to [`FRAME_BUFFER_SIZE`](crate::consts::FRAME_BUFFER_SIZE)
/// bytes and a cursor counting how many of them are valid. Bytes are only
/// added through the `append_*` methods and only removed by [`clear`](Frame::clear).
///
/// ## Diagnostics
///
/// Every successful append is reported to the sink `S` according to the
/// [`Diagnostics`] flags; see [`crate::diag`]. The default sink discards
/// everything, so a frame built with [`Frame::new`] produces no output.
///
/// ## Type Parameters
///
/// - `S`: A [`DiagnosticSink`] receiving diagnostic lines
///
/// ## Example
///
/// ```rust
/// use tinyframe::diag::{Diagnostics, FmtSink};
/// use tinyframe::frame::Frame;
///
/// let sink: FmtSink<tinyframe::heapless::String<256>> =
///     FmtSink::new(tinyframe::heapless::String::new());
/// let mut frame = Frame::with_sink(sink, Diagnostics::new(false, true));
///
/// frame.append_i16(-250).unwrap();
///
/// assert_eq!(frame.as_bytes(), &[0x06, 0xFF]);
/// assert_eq!(frame.sink().get_ref().as_str(), "Added int16: -250\n");
/// ```
#[derive(Debug, Clone)]
pub struct Frame<S = NoopSink> {
    buf: [u8; FRAME_BUFFER_SIZE_USIZE],
    len: usize,
    diagnostics: Diagnostics,
    sink: S,
}

impl Frame<NoopSink> {
    /// Creates an empty frame without diagnostics.
    pub const fn new() -> Self {
        Self::with_sink(NoopSink, Diagnostics::DISABLED)
    }
}

impl Default for Frame<NoopSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frame<S> {
    /// Creates an empty frame reporting to `sink`.
    ///
    /// # Arguments
    /// - `sink`: Destination for diagnostic lines
    /// - `diagnostics`: Which lines to emit
    pub const fn with_sink(sink: S, diagnostics: Diagnostics) -> Self {
        Self {
            buf: [0u8; FRAME_BUFFER_SIZE_USIZE],
            len: 0,
            diagnostics,
            sink,
        }
    }

    /// Total number of bytes the frame can hold.
    pub const fn capacity(&self) -> usize {
        FRAME_BUFFER_SIZE_USIZE
    }

    /// Number of valid bytes, i.e. the cursor position.
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Same as [`size`](Frame::size).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written since creation or the last clear.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available.
    pub const fn remaining(&self) -> usize {
        FRAME_BUFFER_SIZE_USIZE - self.len
    }

    /// The valid bytes, ready to transmit.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The whole backing storage, including bytes past the cursor.
    pub fn storage(&self) -> &[u8; FRAME_BUFFER_SIZE_USIZE] {
        &self.buf
    }

    /// Current diagnostics flags.
    pub const fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Replaces the diagnostics flags. Has no effect on the payload.
    pub fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }

    /// The diagnostics sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The diagnostics sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the frame and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Empties the frame and zeroes the whole backing storage.
    ///
    /// Zeroing every byte, not only the valid ones, means a reused frame never
    /// exposes bytes from an earlier, longer payload.
    pub fn clear(&mut self) {
        self.buf.fill(0);
        self.len = 0;
        debug!("frame cleared");
    }

    /// Fails unless `required` more bytes fit.
    fn reserve(&self, required: usize) -> FrameResult {
        if self.len + required > FRAME_BUFFER_SIZE_USIZE {
            warn!(
                "frame append rejected: {} bytes needed, {} of {} used",
                required, self.len, FRAME_BUFFER_SIZE_USIZE
            );
            return Err(FrameError::CapacityExceeded {
                required,
                used: self.len,
                capacity: FRAME_BUFFER_SIZE_USIZE,
            });
        }
        Ok(())
    }

    /// Copies `bytes` at the cursor. Callers must `reserve` first.
    fn put(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }

    /// Writes the valid bytes into `out` as uppercase hex, two digits each.
    ///
    /// # Returns
    /// The number of digits written.
    ///
    /// # Errors
    /// [`FrameError::OutputTooSmall`] if `out` is shorter than `2 * size()`.
    pub fn hex_into(&self, out: &mut [u8]) -> FrameResult<usize> {
        encode_hex(self.as_bytes(), out).ok_or(FrameError::OutputTooSmall {
            required: self.len * 2,
            available: out.len(),
        })
    }

    /// The valid bytes as an uppercase hex string, e.g. `"3412"`.
    pub fn to_hex(&self) -> HexString {
        let mut digits = [0u8; HEX_BUF_LEN];
        let mut out = HexString::new();
        if let Some(n) = encode_hex(self.as_bytes(), &mut digits) {
            for &d in &digits[..n] {
                let _ = out.push(char::from(d));
            }
        }
        out
    }
}

impl<S: DiagnosticSink> Frame<S> {
    /// Appends raw bytes verbatim.
    ///
    /// The caller is responsible for byte order.
    ///
    /// # Errors
    /// - [`FrameError::InvalidWidth`] if `bytes` is empty
    /// - [`FrameError::CapacityExceeded`] if the bytes do not all fit
    pub fn append_bytes(&mut self, bytes: &[u8]) -> FrameResult {
        if bytes.is_empty() {
            warn!("raw append rejected: empty slice");
            return Err(FrameError::InvalidWidth(0));
        }
        self.reserve(bytes.len())?;
        let offset = self.len;
        self.put(bytes);
        diag::added_raw(&mut self.sink, self.diagnostics, offset, bytes.len());
        Ok(())
    }

    /// Appends a scalar little-endian at its natural width.
    ///
    /// # Errors
    /// [`FrameError::CapacityExceeded`] if the value does not fit.
    pub fn append<T: Scalar>(&mut self, value: T) -> FrameResult {
        let packed = value.pack();
        self.reserve(packed.as_bytes().len())?;
        let offset = self.len;
        self.put(packed.as_bytes());
        diag::added_scalar(
            &mut self.sink,
            self.diagnostics,
            T::LABEL,
            T::WIDTH,
            T::SIGNEDNESS,
            offset,
            value.widen(),
        );
        Ok(())
    }

    /// Appends one byte.
    pub fn append_u8(&mut self, value: u8) -> FrameResult {
        self.append(value)
    }

    /// Appends a `u16`, little-endian.
    pub fn append_u16(&mut self, value: u16) -> FrameResult {
        self.append(value)
    }

    /// Appends a `u32`, little-endian.
    pub fn append_u32(&mut self, value: u32) -> FrameResult {
        self.append(value)
    }

    /// Appends an `i8` as its two's-complement byte.
    pub fn append_i8(&mut self, value: i8) -> FrameResult {
        self.append(value)
    }

    /// Appends an `i16`, two's complement, little-endian.
    pub fn append_i16(&mut self, value: i16) -> FrameResult {
        self.append(value)
    }

    /// Appends an `i32`, two's complement, little-endian.
    pub fn append_i32(&mut self, value: i32) -> FrameResult {
        self.append(value)
    }

    /// Appends a TNV record with a typed value.
    ///
    /// # Arguments
    /// - `ty`: The value type, which fixes the wire code and width
    /// - `number`: Instance number distinguishing sensors of the same type
    /// - `value`: The reading; its Rust type must have the registered width
    ///   and signedness
    ///
    /// # Errors
    /// - [`FrameError::WidthMismatch`] if `T` is not as wide as `ty` declares
    /// - [`FrameError::SignednessMismatch`] if `T` is signed and `ty` is not, or
    ///   the other way round
    /// - [`FrameError::CapacityExceeded`] if the whole record does not fit
    pub fn append_tnv<T: Scalar>(&mut self, ty: ValueType, number: u8, value: T) -> FrameResult {
        if T::WIDTH == ty.width() && T::SIGNEDNESS != ty.signedness() {
            warn!("TNV value for type {} has the wrong signedness", ty.wire_code());
            return Err(FrameError::SignednessMismatch {
                expected: ty.signedness(),
                actual: T::SIGNEDNESS,
            });
        }
        self.append_tnv_bytes(ty, number, value.pack().as_bytes())
    }

    /// Appends a TNV record whose value is already packed little-endian.
    ///
    /// # Errors
    /// - [`FrameError::WidthMismatch`] if `value.len()` differs from the type width
    /// - [`FrameError::CapacityExceeded`] if the whole record does not fit
    pub fn append_tnv_bytes(&mut self, ty: ValueType, number: u8, value: &[u8]) -> FrameResult {
        let width = ty.width();
        if value.len() != usize::from(width) {
            warn!(
                "TNV value for type {} is {} bytes, expected {}",
                ty.wire_code(), value.len(), width
            );
            return Err(FrameError::WidthMismatch {
                expected: width,
                actual: value.len(),
            });
        }
        self.reserve(TNV_HEADER_LEN_USIZE + value.len())?;

        let offset = self.len;
        self.put(&[ty.wire_code(), number]);
        self.put(value);
        debug!(
            "TNV appended: code={} num={} len={} at {}",
            ty.wire_code(), number, width, offset
        );
        diag::added_tnv(&mut self.sink, self.diagnostics, ty, number, offset, value);
        Ok(())
    }

    /// Appends a TNV record identified by its raw wire code.
    ///
    /// Useful when the code comes from configuration or another device rather
    /// than from a [`ValueType`] in code.
    ///
    /// # Errors
    /// - [`FrameError::UnknownType`] if `code` is not in the registry
    /// - [`FrameError::WidthMismatch`] if `value.len()` differs from the type width
    /// - [`FrameError::CapacityExceeded`] if the whole record does not fit
    pub fn append_tnv_code(&mut self, code: u8, number: u8, value: &[u8]) -> FrameResult {
        match ValueType::from_wire_code(code) {
            Some(ty) => self.append_tnv_bytes(ty, number, value),
            None => {
                warn!("TNV append rejected: unknown type code {}", code);
                Err(FrameError::UnknownType(code))
            }
        }
    }

    /// Sends the valid bytes to the sink as `0xNN` tokens, sixteen per line.
    ///
    /// This is an explicit request and ignores the diagnostics flags. An
    /// empty frame emits a single empty line.
    pub fn print_hex(&mut self) {
        if self.len == 0 {
            self.sink.emit("");
            return;
        }
        for chunk in self.buf[..self.len].chunks(HEX_BYTES_PER_LINE) {
            diag::emit_with(&mut self.sink, |line| {
                for (i, byte) in chunk.iter().enumerate() {
                    if i > 0 {
                        line.write_char(' ')?;
                    }
                    write!(line, "0x{:02X}", byte)?;
                }
                Ok(())
            });
        }
    }
}
