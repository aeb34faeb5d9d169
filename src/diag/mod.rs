//! Diagnostics side channel for frame appends.
//!
//! A [`Frame`](crate::frame::Frame) can report every successful append to a
//! [`DiagnosticSink`]. Two independent switches in [`Diagnostics`] control what
//! is reported:
//!
//! - `added_bytes`: one human-readable line per append naming the value, e.g.
//!   `Added uint16: 4660` or `Added TNV: Type=0x03 (VOLUMETRIC_WATER_CONTENT), Num=3, Len=2, Value=500`
//! - `decoder_text`: JavaScript for a TTN payload formatter that reads the
//!   value back out of `input.bytes` at the offsets it was written to
//!
//! Rejected appends report nothing. The text is a developer convenience; only
//! the binary frame is a contract with the receiver.
//!
//! Sinks provided:
//! - [`NoopSink`]: the default, discards everything
//! - [`FmtSink`]: any `core::fmt::Write`, one line per call
//! - `LogSink` (`log` feature): `log::info!`
//! - `DefmtSink` (`defmt-0-3` feature): `defmt::info!`

use core::fmt::{self, Write};

use crate::consts::DIAG_LINE_LEN;
use crate::encoding::{Signedness, sign_extend, unpack_le};
use crate::types::ValueType;

mod decoder;
mod sink;
pub use sink::*;

/// Which diagnostics a frame emits.
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct Diagnostics {
    /// Emit receiver-side decoder snippets.
    pub decoder_text: bool,
    /// Emit a log line for every value added.
    pub added_bytes: bool,
}

impl Diagnostics {
    /// Nothing is emitted.
    pub const DISABLED: Self = Self::new(false, false);
    /// Both log lines and decoder snippets are emitted.
    pub const ALL: Self = Self::new(true, true);

    /// Builds a flag set.
    pub const fn new(decoder_text: bool, added_bytes: bool) -> Self {
        Self {
            decoder_text,
            added_bytes,
        }
    }

    /// Whether any output is enabled.
    pub const fn any(&self) -> bool {
        self.decoder_text || self.added_bytes
    }
}

pub(crate) type Line = heapless::String<DIAG_LINE_LEN>;

/// Builds one line with `build` and hands it to `sink`.
///
/// A line that overflows [`DIAG_LINE_LEN`] is emitted cut short.
pub(crate) fn emit_with<S, F>(sink: &mut S, build: F)
where
    S: DiagnosticSink + ?Sized,
    F: FnOnce(&mut Line) -> fmt::Result,
{
    let mut line = Line::new();
    let _ = build(&mut line);
    sink.emit(&line);
}

/// Reports a bare scalar written at `offset`.
pub(crate) fn added_scalar<S: DiagnosticSink + ?Sized>(
    sink: &mut S,
    flags: Diagnostics,
    label: &str,
    width: u8,
    signedness: Signedness,
    offset: usize,
    value: i64,
) {
    if flags.added_bytes {
        emit_with(sink, |line| write!(line, "Added {}: {}", label, value));
    }
    if flags.decoder_text {
        decoder::scalar_snippet(sink, label, width, signedness, offset);
    }
}

/// Reports raw bytes written at `offset`.
pub(crate) fn added_raw<S: DiagnosticSink + ?Sized>(
    sink: &mut S,
    flags: Diagnostics,
    offset: usize,
    len: usize,
) {
    if flags.added_bytes {
        emit_with(sink, |line| {
            write!(line, "Added {} raw bytes at offset {}", len, offset)
        });
    }
    if flags.decoder_text {
        decoder::raw_snippet(sink, offset, len);
    }
}

/// Reports a TNV record whose header starts at `offset`.
pub(crate) fn added_tnv<S: DiagnosticSink + ?Sized>(
    sink: &mut S,
    flags: Diagnostics,
    ty: ValueType,
    number: u8,
    offset: usize,
    value: &[u8],
) {
    if flags.added_bytes {
        let info = ty.info();
        let raw = unpack_le(value).unwrap_or(0);
        emit_with(sink, |line| {
            write!(
                line,
                "Added TNV: Type=0x{:02X} ({}), Num={}, Len={}, Value=",
                info.wire_code, info.name, number, info.width
            )?;
            match info.signedness {
                Signedness::Unsigned => write!(line, "{}", raw),
                Signedness::Signed => write!(line, "{}", sign_extend(raw, info.width)),
            }
        });
    }
    if flags.decoder_text {
        decoder::tnv_snippet(sink, ty, offset);
    }
}
