use core::fmt::{self, Write};

use super::sink::DiagnosticSink;
use super::{Line, emit_with};
use crate::encoding::Signedness;
use crate::types::ValueType;

/// `input.bytes[o] | input.bytes[o + 1] << 8 | ...`
fn push_bytes_expr(line: &mut Line, offset: usize, width: u8) -> fmt::Result {
    for i in 0..usize::from(width) {
        if i == 0 {
            write!(line, "input.bytes[{}]", offset)?;
        } else {
            write!(line, " | input.bytes[{}] << {}", offset + i, 8 * i)?;
        }
    }
    Ok(())
}

/// Wraps the byte expression so a JavaScript receiver gets the right number.
///
/// JS bitwise operators work on 32-bit signed integers, so narrower signed
/// values are sign-extended with `<< n >> n`, 32-bit signed values only need
/// `| 0` and 32-bit unsigned values need `>>> 0` to stay positive.
fn push_value_expr(
    line: &mut Line,
    offset: usize,
    width: u8,
    signedness: Signedness,
) -> fmt::Result {
    match (signedness, width) {
        (Signedness::Unsigned, 4) => {
            line.write_char('(')?;
            push_bytes_expr(line, offset, width)?;
            line.write_str(") >>> 0")
        }
        (Signedness::Unsigned, _) => push_bytes_expr(line, offset, width),
        (Signedness::Signed, 4) => {
            line.write_char('(')?;
            push_bytes_expr(line, offset, width)?;
            line.write_str(") | 0")
        }
        (Signedness::Signed, _) => {
            let shift = 32 - 8 * u32::from(width);
            line.write_char('(')?;
            push_bytes_expr(line, offset, width)?;
            write!(line, ") << {} >> {}", shift, shift)
        }
    }
}

/// Emits the statement that reads a bare scalar written at `offset`.
pub(crate) fn scalar_snippet<S: DiagnosticSink + ?Sized>(
    sink: &mut S,
    label: &str,
    width: u8,
    signedness: Signedness,
    offset: usize,
) {
    emit_with(sink, |line| {
        write!(line, "val_{} = ", label)?;
        push_value_expr(line, offset, width, signedness)?;
        line.write_char(';')
    });
}

/// Emits the statement that reads `len` raw bytes written at `offset`.
pub(crate) fn raw_snippet<S: DiagnosticSink + ?Sized>(sink: &mut S, offset: usize, len: usize) {
    emit_with(sink, |line| {
        write!(
            line,
            "var raw = input.bytes.slice({}, {});",
            offset,
            offset + len
        )
    });
}

/// Emits a `case` arm for a TTN payload formatter `switch` over the wire code,
/// reading the record that starts at `offset`.
pub(crate) fn tnv_snippet<S: DiagnosticSink + ?Sized>(sink: &mut S, ty: ValueType, offset: usize) {
    let info = ty.info();
    emit_with(sink, |line| {
        write!(
            line,
            "// TNV decoder snippet for {} (integrate in TTN switch):",
            info.name
        )
    });
    emit_with(sink, |line| {
        write!(line, "case 0x{:02X}: // {}", info.wire_code, info.name)
    });
    emit_with(sink, |line| {
        write!(line, "  var num = input.bytes[{}];", offset + 1)
    });
    emit_with(sink, |line| {
        line.write_str("  var val = ")?;
        push_value_expr(line, offset + 2, info.width, info.signedness)?;
        line.write_char(';')
    });
    emit_with(sink, |line| {
        write!(line, "  decoded[\"{}_\" + num] = val;", info.name)
    });
    emit_with(sink, |line| line.write_str("  break;"));
}
