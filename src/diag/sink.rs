use core::fmt::Write;

/// Destination for diagnostic lines.
///
/// Emission is fire-and-forget: `emit` cannot fail, and implementations that
/// wrap a fallible writer must swallow its errors. Whether an append succeeds
/// is decided by the frame alone, never by the sink.
pub trait DiagnosticSink {
    /// Writes one line of diagnostic text, without a trailing newline.
    fn emit(&mut self, line: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}

/// Discards everything. The default sink of a [`Frame`](crate::frame::Frame).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&mut self, _line: &str) {}
}

/// Adapts any [`core::fmt::Write`] (a UART wrapper, a `String`, a
/// `heapless::String`) into a sink, appending a newline after each line.
///
/// Write errors, such as a full `heapless::String` or a disconnected console,
/// are dropped.
///
/// ```rust
/// use tinyframe::diag::{DiagnosticSink, FmtSink};
///
/// let mut sink: FmtSink<tinyframe::heapless::String<32>> =
///     FmtSink::new(tinyframe::heapless::String::new());
/// sink.emit("hello");
/// assert_eq!(sink.get_ref().as_str(), "hello\n");
/// ```
#[derive(Debug, Default)]
pub struct FmtSink<W> {
    inner: W,
}

impl<W: Write> FmtSink<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The wrapped writer, mutably.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DiagnosticSink for FmtSink<W> {
    fn emit(&mut self, line: &str) {
        let _ = self.inner.write_str(line);
        let _ = self.inner.write_char('\n');
    }
}

/// Forwards each line to the `log` facade at info level.
#[cfg(feature = "log")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[cfg(feature = "log")]
impl DiagnosticSink for LogSink {
    fn emit(&mut self, line: &str) {
        log::info!("{}", line);
    }
}

/// Forwards each line to `defmt` at info level.
#[cfg(feature = "defmt-0-3")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtSink;

#[cfg(feature = "defmt-0-3")]
impl DiagnosticSink for DefmtSink {
    fn emit(&mut self, line: &str) {
        defmt::info!("{=str}", line);
    }
}
