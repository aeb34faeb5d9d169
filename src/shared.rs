//! Sharing a frame between interrupt and thread context.
//!
//! A [`Frame`] is not synchronized. When readings are appended from an
//! interrupt handler (e.g. a sensor data-ready interrupt) while the main loop
//! transmits and clears the frame, store it in a [`SharedFrame`] and reach it
//! only through these helpers, which take a `critical_section` for the
//! duration of each access.
//!
//! ```rust
//! use tinyframe::shared::{SharedFrame, global_frame_init, global_frame_setup, with_global_frame};
//! use tinyframe::frame::Frame;
//!
//! static FRAME: SharedFrame = global_frame_init();
//!
//! global_frame_setup(&FRAME, Frame::new());
//!
//! // from an interrupt handler
//! let appended = with_global_frame(&FRAME, |frame| frame.append_u16(0x1234));
//! assert_eq!(appended, Some(Ok(())));
//!
//! // from the main loop
//! let size = with_global_frame(&FRAME, |frame| frame.size());
//! assert_eq!(size, Some(2));
//! ```

use crate::diag::NoopSink;
use crate::frame::Frame;
use core::cell::RefCell;
use critical_section::Mutex;

/// A frame slot guarded by a `critical_section` mutex.
///
/// Starts out empty (`None`) so it can live in a `static`; install a frame
/// with [`global_frame_setup`].
pub type SharedFrame<S = NoopSink> = Mutex<RefCell<Option<Frame<S>>>>;

/// An empty slot, usable in `static` initializers.
///
/// # Example
/// ```rust
/// use tinyframe::shared::{SharedFrame, global_frame_init};
///
/// static FRAME: SharedFrame = global_frame_init();
/// ```
pub const fn global_frame_init<S>() -> SharedFrame<S> {
    Mutex::new(RefCell::new(None))
}

/// Installs `frame` in the slot, dropping any frame already there.
pub fn global_frame_setup<S>(global: &SharedFrame<S>, frame: Frame<S>) {
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(frame));
    });
}

/// Runs `f` on the installed frame inside a critical section.
///
/// # Returns
/// `None` if no frame has been installed, otherwise whatever `f` returned.
///
/// # Notes
/// - Keep `f` short: interrupts are masked while it runs.
/// - Calling this again from inside `f` panics on the `RefCell` borrow.
pub fn with_global_frame<S, R, F>(global: &SharedFrame<S>, f: F) -> Option<R>
where
    F: FnOnce(&mut Frame<S>) -> R,
{
    critical_section::with(|cs| global.borrow(cs).borrow_mut().as_mut().map(f))
}

/// Removes the frame from the slot, leaving it empty.
pub fn global_frame_take<S>(global: &SharedFrame<S>) -> Option<Frame<S>> {
    critical_section::with(|cs| global.borrow(cs).take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::types::ValueType;

    #[test]
    fn test_empty_slot_returns_none() {
        static EMPTY: SharedFrame = global_frame_init();
        assert_eq!(with_global_frame(&EMPTY, |frame| frame.size()), None);
        assert!(global_frame_take(&EMPTY).is_none());
    }

    #[test]
    fn test_appends_through_slot() {
        static FRAME: SharedFrame = global_frame_init();
        global_frame_setup(&FRAME, Frame::new());

        let first = with_global_frame(&FRAME, |frame| {
            frame.append_tnv(ValueType::SoilHumidity, 1, 600u16)
        });
        assert_eq!(first, Some(Ok(())));

        let taken = global_frame_take(&FRAME).unwrap();
        assert_eq!(taken.as_bytes(), &[0x02, 0x01, 0x58, 0x02]);
        assert_eq!(with_global_frame(&FRAME, |frame| frame.size()), None);
    }

    #[test]
    fn test_errors_pass_through() {
        static FRAME: SharedFrame = global_frame_init();
        global_frame_setup(&FRAME, Frame::new());
        let result = with_global_frame(&FRAME, |frame| frame.append_tnv_code(0x99, 0, &[0]));
        assert_eq!(result, Some(Err(FrameError::UnknownType(0x99))));
    }

    #[test]
    fn test_setup_replaces_previous_frame() {
        static FRAME: SharedFrame = global_frame_init();
        global_frame_setup(&FRAME, Frame::new());
        let _ = with_global_frame(&FRAME, |frame| frame.append_u8(1));
        global_frame_setup(&FRAME, Frame::new());
        assert_eq!(with_global_frame(&FRAME, |frame| frame.size()), Some(0));
    }
}
