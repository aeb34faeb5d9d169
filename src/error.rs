//! Error type for frame encoding.
//!
//! Every variant describes a rejected call. A rejected call never touches the
//! buffer: the bytes and the cursor are exactly what they were before it.

use thiserror::Error;

use crate::encoding::Signedness;

/// Reasons an encoding call can be rejected.
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The write would run past the end of the buffer.
    #[error("append of {required} bytes exceeds capacity ({used}/{capacity} bytes used)")]
    CapacityExceeded {
        /// Bytes the rejected call needed.
        required: usize,
        /// Bytes already in the buffer.
        used: usize,
        /// Total buffer capacity.
        capacity: usize,
    },

    /// The wire code is not in the type registry.
    #[error("unknown value type code 0x{0:02X}")]
    UnknownType(u8),

    /// The value does not have the width its type declares.
    #[error("value is {actual} bytes wide but its type expects {expected}")]
    WidthMismatch {
        /// Width from the type registry.
        expected: u8,
        /// Width of the value that was passed.
        actual: usize,
    },

    /// The value is signed where its type is unsigned, or the other way round.
    #[error("value is {actual:?} but its type expects {expected:?}")]
    SignednessMismatch {
        /// Signedness from the type registry.
        expected: Signedness,
        /// Signedness of the value that was passed.
        actual: Signedness,
    },

    /// Scalar widths are 1, 2 or 4 bytes, and raw appends are never empty.
    #[error("unsupported scalar width {0}")]
    InvalidWidth(u8),

    /// The value cannot be represented in the requested width and signedness.
    #[error("value {value} does not fit in {width} bytes")]
    ValueOutOfRange {
        /// The offending value.
        value: i64,
        /// The requested width in bytes.
        width: u8,
    },

    /// The caller-provided output slice is too short.
    #[error("output buffer too small: need {required} bytes, have {available}")]
    OutputTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes provided.
        available: usize,
    },
}

/// Shorthand for results of encoding calls.
pub type FrameResult<T = ()> = Result<T, FrameError>;
