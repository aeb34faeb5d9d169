//! Constants used across the frame encoder.
//!
//! This module defines the buffer sizing, TNV header layout and diagnostic
//! text limits shared by the encoder, the diagnostics emitter and the hex
//! renderer.
//!
//! ## Key Concepts
//!
//! - **Payload Limit**: A frame never holds more than [`FRAME_BUFFER_SIZE`] bytes.
//! - **TNV Header**: Every TNV record starts with a wire code byte and an instance byte.
//! - **Scalar Widths**: Values are 1, 2 or 4 bytes wide, nothing else.
//! - **Diagnostics**: Lines are assembled in fixed-size stack strings before being
//!   handed to the sink.

/// Maximum number of payload bytes a frame can hold.
///
/// This is the hard ceiling for a single uplink; the radio layer may impose a
/// smaller one depending on the data rate.
pub const FRAME_BUFFER_SIZE: u8 = 255;

/// See [`FRAME_BUFFER_SIZE`](crate::consts::FRAME_BUFFER_SIZE)
pub const FRAME_BUFFER_SIZE_USIZE: usize = FRAME_BUFFER_SIZE as usize;

/// Length (in bytes) of the TNV record header.
///
/// One byte of wire code followed by one byte of instance number.
pub const TNV_HEADER_LEN: u8 = 2;

/// See [`TNV_HEADER_LEN`](crate::consts::TNV_HEADER_LEN)
pub const TNV_HEADER_LEN_USIZE: usize = TNV_HEADER_LEN as usize;

/// Widest scalar the packer handles (`u32`/`i32`).
pub const MAX_SCALAR_WIDTH: u8 = 4;

/// See [`MAX_SCALAR_WIDTH`](crate::consts::MAX_SCALAR_WIDTH)
pub const MAX_SCALAR_WIDTH_USIZE: usize = MAX_SCALAR_WIDTH as usize;

/// Size of a hex rendering of a full frame: two digits per byte.
pub const HEX_BUF_LEN: usize = FRAME_BUFFER_SIZE_USIZE * 2;

/// Capacity of a single diagnostics line.
///
/// Longer lines are cut short; diagnostic text is best-effort.
pub const DIAG_LINE_LEN: usize = 160;

/// Number of `0xNN` tokens per line emitted by
/// [`Frame::print_hex`](crate::frame::Frame::print_hex).
pub const HEX_BYTES_PER_LINE: usize = 16;
