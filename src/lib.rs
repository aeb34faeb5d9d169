//! # tinyframe
//!
//! A no_std payload encoder for constrained telemetry devices, such as LoRaWAN
//! sensor nodes, that pack fixed-width readings into a small uplink buffer under
//! a hard size limit.
//!
//! The encoder provides:
//! - a 255-byte [`Frame`](frame::Frame) with all-or-nothing appends
//! - little-endian packing of 8/16/32-bit signed and unsigned integers
//! - self-describing TNV (Type-Number-Value) records whose value width is
//!   implied by a registered [`ValueType`](types::ValueType)
//! - an optional diagnostics channel that logs every value added and can print
//!   a matching JavaScript payload formatter for the network server
//!
//! ## Crate features
//! | Feature            | Description |
//! |--------------------|-------------|
//! | `std`              | Disables `#![no_std]`; [`Frame::to_hex`](frame::Frame::to_hex) returns a `std::string::String` |
//! | `shared` (default) | [`shared`] helpers to hold a frame in a `critical_section::Mutex` |
//! | `defmt-0-3`        | `defmt` logging and `defmt::Format` on public types |
//! | `log`              | `log` logging |
//!
//! ## Wire Format
//!
//! The frame is transmitted verbatim. Scalars are little-endian with no
//! prefix. TNV records are:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | wire code of the [`ValueType`](types::ValueType) |
//! | 1 | 1 | instance number |
//! | 2 | 1, 2 or 4 | value, width taken from the type registry |
//!
//! Records are concatenated without a count or terminator.
//!
//! ## Usage
//!
//! ```rust
//! use tinyframe::frame::Frame;
//! use tinyframe::types::ValueType;
//!
//! let mut frame = Frame::new();
//! frame.append_tnv(ValueType::Version, 0, 2u8).unwrap();
//! frame.append_tnv(ValueType::SoilTemperature, 0, -125i16).unwrap();
//! frame.append_tnv(ValueType::VolumetricWaterContent, 0, 312u16).unwrap();
//! frame.append_tnv(ValueType::VolumetricWaterContent, 1, 298u16).unwrap();
//!
//! assert_eq!(frame.size(), 15);
//! // hand frame.as_bytes() to the radio, then
//! frame.clear();
//! ```
//!
//! ## Errors
//!
//! Appends return [`FrameResult`](error::FrameResult). A rejected append leaves
//! the frame exactly as it was, so a caller may drop the reading, log it, or
//! send the current frame and retry on a cleared one.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "shared")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod consts;
pub mod diag;
pub mod encoding;
pub mod error;
pub mod frame;
#[cfg(feature = "shared")]
pub mod shared;
pub mod types;
