//! Companion Link Protocol
//!
//! This crate defines the serial protocol between the handset and its
//! companion computer. The companion owns the network and the camera; the
//! handset asks for data with a single command byte and then reads back a
//! response of known, fixed length.
//!
//! # Protocol Overview
//!
//! ```text
//! handset ──► 'T' | 'C' | 'W'            companion ──► 128-byte text record
//! handset ──► 'P'                        companion ──► 240 × 240 × 2 pixel bytes
//!                                        companion ──► 'U' (unsolicited unlock)
//! ```
//!
//! There is no framing, no length field and no checksum: the byte counts are
//! part of the contract. Text records are newline separated and
//! NUL-terminated by the receiver.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod photo;
pub mod record;

pub use command::{Command, Notification};
pub use photo::{PixelOrder, PHOTO_HEIGHT, PHOTO_LEN, PHOTO_ROW_LEN, PHOTO_WIDTH};
pub use record::{TextRecord, WeatherReport, TEXT_RECORD_LEN};
