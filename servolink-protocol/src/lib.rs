//! Servolink Frame Codec
//!
//! This crate builds the request frames sent to short-packet serial servos
//! and parses the frames they return. It knows nothing about what the
//! register bytes mean; see `servolink-core` for the register map.
//!
//! # Frame Layout
//!
//! Requests and responses share one layout:
//! ```text
//! ┌─────────┬────┬──────┬─────────┬────────┬───────┬─────────┬──────────┐
//! │ HEADER  │ ID │ FLAG │ ADDRESS │ LENGTH │ COUNT │ PAYLOAD │ CHECKSUM │
//! │ 2B      │ 1B │ 1B   │ 1B      │ 1B     │ 1B    │ 0–240B  │ 1B       │
//! └─────────┴────┴──────┴─────────┴────────┴───────┴─────────┴──────────┘
//! ```
//!
//! Requests start with `0xFA 0xAF`, responses with `0xFD 0xDF`. The checksum
//! is the XOR of every byte from ID through the last payload byte.
//!
//! Broadcast frames carry id and flag zero and pack one `(id, value…)`
//! record per target into the payload.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod block;
pub mod frame;

pub use block::{MemoryBlock, Special};
pub use frame::{
    checksum, decode_return, flag, Frame, FrameError, Integrity, ReturnFrame, FRAME_OVERHEAD,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, MAX_TARGETS, REQUEST_HEADER, RESPONSE_HEADER,
};
