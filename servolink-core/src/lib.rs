//! Register map for servolink actuators
//!
//! This crate turns the byte addresses of an actuator's memory map into
//! typed, range-checked parameters:
//!
//! - Value codecs (fixed-point angles, 10 ms ticks, enumerated modes)
//! - The compiled-in register table
//! - Torque mode and baud rate enumerations
//! - Decoding of the grouped status block
//!
//! Nothing here touches a transport; see `servolink-drivers` for the
//! actuator facades that send the encoded values.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod params;
pub mod registers;
pub mod status;

pub use codec::{Codec, Encoded, Fault};
pub use error::ValueError;
pub use params::{BaudRate, TorqueMode, WireCode};
pub use registers::Register;
pub use status::Status;
