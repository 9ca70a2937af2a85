//! Servolink Hardware Abstraction Layer
//!
//! This crate defines the transport traits the actuator facades talk
//! through. A transport only has to write bytes and read an exact number of
//! bytes back; opening, configuring and closing the link stay with the
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  servolink-drivers (Motor, MotorGroup)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  servolink-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ servolink-hal-│       │ io::IoUart    │
//! │    serial     │       │ (embedded-io) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::{IoError, IoUart};
pub use uart::{DataBits, ErrorType, Parity, StopBits, Uart, UartConfig, UartRx, UartTx};
