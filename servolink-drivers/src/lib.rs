//! Actuator facades for servolink servos
//!
//! This crate turns register reads and writes into typed operations on
//! actuators sharing one serial bus:
//!
//! - [`Connection`] - one half-duplex transaction at a time over a transport
//! - [`Motor`] - volatile parameters, motion and status of one actuator
//! - [`Rom`] - non-volatile parameters of one actuator
//! - [`MotorGroup`] - broadcast commands and ordered reads over many actuators
//!
//! Every setter sends exactly one command frame and every getter exactly
//! one query frame. Values are validated before anything is sent.
//!
//! ```ignore
//! let cxn = Connection::new(uart);
//! let mut pan = cxn.motor(1)?;
//! let tilt = cxn.motor(2)?;
//!
//! pan.set_torque_enabled(true)?;
//! pan.rotate(45.0, Some(500))?;
//!
//! let group = MotorGroup::new(&[&pan, &tilt])?;
//! group.rotate(&[10.0, -10.0], None)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod connection;
pub mod error;
pub mod group;
pub mod motor;
pub mod rom;
mod target;

#[cfg(test)]
mod mock;

pub use connection::Connection;
pub use error::BusError;
pub use group::MotorGroup;
pub use motor::Motor;
pub use rom::Rom;
