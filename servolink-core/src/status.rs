//! Status block decoding
//!
//! The status block query returns addresses 0x2A-0x3B in one response;
//! each present-value register is sliced out at its offset from 0x2A.

use servolink_protocol::MemoryBlock;

use crate::codec::Codec;
use crate::error::ValueError;
use crate::registers::{
    Register, PRESENT_LOAD, PRESENT_POSITION, PRESENT_SPEED, PRESENT_TEMPERATURE, PRESENT_TIME,
    PRESENT_VOLTAGE,
};

/// First address covered by [`MemoryBlock::Status`]
pub const STATUS_BASE: u8 = 0x2A;

/// Snapshot of an actuator's present state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Present angle in degrees
    pub angle: f32,
    /// Elapsed travel time in milliseconds
    pub time_ms: u32,
    /// Speed in degrees per second
    pub speed: i16,
    /// Load current in milliamperes
    pub load: i16,
    /// Temperature in degrees Celsius
    pub temperature: i16,
    /// Supply voltage in volts
    pub voltage: f32,
}

impl Status {
    /// Decode the payload of a [`MemoryBlock::Status`] response
    pub fn decode(block: &[u8]) -> Result<Self, ValueError> {
        let expected = MemoryBlock::Status.payload_len();
        if block.len() != expected {
            return Err(ValueError::WrongWidth {
                register: "status",
                expected,
                actual: block.len(),
            });
        }

        Ok(Self {
            angle: field(&PRESENT_POSITION, block)?,
            time_ms: field(&PRESENT_TIME, block)?,
            speed: field(&PRESENT_SPEED, block)?,
            load: field(&PRESENT_LOAD, block)?,
            temperature: field(&PRESENT_TEMPERATURE, block)?,
            voltage: field(&PRESENT_VOLTAGE, block)?,
        })
    }
}

fn field<C: Codec>(register: &Register<C>, block: &[u8]) -> Result<C::Value, ValueError> {
    let start = (register.address() - STATUS_BASE) as usize;
    let bytes = block
        .get(start..start + register.width())
        .ok_or(ValueError::WrongWidth {
            register: register.name(),
            expected: register.width(),
            actual: block.len().saturating_sub(start),
        })?;
    register.decode(bytes)
}
