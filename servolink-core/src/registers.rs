//! Actuator memory map
//!
//! Addresses 0x00-0x1D live in ROM (copied to RAM at boot, persisted with a
//! save-to-ROM command); 0x1E and above are volatile.

use crate::codec::{
    Bounded, Centi, Codec, Degrees, Encoded, Enumerated, Fault, HighLow, Raw, ReturnDelay,
    Signed, Switch, Tenths, Ticks10ms, MAX_VALUE_WIDTH,
};
use crate::error::ValueError;
use crate::params::{BaudRate, TorqueMode};

/// A register: name, first byte address and value codec
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Register<C> {
    name: &'static str,
    address: u8,
    codec: C,
}

impl<C> Register<C> {
    pub const fn new(name: &'static str, address: u8, codec: C) -> Self {
        Self {
            name,
            address,
            codec,
        }
    }

    /// Register name used in error reports
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Address of the first byte
    pub fn address(&self) -> u8 {
        self.address
    }

    fn reject(&self, fault: Fault) -> ValueError {
        match fault {
            Fault::OutOfRange => ValueError::OutOfRange {
                register: self.name,
            },
            Fault::UnknownCode(code) => ValueError::UnknownCode {
                register: self.name,
                code,
            },
        }
    }
}

impl<C: Codec> Register<C> {
    /// Number of bytes occupied
    pub fn width(&self) -> usize {
        self.codec.width()
    }

    /// Validate and encode a value
    pub fn encode(&self, value: C::Value) -> Result<Encoded, ValueError> {
        let mut bytes = [0u8; MAX_VALUE_WIDTH];
        let width = self.width();
        self.codec
            .encode(value, &mut bytes[..width])
            .map_err(|fault| self.reject(fault))?;
        Ok(Encoded::new(bytes, width))
    }

    /// Decode the register's bytes
    pub fn decode(&self, bytes: &[u8]) -> Result<C::Value, ValueError> {
        if bytes.len() != self.width() {
            return Err(ValueError::WrongWidth {
                register: self.name,
                expected: self.width(),
                actual: bytes.len(),
            });
        }
        self.codec.decode(bytes).map_err(|fault| self.reject(fault))
    }
}

// ROM area

/// Model number, high byte first
pub const MODEL_NO: Register<HighLow> = Register::new("model_no", 0x00, HighLow);
pub const FIRMWARE_VERSION: Register<Raw> = Register::new("firmware_version", 0x02, Raw);
pub const ID: Register<Bounded> = Register::new("id", 0x04, Bounded::new(1, 127));
/// Direction of rotation reversed
pub const REVERSED: Register<Switch> = Register::new("reversed", 0x05, Switch);
pub const BAUD_RATE: Register<Enumerated<BaudRate>> =
    Register::new("baud_rate", 0x06, Enumerated::new());
/// Delay before the actuator answers a query, in microseconds
pub const RETURN_DELAY: Register<ReturnDelay> = Register::new("return_delay", 0x07, ReturnDelay);
pub const CW_ANGLE_LIMIT: Register<Degrees> =
    Register::new("cw_angle_limit", 0x08, Degrees::new(0.0, 150.0));
pub const CCW_ANGLE_LIMIT: Register<Degrees> =
    Register::new("ccw_angle_limit", 0x0A, Degrees::new(-150.0, 0.0));
/// Shutdown temperature in degrees Celsius
pub const TEMPERATURE_LIMIT: Register<Signed> = Register::new("temperature_limit", 0x0E, Signed);
/// Output state while no goal is pending
pub const TORQUE_IN_SILENCE: Register<Enumerated<TorqueMode>> =
    Register::new("torque_in_silence", 0x16, Enumerated::new());
/// Ramp time after power-up, in milliseconds
pub const WARMUP_TIME: Register<Ticks10ms> =
    Register::new("warmup_time", 0x17, Ticks10ms::new(1, 2550));
pub const CW_COMPLIANCE_MARGIN: Register<Tenths> =
    Register::new("cw_compliance_margin", 0x18, Tenths::new(25.5));
pub const CCW_COMPLIANCE_MARGIN: Register<Tenths> =
    Register::new("ccw_compliance_margin", 0x19, Tenths::new(25.5));
pub const CW_COMPLIANCE_SLOPE: Register<Bounded> =
    Register::new("cw_compliance_slope", 0x1A, Bounded::new(0, 255));
pub const CCW_COMPLIANCE_SLOPE: Register<Bounded> =
    Register::new("ccw_compliance_slope", 0x1B, Bounded::new(0, 255));
/// Minimum drive current, model-dependent scale, high byte first
pub const PUNCH: Register<HighLow> = Register::new("punch", 0x1C, HighLow);

// RAM area

pub const GOAL_POSITION: Register<Degrees> =
    Register::new("goal_position", 0x1E, Degrees::new(-150.0, 150.0));
/// Travel time to the goal position, in milliseconds
pub const GOAL_TIME: Register<Ticks10ms> =
    Register::new("goal_time", 0x20, Ticks10ms::new(2, 163_830));
/// Torque ceiling in percent
pub const MAX_TORQUE: Register<Bounded> = Register::new("max_torque", 0x23, Bounded::new(0, 100));
pub const TORQUE_MODE: Register<Enumerated<TorqueMode>> =
    Register::new("torque_mode", 0x24, Enumerated::new());
/// Same byte as [`TORQUE_MODE`], read as on/off
pub const TORQUE_ENABLE: Register<Switch> = Register::new("torque_enable", 0x24, Switch);
/// Position loop gain in percent
pub const PID_COEFF: Register<Bounded> = Register::new("pid_coeff", 0x26, Bounded::new(1, 255));

// Status block (read-only)

pub const PRESENT_POSITION: Register<Degrees> =
    Register::new("present_position", 0x2A, Degrees::new(-150.0, 150.0));
/// Elapsed travel time, in milliseconds
pub const PRESENT_TIME: Register<Ticks10ms> =
    Register::new("present_time", 0x2C, Ticks10ms::new(2, 163_830));
/// Degrees per second
pub const PRESENT_SPEED: Register<Signed> = Register::new("present_speed", 0x2E, Signed);
/// Milliamperes
pub const PRESENT_LOAD: Register<Signed> = Register::new("present_load", 0x30, Signed);
/// Degrees Celsius
pub const PRESENT_TEMPERATURE: Register<Signed> =
    Register::new("present_temperature", 0x32, Signed);
/// Volts
pub const PRESENT_VOLTAGE: Register<Centi> = Register::new("present_voltage", 0x34, Centi);
