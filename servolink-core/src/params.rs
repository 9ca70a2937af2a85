//! Enumerated register values

use core::str::FromStr;

use crate::error::ValueError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of values with a one-byte wire code
///
/// `from_byte(to_byte(v)) == Some(v)` for every value.
pub trait WireCode: Sized + Copy {
    /// Convert to wire format byte
    fn to_byte(self) -> u8;

    /// Parse a value from its wire format byte
    fn from_byte(byte: u8) -> Option<Self>;
}

/// Output stage state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TorqueMode {
    /// Output free, shaft turns by hand
    #[default]
    Off,
    /// Holding and following goal position
    On,
    /// Output shorted, shaft resists motion
    Brake,
}

const TORQUE_OFF: u8 = 0x00;
const TORQUE_ON: u8 = 0x01;
const TORQUE_BRAKE: u8 = 0x02;

impl TorqueMode {
    /// All modes in wire-code order
    pub const ALL: [TorqueMode; 3] = [TorqueMode::Off, TorqueMode::On, TorqueMode::Brake];

    /// Symbolic name
    pub fn as_str(self) -> &'static str {
        match self {
            TorqueMode::Off => "off",
            TorqueMode::On => "on",
            TorqueMode::Brake => "brake",
        }
    }

    /// Returns true unless the output is free
    pub fn is_enabled(self) -> bool {
        self != TorqueMode::Off
    }

    /// `On` when enabled, `Off` otherwise
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            TorqueMode::On
        } else {
            TorqueMode::Off
        }
    }
}

impl WireCode for TorqueMode {
    fn to_byte(self) -> u8 {
        match self {
            TorqueMode::Off => TORQUE_OFF,
            TorqueMode::On => TORQUE_ON,
            TorqueMode::Brake => TORQUE_BRAKE,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TORQUE_OFF => Some(TorqueMode::Off),
            TORQUE_ON => Some(TorqueMode::On),
            TORQUE_BRAKE => Some(TorqueMode::Brake),
            _ => None,
        }
    }
}

impl FromStr for TorqueMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TorqueMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or(ValueError::UnknownKey)
    }
}

/// Serial line speed stored in the baud rate register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BaudRate {
    Bps9600,
    Bps14400,
    Bps19200,
    Bps28800,
    Bps38400,
    Bps57600,
    Bps76800,
    Bps115200,
    Bps153600,
    Bps230400,
}

impl BaudRate {
    /// All rates in wire-code order
    pub const ALL: [BaudRate; 10] = [
        BaudRate::Bps9600,
        BaudRate::Bps14400,
        BaudRate::Bps19200,
        BaudRate::Bps28800,
        BaudRate::Bps38400,
        BaudRate::Bps57600,
        BaudRate::Bps76800,
        BaudRate::Bps115200,
        BaudRate::Bps153600,
        BaudRate::Bps230400,
    ];

    /// Bits per second
    pub fn bps(self) -> u32 {
        match self {
            BaudRate::Bps9600 => 9_600,
            BaudRate::Bps14400 => 14_400,
            BaudRate::Bps19200 => 19_200,
            BaudRate::Bps28800 => 28_800,
            BaudRate::Bps38400 => 38_400,
            BaudRate::Bps57600 => 57_600,
            BaudRate::Bps76800 => 76_800,
            BaudRate::Bps115200 => 115_200,
            BaudRate::Bps153600 => 153_600,
            BaudRate::Bps230400 => 230_400,
        }
    }

    /// Look up a supported rate
    pub fn from_bps(bps: u32) -> Result<Self, ValueError> {
        BaudRate::ALL
            .into_iter()
            .find(|rate| rate.bps() == bps)
            .ok_or(ValueError::UnknownKey)
    }
}

impl WireCode for BaudRate {
    fn to_byte(self) -> u8 {
        match self {
            BaudRate::Bps9600 => 0x00,
            BaudRate::Bps14400 => 0x01,
            BaudRate::Bps19200 => 0x02,
            BaudRate::Bps28800 => 0x03,
            BaudRate::Bps38400 => 0x04,
            BaudRate::Bps57600 => 0x05,
            BaudRate::Bps76800 => 0x06,
            BaudRate::Bps115200 => 0x07,
            BaudRate::Bps153600 => 0x08,
            BaudRate::Bps230400 => 0x09,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        BaudRate::ALL.get(byte as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torque_mode_codes_are_bijective() {
        for mode in TorqueMode::ALL {
            assert_eq!(TorqueMode::from_byte(mode.to_byte()), Some(mode));
        }
        for byte in 0x03..=0xFF {
            assert_eq!(TorqueMode::from_byte(byte), None);
        }
    }

    #[test]
    fn test_torque_mode_from_str() {
        assert_eq!("on".parse::<TorqueMode>(), Ok(TorqueMode::On));
        assert_eq!("brake".parse::<TorqueMode>(), Ok(TorqueMode::Brake));
        assert_eq!("On".parse::<TorqueMode>(), Err(ValueError::UnknownKey));
        assert_eq!("".parse::<TorqueMode>(), Err(ValueError::UnknownKey));
    }

    #[test]
    fn test_torque_mode_enabled() {
        assert!(!TorqueMode::Off.is_enabled());
        assert!(TorqueMode::On.is_enabled());
        assert!(TorqueMode::Brake.is_enabled());
        assert_eq!(TorqueMode::from_enabled(true), TorqueMode::On);
        assert_eq!(TorqueMode::from_enabled(false), TorqueMode::Off);
    }

    #[test]
    fn test_baud_rate_codes_are_bijective() {
        for (code, rate) in BaudRate::ALL.into_iter().enumerate() {
            assert_eq!(rate.to_byte(), code as u8);
            assert_eq!(BaudRate::from_byte(code as u8), Some(rate));
            assert_eq!(BaudRate::from_bps(rate.bps()), Ok(rate));
        }
        assert_eq!(BaudRate::from_byte(0x0A), None);
    }

    #[test]
    fn test_baud_rate_unsupported() {
        assert_eq!(BaudRate::from_bps(38_400), Ok(BaudRate::Bps38400));
        assert_eq!(BaudRate::from_bps(1_000_000), Err(ValueError::UnknownKey));
    }
}
