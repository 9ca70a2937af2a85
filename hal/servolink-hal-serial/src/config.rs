//! Serial connection configuration
//!
//! ```toml
//! path = "/dev/ttyUSB0"
//! baudrate = 115200
//! timeout_ms = 500
//! integrity = "strict"
//! ```
//!
//! Everything but `path` may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use servolink_hal::UartConfig;
use servolink_protocol::Integrity;

use crate::error::SerialError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path or port name
    pub path: String,
    /// Line settings
    #[serde(flatten)]
    pub uart: UartConfig,
    /// Response check applied by the connection
    #[serde(default)]
    pub integrity: Integrity,
}

impl SerialConfig {
    /// Default line settings for the given device
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            uart: UartConfig::default(),
            integrity: Integrity::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SerialError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SerialError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servolink_hal::{Parity, StopBits};

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = SerialConfig::from_toml_str(r#"path = "/dev/ttyUSB0""#).unwrap();
        assert_eq!(config, SerialConfig::new("/dev/ttyUSB0"));
        assert_eq!(config.uart.baudrate, 115200);
        assert_eq!(config.uart.timeout_ms, 1000);
        assert_eq!(config.integrity, Integrity::Strict);
    }

    #[test]
    fn test_full_config() {
        let config = SerialConfig::from_toml_str(
            r#"
            path = "COM3"
            baudrate = 38400
            parity = "even"
            stop_bits = "two"
            timeout_ms = 250
            integrity = "lenient"
            "#,
        )
        .unwrap();

        assert_eq!(config.path, "COM3");
        assert_eq!(config.uart.baudrate, 38400);
        assert_eq!(config.uart.parity, Parity::Even);
        assert_eq!(config.uart.stop_bits, StopBits::Two);
        assert_eq!(config.uart.timeout_ms, 250);
        assert_eq!(config.integrity, Integrity::Lenient);
    }

    #[test]
    fn test_missing_path_rejected() {
        assert!(matches!(
            SerialConfig::from_toml_str("baudrate = 9600"),
            Err(SerialError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_integrity_rejected() {
        assert!(SerialConfig::from_toml_str(
            r#"
            path = "/dev/ttyUSB0"
            integrity = "paranoid"
            "#
        )
        .is_err());
    }
}
