//! Serial transport errors

use core::fmt;

#[derive(Debug)]
pub enum SerialError {
    /// Device could not be opened or configured
    Open(serialport::Error),
    /// Read or write on an open device failed
    Io(std::io::Error),
    /// Configuration file is not valid TOML or has bad values
    Config(toml::de::Error),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::Open(e) => write!(f, "failed to open serial port: {e}"),
            SerialError::Io(e) => write!(f, "serial i/o error: {e}"),
            SerialError::Config(e) => write!(f, "invalid serial configuration: {e}"),
        }
    }
}

impl std::error::Error for SerialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerialError::Open(e) => Some(e),
            SerialError::Io(e) => Some(e),
            SerialError::Config(e) => Some(e),
        }
    }
}

impl From<serialport::Error> for SerialError {
    fn from(e: serialport::Error) -> Self {
        SerialError::Open(e)
    }
}

impl From<std::io::Error> for SerialError {
    fn from(e: std::io::Error) -> Self {
        SerialError::Io(e)
    }
}

impl From<toml::de::Error> for SerialError {
    fn from(e: toml::de::Error) -> Self {
        SerialError::Config(e)
    }
}
