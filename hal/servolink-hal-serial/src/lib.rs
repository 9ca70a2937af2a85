//! Host serial-port transport for servolink
//!
//! Implements the servolink UART traits over the `serialport` crate so a
//! USB-serial adapter can drive the bus from a desktop.
//!
//! ```ignore
//! let config = SerialConfig::load("servos.toml")?;
//! let cxn = servolink_hal_serial::open(&config)?;
//! let motor = cxn.motor(1)?;
//! motor.rotate(30.0, Some(1000))?;
//! ```

pub mod config;
pub mod error;
pub mod port;

pub use config::SerialConfig;
pub use error::SerialError;
pub use port::{available_ports, SerialUart};

use servolink_drivers::Connection;

/// Open the configured device and wrap it in a bus connection
pub fn open(config: &SerialConfig) -> Result<Connection<SerialUart>, SerialError> {
    let uart = SerialUart::open(&config.path, &config.uart)?;
    Ok(Connection::with_integrity(uart, config.integrity))
}
