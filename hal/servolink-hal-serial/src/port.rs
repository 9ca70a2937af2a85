//! `serialport`-backed UART

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use servolink_hal::{DataBits, ErrorType, Parity, StopBits, UartConfig, UartRx, UartTx};

use crate::error::SerialError;

/// Names of the serial ports present on this host
pub fn available_ports() -> Result<Vec<String>, SerialError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}

/// Blocking UART over a host serial port
///
/// A read returns early with a short count once the configured timeout
/// passes without new bytes.
pub struct SerialUart {
    port: Box<dyn SerialPort>,
}

impl SerialUart {
    pub fn open(path: &str, config: &UartConfig) -> Result<Self, SerialError> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .timeout(Duration::from_millis(config.timeout_ms.into()))
            .open()?;
        log::info!("opened {} at {} bps", path, config.baudrate);
        Ok(Self { port })
    }

    /// Wrap an already opened port
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }

    pub fn port_mut(&mut self) -> &mut dyn SerialPort {
        self.port.as_mut()
    }
}

impl ErrorType for SerialUart {
    type Error = SerialError;
}

impl UartTx for SerialUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        Ok(self.port.write_all(data)?)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(self.port.flush()?)
    }
}

impl UartRx for SerialUart {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}
