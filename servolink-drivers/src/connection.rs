//! Bus connection
//!
//! Owns the transport and runs one transaction at a time: a command is a
//! single write, a query is a write followed by a blocking read of exactly
//! the response length the query frame declares.
//!
//! Actuator handles borrow the connection, so many of them can share one
//! bus. The transport sits in a `RefCell` and a query holds the borrow for
//! its write and read, so transactions never interleave. `Connection` is
//! not `Sync`; callers driving one bus from several threads need their own
//! lock around it.

use core::cell::RefCell;

use servolink_core::ValueError;
use servolink_hal::Uart;
use servolink_protocol::{Frame, FrameError, Integrity, ReturnFrame, MAX_FRAME_SIZE};

use crate::error::BusError;
use crate::motor::Motor;

/// A half-duplex bus shared by actuator handles
pub struct Connection<U> {
    uart: RefCell<U>,
    integrity: Integrity,
}

impl<U: Uart> Connection<U> {
    /// Wrap a transport, verifying response checksums
    pub fn new(uart: U) -> Self {
        Self::with_integrity(uart, Integrity::Strict)
    }

    /// Wrap a transport with an explicit response check
    pub fn with_integrity(uart: U, integrity: Integrity) -> Self {
        Self {
            uart: RefCell::new(uart),
            integrity,
        }
    }

    /// Response check applied to every query
    pub fn integrity(&self) -> Integrity {
        self.integrity
    }

    /// Handle for the actuator with the given id
    pub fn motor(&self, id: u8) -> Result<Motor<'_, U>, ValueError> {
        Motor::new(self, id)
    }

    /// Send a frame without waiting for a response
    pub fn command(&self, frame: &Frame) -> Result<(), BusError<U::Error>> {
        let mut uart = self.uart.borrow_mut();
        Self::send(&mut *uart, frame)
    }

    /// Send a query frame and read its response
    pub fn query(&self, frame: &Frame) -> Result<ReturnFrame, BusError<U::Error>> {
        let len = frame.response_len().ok_or(BusError::NoResponseExpected)?;
        if len > MAX_FRAME_SIZE {
            return Err(BusError::Frame(FrameError::PayloadTooLarge));
        }

        let mut uart = self.uart.borrow_mut();
        Self::send(&mut *uart, frame)?;

        let mut buf = [0u8; MAX_FRAME_SIZE];
        let n = uart
            .read_blocking(&mut buf[..len])
            .map_err(BusError::Transport)?;
        log::trace!("rx {:02X?}", &buf[..n]);
        if n < len {
            log::warn!("short response from id {}: {} of {} bytes", frame.target_id(), n, len);
            return Err(BusError::Frame(FrameError::Truncated { len: n }));
        }

        ReturnFrame::parse(&buf[..len], self.integrity).map_err(|e| {
            log::warn!("rejected response from id {}: {:?}", frame.target_id(), e);
            BusError::Frame(e)
        })
    }

    /// Release the transport
    pub fn into_inner(self) -> U {
        self.uart.into_inner()
    }

    fn send(uart: &mut U, frame: &Frame) -> Result<(), BusError<U::Error>> {
        log::trace!("tx {:02X?}", frame.as_bytes());
        uart.write_blocking(frame.as_bytes())
            .map_err(BusError::Transport)?;
        uart.flush().map_err(BusError::Transport)
    }
}
