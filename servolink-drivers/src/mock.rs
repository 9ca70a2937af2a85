//! Recording transport for tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use servolink_hal::{ErrorType, UartRx, UartTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Read with no queued response
    Silent,
}

#[derive(Debug, Default)]
pub struct Bus {
    /// Every write, one entry per call
    pub written: Vec<Vec<u8>>,
    /// Responses handed out to successive reads
    pub responses: VecDeque<Vec<u8>>,
    /// Byte counts requested by each read
    pub reads: Vec<usize>,
}

impl Bus {
    pub fn respond(&mut self, response: &[u8]) {
        self.responses.push_back(response.to_vec());
    }
}

/// Transport half handed to the connection; the test keeps the other `Rc`
pub struct MockUart {
    bus: Rc<RefCell<Bus>>,
}

impl MockUart {
    pub fn new() -> (Self, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        (Self { bus: bus.clone() }, bus)
    }
}

impl ErrorType for MockUart {
    type Error = MockError;
}

impl UartTx for MockUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        self.bus.borrow_mut().written.push(data.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        Ok(())
    }
}

impl UartRx for MockUart {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, MockError> {
        let mut bus = self.bus.borrow_mut();
        bus.reads.push(buf.len());
        let response = bus.responses.pop_front().ok_or(MockError::Silent)?;
        let n = response.len().min(buf.len());
        buf[..n].copy_from_slice(&response[..n]);
        Ok(n)
    }
}

/// Build a well-formed response frame around `payload`
pub fn response(id: u8, address: u8, payload: &[u8]) -> Vec<u8> {
    let mut raw = std::vec![0xFD, 0xDF, id, 0x00, address, payload.len() as u8, 0x01];
    raw.extend_from_slice(payload);
    raw.push(servolink_protocol::checksum(&raw[2..]));
    raw
}
