//! Single-actuator register access shared by the motor and ROM facades

use servolink_core::{Codec, Register, Status};
use servolink_hal::Uart;
use servolink_protocol::{Frame, MemoryBlock, Special};

use crate::connection::Connection;
use crate::error::BusError;

pub(crate) struct Target<'c, U> {
    pub(crate) cxn: &'c Connection<U>,
    pub(crate) id: u8,
}

impl<'c, U: Uart> Target<'c, U> {
    pub(crate) fn new(cxn: &'c Connection<U>, id: u8) -> Self {
        Self { cxn, id }
    }

    /// Query one register and decode its value
    pub(crate) fn read<C: Codec>(
        &self,
        register: &Register<C>,
    ) -> Result<C::Value, BusError<U::Error>> {
        let frame = Frame::read(self.id, register.address(), register.width() as u8)?;
        let reply = self.cxn.query(&frame)?;
        Ok(register.decode(reply.payload())?)
    }

    /// Validate, encode and write one register
    pub(crate) fn write<C: Codec>(
        &self,
        register: &Register<C>,
        value: C::Value,
    ) -> Result<(), BusError<U::Error>> {
        let encoded = register.encode(value)?;
        self.write_bytes(register.address(), encoded.as_bytes())
    }

    /// Write pre-encoded bytes starting at `address`
    pub(crate) fn write_bytes(&self, address: u8, data: &[u8]) -> Result<(), BusError<U::Error>> {
        let frame = Frame::write(self.id, address, data)?;
        self.cxn.command(&frame)
    }

    pub(crate) fn special(&self, command: Special) -> Result<(), BusError<U::Error>> {
        self.cxn.command(&Frame::special(self.id, command)?)
    }

    /// Query and decode the status block
    pub(crate) fn status(&self) -> Result<Status, BusError<U::Error>> {
        let reply = self
            .cxn
            .query(&Frame::memory_block(self.id, MemoryBlock::Status)?)?;
        Ok(Status::decode(reply.payload())?)
    }
}
