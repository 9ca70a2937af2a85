//! Non-volatile parameters of one actuator
//!
//! Writes land in the RAM copy of the ROM area and take effect at once;
//! [`Rom::save_to_rom`] persists them across power cycles.

use servolink_core::registers::{
    BAUD_RATE, CCW_ANGLE_LIMIT, CCW_COMPLIANCE_MARGIN, CCW_COMPLIANCE_SLOPE, CW_ANGLE_LIMIT,
    CW_COMPLIANCE_MARGIN, CW_COMPLIANCE_SLOPE, ID, PUNCH, RETURN_DELAY, REVERSED,
    TEMPERATURE_LIMIT, TORQUE_IN_SILENCE, WARMUP_TIME,
};
use servolink_core::{BaudRate, TorqueMode};
use servolink_hal::Uart;
use servolink_protocol::Special;

use crate::connection::Connection;
use crate::error::BusError;
use crate::target::Target;

/// ROM-area view of one actuator
pub struct Rom<'c, U> {
    target: Target<'c, U>,
}

impl<'c, U: Uart> Rom<'c, U> {
    pub(crate) fn new(cxn: &'c Connection<U>, id: u8) -> Self {
        Self {
            target: Target::new(cxn, id),
        }
    }

    pub(crate) fn target(&self) -> &Target<'c, U> {
        &self.target
    }

    /// Persist the current ROM-area values
    pub fn save_to_rom(&self) -> Result<(), BusError<U::Error>> {
        log::debug!("id {}: save to rom", self.target.id);
        self.target.special(Special::SaveToRom)
    }

    /// Id this handle addresses
    pub fn id(&self) -> u8 {
        self.target.id
    }

    /// Change the actuator's id and follow it
    pub fn set_id(&mut self, id: u8) -> Result<(), BusError<U::Error>> {
        self.target.write(&ID, id)?;
        log::debug!("id {} -> {}", self.target.id, id);
        self.target.id = id;
        Ok(())
    }

    pub fn reversed(&self) -> Result<bool, BusError<U::Error>> {
        self.target.read(&REVERSED)
    }

    pub fn set_reversed(&self, reversed: bool) -> Result<(), BusError<U::Error>> {
        self.target.write(&REVERSED, reversed)
    }

    pub fn baud_rate(&self) -> Result<BaudRate, BusError<U::Error>> {
        self.target.read(&BAUD_RATE)
    }

    /// Takes effect immediately; the connection must be reopened at the new rate
    pub fn set_baud_rate(&self, baud_rate: BaudRate) -> Result<(), BusError<U::Error>> {
        self.target.write(&BAUD_RATE, baud_rate)
    }

    /// Response delay in microseconds
    pub fn return_delay(&self) -> Result<u16, BusError<U::Error>> {
        self.target.read(&RETURN_DELAY)
    }

    pub fn set_return_delay(&self, micros: u16) -> Result<(), BusError<U::Error>> {
        self.target.write(&RETURN_DELAY, micros)
    }

    pub fn cw_angle_limit(&self) -> Result<f32, BusError<U::Error>> {
        self.target.read(&CW_ANGLE_LIMIT)
    }

    /// Clockwise limit, 0 to 150 degrees
    pub fn set_cw_angle_limit(&self, degree: f32) -> Result<(), BusError<U::Error>> {
        self.target.write(&CW_ANGLE_LIMIT, degree)
    }

    pub fn ccw_angle_limit(&self) -> Result<f32, BusError<U::Error>> {
        self.target.read(&CCW_ANGLE_LIMIT)
    }

    /// Counter-clockwise limit, -150 to 0 degrees
    pub fn set_ccw_angle_limit(&self, degree: f32) -> Result<(), BusError<U::Error>> {
        self.target.write(&CCW_ANGLE_LIMIT, degree)
    }

    /// Shutdown temperature in degrees Celsius
    pub fn temperature_limit(&self) -> Result<i16, BusError<U::Error>> {
        self.target.read(&TEMPERATURE_LIMIT)
    }

    pub fn torque_in_silence(&self) -> Result<TorqueMode, BusError<U::Error>> {
        self.target.read(&TORQUE_IN_SILENCE)
    }

    pub fn set_torque_in_silence(&self, mode: TorqueMode) -> Result<(), BusError<U::Error>> {
        self.target.write(&TORQUE_IN_SILENCE, mode)
    }

    /// Warm-up time in milliseconds
    pub fn warmup_time(&self) -> Result<u32, BusError<U::Error>> {
        self.target.read(&WARMUP_TIME)
    }

    pub fn set_warmup_time(&self, millis: u32) -> Result<(), BusError<U::Error>> {
        self.target.write(&WARMUP_TIME, millis)
    }

    pub fn cw_compliance_margin(&self) -> Result<f32, BusError<U::Error>> {
        self.target.read(&CW_COMPLIANCE_MARGIN)
    }

    pub fn set_cw_compliance_margin(&self, degree: f32) -> Result<(), BusError<U::Error>> {
        self.target.write(&CW_COMPLIANCE_MARGIN, degree)
    }

    pub fn ccw_compliance_margin(&self) -> Result<f32, BusError<U::Error>> {
        self.target.read(&CCW_COMPLIANCE_MARGIN)
    }

    pub fn set_ccw_compliance_margin(&self, degree: f32) -> Result<(), BusError<U::Error>> {
        self.target.write(&CCW_COMPLIANCE_MARGIN, degree)
    }

    pub fn cw_compliance_slope(&self) -> Result<u8, BusError<U::Error>> {
        self.target.read(&CW_COMPLIANCE_SLOPE)
    }

    pub fn set_cw_compliance_slope(&self, slope: u8) -> Result<(), BusError<U::Error>> {
        self.target.write(&CW_COMPLIANCE_SLOPE, slope)
    }

    pub fn ccw_compliance_slope(&self) -> Result<u8, BusError<U::Error>> {
        self.target.read(&CCW_COMPLIANCE_SLOPE)
    }

    pub fn set_ccw_compliance_slope(&self, slope: u8) -> Result<(), BusError<U::Error>> {
        self.target.write(&CCW_COMPLIANCE_SLOPE, slope)
    }

    /// Punch bytes, high byte first
    pub fn punch(&self) -> Result<[u8; 2], BusError<U::Error>> {
        self.target.read(&PUNCH)
    }

    pub fn set_punch(&self, punch: [u8; 2]) -> Result<(), BusError<U::Error>> {
        self.target.write(&PUNCH, punch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{response, MockUart};
    use servolink_core::ValueError;

    fn written(bus: &std::cell::RefCell<crate::mock::Bus>) -> Vec<u8> {
        bus.borrow().written.last().cloned().unwrap_or_default()
    }

    #[test]
    fn test_save_to_rom() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let rom = Rom::new(&cxn, 1);

        rom.save_to_rom().unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x40, 0xFF, 0x00, 0x00, 0xBE]);
    }

    #[test]
    fn test_setter_frames() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let rom = Rom::new(&cxn, 1);

        rom.set_reversed(true).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x05, 0x01, 0x01, 0x01, 0x05]);

        rom.set_baud_rate(BaudRate::Bps38400).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x06, 0x01, 0x01, 0x04, 0x03]);

        rom.set_return_delay(1000).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x07, 0x01, 0x01, 0x12, 0x14]);

        rom.set_cw_angle_limit(100.0).unwrap();
        assert_eq!(
            written(&bus),
            [0xFA, 0xAF, 0x01, 0x00, 0x08, 0x02, 0x01, 0xE8, 0x03, 0xE1]
        );

        rom.set_ccw_angle_limit(-100.0).unwrap();
        assert_eq!(
            written(&bus),
            [0xFA, 0xAF, 0x01, 0x00, 0x0A, 0x02, 0x01, 0x18, 0xFC, 0xEC]
        );

        rom.set_punch([0x00, 0x64]).unwrap();
        assert_eq!(
            written(&bus),
            [0xFA, 0xAF, 0x01, 0x00, 0x1C, 0x02, 0x01, 0x64, 0x00, 0x7A]
        );

        rom.set_warmup_time(500).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x17, 0x01, 0x01, 0x32, 0x24]);

        rom.set_cw_compliance_margin(1.5).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x18, 0x01, 0x01, 0x0F, 0x16]);

        rom.set_ccw_compliance_margin(2.5).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x19, 0x01, 0x01, 0x19, 0x01]);

        rom.set_cw_compliance_slope(32).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x1A, 0x01, 0x01, 0x20, 0x3B]);

        rom.set_ccw_compliance_slope(64).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x1B, 0x01, 0x01, 0x40, 0x5A]);

        rom.set_torque_in_silence(TorqueMode::Brake).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x16, 0x01, 0x01, 0x02, 0x15]);
    }

    #[test]
    fn test_out_of_range_sends_nothing() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let rom = Rom::new(&cxn, 1);

        assert_eq!(
            rom.set_cw_angle_limit(-1.0),
            Err(BusError::Value(ValueError::OutOfRange {
                register: "cw_angle_limit"
            }))
        );
        assert!(rom.set_return_delay(50).is_err());
        assert!(rom.set_cw_compliance_margin(25.6).is_err());
        assert!(bus.borrow().written.is_empty());
    }

    #[test]
    fn test_set_id_follows_new_id() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let mut rom = Rom::new(&cxn, 1);

        rom.set_id(5).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x04, 0x01, 0x01, 0x05, 0x00]);
        assert_eq!(rom.id(), 5);

        rom.save_to_rom().unwrap();
        assert_eq!(written(&bus)[2], 0x05);
    }

    #[test]
    fn test_set_id_rejected_keeps_id() {
        let (uart, _bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let mut rom = Rom::new(&cxn, 1);

        assert!(rom.set_id(0).is_err());
        assert_eq!(rom.id(), 1);
    }

    #[test]
    fn test_getters_decode_response() {
        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&response(1, 0x06, &[0x04]));
        bus.borrow_mut().respond(&response(1, 0x0A, &[0x18, 0xFC]));
        bus.borrow_mut().respond(&response(1, 0x07, &[0x12]));
        bus.borrow_mut().respond(&response(1, 0x16, &[0x02]));
        let cxn = Connection::new(uart);
        let rom = Rom::new(&cxn, 1);

        assert_eq!(rom.baud_rate(), Ok(BaudRate::Bps38400));
        assert_eq!(rom.ccw_angle_limit(), Ok(-100.0));
        assert_eq!(rom.return_delay(), Ok(1000));
        assert_eq!(rom.torque_in_silence(), Ok(TorqueMode::Brake));

        let bus = bus.borrow();
        assert_eq!(bus.written[0], [0xFA, 0xAF, 0x01, 0x0F, 0x06, 0x01, 0x00, 0x09]);
        assert_eq!(bus.reads, [9, 10, 9, 9]);
    }

    #[test]
    fn test_unknown_baud_code() {
        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&response(1, 0x06, &[0x42]));
        let cxn = Connection::new(uart);
        let rom = Rom::new(&cxn, 1);

        assert_eq!(
            rom.baud_rate(),
            Err(BusError::Value(ValueError::UnknownCode {
                register: "baud_rate",
                code: 0x42
            }))
        );
    }
}
