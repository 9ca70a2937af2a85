//! Volatile parameters, motion and status of one actuator

use servolink_core::registers::{
    FIRMWARE_VERSION, GOAL_POSITION, GOAL_TIME, ID, MAX_TORQUE, MODEL_NO, PID_COEFF,
    TORQUE_ENABLE, TORQUE_MODE,
};
use servolink_core::{Status, TorqueMode, ValueError};
use servolink_hal::Uart;
use servolink_protocol::Special;

use crate::connection::Connection;
use crate::error::BusError;
use crate::rom::Rom;

/// Handle for one actuator on a shared bus
///
/// Setters send one command frame and return without waiting. Getters send
/// one query and block until the response arrives or the transport times
/// out. The ROM area is reached through [`Motor::rom`].
pub struct Motor<'c, U> {
    rom: Rom<'c, U>,
}

impl<'c, U: Uart> Motor<'c, U> {
    /// Handle for the actuator with id 1-127
    pub fn new(cxn: &'c Connection<U>, id: u8) -> Result<Self, ValueError> {
        ID.encode(id)?;
        Ok(Self {
            rom: Rom::new(cxn, id),
        })
    }

    pub fn rom(&self) -> &Rom<'c, U> {
        &self.rom
    }

    pub fn rom_mut(&mut self) -> &mut Rom<'c, U> {
        &mut self.rom
    }

    pub fn connection(&self) -> &'c Connection<U> {
        self.rom.target().cxn
    }

    pub fn restart(&self) -> Result<(), BusError<U::Error>> {
        log::debug!("id {}: restart", self.id());
        self.rom.target().special(Special::Restart)
    }

    /// Restore every parameter, id included, to factory defaults
    pub fn factory_reset(&self) -> Result<(), BusError<U::Error>> {
        log::debug!("id {}: factory reset", self.id());
        self.rom.target().special(Special::FactoryReset)
    }

    /// Model number bytes, high byte first
    pub fn model_no(&self) -> Result<[u8; 2], BusError<U::Error>> {
        self.rom.target().read(&MODEL_NO)
    }

    pub fn firmware_version(&self) -> Result<u8, BusError<U::Error>> {
        self.rom.target().read(&FIRMWARE_VERSION)
    }

    pub fn id(&self) -> u8 {
        self.rom.id()
    }

    /// Change the actuator's id and follow it
    pub fn set_id(&mut self, id: u8) -> Result<(), BusError<U::Error>> {
        self.rom.set_id(id)
    }

    /// Move to `degree` over `duration_ms`
    ///
    /// Position and time are written in one frame. Without a duration the
    /// actuator moves at full speed.
    pub fn rotate(&self, degree: f32, duration_ms: Option<u32>) -> Result<(), BusError<U::Error>> {
        let position = GOAL_POSITION.encode(degree)?;
        let time = GOAL_TIME.encode(duration_ms.unwrap_or(0))?;

        let mut data = [0u8; 4];
        data[..2].copy_from_slice(position.as_bytes());
        data[2..].copy_from_slice(time.as_bytes());
        self.rom.target().write_bytes(GOAL_POSITION.address(), &data)
    }

    pub fn set_angle(&self, degree: f32) -> Result<(), BusError<U::Error>> {
        self.rotate(degree, None)
    }

    /// Torque ceiling in percent
    pub fn max_torque(&self) -> Result<u8, BusError<U::Error>> {
        self.rom.target().read(&MAX_TORQUE)
    }

    pub fn set_max_torque(&self, percent: u8) -> Result<(), BusError<U::Error>> {
        self.rom.target().write(&MAX_TORQUE, percent)
    }

    pub fn torque_mode(&self) -> Result<TorqueMode, BusError<U::Error>> {
        self.rom.target().read(&TORQUE_MODE)
    }

    pub fn set_torque_mode(&self, mode: TorqueMode) -> Result<(), BusError<U::Error>> {
        self.rom.target().write(&TORQUE_MODE, mode)
    }

    /// Returns true unless torque is off
    pub fn torque_enabled(&self) -> Result<bool, BusError<U::Error>> {
        self.rom.target().read(&TORQUE_ENABLE)
    }

    pub fn set_torque_enabled(&self, enabled: bool) -> Result<(), BusError<U::Error>> {
        self.rom.target().write(&TORQUE_ENABLE, enabled)
    }

    /// Position loop gain in percent
    pub fn pid_coeff(&self) -> Result<u8, BusError<U::Error>> {
        self.rom.target().read(&PID_COEFF)
    }

    pub fn set_pid_coeff(&self, percent: u8) -> Result<(), BusError<U::Error>> {
        self.rom.target().write(&PID_COEFF, percent)
    }

    /// Present angle, time, speed, load, temperature and voltage in one query
    pub fn status(&self) -> Result<Status, BusError<U::Error>> {
        self.rom.target().status()
    }

    /// Present angle in degrees
    pub fn angle(&self) -> Result<f32, BusError<U::Error>> {
        Ok(self.status()?.angle)
    }

    /// Elapsed travel time in milliseconds
    pub fn time(&self) -> Result<u32, BusError<U::Error>> {
        Ok(self.status()?.time_ms)
    }

    /// Present speed in degrees per second
    pub fn speed(&self) -> Result<i16, BusError<U::Error>> {
        Ok(self.status()?.speed)
    }

    /// Present load current in milliamperes
    pub fn load(&self) -> Result<i16, BusError<U::Error>> {
        Ok(self.status()?.load)
    }

    /// Present temperature in degrees Celsius
    pub fn temperature(&self) -> Result<i16, BusError<U::Error>> {
        Ok(self.status()?.temperature)
    }

    /// Supply voltage in volts
    pub fn voltage(&self) -> Result<f32, BusError<U::Error>> {
        Ok(self.status()?.voltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{response, MockUart};
    use servolink_protocol::FrameError;

    // angle -16.4, time 5670 ms, speed 300, load 7
    const MOVING: [u8; 18] = [
        0x5C, 0xFF, 0x37, 0x02, 0x2C, 0x01, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00,
    ];

    // angle -120.2, temperature 45, voltage 5.0
    const IDLE: [u8; 18] = [
        0x4E, 0xFB, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2D, 0x00, 0xF4, 0x01, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00,
    ];

    fn written(bus: &std::cell::RefCell<crate::mock::Bus>) -> Vec<u8> {
        bus.borrow().written.last().cloned().unwrap_or_default()
    }

    #[test]
    fn test_command_frames() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        motor.restart().unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x20, 0xFF, 0x00, 0x00, 0xDE]);

        motor.rotate(90.0, Some(5000)).unwrap();
        assert_eq!(
            written(&bus),
            [0xFA, 0xAF, 0x01, 0x00, 0x1E, 0x04, 0x01, 0x84, 0x03, 0xF4, 0x01, 0x68]
        );

        motor.set_max_torque(80).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x23, 0x01, 0x01, 0x50, 0x72]);

        motor.set_pid_coeff(90).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x26, 0x01, 0x01, 0x5A, 0x7D]);

        motor.set_torque_mode(TorqueMode::On).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x24, 0x01, 0x01, 0x01, 0x24]);

        motor.set_torque_mode(TorqueMode::Off).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x24, 0x01, 0x01, 0x00, 0x25]);

        motor.set_torque_mode(TorqueMode::Brake).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x24, 0x01, 0x01, 0x02, 0x27]);

        motor.set_torque_enabled(true).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x24, 0x01, 0x01, 0x01, 0x24]);

        motor.set_torque_enabled(false).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x24, 0x01, 0x01, 0x00, 0x25]);

        assert_eq!(bus.borrow().written.len(), 9);
        assert!(bus.borrow().reads.is_empty());
    }

    #[test]
    fn test_factory_reset_frame() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        motor.factory_reset().unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x10, 0xFF, 0xFF, 0x00, 0x11]);
    }

    #[test]
    fn test_set_angle_sends_zero_time() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        motor.set_angle(-150.0).unwrap();
        let frame = written(&bus);
        assert_eq!(&frame[4..7], &[0x1E, 0x04, 0x01]);
        assert_eq!(&frame[7..11], &[0x24, 0xFA, 0x00, 0x00]);
    }

    #[test]
    fn test_rotate_rejects_before_sending() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        assert_eq!(
            motor.rotate(150.1, None),
            Err(BusError::Value(ValueError::OutOfRange {
                register: "goal_position"
            }))
        );
        assert_eq!(
            motor.rotate(0.0, Some(163_840)),
            Err(BusError::Value(ValueError::OutOfRange {
                register: "goal_time"
            }))
        );
        assert!(motor.rotate(f32::NAN, None).is_err());
        assert!(motor.set_max_torque(101).is_err());
        assert!(motor.set_pid_coeff(0).is_err());
        assert!(bus.borrow().written.is_empty());
    }

    #[test]
    fn test_status_query() {
        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&response(1, 0x2A, &MOVING));
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        let status = motor.status().unwrap();
        assert_eq!(status.angle, -16.4);
        assert_eq!(status.time_ms, 5670);
        assert_eq!(status.speed, 300);
        assert_eq!(status.load, 7);

        let bus = bus.borrow();
        assert_eq!(bus.written[0], [0xFA, 0xAF, 0x01, 0x09, 0x00, 0x00, 0x01, 0x09]);
        assert_eq!(bus.reads, [26]);
    }

    #[test]
    fn test_single_field_getters() {
        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&response(1, 0x2A, &IDLE));
        bus.borrow_mut().respond(&response(1, 0x2A, &IDLE));
        bus.borrow_mut().respond(&response(1, 0x2A, &IDLE));
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        assert_eq!(motor.angle(), Ok(-120.2));
        assert_eq!(motor.temperature(), Ok(45));
        assert_eq!(motor.voltage(), Ok(5.0));
        assert_eq!(bus.borrow().written.len(), 3);
    }

    #[test]
    fn test_register_getters() {
        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&response(1, 0x24, &[0x02]));
        bus.borrow_mut().respond(&response(1, 0x24, &[0x02]));
        bus.borrow_mut().respond(&response(1, 0x00, &[0x14, 0x01]));
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        assert_eq!(motor.torque_mode(), Ok(TorqueMode::Brake));
        assert_eq!(motor.torque_enabled(), Ok(true));
        assert_eq!(motor.model_no(), Ok([0x01, 0x14]));
    }

    #[test]
    fn test_corrupted_status_rejected() {
        let mut raw = response(1, 0x2A, &MOVING);
        let last = raw.len() - 1;
        raw[last] ^= 0xFF;

        let (uart, bus) = MockUart::new();
        bus.borrow_mut().respond(&raw);
        let cxn = Connection::new(uart);
        let motor = cxn.motor(1).unwrap();

        assert!(matches!(
            motor.status(),
            Err(BusError::Frame(FrameError::InvalidChecksum { .. }))
        ));
    }

    #[test]
    fn test_set_id_through_motor() {
        let (uart, bus) = MockUart::new();
        let cxn = Connection::new(uart);
        let mut motor = cxn.motor(1).unwrap();

        motor.set_id(5).unwrap();
        assert_eq!(written(&bus), [0xFA, 0xAF, 0x01, 0x00, 0x04, 0x01, 0x01, 0x05, 0x00]);
        assert_eq!(motor.id(), 5);
        assert_eq!(motor.rom().id(), 5);

        motor.restart().unwrap();
        assert_eq!(written(&bus)[2], 0x05);
    }
}
