//! Broadcast commands and ordered reads over several actuators
//!
//! Writes go out as one broadcast frame carrying an `(id, value)` record per
//! member, so every member acts on the same frame. Reads have no broadcast
//! form; they are issued one member at a time in member order.

use heapless::Vec;
use servolink_core::registers::{GOAL_POSITION, GOAL_TIME, TORQUE_MODE};
use servolink_core::TorqueMode;
use servolink_hal::Uart;
use servolink_protocol::{Frame, MAX_PAYLOAD_SIZE, MAX_TARGETS};

use crate::connection::Connection;
use crate::error::BusError;
use crate::motor::Motor;

/// Record length of a torque mode write: id + mode
const TORQUE_RECORD: u8 = 2;
/// Record length of a position write: id + position
const POSITION_RECORD: u8 = 3;
/// Record length of a timed position write: id + position + time
const TIMED_POSITION_RECORD: u8 = 5;

/// Ordered set of actuators sharing one connection
pub struct MotorGroup<'m, 'c, U> {
    cxn: &'c Connection<U>,
    motors: Vec<&'m Motor<'c, U>, MAX_TARGETS>,
}

impl<'m, 'c, U: Uart> MotorGroup<'m, 'c, U> {
    pub fn new(motors: &[&'m Motor<'c, U>]) -> Result<Self, BusError<U::Error>> {
        let first = motors.first().ok_or(BusError::EmptyGroup)?;
        let cxn = first.connection();
        if motors
            .iter()
            .any(|m| !core::ptr::eq(m.connection(), cxn))
        {
            return Err(BusError::MixedConnections);
        }

        let motors = Vec::from_slice(motors).map_err(|_| BusError::TooManyTargets)?;
        Ok(Self { cxn, motors })
    }

    pub fn len(&self) -> usize {
        self.motors.len()
    }

    /// Always false; a group has at least one member
    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }

    /// Member ids in member order
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.motors.iter().map(|m| m.id())
    }

    /// Set one torque mode per member
    pub fn set_torque_modes(&self, modes: &[TorqueMode]) -> Result<(), BusError<U::Error>> {
        self.check_count(modes.len())?;

        let mut payload: Vec<u8, MAX_PAYLOAD_SIZE> = Vec::new();
        for (id, mode) in self.ids().zip(modes) {
            push(&mut payload, &[id])?;
            push(&mut payload, TORQUE_MODE.encode(*mode)?.as_bytes())?;
        }
        self.broadcast(TORQUE_MODE.address(), TORQUE_RECORD, &payload)
    }

    /// Turn torque on or off for every member
    pub fn set_torque_enabled(&self, enabled: bool) -> Result<(), BusError<U::Error>> {
        let modes: Vec<TorqueMode, MAX_TARGETS> = self
            .motors
            .iter()
            .map(|_| TorqueMode::from_enabled(enabled))
            .collect();
        self.set_torque_modes(&modes)
    }

    /// Move every member to its angle, optionally over its own duration
    ///
    /// All values are validated before the frame is sent.
    pub fn rotate(
        &self,
        degrees: &[f32],
        durations_ms: Option<&[u32]>,
    ) -> Result<(), BusError<U::Error>> {
        self.check_count(degrees.len())?;
        if let Some(durations) = durations_ms {
            self.check_count(durations.len())?;
        }

        let mut payload: Vec<u8, MAX_PAYLOAD_SIZE> = Vec::new();
        for (i, (id, degree)) in self.ids().zip(degrees).enumerate() {
            push(&mut payload, &[id])?;
            push(&mut payload, GOAL_POSITION.encode(*degree)?.as_bytes())?;
            if let Some(durations) = durations_ms {
                push(&mut payload, GOAL_TIME.encode(durations[i])?.as_bytes())?;
            }
        }

        let record = match durations_ms {
            Some(_) => TIMED_POSITION_RECORD,
            None => POSITION_RECORD,
        };
        self.broadcast(GOAL_POSITION.address(), record, &payload)
    }

    pub fn set_angles(&self, degrees: &[f32]) -> Result<(), BusError<U::Error>> {
        self.rotate(degrees, None)
    }

    /// Torque mode of each member, one query per member
    pub fn torque_modes(&self) -> Result<Vec<TorqueMode, MAX_TARGETS>, BusError<U::Error>> {
        self.collect(|m| m.torque_mode())
    }

    pub fn torque_enabled(&self) -> Result<Vec<bool, MAX_TARGETS>, BusError<U::Error>> {
        self.collect(|m| m.torque_enabled())
    }

    /// Present angle of each member, one status query per member
    pub fn angles(&self) -> Result<Vec<f32, MAX_TARGETS>, BusError<U::Error>> {
        self.collect(|m| m.angle())
    }

    fn check_count(&self, actual: usize) -> Result<(), BusError<U::Error>> {
        if actual != self.motors.len() {
            return Err(BusError::CountMismatch {
                expected: self.motors.len(),
                actual,
            });
        }
        Ok(())
    }

    fn broadcast(&self, address: u8, record: u8, payload: &[u8]) -> Result<(), BusError<U::Error>> {
        let frame = Frame::broadcast(address, record, self.motors.len() as u8, payload)?;
        self.cxn.command(&frame)
    }

    fn collect<T>(
        &self,
        mut read: impl FnMut(&Motor<'c, U>) -> Result<T, BusError<U::Error>>,
    ) -> Result<Vec<T, MAX_TARGETS>, BusError<U::Error>> {
        let mut values = Vec::new();
        for motor in &self.motors {
            let value = read(motor)?;
            values
                .push(value)
                .map_err(|_| BusError::TooManyTargets)?;
        }
        Ok(values)
    }
}

fn push<E>(payload: &mut Vec<u8, MAX_PAYLOAD_SIZE>, bytes: &[u8]) -> Result<(), BusError<E>> {
    payload
        .extend_from_slice(bytes)
        .map_err(|_| BusError::TooManyTargets)
}
