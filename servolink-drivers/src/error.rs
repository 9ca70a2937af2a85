//! Bus operation errors

use servolink_core::ValueError;
use servolink_protocol::FrameError;

/// Errors from actuator and group operations
///
/// `E` is the transport's error type; it is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// Transport write or read failed
    Transport(E),
    /// Frame could not be built, or the response was malformed
    Frame(FrameError),
    /// Value rejected before transmission, or undecodable response
    Value(ValueError),
    /// A command frame was passed where a query was expected
    NoResponseExpected,
    /// Group has no members
    EmptyGroup,
    /// Group exceeds the broadcast target limit
    TooManyTargets,
    /// Group members are on different connections
    MixedConnections,
    /// Per-member argument list does not match the group size
    CountMismatch { expected: usize, actual: usize },
}

impl<E> From<FrameError> for BusError<E> {
    fn from(e: FrameError) -> Self {
        BusError::Frame(e)
    }
}

impl<E> From<ValueError> for BusError<E> {
    fn from(e: ValueError) -> Self {
        BusError::Value(e)
    }
}
