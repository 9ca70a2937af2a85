//! Value validation errors

/// Errors raised while encoding or decoding register values
///
/// Encoding errors are raised before any frame is built, so a rejected
/// value never reaches the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueError {
    /// Value outside the register's inclusive range
    OutOfRange { register: &'static str },
    /// Symbolic value not in the permitted set
    UnknownKey,
    /// Byte read back from the actuator has no symbolic meaning
    UnknownCode { register: &'static str, code: u8 },
    /// Wrong number of bytes for the register
    WrongWidth {
        register: &'static str,
        expected: usize,
        actual: usize,
    },
}
