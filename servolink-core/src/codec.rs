//! Register value codecs
//!
//! A codec fixes how many bytes a register occupies and how a typed value
//! maps onto them. Multi-byte values are little-endian unless noted.
//! Encoding validates the value first and never produces bytes for a
//! rejected value.

use core::marker::PhantomData;

use crate::params::WireCode;

/// Widest register value in bytes
pub const MAX_VALUE_WIDTH: usize = 2;

/// Reason a codec rejected a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Value outside the codec's inclusive range
    OutOfRange,
    /// Byte with no symbolic meaning
    UnknownCode(u8),
}

/// Typed view of a register's bytes
pub trait Codec {
    /// Decoded value type
    type Value: Copy;

    /// Number of bytes on the wire
    fn width(&self) -> usize;

    /// Validate `value` and write it into `out`
    ///
    /// `out` is exactly [`Codec::width`] bytes long.
    fn encode(&self, value: Self::Value, out: &mut [u8]) -> Result<(), Fault>;

    /// Decode exactly [`Codec::width`] bytes
    fn decode(&self, bytes: &[u8]) -> Result<Self::Value, Fault>;
}

/// Encoded register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_VALUE_WIDTH],
    len: usize,
}

impl Encoded {
    pub(crate) fn new(bytes: [u8; MAX_VALUE_WIDTH], len: usize) -> Self {
        Self { bytes, len }
    }

    /// Bytes to place in a frame payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

fn check_range<T: PartialOrd>(value: T, min: T, max: T) -> Result<(), Fault> {
    // NaN fails both comparisons
    if min <= value && value <= max {
        Ok(())
    } else {
        Err(Fault::OutOfRange)
    }
}

/// Scale and round half away from zero
fn scale_round(value: f32, scale: f32) -> i32 {
    let scaled = value * scale;
    if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    }
}

/// Single byte, passed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raw;

impl Codec for Raw {
    type Value = u8;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: u8, out: &mut [u8]) -> Result<(), Fault> {
        out[0] = value;
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u8, Fault> {
        Ok(bytes[0])
    }
}

/// Single byte with an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounded {
    pub min: u8,
    pub max: u8,
}

impl Bounded {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

impl Codec for Bounded {
    type Value = u8;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: u8, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, self.min, self.max)?;
        out[0] = value;
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u8, Fault> {
        Ok(bytes[0])
    }
}

/// Boolean byte: zero is false, anything else true
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch;

impl Codec for Switch {
    type Value = bool;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: bool, out: &mut [u8]) -> Result<(), Fault> {
        out[0] = value as u8;
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<bool, Fault> {
        Ok(bytes[0] != 0)
    }
}

/// Angle in degrees, stored as signed tenths of a degree
///
/// Encoding rounds to the nearest tenth, so any multiple of 0.1 within the
/// range survives a round trip exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degrees {
    pub min: f32,
    pub max: f32,
}

impl Degrees {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl Codec for Degrees {
    type Value = f32;

    fn width(&self) -> usize {
        2
    }

    fn encode(&self, value: f32, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, self.min, self.max)?;
        let tenths = scale_round(value, 10.0) as i16;
        out.copy_from_slice(&tenths.to_le_bytes());
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<f32, Fault> {
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 10.0)
    }
}

/// Duration in milliseconds, stored as 10 ms ticks
///
/// Input is rounded down to the nearest 10 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticks10ms {
    pub width: usize,
    pub max: u32,
}

impl Ticks10ms {
    pub const fn new(width: usize, max: u32) -> Self {
        Self { width, max }
    }
}

impl Codec for Ticks10ms {
    type Value = u32;

    fn width(&self) -> usize {
        self.width
    }

    fn encode(&self, value: u32, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, 0, self.max)?;
        let ticks = value / 10;
        match self.width {
            1 => out[0] = u8::try_from(ticks).map_err(|_| Fault::OutOfRange)?,
            _ => {
                let ticks = u16::try_from(ticks).map_err(|_| Fault::OutOfRange)?;
                out.copy_from_slice(&ticks.to_le_bytes());
            }
        }
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u32, Fault> {
        let ticks = match self.width {
            1 => bytes[0] as u32,
            _ => u16::from_le_bytes([bytes[0], bytes[1]]) as u32,
        };
        Ok(ticks * 10)
    }
}

/// Response delay in microseconds: `raw * 50 + 100`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnDelay;

impl ReturnDelay {
    /// Shortest delay (raw 0)
    pub const MIN_US: u16 = 100;
    /// Longest delay (raw 255)
    pub const MAX_US: u16 = 12_850;
    /// Microseconds per raw step
    const STEP_US: u16 = 50;
}

impl Codec for ReturnDelay {
    type Value = u16;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: u16, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, Self::MIN_US, Self::MAX_US)?;
        out[0] = ((value - Self::MIN_US) / Self::STEP_US) as u8;
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u16, Fault> {
        Ok(bytes[0] as u16 * Self::STEP_US + Self::MIN_US)
    }
}

/// Unsigned tenths in a single byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tenths {
    pub max: f32,
}

impl Tenths {
    pub const fn new(max: f32) -> Self {
        Self { max }
    }
}

impl Codec for Tenths {
    type Value = f32;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: f32, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, 0.0, self.max)?;
        out[0] = u8::try_from(scale_round(value, 10.0)).map_err(|_| Fault::OutOfRange)?;
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<f32, Fault> {
        Ok(bytes[0] as f32 / 10.0)
    }
}

/// Closed enumeration stored as its wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enumerated<T>(PhantomData<T>);

impl<T> Enumerated<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Enumerated<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WireCode> Codec for Enumerated<T> {
    type Value = T;

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, value: T, out: &mut [u8]) -> Result<(), Fault> {
        out[0] = value.to_byte();
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, Fault> {
        T::from_byte(bytes[0]).ok_or(Fault::UnknownCode(bytes[0]))
    }
}

/// Two raw bytes exposed high byte first
///
/// The wire order is low byte first, so both directions swap the bytes.
/// Used where the scale depends on the actuator model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighLow;

impl Codec for HighLow {
    type Value = [u8; 2];

    fn width(&self) -> usize {
        2
    }

    fn encode(&self, value: [u8; 2], out: &mut [u8]) -> Result<(), Fault> {
        out[0] = value[1];
        out[1] = value[0];
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<[u8; 2], Fault> {
        Ok([bytes[1], bytes[0]])
    }
}

/// Signed 16-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signed;

impl Codec for Signed {
    type Value = i16;

    fn width(&self) -> usize {
        2
    }

    fn encode(&self, value: i16, out: &mut [u8]) -> Result<(), Fault> {
        out.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<i16, Fault> {
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

/// Signed hundredths in 16 bits (supply voltage)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centi;

impl Codec for Centi {
    type Value = f32;

    fn width(&self) -> usize {
        2
    }

    fn encode(&self, value: f32, out: &mut [u8]) -> Result<(), Fault> {
        check_range(value, i16::MIN as f32 / 100.0, i16::MAX as f32 / 100.0)?;
        let hundredths = scale_round(value, 100.0) as i16;
        out.copy_from_slice(&hundredths.to_le_bytes());
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<f32, Fault> {
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 100.0)
    }
}
