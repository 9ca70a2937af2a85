//! Frame encoding and decoding for the short-packet protocol.
//!
//! Frame format:
//! - HEADER (2 bytes): 0xFA 0xAF for requests, 0xFD 0xDF for responses
//! - ID (1 byte): target id (1-127), 0x00 in broadcast frames
//! - FLAG (1 byte): operation selector, 0x00 in broadcast frames
//! - ADDRESS (1 byte): first register address
//! - LENGTH (1 byte): payload length, or per-target record length in broadcasts
//! - COUNT (1 byte): target count in broadcasts
//! - PAYLOAD (0-240 bytes)
//! - CHECKSUM (1 byte): XOR of ID through the last PAYLOAD byte

use heapless::Vec;

use crate::block::{MemoryBlock, Special};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Header bytes that open every request frame
pub const REQUEST_HEADER: [u8; 2] = [0xFA, 0xAF];

/// Header bytes that open every response frame
pub const RESPONSE_HEADER: [u8; 2] = [0xFD, 0xDF];

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 240;

/// Header, addressing fields and checksum around the payload
pub const FRAME_OVERHEAD: usize = 8;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Maximum number of targets in one broadcast frame
pub const MAX_TARGETS: usize = 32;

/// Offset of the first payload byte
const PAYLOAD_OFFSET: usize = 7;

/// Offset of the first checksummed byte (the id)
const CHECKSUM_OFFSET: usize = 2;

/// Flag byte values for single-target frames
pub mod flag {
    /// Register write
    pub const WRITE: u8 = 0x00;
    /// Register read
    pub const READ: u8 = 0x0F;
    /// Restore factory parameters
    pub const FACTORY_RESET: u8 = 0x10;
    /// Reboot
    pub const RESTART: u8 = 0x20;
    /// Write parameters to non-volatile storage
    pub const SAVE_TO_ROM: u8 = 0x40;
}

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Broadcast addressed to zero targets
    NoTargets,
    /// Broadcast target count exceeds [`MAX_TARGETS`]
    TooManyTargets,
    /// Broadcast payload does not hold `count` records of `length` bytes
    LengthMismatch { expected: usize, actual: usize },
    /// Response is shorter than the frame overhead
    Truncated { len: usize },
    /// Response does not start with [`RESPONSE_HEADER`]
    InvalidHeader,
    /// Checksum mismatch
    InvalidChecksum { expected: u8, actual: u8 },
}

/// How much of a response frame is verified before its payload is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Integrity {
    /// Check the response header and checksum
    #[default]
    Strict,
    /// Only check that the frame is long enough to hold its overhead
    Lenient,
}

/// XOR-fold of the given bytes
///
/// Pass the frame starting at the id byte (index 2) and ending at the last
/// payload byte.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &byte| acc ^ byte)
}

/// An encoded request frame
///
/// Query frames also carry the exact number of response bytes to read,
/// since responses have no length prefix the reader could rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
    response_len: Option<usize>,
}

impl Frame {
    /// Build a single-target frame from raw field values
    pub fn single(
        id: u8,
        flag: u8,
        address: u8,
        length: u8,
        count: u8,
        payload: &[u8],
    ) -> Result<Self, FrameError> {
        let bytes = assemble([id, flag, address, length, count], payload)?;
        Ok(Self {
            bytes,
            response_len: None,
        })
    }

    /// Build a broadcast frame carrying `count` records of `length` bytes
    ///
    /// Each record is the target id followed by its value bytes, so `length`
    /// counts the id byte too.
    pub fn broadcast(address: u8, length: u8, count: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if count == 0 {
            return Err(FrameError::NoTargets);
        }
        if count as usize > MAX_TARGETS {
            return Err(FrameError::TooManyTargets);
        }
        let expected = count as usize * length as usize;
        if payload.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: payload.len(),
            });
        }

        let bytes = assemble([0x00, 0x00, address, length, count], payload)?;
        Ok(Self {
            bytes,
            response_len: None,
        })
    }

    /// Register write command
    pub fn write(id: u8, address: u8, data: &[u8]) -> Result<Self, FrameError> {
        if data.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }
        Self::single(id, flag::WRITE, address, data.len() as u8, 0x01, data)
    }

    /// Register read query for `length` bytes starting at `address`
    pub fn read(id: u8, address: u8, length: u8) -> Result<Self, FrameError> {
        Ok(Self {
            bytes: assemble([id, flag::READ, address, length, 0x00], &[])?,
            response_len: Some(FRAME_OVERHEAD + length as usize),
        })
    }

    /// Special control command
    pub fn special(id: u8, command: Special) -> Result<Self, FrameError> {
        Self::single(id, command.flag(), 0xFF, command.length(), 0x00, &[])
    }

    /// Grouped memory-block query
    pub fn memory_block(id: u8, block: MemoryBlock) -> Result<Self, FrameError> {
        Ok(Self {
            bytes: assemble([id, block.flag(), 0x00, 0x00, 0x01], &[])?,
            response_len: Some(FRAME_OVERHEAD + block.payload_len()),
        })
    }

    /// Encoded bytes, ready for the transport
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Exact length of the expected response, for query frames
    pub fn response_len(&self) -> Option<usize> {
        self.response_len
    }

    /// Returns true if a response is expected
    pub fn is_query(&self) -> bool {
        self.response_len.is_some()
    }

    /// Target id byte (0 for broadcast frames)
    pub fn target_id(&self) -> u8 {
        self.bytes[CHECKSUM_OFFSET]
    }

    /// Payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..self.bytes.len() - 1]
    }
}

/// Header, fields, payload and checksum
fn assemble(fields: [u8; 5], payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut bytes = Vec::new();
    bytes
        .extend_from_slice(&REQUEST_HEADER)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    bytes
        .extend_from_slice(&fields)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    bytes
        .extend_from_slice(payload)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    let sum = checksum(&bytes[CHECKSUM_OFFSET..]);
    bytes.push(sum).map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(bytes)
}

/// Strip the frame overhead from a raw response
///
/// Only the length is checked; use [`ReturnFrame::parse`] to also verify the
/// header and checksum.
pub fn decode_return(raw: &[u8]) -> Result<&[u8], FrameError> {
    if raw.len() < FRAME_OVERHEAD {
        return Err(FrameError::Truncated { len: raw.len() });
    }
    Ok(&raw[PAYLOAD_OFFSET..raw.len() - 1])
}

/// A parsed response frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnFrame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl ReturnFrame {
    /// Parse a complete response
    pub fn parse(raw: &[u8], integrity: Integrity) -> Result<Self, FrameError> {
        decode_return(raw)?;

        if integrity == Integrity::Strict {
            if raw[..2] != RESPONSE_HEADER {
                return Err(FrameError::InvalidHeader);
            }
            let last = raw.len() - 1;
            let expected = checksum(&raw[CHECKSUM_OFFSET..last]);
            if raw[last] != expected {
                return Err(FrameError::InvalidChecksum {
                    expected,
                    actual: raw[last],
                });
            }
        }

        let bytes = Vec::from_slice(raw).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { bytes })
    }

    /// Id of the responding actuator
    pub fn id(&self) -> u8 {
        self.bytes[CHECKSUM_OFFSET]
    }

    /// Requested data
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..self.bytes.len() - 1]
    }

    /// Raw response bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
