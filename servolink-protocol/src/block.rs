//! Special commands and grouped memory-block queries
//!
//! Both are single-target frames without payload whose meaning lives in
//! the flag byte rather than in the register address.

use crate::frame::flag;

/// Payload-less control commands addressed to `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Special {
    /// Copy the volatile parameters into non-volatile storage
    SaveToRom,
    /// Reboot the actuator
    Restart,
    /// Restore every ROM parameter to its factory value
    FactoryReset,
}

impl Special {
    /// Flag byte selecting this command
    pub fn flag(self) -> u8 {
        match self {
            Special::SaveToRom => flag::SAVE_TO_ROM,
            Special::Restart => flag::RESTART,
            Special::FactoryReset => flag::FACTORY_RESET,
        }
    }

    /// Length byte sent with this command
    pub fn length(self) -> u8 {
        match self {
            Special::FactoryReset => 0xFF,
            Special::SaveToRom | Special::Restart => 0x00,
        }
    }
}

/// Grouped memory-block query selectors
///
/// Each selector returns a fixed slice of the actuator memory map. Only
/// [`MemoryBlock::Status`] backs a typed accessor; the rest are kept so the
/// response length of any selector is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryBlock {
    /// Addresses 0-29
    Rom0To29,
    /// Addresses 30-59
    Ram30To59,
    /// Addresses 20-29
    Rom20To29,
    /// Addresses 42-59: present position, time, speed, load, temperature, voltage
    Status,
    /// Addresses 30-41
    Ram30To41,
    /// Addresses 60-127
    Ram60To127,
}

impl MemoryBlock {
    /// Flag byte selecting this block
    pub fn flag(self) -> u8 {
        match self {
            MemoryBlock::Rom0To29 => 0x03,
            MemoryBlock::Ram30To59 => 0x05,
            MemoryBlock::Rom20To29 => 0x07,
            MemoryBlock::Status => 0x09,
            MemoryBlock::Ram30To41 => 0x0B,
            MemoryBlock::Ram60To127 => 0x0D,
        }
    }

    /// Parse a selector from its flag byte
    pub fn from_flag(byte: u8) -> Option<Self> {
        match byte {
            0x03 => Some(MemoryBlock::Rom0To29),
            0x05 => Some(MemoryBlock::Ram30To59),
            0x07 => Some(MemoryBlock::Rom20To29),
            0x09 => Some(MemoryBlock::Status),
            0x0B => Some(MemoryBlock::Ram30To41),
            0x0D => Some(MemoryBlock::Ram60To127),
            _ => None,
        }
    }

    /// Number of payload bytes in the response
    pub fn payload_len(self) -> usize {
        match self {
            MemoryBlock::Rom0To29 | MemoryBlock::Ram30To59 => 30,
            MemoryBlock::Rom20To29 => 10,
            MemoryBlock::Status => 18,
            MemoryBlock::Ram30To41 => 12,
            MemoryBlock::Ram60To127 => 67,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_flag_roundtrip() {
        for block in [
            MemoryBlock::Rom0To29,
            MemoryBlock::Ram30To59,
            MemoryBlock::Rom20To29,
            MemoryBlock::Status,
            MemoryBlock::Ram30To41,
            MemoryBlock::Ram60To127,
        ] {
            assert_eq!(MemoryBlock::from_flag(block.flag()), Some(block));
        }
        assert_eq!(MemoryBlock::from_flag(0x0F), None);
    }

    #[test]
    fn test_status_block_len() {
        assert_eq!(MemoryBlock::Status.payload_len(), 18);
        assert_eq!(MemoryBlock::Ram60To127.payload_len(), 67);
    }

    #[test]
    fn test_special_codes() {
        assert_eq!(Special::SaveToRom.flag(), 0x40);
        assert_eq!(Special::Restart.flag(), 0x20);
        assert_eq!(Special::FactoryReset.flag(), 0x10);
        assert_eq!(Special::FactoryReset.length(), 0xFF);
        assert_eq!(Special::Restart.length(), 0x00);
    }
}
