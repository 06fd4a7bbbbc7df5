//! MAX31856 register map and SPI command encoding
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! Every transaction with the device starts with a register address byte. Bit 7 of that byte
//! selects a write when set and a read when clear. Reads are clocked out with `0xFF` filler bytes
//! while the device auto-increments through consecutive registers.
use bit_field::BitField;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use crate::settings::ConfigurationError;

/// Bit set in the address byte of a register write.
pub const WRITE_SELECT: u8 = 1 << 7;

/// Byte clocked out while the device shifts register contents back.
pub const FILLER: u8 = 0xFF;

/// Degrees celsius represented by one LSB of the cold-junction temperature registers.
pub const COLD_JUNCTION_RESOLUTION: f32 = 0.015625;

/// Degrees celsius represented by one LSB of the linearized thermocouple temperature registers.
pub const THERMOCOUPLE_RESOLUTION: f32 = 0.0078125;

/// Registers accessed by the driver.
#[doc(hidden)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Register {
    /// Conversion mode, fault handling and noise filter configuration.
    Cr0 = 0x00,

    /// Averaging and thermocouple type configuration.
    Cr1 = 0x01,

    /// Start of the cold-junction block.
    ColdJunction = 0x08,

    /// Start of the linearized thermocouple temperature block, followed by the fault status.
    Thermocouple = 0x0C,

    /// Fault status register.
    FaultStatus = 0x0F,
}

impl Register {
    /// Address byte used to read the register.
    fn read_address(self) -> u8 {
        self as u8
    }

    /// Address byte used to write the register.
    fn write_address(self) -> u8 {
        self as u8 | WRITE_SELECT
    }
}

/// The thermocouple types supported by the converter. The discriminant is the value of the type
/// field in CR1.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Sequence)]
#[repr(u8)]
pub enum ThermocoupleType {
    B = 0x00,
    E = 0x01,
    J = 0x02,
    K = 0x03,
    N = 0x04,
    R = 0x05,
    S = 0x06,
    T = 0x07,
}

impl ThermocoupleType {
    /// The 4-bit CR1 type code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a thermocouple type from its letter designation (case insensitive).
    pub fn from_letter(letter: char) -> Result<Self, ConfigurationError> {
        enum_iterator::all::<ThermocoupleType>()
            .find(|kind| kind.letter().eq_ignore_ascii_case(&letter))
            .ok_or(ConfigurationError::ThermocoupleType(
                u8::try_from(letter).unwrap_or(u8::MAX),
            ))
    }

    /// The letter designation of the thermocouple type.
    pub fn letter(self) -> char {
        match self {
            ThermocoupleType::B => 'B',
            ThermocoupleType::E => 'E',
            ThermocoupleType::J => 'J',
            ThermocoupleType::K => 'K',
            ThermocoupleType::N => 'N',
            ThermocoupleType::R => 'R',
            ThermocoupleType::S => 'S',
            ThermocoupleType::T => 'T',
        }
    }
}

impl Default for ThermocoupleType {
    fn default() -> Self {
        ThermocoupleType::K
    }
}

impl TryFrom<u8> for ThermocoupleType {
    type Error = ConfigurationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        for kind in enum_iterator::all::<ThermocoupleType>() {
            if kind as u8 == code {
                return Ok(kind);
            }
        }

        Err(ConfigurationError::ThermocoupleType(code))
    }
}

impl core::fmt::Display for ThermocoupleType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The CR0 value written during configuration.
///
/// # Note
/// Normally-off conversion mode with a one-shot conversion requested, open-circuit detection
/// disabled, cold-junction sensor enabled, comparator fault mode, fault status clear and the 60Hz
/// noise filter. This evaluates to `0b0100_0010`.
pub fn conversion_mode() -> u8 {
    let mut cr0 = 0u8;

    // One-shot conversion.
    cr0.set_bit(6, true);

    // Clear any latched fault status.
    cr0.set_bit(1, true);

    // 60Hz filter select.
    cr0.set_bit(0, false);

    cr0
}

/// Encode the two register writes that configure the device.
///
/// # Args
/// * `kind` - The thermocouple type connected to the device.
///
/// # Returns
/// The CR0 and CR1 writes, in the order they must be sent. Each pair is one bus transaction.
pub fn config_write(kind: ThermocoupleType) -> [[u8; 2]; 2] {
    [
        [Register::Cr0.write_address(), conversion_mode()],
        [Register::Cr1.write_address(), kind.code()],
    ]
}

/// Recover the thermocouple type from an encoded configuration.
///
/// # Args
/// * `writes` - The register writes, as produced by [config_write].
pub fn decode_config_write(writes: &[[u8; 2]; 2]) -> Result<ThermocoupleType, ConfigurationError> {
    let [_, cr1] = writes;
    if cr1[0] != Register::Cr1.write_address() {
        return Err(ConfigurationError::ThermocoupleType(cr1[0]));
    }

    ThermocoupleType::try_from(cr1[1].get_bits(0..4))
}

fn read_request<const N: usize>(register: Register) -> [u8; N] {
    let mut request = [FILLER; N];
    request[0] = register.read_address();
    request
}

/// The request that clocks out the cold-junction block.
pub fn cold_junction_read_request() -> [u8; 5] {
    read_request(Register::ColdJunction)
}

/// The request that clocks out the thermocouple temperature block and fault status.
pub fn thermocouple_read_request() -> [u8; 5] {
    read_request(Register::Thermocouple)
}

/// The request that clocks out the fault status register.
pub fn fault_read_request() -> [u8; 2] {
    read_request(Register::FaultStatus)
}
