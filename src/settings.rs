//! MAX31856 driver settings
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use crate::register::ThermocoupleType;

/// The maximum SPI clock frequency supported by the device.
pub const MAX_CLOCK_HZ: u32 = 5_000_000;

/// The shortest delay that allows a one-shot conversion to complete.
pub const MIN_DELAY_MS: u32 = 200;

/// Indicates settings that cannot be used to drive the device.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The value does not name one of the supported thermocouple types.
    ThermocoupleType(u8),
    ChipSelect(u8),
    ClockRate(u32),

    /// A conversion delay shorter than [MIN_DELAY_MS].
    Timing(u32),
}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigurationError::ThermocoupleType(code) => {
                write!(f, "unknown thermocouple type {:#04x}", code)
            }
            ConfigurationError::ChipSelect(index) => write!(f, "unknown chip select {}", index),
            ConfigurationError::ClockRate(hz) => {
                write!(f, "clock rate {} Hz outside 1..={} Hz", hz, MAX_CLOCK_HZ)
            }
            ConfigurationError::Timing(ms) => {
                write!(f, "delay of {} ms is below {} ms", ms, MIN_DELAY_MS)
            }
        }
    }
}

/// The chip-select line the host asserts for the device. The discriminant is the index used to
/// select it.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Sequence)]
#[repr(u8)]
pub enum ChipSelect {
    Cs0 = 0,
    Cs1 = 1,
    Both = 2,
    None = 3,
}

impl Default for ChipSelect {
    fn default() -> Self {
        ChipSelect::Cs0
    }
}

impl TryFrom<u8> for ChipSelect {
    type Error = ConfigurationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        enum_iterator::all::<ChipSelect>()
            .find(|chip| *chip as u8 == index)
            .ok_or(ConfigurationError::ChipSelect(index))
    }
}

/// Fixed delays that stand in for a conversion-complete indication.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timing {
    /// Milliseconds to wait after writing the configuration before the first read.
    pub settle_ms: u32,

    /// Milliseconds to wait between the cold-junction read and the thermocouple read.
    pub conversion_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        // A one-shot conversion completes in less than 150ms with the 60Hz filter.
        Self {
            settle_ms: 200,
            conversion_ms: 200,
        }
    }
}

/// Represents the configuration of a single MAX31856.
///
/// # Note
/// The chip select and clock rate are applied by the host when it sets up the bus. They are kept
/// here so the driver can validate them and report them back.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub thermocouple: ThermocoupleType,
    pub chip_select: ChipSelect,
    pub clock_hz: u32,
    pub timing: Timing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thermocouple: ThermocoupleType::K,
            chip_select: ChipSelect::Cs0,
            clock_hz: 2_000_000,
            timing: Timing::default(),
        }
    }
}

impl Settings {
    /// Construct settings from raw values.
    ///
    /// # Args
    /// * `thermocouple` - The CR1 type code of the connected thermocouple.
    /// * `chip_select` - The index of the chip-select line.
    /// * `clock_hz` - The SPI clock frequency.
    pub fn from_raw(
        thermocouple: u8,
        chip_select: u8,
        clock_hz: u32,
    ) -> Result<Self, ConfigurationError> {
        let settings = Settings {
            thermocouple: ThermocoupleType::try_from(thermocouple)?,
            chip_select: ChipSelect::try_from(chip_select)?,
            clock_hz,
            timing: Timing::default(),
        };

        settings.check()?;
        Ok(settings)
    }

    /// Check that the settings can be used to drive the device.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        if self.clock_hz == 0 || self.clock_hz > MAX_CLOCK_HZ {
            return Err(ConfigurationError::ClockRate(self.clock_hz));
        }

        for delay_ms in [self.timing.settle_ms, self.timing.conversion_ms] {
            if delay_ms < MIN_DELAY_MS {
                return Err(ConfigurationError::Timing(delay_ms));
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(err) => {
                log::error!("Invalid MAX31856 settings: {}", err);
                false
            }
        }
    }
}
