//! Error type definitions for the MAX31856 driver
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use crate::{fault::FaultSet, settings::ConfigurationError};

/// An enumeration of possible errors with the device.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error<E> {
    /// The SPI transport failed.
    Interface(E),

    /// The device flagged the thermocouple reading as unreliable.
    Fault(FaultSet),

    Configuration(ConfigurationError),
}

impl<E> From<FaultSet> for Error<E> {
    fn from(faults: FaultSet) -> Self {
        Error::Fault(faults)
    }
}

impl<E> From<ConfigurationError> for Error<E> {
    fn from(err: ConfigurationError) -> Self {
        Error::Configuration(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(err) => write!(f, "SPI interface error: {:?}", err),
            Error::Fault(faults) => write!(f, "device fault: {}", faults),
            Error::Configuration(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}
