//! Implements a driver for the MAX31856 thermocouple-to-digital converter.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! The device is operated in one-shot mode. Conversions are not polled for completion. Instead,
//! fixed delays from [Timing] are inserted after configuration and between the cold-junction and
//! thermocouple reads.
//!
//! The bus must be configured by the host for [MODE], MSB first, with an active-low chip select
//! and a clock of at most 5 MHz.
#![no_std]
#![deny(warnings)]

pub mod decode;
pub mod error;
pub mod fault;
pub mod register;
pub mod settings;

use embedded_hal::{
    delay::DelayNs,
    spi::{Mode, SpiDevice, MODE_1},
};

pub use error::Error;
pub use fault::{Channel, Fault, FaultSet};
pub use register::ThermocoupleType;
pub use settings::{ChipSelect, ConfigurationError, Settings, Timing};

/// SPI mode supported by the device (CPOL = 0, CPHA = 1).
pub const MODE: Mode = MODE_1;

/// A pair of temperature measurements from one read cycle.
#[derive(serde::Serialize, Debug, Copy, Clone, PartialEq)]
pub struct TemperatureReading {
    /// Linearized, cold-junction compensated thermocouple temperature in degrees celsius.
    pub thermocouple: f32,

    /// Temperature of the on-die reference junction in degrees celsius.
    pub cold_junction: f32,
}

impl core::fmt::Display for TemperatureReading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "tc: {:.2}°C, cj: {:.2}°C",
            self.thermocouple, self.cold_junction
        )
    }
}

/// The thermocouple converter driver.
pub struct Max31856<SPI, DELAY> {
    spi: SPI,
    delay: DELAY,
    settings: Settings,
}

impl<SPI, DELAY> Max31856<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Construct a new driver.
    ///
    /// # Note
    /// No bus transactions are performed. Use [Max31856::configure] to set up the device.
    ///
    /// # Args
    /// * `spi` - The SPI device the converter is attached to.
    /// * `delay` - A means of waiting for conversions to complete.
    /// * `settings` - The driver settings.
    pub fn new(spi: SPI, delay: DELAY, settings: Settings) -> Result<Self, Error<SPI::Error>> {
        settings.check()?;

        Ok(Max31856 {
            spi,
            delay,
            settings,
        })
    }

    /// Get the settings the driver was constructed with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Write the conversion mode and thermocouple type to the device.
    ///
    /// # Note
    /// This blocks for the settle time after the registers are written. Calling it again writes
    /// the same registers and requests a new one-shot conversion.
    pub fn configure(&mut self) -> Result<(), Error<SPI::Error>> {
        for write in register::config_write(self.settings.thermocouple) {
            log::debug!("MAX31856 register write: {:02x?}", write);
            self.spi.write(&write).map_err(Error::Interface)?;
        }

        self.delay.delay_ms(self.settings.timing.settle_ms);

        Ok(())
    }

    fn transfer<const N: usize>(
        &mut self,
        mut buffer: [u8; N],
    ) -> Result<[u8; N], Error<SPI::Error>> {
        let address = buffer[0];

        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(Error::Interface)?;

        log::trace!("MAX31856 read {:#04x}: {:02x?}", address, &buffer[1..]);

        Ok(buffer)
    }

    fn read_block(&mut self, request: [u8; 5]) -> Result<[u8; 4], Error<SPI::Error>> {
        // The first byte is shifted in while the address is shifted out.
        let [_, a, b, c, d] = self.transfer(request)?;
        Ok([a, b, c, d])
    }

    /// Get the cold-junction temperature.
    ///
    /// # Returns
    /// The temperature of the reference junction in degrees celsius.
    pub fn read_cold_junction(&mut self) -> Result<f32, Error<SPI::Error>> {
        let block = self.read_block(register::cold_junction_read_request())?;
        Ok(decode::decode_cold_junction(block))
    }

    /// Get the thermocouple temperature.
    ///
    /// # Returns
    /// The thermocouple temperature in degrees celsius. An [Error::Fault] carrying every active
    /// fault is returned instead if the device flagged any.
    pub fn read_thermocouple(&mut self) -> Result<f32, Error<SPI::Error>> {
        let block = self.read_block(register::thermocouple_read_request())?;
        let temperature = decode::decode_thermocouple(block)?;
        Ok(temperature)
    }

    /// Read both temperatures.
    ///
    /// # Note
    /// The cold junction is read first. The thermocouple is read after the conversion delay.
    /// Either both readings are returned or neither is.
    pub fn read_temperatures(&mut self) -> Result<TemperatureReading, Error<SPI::Error>> {
        let cold_junction = self.read_cold_junction()?;

        self.delay.delay_ms(self.settings.timing.conversion_ms);

        let thermocouple = self.read_thermocouple()?;

        Ok(TemperatureReading {
            thermocouple,
            cold_junction,
        })
    }

    /// Read the fault status register.
    ///
    /// # Returns
    /// The set of active faults. The set is empty if the device is operating nominally.
    pub fn read_fault_status(&mut self) -> Result<FaultSet, Error<SPI::Error>> {
        let [_, status] = self.transfer(register::fault_read_request())?;
        Ok(fault::decode_fault_byte(status))
    }

    /// Release the bus and delay resources.
    pub fn release(self) -> (SPI, DELAY) {
        (self.spi, self.delay)
    }
}
