//! MAX31856 temperature register decoding
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! The temperature registers hold two's-complement fixed-point values. The cold-junction value is
//! 14 bits wide and left-aligned in 16 bits. The thermocouple value is 19 bits wide and
//! left-aligned in 24 bits. Both are sign-corrected at their own width before scaling.
use crate::{
    fault::{decode_fault_byte, FaultSet},
    register::{COLD_JUNCTION_RESOLUTION, THERMOCOUPLE_RESOLUTION},
};

/// Sign bit of the most significant data byte.
const SIGN: u8 = 1 << 7;

/// Convert the cold-junction register block into degrees celsius.
///
/// # Args
/// * `block` - The four bytes clocked in after the address byte of a cold-junction read.
pub fn decode_cold_junction(block: [u8; 4]) -> f32 {
    // The block is consumed from its tail. The offset byte is not applied.
    let [_, lsb, msb, _offset] = reversed(block);

    let mut raw = (((msb as i32) << 8) | lsb as i32) >> 2;
    if msb & SIGN != 0 {
        raw -= 0x4000;
    }

    raw as f32 * COLD_JUNCTION_RESOLUTION
}

/// Convert the thermocouple register block into degrees celsius.
///
/// # Args
/// * `block` - The four bytes clocked in after the address byte of a thermocouple read.
///
/// # Returns
/// The thermocouple temperature, or every fault the device reported alongside it. The temperature
/// is never produced when a fault is present.
pub fn decode_thermocouple(block: [u8; 4]) -> Result<f32, FaultSet> {
    let [fault, lsb, msb, hsb] = reversed(block);

    let faults = decode_fault_byte(fault);
    if !faults.is_empty() {
        return Err(faults);
    }

    let mut raw = (((hsb as i32) << 16) | ((msb as i32) << 8) | lsb as i32) >> 5;
    if hsb & SIGN != 0 {
        raw -= 0x80000;
    }

    Ok(raw as f32 * THERMOCOUPLE_RESOLUTION)
}

fn reversed(mut block: [u8; 4]) -> [u8; 4] {
    block.reverse();
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::Fault;

    fn cold_junction(msb: u8, lsb: u8) -> [u8; 4] {
        [0x00, msb, lsb, 0x00]
    }

    fn thermocouple(hsb: u8, msb: u8, lsb: u8, fault: u8) -> [u8; 4] {
        [hsb, msb, lsb, fault]
    }

    #[test]
    fn every_cold_junction_value() {
        for msb in 0..=u8::MAX {
            for lsb in 0..=u8::MAX {
                // Arithmetic shift of the 16-bit register drops the two status bits.
                let expected = (i16::from_be_bytes([msb, lsb]) >> 2) as f32 * 0.015625;
                assert_eq!(decode_cold_junction(cold_junction(msb, lsb)), expected);

                if msb & 0x80 == 0 {
                    let unsigned = ((((msb as u32) << 8) | lsb as u32) >> 2) as f32 * 0.015625;
                    assert_eq!(decode_cold_junction(cold_junction(msb, lsb)), unsigned);
                }
            }
        }

        // 25 degrees.
        assert_eq!(decode_cold_junction(cold_junction(0x19, 0x00)), 25.0);
    }

    #[test]
    fn negative_cold_junction() {
        assert_eq!(decode_cold_junction(cold_junction(0xC0, 0x00)), -64.0);
        assert_eq!(decode_cold_junction(cold_junction(0xFF, 0xFC)), -0.015625);
    }

    #[test]
    fn cold_junction_ignores_status_bits() {
        assert_eq!(
            decode_cold_junction(cold_junction(0x19, 0x03)),
            decode_cold_junction(cold_junction(0x19, 0x00))
        );
    }

    #[test]
    fn cold_junction_ignores_offset_byte() {
        assert_eq!(decode_cold_junction([0x7F, 0x19, 0x00, 0x00]), 25.0);
        assert_eq!(decode_cold_junction([0x00, 0x19, 0x00, 0xAA]), 25.0);
    }

    #[test]
    fn thermocouple_sweep() {
        for raw in (0u32..1 << 24).step_by(97).chain([0x7F_FFFF, 0x80_0000, 0xFF_FFFF]) {
            let [_, hsb, msb, lsb] = raw.to_be_bytes();

            // Left-align the 24-bit register in an i32 and shift the sign back down.
            let expected = (((raw << 8) as i32) >> 13) as f32 * 0.0078125;
            assert_eq!(decode_thermocouple(thermocouple(hsb, msb, lsb, 0)), Ok(expected));

            if hsb & 0x80 == 0 {
                let unsigned = (raw >> 5) as f32 * 0.0078125;
                assert_eq!(decode_thermocouple(thermocouple(hsb, msb, lsb, 0)), Ok(unsigned));
            }
        }

        // 25 degrees.
        assert_eq!(decode_thermocouple(thermocouple(0x01, 0x90, 0x00, 0)), Ok(25.0));
    }

    #[test]
    fn negative_thermocouple() {
        // -250 degrees.
        assert_eq!(decode_thermocouple(thermocouple(0xF0, 0x60, 0x00, 0)), Ok(-250.0));
        assert_eq!(decode_thermocouple(thermocouple(0xFF, 0xFF, 0xE0, 0)), Ok(-0.0078125));
    }

    #[test]
    fn thermocouple_ignores_unused_bits() {
        assert_eq!(
            decode_thermocouple(thermocouple(0x01, 0x90, 0x1F, 0)),
            decode_thermocouple(thermocouple(0x01, 0x90, 0x00, 0))
        );
    }

    #[test]
    fn open_circuit_withholds_temperature() {
        let faults = decode_thermocouple(thermocouple(0x01, 0x90, 0x00, 0x01)).unwrap_err();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults.iter().next(), Some(Fault::OpenCircuit));
    }

    #[test]
    fn all_faults_are_reported() {
        let faults = decode_thermocouple(thermocouple(0x01, 0x90, 0x00, 0x81)).unwrap_err();
        assert_eq!(faults.len(), 2);
        assert!(faults.contains(Fault::ColdJunctionRange));
        assert!(faults.contains(Fault::OpenCircuit));
    }
}
