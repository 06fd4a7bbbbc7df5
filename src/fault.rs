//! MAX31856 fault status interpretation
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use bit_field::BitField;
use enum_iterator::Sequence;
use serde::Serialize;

/// A fault condition reported in the fault status register. The discriminant is the bit position
/// of the condition within the register.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Sequence)]
pub enum Fault {
    ColdJunctionRange = 7,
    ThermocoupleRange = 6,
    ColdJunctionHigh = 5,
    ColdJunctionLow = 4,
    ThermocoupleHigh = 3,
    ThermocoupleLow = 2,
    OverUnderVoltage = 1,
    OpenCircuit = 0,
}

/// The measurement a fault condition concerns.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    ColdJunction,
    Thermocouple,
}

impl Fault {
    /// The bitmask of the fault within the status register.
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Get the measurement that cannot be trusted while this fault is active.
    pub fn channel(self) -> Channel {
        match self {
            Fault::ColdJunctionRange | Fault::ColdJunctionHigh | Fault::ColdJunctionLow => {
                Channel::ColdJunction
            }
            Fault::ThermocoupleRange
            | Fault::ThermocoupleHigh
            | Fault::ThermocoupleLow
            | Fault::OverUnderVoltage
            | Fault::OpenCircuit => Channel::Thermocouple,
        }
    }
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let description = match self {
            Fault::ColdJunctionRange => "cold-junction out of range",
            Fault::ThermocoupleRange => "thermocouple out of range",
            Fault::ColdJunctionHigh => "cold-junction high",
            Fault::ColdJunctionLow => "cold-junction low",
            Fault::ThermocoupleHigh => "thermocouple high",
            Fault::ThermocoupleLow => "thermocouple low",
            Fault::OverUnderVoltage => "over/under-voltage",
            Fault::OpenCircuit => "open circuit",
        };

        f.write_str(description)
    }
}

/// The set of faults reported by a single status byte.
#[derive(Serialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FaultSet(u8);

impl FaultSet {
    /// Interpret a raw fault status register value.
    pub fn from_register(status: u8) -> Self {
        FaultSet(status)
    }

    /// The raw status register value.
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The number of active faults.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(&self, fault: Fault) -> bool {
        self.0.get_bit(fault as usize)
    }

    /// Iterate over every active fault, most significant bit first.
    pub fn iter(&self) -> impl Iterator<Item = Fault> {
        let faults = *self;
        enum_iterator::all::<Fault>().filter(move |fault| faults.contains(*fault))
    }

    /// Check if any active fault concerns the provided measurement.
    pub fn affects(&self, channel: Channel) -> bool {
        self.iter().any(|fault| fault.channel() == channel)
    }
}

impl FromIterator<Fault> for FaultSet {
    fn from_iter<I: IntoIterator<Item = Fault>>(iter: I) -> Self {
        FaultSet(iter.into_iter().fold(0, |status, fault| status | fault.mask()))
    }
}

impl core::fmt::Display for FaultSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("no faults");
        }

        for (index, fault) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", fault)?;
        }

        Ok(())
    }
}

/// Decode a fault status byte into the set of active faults.
pub fn decode_fault_byte(status: u8) -> FaultSet {
    let faults = FaultSet::from_register(status);
    for fault in faults.iter() {
        log::warn!("MAX31856 fault: {}", fault);
    }

    faults
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_status_is_empty() {
        let faults = decode_fault_byte(0);
        assert!(faults.is_empty());
        assert_eq!(faults.iter().count(), 0);
    }

    #[test]
    fn masks_follow_register_layout() {
        assert_eq!(Fault::ColdJunctionRange.mask(), 0x80);
        assert_eq!(Fault::ThermocoupleRange.mask(), 0x40);
        assert_eq!(Fault::ColdJunctionHigh.mask(), 0x20);
        assert_eq!(Fault::ColdJunctionLow.mask(), 0x10);
        assert_eq!(Fault::ThermocoupleHigh.mask(), 0x08);
        assert_eq!(Fault::ThermocoupleLow.mask(), 0x04);
        assert_eq!(Fault::OverUnderVoltage.mask(), 0x02);
        assert_eq!(Fault::OpenCircuit.mask(), 0x01);
    }

    #[test]
    fn every_set_bit_is_reported() {
        let faults = decode_fault_byte(0x81);
        assert_eq!(faults.len(), 2);

        let mut iter = faults.iter();
        assert_eq!(iter.next(), Some(Fault::ColdJunctionRange));
        assert_eq!(iter.next(), Some(Fault::OpenCircuit));
        assert_eq!(iter.next(), None);

        assert_eq!(decode_fault_byte(0xFF).len(), 8);
    }

    #[test]
    fn collect_matches_register() {
        let faults: FaultSet = [Fault::ThermocoupleLow, Fault::OverUnderVoltage]
            .into_iter()
            .collect();
        assert_eq!(faults.bits(), 0x06);
        assert!(faults.contains(Fault::ThermocoupleLow));
        assert!(!faults.contains(Fault::OpenCircuit));
    }

    #[test]
    fn faults_are_attributed_to_channels() {
        let cold_junction = FaultSet::from_register(Fault::ColdJunctionLow.mask());
        assert!(cold_junction.affects(Channel::ColdJunction));
        assert!(!cold_junction.affects(Channel::Thermocouple));

        let open = FaultSet::from_register(Fault::OpenCircuit.mask());
        assert!(open.affects(Channel::Thermocouple));
        assert!(!open.affects(Channel::ColdJunction));
    }
}
