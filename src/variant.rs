//! Capability descriptors of the individual ADS1x15 family members.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

/// Output resolution of a converter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolution {
    Bits12,
    Bits16,
}

impl Resolution {
    /// The positive full-scale output code.
    ///
    /// # Note
    /// The positive full-scale code is used as the divisor for negative samples as well, so the
    /// transfer function is slightly asymmetric.
    pub fn full_scale_code(&self) -> f32 {
        match self {
            Resolution::Bits12 => 2047.0,
            Resolution::Bits16 => 32767.0,
        }
    }

    /// The number of bits a 12-bit sample is left-justified by in the conversion register.
    pub fn bit_shift(&self) -> u8 {
        match self {
            Resolution::Bits12 => 4,
            Resolution::Bits16 => 0,
        }
    }
}

/// The fixed features of a converter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Capabilities {
    /// The number of single-ended inputs.
    pub channels: u8,
    pub resolution: Resolution,
    /// The device has a programmable gain amplifier.
    pub gain: bool,
    /// The device has the ALERT/RDY comparator.
    pub comparator: bool,
    /// The time to wait for a result in continuous mode.
    pub conversion_delay_ms: u32,
}

/// A member of the ADS1x15 family.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Variant {
    Ads1013,
    Ads1014,
    Ads1015,
    Ads1113,
    Ads1114,
    Ads1115,
}

// Samples per second of data rate codes 0 through 7.
const ADS101X_RATES: [u16; 8] = [128, 250, 490, 920, 1600, 2400, 3300, 3300];
const ADS111X_RATES: [u16; 8] = [8, 16, 32, 64, 128, 250, 475, 860];

impl Variant {
    /// Get the capabilities of the device.
    pub fn capabilities(&self) -> Capabilities {
        let (channels, resolution, features) = match self {
            Variant::Ads1013 => (1, Resolution::Bits12, false),
            Variant::Ads1014 => (1, Resolution::Bits12, true),
            Variant::Ads1015 => (4, Resolution::Bits12, true),
            Variant::Ads1113 => (1, Resolution::Bits16, false),
            Variant::Ads1114 => (1, Resolution::Bits16, true),
            Variant::Ads1115 => (4, Resolution::Bits16, true),
        };

        Capabilities {
            channels,
            resolution,
            gain: features,
            comparator: features,
            conversion_delay_ms: match resolution {
                Resolution::Bits12 => 1,
                Resolution::Bits16 => 8,
            },
        }
    }

    /// Get the sample rate of a data rate code.
    ///
    /// # Args
    /// * `code` - The data rate code, 0 through 7.
    ///
    /// # Returns
    /// The conversion rate in samples per second.
    pub fn samples_per_second(&self, code: u8) -> u16 {
        let rates = match self.capabilities().resolution {
            Resolution::Bits12 => &ADS101X_RATES,
            Resolution::Bits16 => &ADS111X_RATES,
        };

        rates[(code & 0b111) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_bit_parts() {
        let caps = Variant::Ads1015.capabilities();
        assert_eq!(caps.channels, 4);
        assert_eq!(caps.resolution.bit_shift(), 4);
        assert_eq!(caps.conversion_delay_ms, 1);
        assert!(caps.gain && caps.comparator);

        let caps = Variant::Ads1013.capabilities();
        assert_eq!(caps.channels, 1);
        assert!(!caps.gain && !caps.comparator);
    }

    #[test]
    fn sixteen_bit_parts() {
        let caps = Variant::Ads1114.capabilities();
        assert_eq!(caps.channels, 1);
        assert_eq!(caps.resolution.bit_shift(), 0);
        assert_eq!(caps.conversion_delay_ms, 8);
        assert!(caps.gain);
    }

    #[test]
    fn sample_rates() {
        assert_eq!(Variant::Ads1015.samples_per_second(4), 1600);
        assert_eq!(Variant::Ads1115.samples_per_second(4), 128);
        assert_eq!(Variant::Ads1115.samples_per_second(7), 860);
    }
}
