//! Register map and configuration word encoding for the ADS1x15 family.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use bit_field::BitField;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The registers accessible through the address pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Register {
    Conversion = 0x00,
    Config = 0x01,
    LowThreshold = 0x02,
    HighThreshold = 0x03,
}

// Bit positions within the configuration register.
pub(crate) const OS_BIT: usize = 15;
const MUX_BITS: core::ops::Range<usize> = 12..15;
const PGA_BITS: core::ops::Range<usize> = 9..12;
const MODE_BIT: usize = 8;
const DR_BITS: core::ops::Range<usize> = 5..8;
const COMP_MODE_BIT: usize = 4;
const COMP_POL_BIT: usize = 3;
const COMP_LAT_BIT: usize = 2;
const COMP_QUE_BITS: core::ops::Range<usize> = 0..2;

/// Input multiplexer selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mux {
    Differential0_1 = 0b000,
    Differential0_3 = 0b001,
    Differential1_3 = 0b010,
    Differential2_3 = 0b011,
    Single0 = 0b100,
    Single1 = 0b101,
    Single2 = 0b110,
    Single3 = 0b111,
}

impl Mux {
    /// Get the single-ended selection for an input channel.
    ///
    /// # Args
    /// * `channel` - The analog input, 0 through 3.
    pub fn single(channel: u8) -> Option<Self> {
        match channel {
            0 => Some(Mux::Single0),
            1 => Some(Mux::Single1),
            2 => Some(Mux::Single2),
            3 => Some(Mux::Single3),
            _ => None,
        }
    }

    /// Check if the selection is one of the differential pairs that require four inputs.
    pub fn needs_four_channels(&self) -> bool {
        matches!(
            self,
            Mux::Differential0_3 | Mux::Differential1_3 | Mux::Differential2_3
        )
    }
}

/// Programmable gain amplifier setting, named by its full-scale range.
///
/// The discriminant is the gain code used by the numeric API.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Gain {
    /// +/-6.144V
    #[default]
    Fsr6V144 = 0,
    /// +/-4.096V
    Fsr4V096 = 1,
    /// +/-2.048V
    Fsr2V048 = 2,
    /// +/-1.024V
    Fsr1V024 = 4,
    /// +/-0.512V
    Fsr0V512 = 8,
    /// +/-0.256V
    Fsr0V256 = 16,
}

impl Gain {
    /// Look up a gain setting by its numeric code.
    ///
    /// # Returns
    /// The gain for codes 0, 1, 2, 4, 8 and 16. None otherwise.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gain::Fsr6V144),
            1 => Some(Gain::Fsr4V096),
            2 => Some(Gain::Fsr2V048),
            4 => Some(Gain::Fsr1V024),
            8 => Some(Gain::Fsr0V512),
            16 => Some(Gain::Fsr0V256),
            _ => None,
        }
    }

    /// The numeric gain code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The full-scale range in volts.
    pub fn full_scale(&self) -> f32 {
        match self {
            Gain::Fsr6V144 => 6.144,
            Gain::Fsr4V096 => 4.096,
            Gain::Fsr2V048 => 2.048,
            Gain::Fsr1V024 => 1.024,
            Gain::Fsr0V512 => 0.512,
            Gain::Fsr0V256 => 0.256,
        }
    }

    fn pga(&self) -> u16 {
        match self {
            Gain::Fsr6V144 => 0b000,
            Gain::Fsr4V096 => 0b001,
            Gain::Fsr2V048 => 0b010,
            Gain::Fsr1V024 => 0b011,
            Gain::Fsr0V512 => 0b100,
            Gain::Fsr0V256 => 0b101,
        }
    }
}

/// Conversion mode.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    Continuous = 0,
    #[default]
    SingleShot = 1,
}

impl Mode {
    /// Look up a mode by its numeric code. 0 is continuous, everything else single-shot.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Mode::Continuous,
            _ => Mode::SingleShot,
        }
    }

    /// The numeric mode code.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Data rate, held in its register position (bits 5..8 of the configuration word).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "u8", into = "u8")
)]
pub struct DataRate(pub(crate) u16);

impl DataRate {
    /// The mid-speed rate used whenever an out-of-range code is requested.
    pub const DEFAULT_CODE: u8 = 4;

    /// Construct a data rate from a 0..=7 code. Larger codes select the default.
    pub fn from_code(code: u8) -> Self {
        let code = if code > 7 { Self::DEFAULT_CODE } else { code };
        DataRate(*0u16.set_bits(DR_BITS, code as u16))
    }

    /// The 0..=7 code.
    pub fn code(&self) -> u8 {
        self.0.get_bits(DR_BITS) as u8
    }

    /// The configuration register bits of this rate.
    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl From<u8> for DataRate {
    fn from(code: u8) -> Self {
        DataRate::from_code(code)
    }
}

impl From<DataRate> for u8 {
    fn from(rate: DataRate) -> Self {
        rate.code()
    }
}

impl Default for DataRate {
    fn default() -> Self {
        DataRate::from_code(Self::DEFAULT_CODE)
    }
}

/// Comparator operating mode.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorMode {
    #[default]
    Traditional = 0,
    Window = 1,
}

/// Active level of the ALERT/RDY pin.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorPolarity {
    #[default]
    ActiveLow = 0,
    ActiveHigh = 1,
}

/// Number of successive conversions exceeding a threshold before ALERT/RDY asserts.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorQueue {
    One = 0,
    Two = 1,
    Four = 2,
    #[default]
    Disabled = 3,
}

impl ComparatorQueue {
    /// Look up a queue setting by its 0..=3 code. Larger codes disable the comparator.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ComparatorQueue::One,
            1 => ComparatorQueue::Two,
            2 => ComparatorQueue::Four,
            _ => ComparatorQueue::Disabled,
        }
    }

    /// The numeric queue code.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// The operating configuration applied with every conversion request.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub gain: Gain,
    pub mode: Mode,
    pub data_rate: DataRate,
    pub comparator_mode: ComparatorMode,
    pub comparator_polarity: ComparatorPolarity,
    pub comparator_latch: bool,
    pub comparator_queue: ComparatorQueue,
}

impl Config {
    /// Compose the configuration word that starts a conversion.
    ///
    /// # Note
    /// Writing this word both applies the configuration and starts a conversion on the selected
    /// input.
    ///
    /// # Args
    /// * `mux` - The input selection to convert.
    pub fn start_word(&self, mux: Mux) -> u16 {
        let mut word = 0u16;
        word.set_bit(OS_BIT, true)
            .set_bits(MUX_BITS, mux as u16)
            .set_bits(PGA_BITS, self.gain.pga())
            .set_bit(MODE_BIT, self.mode == Mode::SingleShot)
            .set_bits(DR_BITS, self.data_rate.code() as u16)
            .set_bit(COMP_MODE_BIT, self.comparator_mode == ComparatorMode::Window)
            .set_bit(
                COMP_POL_BIT,
                self.comparator_polarity == ComparatorPolarity::ActiveHigh,
            )
            .set_bit(COMP_LAT_BIT, self.comparator_latch)
            .set_bits(COMP_QUE_BITS, self.comparator_queue as u16);
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_start_word() {
        // OS | AIN0 | 6.144V | single-shot | DR=4 | comparator disabled
        let word = Config::default().start_word(Mux::Single0);
        assert_eq!(word, 0x8000 | 0x4000 | 0x0000 | 0x0100 | 0x0080 | 0x0003);
    }

    #[test]
    fn start_word_fields() {
        let config = Config {
            gain: Gain::Fsr0V256,
            mode: Mode::Continuous,
            data_rate: DataRate::from_code(7),
            comparator_mode: ComparatorMode::Window,
            comparator_polarity: ComparatorPolarity::ActiveHigh,
            comparator_latch: true,
            comparator_queue: ComparatorQueue::Two,
        };

        assert_eq!(
            config.start_word(Mux::Differential2_3),
            0x8000 | 0x3000 | 0x0A00 | 0x00E0 | 0x0010 | 0x0008 | 0x0004 | 0x0001
        );
    }

    #[test]
    fn pga_encodings() {
        let mut config = Config::default();
        for (gain, bits) in [
            (Gain::Fsr6V144, 0x0000),
            (Gain::Fsr4V096, 0x0200),
            (Gain::Fsr2V048, 0x0400),
            (Gain::Fsr1V024, 0x0600),
            (Gain::Fsr0V512, 0x0800),
            (Gain::Fsr0V256, 0x0A00),
        ] {
            config.gain = gain;
            assert_eq!(config.start_word(Mux::Differential0_1) & 0x0E00, bits);
        }
    }

    #[test]
    fn data_rate_is_stored_shifted() {
        assert_eq!(DataRate::from_code(0).bits(), 0x0000);
        assert_eq!(DataRate::from_code(7).bits(), 0x00E0);
        assert_eq!(DataRate::from_code(7).code(), 7);
        assert_eq!(DataRate::from_code(200).code(), 4);
        assert_eq!(DataRate::from(9).bits(), 0x0080);
        assert_eq!(u8::from(DataRate::from_code(3)), 3);
    }

    #[test]
    fn single_ended_selection() {
        assert_eq!(Mux::single(2), Some(Mux::Single2));
        assert_eq!(Mux::single(4), None);
        assert!(Mux::Differential1_3.needs_four_channels());
        assert!(!Mux::Differential0_1.needs_four_channels());
    }

    #[test]
    fn unknown_gain_code() {
        assert_eq!(Gain::from_code(3), None);
        assert_eq!(Gain::from_code(16), Some(Gain::Fsr0V256));
        assert_eq!(Gain::Fsr1V024.code(), 4);
    }
}
