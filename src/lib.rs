//! Driver for the ADS1x15 family of I2C analog-to-digital converters.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! Supports the 12-bit ADS1013, ADS1014 and ADS1015 and the 16-bit ADS1113, ADS1114 and ADS1115.
//! The members differ only in their fixed [Capabilities], so a single driver type is selected by
//! [Variant] at construction.
//!
//! Every conversion request writes the complete configuration word, so configuration changes made
//! through the driver take effect with the next request. Several converters may share a bus by
//! handing each driver an `embedded-hal-bus` device wrapper.
#![cfg_attr(not(test), no_std)]
#![deny(warnings)]

mod error;
mod register;
mod variant;

pub use error::Error;
pub use register::{
    ComparatorMode, ComparatorPolarity, ComparatorQueue, Config, DataRate, Gain, Mode, Mux,
};
pub use variant::{Capabilities, Resolution, Variant};

use bit_field::BitField;
use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, trace, warn};

use register::{Register, OS_BIT};

/// The address of a converter with the ADDR pin tied to GND.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// The interval between busy checks of a single-shot conversion.
pub const POLL_INTERVAL_US: u32 = 100;

/// The default bound on waiting for a single-shot conversion.
///
/// # Note
/// The slowest conversion (8 SPS) takes 125ms.
pub const DEFAULT_TIMEOUT_US: u32 = 250_000;

// The range of addresses selectable through the ADDR pin.
const ADDRESS_RANGE: core::ops::RangeInclusive<u8> = 0x48..=0x4B;

/// A driver for an ADS1x15 analog-to-digital converter.
pub struct Ads1x15<I2C> {
    i2c: I2C,
    address: u8,
    variant: Variant,
    capabilities: Capabilities,
    config: Config,
    timeout_us: u32,
}

impl<I2C> Ads1x15<I2C>
where
    I2C: I2c,
{
    /// Construct a new converter driver.
    ///
    /// # Note
    /// The device is not accessed. The configuration defaults to the widest gain, single-shot
    /// mode and the middle data rate.
    ///
    /// # Args
    /// * `i2c` - The I2C interface to use to communicate with the device.
    /// * `address` - The 7-bit I2C address of the device.
    /// * `variant` - The family member present at the address.
    pub fn new(i2c: I2C, address: u8, variant: Variant) -> Self {
        Ads1x15 {
            i2c,
            address,
            variant,
            capabilities: variant.capabilities(),
            config: Config::default(),
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }

    /// Construct a driver for an ADS1013.
    pub fn ads1013(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1013)
    }

    /// Construct a driver for an ADS1014.
    pub fn ads1014(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1014)
    }

    /// Construct a driver for an ADS1015.
    pub fn ads1015(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1015)
    }

    /// Construct a driver for an ADS1113.
    pub fn ads1113(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1113)
    }

    /// Construct a driver for an ADS1114.
    pub fn ads1114(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1114)
    }

    /// Construct a driver for an ADS1115.
    pub fn ads1115(i2c: I2C, address: u8) -> Self {
        Ads1x15::new(i2c, address, Variant::Ads1115)
    }

    /// Validate the driver configuration.
    ///
    /// # Note
    /// Only the address is checked. Use [Ads1x15::is_connected] to probe for the device.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        if !ADDRESS_RANGE.contains(&self.address) {
            warn!("ADS1x15 address {:#04x} outside of strap range", self.address);
            return Err(Error::InvalidAddress);
        }

        Ok(())
    }

    /// Release the I2C interface.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// The 7-bit I2C address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The family member being driven.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The fixed features of the device.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Check if the device acknowledges its address.
    pub fn is_connected(&mut self) -> bool {
        self.i2c.write(self.address, &[]).is_ok()
    }

    /// Check if a conversion is in progress.
    pub fn is_busy(&mut self) -> Result<bool, Error<I2C::Error>> {
        let config = self.read_register(Register::Config)?;
        Ok(!config.get_bit(OS_BIT))
    }

    /// Get the operating configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Replace the operating configuration.
    ///
    /// # Note
    /// The gain is forced to the widest range on devices without a gain amplifier.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        self.config.data_rate = DataRate::from_code(config.data_rate.code());
        self.set_gain(config.gain.code());
    }

    /// Set the programmable gain.
    ///
    /// # Args
    /// * `code` - One of 0, 1, 2, 4, 8 or 16, selecting a full-scale range of 6.144V, 4.096V,
    ///   2.048V, 1.024V, 0.512V or 0.256V. Any other code selects 6.144V.
    pub fn set_gain(&mut self, code: u8) {
        let code = if self.capabilities.gain { code } else { 0 };
        self.config.gain = Gain::from_code(code).unwrap_or_default();
    }

    /// Get the programmable gain code. Devices without gain always report 0.
    pub fn gain(&self) -> u8 {
        if !self.capabilities.gain {
            return 0;
        }

        self.config.gain.code()
    }

    /// Get the full-scale range of the current gain in volts.
    pub fn max_voltage(&self) -> f32 {
        self.config.gain.full_scale()
    }

    /// Convert a raw sample to volts using the current gain.
    ///
    /// # Args
    /// * `raw` - A sample as returned by [Ads1x15::last_value].
    pub fn to_voltage(&self, raw: i16) -> f32 {
        if raw == 0 {
            return 0.0;
        }

        self.max_voltage() * raw as f32 / self.capabilities.resolution.full_scale_code()
    }

    /// Set the conversion mode. 0 selects continuous conversion, anything else single-shot.
    pub fn set_mode(&mut self, code: u8) {
        self.config.mode = Mode::from_code(code);
    }

    /// Get the conversion mode code. 0 is continuous, 1 single-shot.
    pub fn mode(&self) -> u8 {
        self.config.mode.code()
    }

    /// Set the data rate.
    ///
    /// # Args
    /// * `code` - 0 (slowest) through 7 (fastest). Larger codes select 4.
    pub fn set_data_rate(&mut self, code: u8) {
        self.config.data_rate = DataRate::from_code(code);
    }

    /// Get the data rate code, 0 through 7.
    pub fn data_rate(&self) -> u8 {
        self.config.data_rate.code()
    }

    /// Get the current data rate in samples per second.
    pub fn data_rate_sps(&self) -> u16 {
        self.variant.samples_per_second(self.data_rate())
    }

    pub fn set_comparator_mode(&mut self, mode: ComparatorMode) {
        self.config.comparator_mode = mode;
    }

    pub fn comparator_mode(&self) -> ComparatorMode {
        self.config.comparator_mode
    }

    pub fn set_comparator_polarity(&mut self, polarity: ComparatorPolarity) {
        self.config.comparator_polarity = polarity;
    }

    pub fn comparator_polarity(&self) -> ComparatorPolarity {
        self.config.comparator_polarity
    }

    /// Configure whether ALERT/RDY stays asserted until the conversion register is read.
    pub fn set_comparator_latch(&mut self, latch: bool) {
        self.config.comparator_latch = latch;
    }

    pub fn comparator_latch(&self) -> bool {
        self.config.comparator_latch
    }

    /// Set the comparator queue.
    ///
    /// # Args
    /// * `code` - Assert after 1 (0), 2 (1) or 4 (2) conversions. 3 and above disable the
    ///   comparator.
    pub fn set_comparator_queue(&mut self, code: u8) {
        self.config.comparator_queue = ComparatorQueue::from_code(code);
    }

    pub fn comparator_queue(&self) -> u8 {
        self.config.comparator_queue.code()
    }

    pub fn set_comparator_threshold_low(&mut self, value: i16) -> Result<(), Error<I2C::Error>> {
        self.write_register(Register::LowThreshold, value as u16)
    }

    pub fn comparator_threshold_low(&mut self) -> Result<i16, Error<I2C::Error>> {
        Ok(self.read_register(Register::LowThreshold)? as i16)
    }

    pub fn set_comparator_threshold_high(&mut self, value: i16) -> Result<(), Error<I2C::Error>> {
        self.write_register(Register::HighThreshold, value as u16)
    }

    pub fn comparator_threshold_high(&mut self) -> Result<i16, Error<I2C::Error>> {
        Ok(self.read_register(Register::HighThreshold)? as i16)
    }

    /// Set the bound on waiting for a single-shot conversion to complete.
    pub fn set_timeout_us(&mut self, timeout_us: u32) {
        self.timeout_us = timeout_us;
    }

    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// Measure a single-ended input.
    ///
    /// # Note
    /// Inputs the device does not have are ignored without accessing the bus and read as 0.
    ///
    /// # Args
    /// * `channel` - The analog input to measure.
    /// * `delay` - A means of waiting for the conversion.
    ///
    /// # Returns
    /// The raw conversion result.
    pub fn read_adc(
        &mut self,
        channel: u8,
        delay: &mut impl DelayNs,
    ) -> Result<i16, Error<I2C::Error>> {
        match self.single_ended(channel) {
            Some(mux) => self.read(mux, delay),
            None => Ok(0),
        }
    }

    /// Start a conversion of a single-ended input without waiting for the result.
    ///
    /// # Note
    /// Inputs the device does not have are ignored without accessing the bus.
    pub fn request_adc(&mut self, channel: u8) -> Result<(), Error<I2C::Error>> {
        match self.single_ended(channel) {
            Some(mux) => self.request(mux),
            None => Ok(()),
        }
    }

    /// Measure the voltage of AIN0 relative to AIN1.
    pub fn read_adc_differential_0_1(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<i16, Error<I2C::Error>> {
        self.read(Mux::Differential0_1, delay)
    }

    pub fn request_adc_differential_0_1(&mut self) -> Result<(), Error<I2C::Error>> {
        self.request(Mux::Differential0_1)
    }

    /// Measure the voltage of AIN0 relative to AIN3. Four-channel devices only.
    pub fn read_adc_differential_0_3(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<i16, Error<I2C::Error>> {
        self.read(Mux::Differential0_3, delay)
    }

    /// Measure the voltage of AIN1 relative to AIN3. Four-channel devices only.
    pub fn read_adc_differential_1_3(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<i16, Error<I2C::Error>> {
        self.read(Mux::Differential1_3, delay)
    }

    /// Measure the voltage of AIN2 relative to AIN3. Four-channel devices only.
    pub fn read_adc_differential_2_3(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<i16, Error<I2C::Error>> {
        self.read(Mux::Differential2_3, delay)
    }

    pub fn request_adc_differential_0_3(&mut self) -> Result<(), Error<I2C::Error>> {
        self.request(Mux::Differential0_3)
    }

    pub fn request_adc_differential_1_3(&mut self) -> Result<(), Error<I2C::Error>> {
        self.request(Mux::Differential1_3)
    }

    pub fn request_adc_differential_2_3(&mut self) -> Result<(), Error<I2C::Error>> {
        self.request(Mux::Differential2_3)
    }

    /// Get the most recent conversion result.
    ///
    /// # Returns
    /// The signed sample at the device resolution.
    pub fn last_value(&mut self) -> Result<i16, Error<I2C::Error>> {
        let raw = self.read_register(Register::Conversion)? as i16;

        // 12-bit results are left-justified in the register.
        Ok(raw >> self.capabilities.resolution.bit_shift())
    }

    fn single_ended(&self, channel: u8) -> Option<Mux> {
        if channel >= self.capabilities.channels {
            warn!(
                "Ignoring request for AIN{} on {:?} with {} inputs",
                channel, self.variant, self.capabilities.channels
            );
            return None;
        }

        Mux::single(channel)
    }

    fn request(&mut self, mux: Mux) -> Result<(), Error<I2C::Error>> {
        if mux.needs_four_channels() && self.capabilities.channels < 4 {
            return Err(Error::Unsupported);
        }

        let word = self.config.start_word(mux);
        debug!("Starting {:?} conversion: {:#06x}", mux, word);
        self.write_register(Register::Config, word)
    }

    fn read(&mut self, mux: Mux, delay: &mut impl DelayNs) -> Result<i16, Error<I2C::Error>> {
        self.request(mux)?;

        if self.config.mode == Mode::Continuous {
            // There is no completion signal in continuous mode, so wait out one conversion.
            delay.delay_ms(self.capabilities.conversion_delay_ms);
        } else {
            self.wait_for_conversion(delay)?;
        }

        self.last_value()
    }

    fn wait_for_conversion(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I2C::Error>> {
        let mut waited_us: u32 = 0;
        while self.is_busy()? {
            if waited_us >= self.timeout_us {
                warn!("ADS1x15 at {:#04x} conversion timed out", self.address);
                return Err(Error::Timeout);
            }

            delay.delay_us(POLL_INTERVAL_US);
            waited_us = waited_us.saturating_add(POLL_INTERVAL_US);
        }

        Ok(())
    }

    fn write_register(&mut self, register: Register, value: u16) -> Result<(), Error<I2C::Error>> {
        trace!("Write {:?} = {:#06x}", register, value);
        let [msb, lsb] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[register as u8, msb, lsb])
            .map_err(Error::Interface)
    }

    fn read_register(&mut self, register: Register) -> Result<u16, Error<I2C::Error>> {
        let mut data: [u8; 2] = [0; 2];
        self.i2c
            .write_read(self.address, &[register as u8], &mut data)
            .map_err(Error::Interface)?;

        let value = u16::from_be_bytes(data);
        trace!("Read {:?} = {:#06x}", register, value);
        Ok(value)
    }
}
