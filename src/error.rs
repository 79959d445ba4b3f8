//! Error type definitions for the ADS1x15 driver
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

/// An enumeration of possible errors with the converter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error<E> {
    /// The I2C transaction failed.
    Interface(E),

    /// The configured address is outside of the 0x48..=0x4B strap range.
    InvalidAddress,

    /// The operation is only available on four-channel variants.
    Unsupported,

    /// The device did not finish a conversion within the configured timeout.
    Timeout,
}

impl<E> Error<E>
where
    E: embedded_hal::i2c::Error,
{
    /// Get the generic bus error kind, if the error originated on the bus.
    pub fn kind(&self) -> Option<embedded_hal::i2c::ErrorKind> {
        match self {
            Error::Interface(error) => Some(error.kind()),
            _ => None,
        }
    }
}
