//! Network configuration: the PAN identifier to listen on and the network key.
//!
//! Defaults are generated at build time and can be overridden through
//! `ESL_RX_<NAME>` environment variables, e.g. `ESL_RX_DEFAULT_PAN_ID=0x1234`.

/// Build time configuration.
pub mod constants {
    #![allow(unused)]
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

use constants::{DEFAULT_KEY, DEFAULT_PAN_ID};

/// Length of the network key.
pub const KEY_LEN: usize = 16;

/// An error that can occur when parsing configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The key is not 16 hex-encoded bytes.
    InvalidKey,
    /// The PAN identifier is not a 16-bit hex number.
    InvalidPanId,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidKey => write!(f, "key must be {KEY_LEN} hex-encoded bytes"),
            ConfigError::InvalidPanId => write!(f, "PAN ID must be a 16-bit hex number"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// A 128-bit AES network key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Create a key from raw bytes.
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 32 hex digits. Whitespace between bytes is allowed.
    pub fn from_hex(value: &str) -> Result<Self, ConfigError> {
        let mut digits = [0u8; 2 * KEY_LEN];
        let mut len = 0;

        for c in value.bytes().filter(|c| !c.is_ascii_whitespace()) {
            if len == digits.len() {
                return Err(ConfigError::InvalidKey);
            }
            digits[len] = c;
            len += 1;
        }

        let mut key = [0u8; KEY_LEN];
        hex::decode_to_slice(&digits[..len], &mut key).map_err(|_| ConfigError::InvalidKey)?;
        Ok(Self(key))
    }

    /// Return the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Default for Key {
    fn default() -> Self {
        Self(DEFAULT_KEY)
    }
}

impl core::fmt::Debug for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Key(..)")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Key {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Key(..)")
    }
}

/// Parse a PAN identifier written as hex, with or without a `0x` prefix.
pub fn parse_pan_id(value: &str) -> Result<u16, ConfigError> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidPanId);
    }

    u16::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidPanId)
}

/// The receive pipeline configuration. It is built once at startup and only
/// read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// The network key.
    pub key: Key,
    /// The PAN identifier to accept frames from.
    pub pan_id: u16,
}

impl Config {
    /// Create a new configuration.
    pub const fn new(key: Key, pan_id: u16) -> Self {
        Self { key, pan_id }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: Key::default(),
            pan_id: DEFAULT_PAN_ID,
        }
    }
}
