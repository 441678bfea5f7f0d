//! Receive pipeline for electronic shelf label (ESL) frames.
//!
//! Frames are copied out of the radio into a [`FrameQueue`] and a single
//! worker runs them through the [`Receiver`]: frame parsing, PAN filtering,
//! AES-CCM authenticated decryption and ESL message decoding. Every dropped
//! frame is reported with a reason and the worker moves on to the next one.
//!
//! ```
//! # use esl_rx::{Config, Receiver, RxError};
//! let receiver = Receiver::new(&Config::default());
//!
//! // A data frame for PAN 0x1234 is dropped before decryption.
//! let frame = [
//!     0x61, 0x88, 0x01, 0x34, 0x12, 0x00, 0x00, 0x01, 0x00, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
//!     0xff, 0x00, 0x11, 0x00, 0x00,
//! ];
//! assert_eq!(
//!     receiver.process(&frame),
//!     Err(RxError::FilterMiss { pan_id: Some(0x1234) })
//! );
//! ```
#![no_std]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod utils;

pub use esl_frame as frame;

pub mod config;
pub mod filter;
pub mod security;
pub mod sync;

mod raw;
mod receiver;

pub use config::{Config, ConfigError, Key};
pub use filter::PanFilter;
pub use raw::RawFrame;
pub use receiver::{Received, Receiver};
pub use security::{AesCcm, CcmCipher, Decryptor};
pub use sync::{FrameQueue, FrameReceiver, FrameSender};

/// The receive queue sized from the build time configuration.
pub type RxQueue = FrameQueue<{ config::constants::QUEUE_DEPTH + 1 }>;

/// The reason a frame was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxError {
    /// The frame or the decrypted message is malformed.
    Frame(esl_frame::Error),
    /// The frame belongs to another PAN. This is normal operation.
    FilterMiss {
        /// The PAN identifier of the frame, if it has one.
        pan_id: Option<u16>,
    },
    /// The MIC did not match.
    Authentication,
}

impl RxError {
    /// Returns `true` for errors in the structure of the MAC frame.
    pub fn is_structural(&self) -> bool {
        match self {
            RxError::Frame(err) => err.is_structural(),
            _ => false,
        }
    }
}

impl From<esl_frame::Error> for RxError {
    fn from(value: esl_frame::Error) -> Self {
        RxError::Frame(value)
    }
}

impl core::fmt::Display for RxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RxError::Frame(err) => write!(f, "{err}"),
            RxError::FilterMiss {
                pan_id: Some(pan_id),
            } => write!(f, "PAN {pan_id:04x} filtered"),
            RxError::FilterMiss { pan_id: None } => write!(f, "no PAN, filtered"),
            RxError::Authentication => write!(f, "authentication failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RxError {}
