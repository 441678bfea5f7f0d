//! Zero-copy read and write structures for IEEE 802.15.4 frames carrying
//! electronic shelf label (ESL) checkin-protocol messages.
//!
//! Each reader contains the following functions:
//! - [`new`]: Create a new reader, validating the buffer.
//! - [`new_unchecked`]: Create a new reader without checking the buffer.
//!
//! Only the subset of the MAC layer needed to reach the application payload
//! is implemented. Data frames are decoded down to their payload,
//! acknowledgments down to their sequence number, and every other frame type
//! is recognized but not decoded.
//!
//! ## Reading a frame
//! ```
//! # use esl_frame::{Address, Frame, FrameType};
//! let frame: [u8; 14] = [
//!     0x61, 0x88, 0x2a, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0xaa, 0xbb, 0xcc, 0x00, 0x00,
//! ];
//!
//! let Ok(Frame::Data(frame)) = Frame::new(&frame[..]) else {
//!     panic!("not a data frame");
//! };
//!
//! assert_eq!(frame.frame_control().frame_type(), FrameType::Data);
//! assert_eq!(frame.sequence_number(), 0x2a);
//!
//! let addressing = frame.addressing();
//! assert_eq!(addressing.pan_id(), Some(0x4447));
//! assert_eq!(addressing.dst_address(), Address::Short(0x0000));
//! assert_eq!(addressing.src_address(), Address::Short(0x0001));
//! assert_eq!(frame.payload(), &[0xaa, 0xbb, 0xcc]);
//! ```
//!
//! ## Secured payload
//!
//! The payload of an ESL data frame ends with a 4-byte message integrity code
//! followed by a 4-byte frame counter. [`SecuredPayload`] splits the payload
//! in these parts and [`nonce`] builds the AES-CCM nonce from the frame
//! counter and the source address.
//!
//! ## ESL messages
//!
//! A decrypted payload starts with a one-byte message tag. [`EslMessage::parse`]
//! dispatches on that tag and decodes one of the fixed-layout messages. Unknown
//! tags are represented by [`EslMessage::Unknown`].
//!
//! [`new`]: DataFrame::new
//! [`new_unchecked`]: DataFrame::new_unchecked
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

mod frames;
pub use frames::Ack;
pub use frames::DataFrame;
pub use frames::Frame;

mod frame_control;
pub use frame_control::*;

mod addressing;
pub use addressing::*;

mod security;
pub use security::*;

mod message;
pub use message::*;

mod repr;
pub use repr::*;

/// Maximum length of a frame, as the PHY length field is a single octet.
pub const MAX_FRAME_LEN: usize = 255;

/// Length of the trailing frame check sequence.
pub const FCS_LEN: usize = 2;

/// An error that can occur when reading or writing a frame or a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The buffer is too short to contain the field being read.
    Truncated,
    /// The frame is longer than [`MAX_FRAME_LEN`].
    FrameTooLong,
    /// The reserved bit of the frame control field is set.
    ReservedBitSet,
    /// Sequence number suppression is not supported.
    SequenceNumberSuppressed,
    /// Information elements are not supported.
    InformationElementsPresent,
    /// Only IEEE 802.15.4-2003 frames are supported.
    UnsupportedFrameVersion(FrameVersion),
    /// The destination addressing mode is reserved.
    ReservedDstAddressingMode,
    /// The source addressing mode is reserved.
    ReservedSrcAddressingMode,
    /// The payload cannot hold the message integrity code and frame counter.
    PayloadTooShort,
    /// The decrypted payload does not contain a message tag.
    EmptyMessage,
    /// The message body is shorter than the fixed layout of its type.
    MessageTooShort {
        /// The type of the message.
        message_type: MessageType,
        /// The length of the message body.
        len: usize,
        /// The expected minimum length of the message body.
        expected: usize,
    },
    /// The message does not fit in its representation.
    MessageTooLong,
}

impl Error {
    /// Returns `true` for errors in the structure of the MAC frame, and
    /// `false` for errors in the decrypted message.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Error::EmptyMessage | Error::MessageTooShort { .. } | Error::MessageTooLong
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Truncated => write!(f, "frame too short"),
            Error::FrameTooLong => write!(f, "frame longer than {MAX_FRAME_LEN} bytes"),
            Error::ReservedBitSet => write!(f, "reserved field is set"),
            Error::SequenceNumberSuppressed => write!(f, "sequence number suppressed"),
            Error::InformationElementsPresent => write!(f, "information elements present"),
            Error::UnsupportedFrameVersion(version) => {
                write!(f, "unsupported frame version {}", *version as u8)
            }
            Error::ReservedDstAddressingMode => write!(f, "reserved destination address type"),
            Error::ReservedSrcAddressingMode => write!(f, "reserved source address type"),
            Error::PayloadTooShort => write!(f, "payload too short for MIC and frame counter"),
            Error::EmptyMessage => write!(f, "empty message"),
            Error::MessageTooShort {
                message_type,
                len,
                expected,
            } => write!(f, "{message_type}, too short ({len} < {expected} bytes)"),
            Error::MessageTooLong => write!(f, "message too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type alias for `Result<T, frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
