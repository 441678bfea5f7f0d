//! High-level representation of IEEE 802.15.4 frames.

use crate::{Error, Result};

use crate::{FrameControl, FrameType, MAX_FRAME_LEN};

pub(crate) mod ack;
pub(crate) mod data;

pub use ack::*;
pub use data::*;

/// A high-level representation of an IEEE 802.15.4 frame.
///
/// Only data and acknowledgment frames are decoded. Other frame types are
/// recognized and reported with their [`FrameType`].
pub enum Frame<T: AsRef<[u8]>> {
    /// A data frame.
    Data(DataFrame<T>),
    /// An acknowledgment frame.
    Ack(Ack<T>),
    /// A frame of a type that is not decoded.
    Other(FrameType),
}

impl<T: AsRef<[u8]>> Frame<T> {
    /// Create a new [`Frame`] from a given buffer.
    ///
    /// The frame control field is validated for every frame type before
    /// dispatching.
    pub fn new(buffer: T) -> Result<Self> {
        if buffer.as_ref().len() > MAX_FRAME_LEN {
            return Err(Error::FrameTooLong);
        }

        let frame_type = {
            let frame_control = FrameControl::new(buffer.as_ref())?;
            frame_control.check()?;
            frame_control.frame_type()
        };

        match frame_type {
            FrameType::Data => Ok(Frame::Data(DataFrame::new(buffer)?)),
            FrameType::Ack => Ok(Frame::Ack(Ack::new(buffer)?)),
            other => Ok(Frame::Other(other)),
        }
    }

    /// Return the frame type.
    pub fn frame_type(&self) -> FrameType {
        match self {
            Frame::Data(_) => FrameType::Data,
            Frame::Ack(_) => FrameType::Ack,
            Frame::Other(frame_type) => *frame_type,
        }
    }

    /// Return the sequence number of the frame, if it was decoded.
    pub fn sequence_number(&self) -> Option<u8> {
        match self {
            Frame::Data(frame) => Some(frame.sequence_number()),
            Frame::Ack(frame) => Some(frame.sequence_number()),
            Frame::Other(_) => None,
        }
    }
}
