use crate::{Error, Result};

use crate::{AddressingFields, FrameControl, FCS_LEN, MAX_FRAME_LEN};

/// Offset of the addressing fields: frame control and sequence number.
const ADDRESSING_OFFSET: usize = 3;

/// A reader for an IEEE 802.15.4 Data frame.
///
/// The frame is laid out as frame control (2), sequence number (1),
/// addressing fields, payload and a trailing frame check sequence (2). The
/// frame check sequence is exposed but not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFrame<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> DataFrame<T> {
    /// Create a new [`DataFrame`] reader from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame control field has unsupported fields
    /// set, if an addressing mode is reserved, or if the buffer is too short
    /// to contain the header and the frame check sequence.
    pub fn new(buffer: T) -> Result<Self> {
        let b = Self::new_unchecked(buffer);

        if b.buffer.as_ref().len() > MAX_FRAME_LEN {
            return Err(Error::FrameTooLong);
        }

        FrameControl::new(b.buffer.as_ref())?.check()?;

        if b.buffer.as_ref().len() < ADDRESSING_OFFSET {
            return Err(Error::Truncated);
        }

        let fc = b.frame_control();
        let addressing = AddressingFields::new(
            &b.buffer.as_ref()[ADDRESSING_OFFSET..],
            fc.dst_addressing_mode(),
            fc.src_addressing_mode(),
        )?;

        if ADDRESSING_OFFSET + addressing.len() + FCS_LEN > b.buffer.as_ref().len() {
            return Err(Error::Truncated);
        }

        Ok(b)
    }

    /// Create a new [`DataFrame`] reader from a given buffer without length
    /// checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return a [`FrameControl`] reader.
    pub fn frame_control(&self) -> FrameControl<&'_ [u8]> {
        FrameControl::new_unchecked(&self.buffer.as_ref()[..2])
    }

    /// Return the sequence number.
    pub fn sequence_number(&self) -> u8 {
        self.buffer.as_ref()[2]
    }

    /// Return an [`AddressingFields`] reader.
    pub fn addressing(&self) -> AddressingFields<&'_ [u8]> {
        let fc = self.frame_control();
        AddressingFields::new_unchecked(
            &self.buffer.as_ref()[ADDRESSING_OFFSET..],
            fc.dst_addressing_mode(),
            fc.src_addressing_mode(),
        )
    }

    /// Return the length of the MAC header: frame control, sequence number
    /// and addressing fields.
    pub fn header_len(&self) -> usize {
        ADDRESSING_OFFSET + self.addressing().len()
    }

    /// Return the MAC header bytes.
    pub fn header(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.header_len()]
    }

    /// Return the payload, which sits between the header and the frame check
    /// sequence.
    pub fn payload(&self) -> &[u8] {
        let len = self.buffer.as_ref().len();
        &self.buffer.as_ref()[self.header_len()..len - FCS_LEN]
    }

    /// Return the frame check sequence.
    pub fn fcs(&self) -> u16 {
        let b = self.buffer.as_ref();
        let len = b.len();
        u16::from_le_bytes([b[len - 2], b[len - 1]])
    }
}
