use esl_frame::{Error, MAX_FRAME_LEN};

/// A frame copied out of the radio receive buffer.
///
/// The frame is owned by the queue until a worker takes it, so the radio
/// buffer can be reused as soon as the copy is done.
#[derive(Clone)]
pub struct RawFrame {
    buffer: [u8; MAX_FRAME_LEN],
    len: u8,
}

impl RawFrame {
    /// Copy a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooLong`] when the frame does not fit in a single
    /// PHY packet.
    pub fn new(frame: &[u8]) -> Result<Self, Error> {
        if frame.len() > MAX_FRAME_LEN {
            return Err(Error::FrameTooLong);
        }

        let mut buffer = [0u8; MAX_FRAME_LEN];
        buffer[..frame.len()].copy_from_slice(frame);

        Ok(Self {
            buffer,
            len: frame.len() as u8,
        })
    }

    /// Copy a frame out of a PHY service data unit: a length byte followed by
    /// the frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] when the buffer is empty or shorter than
    /// its length byte announces.
    pub fn from_psdu(psdu: &[u8]) -> Result<Self, Error> {
        let Some((&len, rest)) = psdu.split_first() else {
            return Err(Error::Truncated);
        };

        let frame = rest.get(..len as usize).ok_or(Error::Truncated)?;
        Self::new(frame)
    }

    /// Return the frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len as usize]
    }

    /// Return the length of the frame.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl AsRef<[u8]> for RawFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl core::fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RawFrame").field(&self.as_bytes()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RawFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RawFrame({=[u8]:x})", self.as_bytes())
    }
}
