//! Secured payload reader and AES-CCM nonce construction.

use super::{Error, Result};

/// Length of the message integrity code.
pub const MIC_LEN: usize = 4;
/// Length of the frame counter.
pub const FRAME_COUNTER_LEN: usize = 4;
/// Length of the AES-CCM nonce.
pub const NONCE_LEN: usize = 13;

/// A reader/writer for the secured payload of an ESL data frame.
///
/// The payload consists of the ciphertext, followed by a 4-byte message
/// integrity code and a 4-byte little-endian frame counter.
pub struct SecuredPayload<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> SecuredPayload<T> {
    /// Create a new [`SecuredPayload`] reader/writer from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot hold the message integrity code
    /// and the frame counter.
    pub fn new(buffer: T) -> Result<Self> {
        let payload = Self::new_unchecked(buffer);

        if !payload.check_len() {
            return Err(Error::PayloadTooShort);
        }

        Ok(payload)
    }

    /// Returns `false` if the buffer is too short to contain the trailer.
    pub fn check_len(&self) -> bool {
        self.buffer.as_ref().len() >= MIC_LEN + FRAME_COUNTER_LEN
    }

    /// Create a new [`SecuredPayload`] reader/writer without length checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    fn ciphertext_len(&self) -> usize {
        self.buffer.as_ref().len() - MIC_LEN - FRAME_COUNTER_LEN
    }

    /// Return the ciphertext.
    pub fn ciphertext(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.ciphertext_len()]
    }

    /// Return the message integrity code.
    pub fn mic(&self) -> [u8; MIC_LEN] {
        let mut mic = [0u8; MIC_LEN];
        mic.copy_from_slice(&self.buffer.as_ref()[self.ciphertext_len()..][..MIC_LEN]);
        mic
    }

    /// Return the frame counter bytes, as found on the wire.
    pub fn frame_counter_bytes(&self) -> [u8; FRAME_COUNTER_LEN] {
        let mut counter = [0u8; FRAME_COUNTER_LEN];
        counter.copy_from_slice(
            &self.buffer.as_ref()[self.ciphertext_len() + MIC_LEN..][..FRAME_COUNTER_LEN],
        );
        counter
    }

    /// Return the frame counter.
    pub fn frame_counter(&self) -> u32 {
        u32::from_le_bytes(self.frame_counter_bytes())
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> SecuredPayload<T> {
    /// Return a mutable reference to the ciphertext.
    pub fn ciphertext_mut(&mut self) -> &mut [u8] {
        let len = self.ciphertext_len();
        &mut self.buffer.as_mut()[..len]
    }

    /// Set the message integrity code.
    pub fn set_mic(&mut self, mic: &[u8; MIC_LEN]) {
        let offset = self.ciphertext_len();
        self.buffer.as_mut()[offset..][..MIC_LEN].copy_from_slice(mic);
    }

    /// Set the frame counter.
    pub fn set_frame_counter(&mut self, frame_counter: u32) {
        let offset = self.ciphertext_len() + MIC_LEN;
        self.buffer.as_mut()[offset..][..FRAME_COUNTER_LEN]
            .copy_from_slice(&frame_counter.to_le_bytes());
    }
}

/// Build the AES-CCM nonce: the frame counter as found on the wire, followed
/// by the 8-byte source identity in wire order. The last byte is zero.
///
/// `source` is the identity as returned by [`Address::extended_bytes`], most
/// significant byte first.
///
/// [`Address::extended_bytes`]: crate::Address::extended_bytes
pub fn nonce(frame_counter: [u8; FRAME_COUNTER_LEN], source: &[u8; 8]) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce[..FRAME_COUNTER_LEN].copy_from_slice(&frame_counter);
    for (dst, src) in nonce[FRAME_COUNTER_LEN..].iter_mut().zip(source.iter().rev()) {
        *dst = *src;
    }
    nonce
}
