//! Authenticated decryption of ESL frame payloads.
//!
//! A secured payload carries the ciphertext, a 4-byte MIC and a 4-byte frame
//! counter. The MAC header is authenticated as associated data, and the nonce
//! is built from the frame counter and the source identity.

use aes::Aes128;
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{AeadInPlace, KeyInit};
use ccm::consts::{U13, U4};
use ccm::Ccm;
use heapless::Vec;

use esl_frame::{nonce, Error, SecuredPayload, MAX_FRAME_LEN, MIC_LEN, NONCE_LEN};

use crate::config::Key;
use crate::RxError;

/// AES-128-CCM with a 4-byte MIC and a 13-byte nonce.
type Aes128Ccm = Ccm<Aes128, U4, U13>;

/// A decrypted payload.
pub type Plaintext = Vec<u8, MAX_FRAME_LEN>;

/// The MIC did not match the computed authentication value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AuthenticationError;

/// An AES-CCM engine, as used by the [`Decryptor`].
pub trait CcmCipher {
    /// Decrypt `buffer` in place and verify the MIC over the associated data
    /// and the plaintext.
    ///
    /// On error the content of `buffer` is unspecified and must not be used.
    fn decrypt_in_place(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
        mic: &[u8; MIC_LEN],
    ) -> Result<(), AuthenticationError>;
}

impl<C: CcmCipher> CcmCipher for &C {
    fn decrypt_in_place(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
        mic: &[u8; MIC_LEN],
    ) -> Result<(), AuthenticationError> {
        (**self).decrypt_in_place(nonce, aad, buffer, mic)
    }
}

/// The AES-128-CCM cipher context. It is created once from the network key.
pub struct AesCcm {
    cipher: Aes128Ccm,
}

impl AesCcm {
    /// Create the cipher context for a key.
    pub fn new(key: &Key) -> Self {
        Self {
            cipher: Aes128Ccm::new(GenericArray::from_slice(key.as_bytes())),
        }
    }

    /// Encrypt `buffer` in place and return the MIC.
    pub fn encrypt_in_place(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<[u8; MIC_LEN], AuthenticationError> {
        let tag = self
            .cipher
            .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buffer)
            .map_err(|_| AuthenticationError)?;

        let mut mic = [0u8; MIC_LEN];
        mic.copy_from_slice(&tag);
        Ok(mic)
    }
}

impl CcmCipher for AesCcm {
    fn decrypt_in_place(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
        mic: &[u8; MIC_LEN],
    ) -> Result<(), AuthenticationError> {
        self.cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(nonce),
                aad,
                buffer,
                GenericArray::from_slice(mic),
            )
            .map_err(|_| AuthenticationError)
    }
}

impl core::fmt::Debug for AesCcm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AesCcm")
    }
}

/// Splits a secured payload and runs the cipher over it.
#[derive(Debug, Clone)]
pub struct Decryptor<C> {
    cipher: C,
}

impl<C: CcmCipher> Decryptor<C> {
    /// Create a new decryptor.
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Return the cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Authenticate and decrypt a secured payload.
    ///
    /// `header` is the MAC header of the frame, `source` the 8-byte identity
    /// of the sender as returned by [`AddressingRepr::source`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooShort`] without running the cipher when the
    /// payload cannot hold the MIC and the frame counter, and
    /// [`RxError::Authentication`] when the MIC does not match. No plaintext
    /// is returned on failure.
    ///
    /// [`AddressingRepr::source`]: esl_frame::AddressingRepr::source
    pub fn decrypt(
        &self,
        header: &[u8],
        payload: &[u8],
        source: &[u8; 8],
    ) -> Result<Plaintext, RxError> {
        let payload = SecuredPayload::new(payload)?;
        let nonce = nonce(payload.frame_counter_bytes(), source);

        let mut plaintext =
            Plaintext::from_slice(payload.ciphertext()).map_err(|_| Error::FrameTooLong)?;

        if self
            .cipher
            .decrypt_in_place(&nonce, header, &mut plaintext, &payload.mic())
            .is_err()
        {
            plaintext.iter_mut().for_each(|b| *b = 0);
            return Err(RxError::Authentication);
        }

        Ok(plaintext)
    }
}
