use esl_frame::{
    Address, DataFrame, EslMessage, Frame, FrameType, HeaderRepr, Identity, SecuredPayload,
};

use crate::config::Config;
use crate::filter::PanFilter;
use crate::security::{AesCcm, CcmCipher, Decryptor};
use crate::sync::FrameReceiver;
use crate::RxError;

/// The outcome of processing a frame that was not dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Received {
    /// A data frame carrying an authenticated ESL message.
    Message {
        /// The MAC header of the frame.
        header: HeaderRepr,
        /// The frame counter used for the nonce.
        frame_counter: u32,
        /// The decoded message.
        message: EslMessage,
    },
    /// An acknowledgment frame.
    Ack {
        /// The acknowledged sequence number.
        sequence_number: u8,
    },
    /// A frame of a type that is recognized but not decoded.
    Ignored(FrameType),
}

impl core::fmt::Display for Received {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Received::Message {
                header, message, ..
            } => write!(
                f,
                "[{}] to [{}]: {}",
                Identity(&header.addressing.source()),
                Identity(&header.addressing.destination()),
                message
            ),
            Received::Ack { sequence_number } => write!(f, "Ack {sequence_number}"),
            Received::Ignored(frame_type) => write!(f, "Ignored {frame_type:?} frame"),
        }
    }
}

/// The decode pipeline: frame parsing, PAN filtering, authenticated
/// decryption and message decoding.
///
/// The receiver is immutable once built, so it can be shared by reference.
#[derive(Debug)]
pub struct Receiver<C> {
    filter: PanFilter,
    decryptor: Decryptor<C>,
}

impl Receiver<AesCcm> {
    /// Create a receiver for a network configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_cipher(config.pan_id, AesCcm::new(&config.key))
    }
}

impl<C: CcmCipher> Receiver<C> {
    /// Create a receiver with a given cipher.
    pub fn with_cipher(pan_id: u16, cipher: C) -> Self {
        Self {
            filter: PanFilter::new(pan_id),
            decryptor: Decryptor::new(cipher),
        }
    }

    /// Return the PAN filter.
    pub fn filter(&self) -> &PanFilter {
        &self.filter
    }

    /// Return the decryptor.
    pub fn decryptor(&self) -> &Decryptor<C> {
        &self.decryptor
    }

    /// Run a frame through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error when the frame is dropped: a structural error in the
    /// frame or the decrypted message, a frame from another PAN, or a failed
    /// authentication.
    pub fn process(&self, frame: &[u8]) -> Result<Received, RxError> {
        match Frame::new(frame)? {
            Frame::Data(frame) => self.process_data(&frame),
            Frame::Ack(ack) => Ok(Received::Ack {
                sequence_number: ack.sequence_number(),
            }),
            Frame::Other(frame_type) => Ok(Received::Ignored(frame_type)),
        }
    }

    fn process_data(&self, frame: &DataFrame<&[u8]>) -> Result<Received, RxError> {
        let header = HeaderRepr::parse(frame);
        debug!("{}", header);

        let pan_id = header.addressing.pan_id();
        if !self.filter.accept(pan_id) {
            return Err(RxError::FilterMiss { pan_id });
        }

        if let Address::Short(_) | Address::Absent = header.addressing.src_address {
            trace!("short or absent source, using an all-zero identity for the nonce");
        }

        let payload = frame.payload();
        let plaintext = self
            .decryptor
            .decrypt(frame.header(), payload, &header.addressing.source())?;
        let frame_counter = SecuredPayload::new_unchecked(payload).frame_counter();

        let message = EslMessage::parse(&plaintext)?;
        if let EslMessage::Unknown(tag) = message {
            warn!("Unknown ESL packet type ({})", tag);
        }

        Ok(Received::Message {
            header,
            frame_counter,
            message,
        })
    }

    /// Process a frame and report the outcome through the log.
    pub fn handle(&self, frame: &[u8]) -> Result<Received, RxError> {
        let result = self.process(frame);

        match &result {
            Ok(received @ Received::Message { .. }) => {
                info!("{}", received);
            }
            Ok(received @ Received::Ack { .. }) => {
                trace!("{}", received);
            }
            Ok(received @ Received::Ignored(_)) => {
                debug!("{}", received);
            }
            Err(err @ RxError::FilterMiss { .. }) => {
                trace!("dropping frame: {}", err);
            }
            Err(err) => {
                warn!("dropping frame: {}", err);
            }
        }

        result
    }

    /// The worker loop. Frames are taken in receipt order and each one is
    /// processed to completion before the next is taken. Every outcome is
    /// handed to `sink`.
    ///
    /// Returns once the sending half of the queue is dropped and the queue is
    /// drained.
    pub async fn run<const N: usize>(
        &self,
        frames: &mut FrameReceiver<'_, N>,
        mut sink: impl FnMut(Result<Received, RxError>),
    ) {
        while let Some(frame) = frames.receive().await {
            sink(self.handle(frame.as_bytes()));
        }

        let dropped = frames.dropped();
        if dropped > 0 {
            info!("{} frames dropped on a full queue", dropped);
        }
    }
}
