//! ESL checkin-protocol messages carried in the decrypted payload.

use crate::{Error, Result};

mod assoc;
pub use assoc::*;

mod checkin;
pub use checkin::*;

mod chunk;
pub use chunk::*;

/// ESL message type, the first byte of a decrypted payload.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageType {
    /// Association request, sent by a tag.
    AssocRequest = 0xf0,
    /// Association response, sent by the access point.
    AssocResponse = 0xf1,
    /// Periodic status report, sent by a tag.
    Checkin = 0xf2,
    /// Pending update announcement, sent by the access point.
    Checkout = 0xf3,
    /// Update chunk request, sent by a tag.
    ChunkRequest = 0xf4,
    /// Update chunk, sent by the access point.
    ChunkResponse = 0xf5,
    /// Unknown message type.
    Unknown,
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        match value {
            0xf0 => Self::AssocRequest,
            0xf1 => Self::AssocResponse,
            0xf2 => Self::Checkin,
            0xf3 => Self::Checkout,
            0xf4 => Self::ChunkRequest,
            0xf5 => Self::ChunkResponse,
            _ => Self::Unknown,
        }
    }
}

impl MessageType {
    /// Return the length of the fixed-size part of the message body.
    pub const fn body_len(&self) -> usize {
        match self {
            Self::AssocRequest => AssocRequest::<&[u8]>::size(),
            Self::AssocResponse => AssocResponse::<&[u8]>::size(),
            Self::Checkin => Checkin::<&[u8]>::size(),
            Self::Checkout => Checkout::<&[u8]>::size(),
            Self::ChunkRequest => ChunkRequest::<&[u8]>::size(),
            Self::ChunkResponse => ChunkResponse::<&[u8]>::size(),
            Self::Unknown => 0,
        }
    }
}

impl core::fmt::Display for MessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AssocRequest => write!(f, "Assoc request"),
            Self::AssocResponse => write!(f, "Assoc response"),
            Self::Checkin => write!(f, "Checkin"),
            Self::Checkout => write!(f, "Checkout"),
            Self::ChunkRequest => write!(f, "Chunk request"),
            Self::ChunkResponse => write!(f, "Chunk response"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A decoded ESL message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EslMessage {
    /// An association request.
    AssocRequest(AssocRequestRepr),
    /// An association response.
    AssocResponse(AssocResponseRepr),
    /// A checkin.
    Checkin(CheckinRepr),
    /// A checkout.
    Checkout(CheckoutRepr),
    /// A chunk request.
    ChunkRequest(ChunkRequestRepr),
    /// A chunk response.
    ChunkResponse(ChunkResponseRepr),
    /// A message with an unknown tag. The body is not decoded.
    Unknown(u8),
}

impl EslMessage {
    /// Decode a decrypted payload: a one-byte message tag followed by the
    /// message body.
    ///
    /// Bytes following the fixed layout of a message are ignored, except for
    /// chunk responses where they are the chunk data.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is empty or if the body is shorter
    /// than the fixed layout of its message type. No field is read before
    /// the length is checked.
    pub fn parse(plaintext: &[u8]) -> Result<Self> {
        let Some((&tag, body)) = plaintext.split_first() else {
            return Err(Error::EmptyMessage);
        };

        let message_type = MessageType::from(tag);
        if body.len() < message_type.body_len() {
            return Err(Error::MessageTooShort {
                message_type,
                len: body.len(),
                expected: message_type.body_len(),
            });
        }

        Ok(match message_type {
            MessageType::AssocRequest => {
                Self::AssocRequest(AssocRequestRepr::parse(&AssocRequest::new_unchecked(body)))
            }
            MessageType::AssocResponse => Self::AssocResponse(AssocResponseRepr::parse(
                &AssocResponse::new_unchecked(body),
            )),
            MessageType::Checkin => Self::Checkin(CheckinRepr::parse(&Checkin::new_unchecked(body))),
            MessageType::Checkout => {
                Self::Checkout(CheckoutRepr::parse(&Checkout::new_unchecked(body)))
            }
            MessageType::ChunkRequest => Self::ChunkRequest(ChunkRequestRepr::parse(
                &ChunkRequest::new_unchecked(body),
            )),
            MessageType::ChunkResponse => Self::ChunkResponse(ChunkResponseRepr::parse(
                &ChunkResponse::new_unchecked(body),
            )?),
            MessageType::Unknown => Self::Unknown(tag),
        })
    }

    /// Return the message type.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::AssocRequest(_) => MessageType::AssocRequest,
            Self::AssocResponse(_) => MessageType::AssocResponse,
            Self::Checkin(_) => MessageType::Checkin,
            Self::Checkout(_) => MessageType::Checkout,
            Self::ChunkRequest(_) => MessageType::ChunkRequest,
            Self::ChunkResponse(_) => MessageType::ChunkResponse,
            Self::Unknown(_) => MessageType::Unknown,
        }
    }

    /// Return the message tag.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Unknown(tag) => *tag,
            other => other.message_type() as u8,
        }
    }

    /// Return the length of the message, tag included, when emitted into a
    /// buffer.
    pub fn buffer_len(&self) -> usize {
        1 + match self {
            Self::AssocRequest(repr) => repr.buffer_len(),
            Self::AssocResponse(repr) => repr.buffer_len(),
            Self::Checkin(repr) => repr.buffer_len(),
            Self::Checkout(repr) => repr.buffer_len(),
            Self::ChunkRequest(repr) => repr.buffer_len(),
            Self::ChunkResponse(repr) => repr.buffer_len(),
            Self::Unknown(_) => 0,
        }
    }

    /// Emit the message, tag included, into a buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than [`buffer_len`].
    ///
    /// [`buffer_len`]: EslMessage::buffer_len
    pub fn emit(&self, buffer: &mut [u8]) -> Result<()> {
        if buffer.len() < self.buffer_len() {
            return Err(Error::Truncated);
        }

        let Some((tag, body)) = buffer.split_first_mut() else {
            return Err(Error::Truncated);
        };
        *tag = self.tag();

        match self {
            Self::AssocRequest(repr) => repr.emit(&mut AssocRequest::new_unchecked(body)),
            Self::AssocResponse(repr) => repr.emit(&mut AssocResponse::new_unchecked(body)),
            Self::Checkin(repr) => repr.emit(&mut Checkin::new_unchecked(body)),
            Self::Checkout(repr) => repr.emit(&mut Checkout::new_unchecked(body)),
            Self::ChunkRequest(repr) => repr.emit(&mut ChunkRequest::new_unchecked(body)),
            Self::ChunkResponse(repr) => repr.emit(&mut ChunkResponse::new_unchecked(body)),
            Self::Unknown(_) => {}
        }

        Ok(())
    }
}

impl core::fmt::Display for EslMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AssocRequest(repr) => write!(f, "{repr}"),
            Self::AssocResponse(repr) => write!(f, "{repr}"),
            Self::Checkin(repr) => write!(f, "{repr}"),
            Self::Checkout(repr) => write!(f, "{repr}"),
            Self::ChunkRequest(repr) => write!(f, "{repr}"),
            Self::ChunkResponse(repr) => write!(f, "{repr}"),
            Self::Unknown(tag) => write!(f, "Unknown ESL packet type ({tag})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    const TAGS: [MessageType; 6] = [
        MessageType::AssocRequest,
        MessageType::AssocResponse,
        MessageType::Checkin,
        MessageType::Checkout,
        MessageType::ChunkRequest,
        MessageType::ChunkResponse,
    ];

    #[test]
    fn one_byte_short_is_rejected_for_every_tag() {
        for message_type in TAGS {
            let expected = message_type.body_len();
            let mut plaintext = vec![0u8; 1 + expected - 1];
            plaintext[0] = message_type as u8;

            assert_eq!(
                EslMessage::parse(&plaintext),
                Err(Error::MessageTooShort {
                    message_type,
                    len: expected - 1,
                    expected,
                })
            );

            plaintext.push(0);
            assert_eq!(
                EslMessage::parse(&plaintext).map(|m| m.message_type()),
                Ok(message_type)
            );
        }
    }

    #[test]
    fn tag_only_is_rejected_for_every_tag() {
        for message_type in TAGS {
            assert!(matches!(
                EslMessage::parse(&[message_type as u8]),
                Err(Error::MessageTooShort { len: 0, .. })
            ));
        }
    }

    #[test]
    fn empty() {
        assert_eq!(EslMessage::parse(&[]), Err(Error::EmptyMessage));
    }

    #[test]
    fn unknown_tag() {
        let message = EslMessage::parse(&[0x42, 0x01, 0x02]).unwrap();
        assert_eq!(message, EslMessage::Unknown(0x42));
        assert_eq!(message.message_type(), MessageType::Unknown);
        assert_eq!(message.tag(), 0x42);
        assert_eq!(message.to_string(), "Unknown ESL packet type (66)");

        assert_eq!(EslMessage::parse(&[0xf6]), Ok(EslMessage::Unknown(0xf6)));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut plaintext = vec![0u8; 1 + 15 + 3];
        plaintext[0] = MessageType::Checkin as u8;
        plaintext[15] = CHECKIN_TEMP_OFFSET;
        assert!(matches!(
            EslMessage::parse(&plaintext),
            Ok(EslMessage::Checkin(CheckinRepr { temperature: 0, .. }))
        ));
    }

    #[test]
    fn emit_checkin() {
        let message = EslMessage::Checkin(CheckinRepr {
            software_version: 2,
            hardware_type: 0x0001,
            battery_mv: 2900,
            last_packet_lqi: 200,
            last_packet_rssi: -45,
            temperature: 20,
        });

        let mut buffer = vec![0u8; message.buffer_len()];
        message.emit(&mut buffer).unwrap();
        assert_eq!(
            buffer,
            hex::decode("f202000000000000000100540bc8d393").unwrap()
        );
        assert_eq!(EslMessage::parse(&buffer), Ok(message.clone()));

        let mut short = vec![0u8; message.buffer_len() - 1];
        assert_eq!(message.emit(&mut short), Err(Error::Truncated));
    }

    #[test]
    fn display() {
        let message = EslMessage::parse(
            &hex::decode("f202000000000000000100540bc8d393").unwrap(),
        )
        .unwrap();
        assert_eq!(
            message.to_string(),
            "Checkin: sw v2, hw 0001, batt 2900 mV, LQI 200, RSSI -45, temperature 20 *c"
        );

        let message = EslMessage::parse(&hex::decode("f50002000001c0ffee").unwrap()).unwrap();
        assert_eq!(
            message.to_string(),
            "Chunk response: offset 512, os update yes, c0ffee"
        );

        let message =
            EslMessage::parse(&hex::decode("f40500000000000000000200004000").unwrap()).unwrap();
        assert_eq!(
            message.to_string(),
            "Chunk request: version 5, offset 512, len 64, os update no"
        );
    }

    #[test]
    fn too_short_display() {
        let err = EslMessage::parse(&[0xf2, 0x00]).unwrap_err();
        assert_eq!(err.to_string(), "Checkin, too short (1 < 15 bytes)");
        assert!(!err.is_structural());
    }
}
