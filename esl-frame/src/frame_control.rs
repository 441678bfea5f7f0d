//! IEEE 802.15.4 Frame Control field readers and writers.

use super::AddressingMode;
use super::{Error, Result};

/// IEEE 802.15.4 frame type.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum FrameType {
    /// Beacon frame.
    Beacon = 0b000,
    /// Data frame.
    Data = 0b001,
    /// Acknowledgment frame.
    Ack = 0b010,
    /// MAC command frame.
    MacCommand = 0b011,
    /// Reserved frame type.
    Reserved = 0b100,
    /// Multipurpose frame.
    Multipurpose = 0b101,
    /// Fragment or FRAK frame.
    FragmentOrFrak = 0b110,
    /// Extended frame type.
    Extended = 0b111,
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value & 0b111 {
            0b000 => Self::Beacon,
            0b001 => Self::Data,
            0b010 => Self::Ack,
            0b011 => Self::MacCommand,
            0b100 => Self::Reserved,
            0b101 => Self::Multipurpose,
            0b110 => Self::FragmentOrFrak,
            _ => Self::Extended,
        }
    }
}

/// IEEE 802.15.4 frame version.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum FrameVersion {
    /// IEEE 802.15.4-2003.
    Ieee802154_2003 = 0b00,
    /// IEEE 802.15.4-2006.
    Ieee802154_2006 = 0b01,
    /// IEEE 802.15.4-2020.
    Ieee802154_2020 = 0b10,
    /// Reserved frame version.
    Reserved = 0b11,
}

impl From<u8> for FrameVersion {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::Ieee802154_2003,
            0b01 => Self::Ieee802154_2006,
            0b10 => Self::Ieee802154_2020,
            _ => Self::Reserved,
        }
    }
}

const FRAME_TYPE_SHIFT: u16 = 0;
const SECURITY_ENABLED_SHIFT: u16 = 3;
const FRAME_PENDING_SHIFT: u16 = 4;
const ACK_REQUEST_SHIFT: u16 = 5;
const PAN_ID_COMPRESSION_SHIFT: u16 = 6;
const RESERVED_SHIFT: u16 = 7;
const SEQUENCE_NUMBER_SUPPRESSION_SHIFT: u16 = 8;
const INFORMATION_ELEMENTS_PRESENT_SHIFT: u16 = 9;
const DST_ADDRESSING_MODE_SHIFT: u16 = 10;
const FRAME_VERSION_SHIFT: u16 = 12;
const SRC_ADDRESSING_MODE_SHIFT: u16 = 14;

/// A reader/writer for the IEEE 802.15.4 Frame Control field.
pub struct FrameControl<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> FrameControl<T> {
    /// Create a new [`FrameControl`] reader/writer from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short.
    pub fn new(buffer: T) -> Result<Self> {
        let fc = Self::new_unchecked(buffer);

        if !fc.check_len() {
            return Err(Error::Truncated);
        }

        Ok(fc)
    }

    /// Returns `false` if the buffer is too short to contain the Frame Control field.
    fn check_len(&self) -> bool {
        self.buffer.as_ref().len() >= 2
    }

    /// Create a new [`FrameControl`] reader/writer from a given buffer without length checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Check the fields that must be zero for a frame to be decoded further.
    ///
    /// A cleared PAN ID compression field is accepted.
    pub fn check(&self) -> Result<()> {
        if self.reserved() {
            return Err(Error::ReservedBitSet);
        }

        if self.sequence_number_suppression() {
            return Err(Error::SequenceNumberSuppressed);
        }

        if self.information_elements_present() {
            return Err(Error::InformationElementsPresent);
        }

        match self.frame_version() {
            FrameVersion::Ieee802154_2003 => Ok(()),
            version => Err(Error::UnsupportedFrameVersion(version)),
        }
    }

    /// Return the raw 16-bit value of the field.
    pub fn raw(&self) -> u16 {
        let b = &self.buffer.as_ref()[..2];
        u16::from_le_bytes([b[0], b[1]])
    }

    fn bit(&self, shift: u16) -> bool {
        (self.raw() >> shift) & 0b1 == 1
    }

    /// Return the [`FrameType`] field.
    pub fn frame_type(&self) -> FrameType {
        FrameType::from((self.raw() >> FRAME_TYPE_SHIFT) as u8)
    }

    /// Returns `true` when the security enabled field is set.
    pub fn security_enabled(&self) -> bool {
        self.bit(SECURITY_ENABLED_SHIFT)
    }

    /// Returns `true` when the frame pending field is set.
    pub fn frame_pending(&self) -> bool {
        self.bit(FRAME_PENDING_SHIFT)
    }

    /// Returns `true` when the acknowledgement request field is set.
    pub fn ack_request(&self) -> bool {
        self.bit(ACK_REQUEST_SHIFT)
    }

    /// Returns `true` when the PAN ID compression field is set.
    pub fn pan_id_compression(&self) -> bool {
        self.bit(PAN_ID_COMPRESSION_SHIFT)
    }

    /// Returns `true` when the reserved field is set.
    pub fn reserved(&self) -> bool {
        self.bit(RESERVED_SHIFT)
    }

    /// Returns `true` when the sequence number suppression field is set.
    pub fn sequence_number_suppression(&self) -> bool {
        self.bit(SEQUENCE_NUMBER_SUPPRESSION_SHIFT)
    }

    /// Returns `true` when the information element field is set.
    pub fn information_elements_present(&self) -> bool {
        self.bit(INFORMATION_ELEMENTS_PRESENT_SHIFT)
    }

    /// Return the Destination [`AddressingMode`].
    pub fn dst_addressing_mode(&self) -> AddressingMode {
        AddressingMode::from((self.raw() >> DST_ADDRESSING_MODE_SHIFT) as u8)
    }

    /// Return the Source [`AddressingMode`].
    pub fn src_addressing_mode(&self) -> AddressingMode {
        AddressingMode::from((self.raw() >> SRC_ADDRESSING_MODE_SHIFT) as u8)
    }

    /// Return the [`FrameVersion`].
    pub fn frame_version(&self) -> FrameVersion {
        FrameVersion::from((self.raw() >> FRAME_VERSION_SHIFT) as u8)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> FrameControl<T> {
    fn set_field(&mut self, shift: u16, mask: u16, value: u16) {
        let b = &mut self.buffer.as_mut()[..2];
        let mut raw = u16::from_le_bytes([b[0], b[1]]);
        raw = (raw & !(mask << shift)) | ((value & mask) << shift);
        b.copy_from_slice(&raw.to_le_bytes());
    }

    /// Set the frame type field.
    pub fn set_frame_type(&mut self, frame_type: FrameType) {
        self.set_field(FRAME_TYPE_SHIFT, 0b111, frame_type as u16);
    }

    /// Set the security enabled field.
    pub fn set_security_enabled(&mut self, security_enabled: bool) {
        self.set_field(SECURITY_ENABLED_SHIFT, 0b1, security_enabled as u16);
    }

    /// Set the frame pending field.
    pub fn set_frame_pending(&mut self, frame_pending: bool) {
        self.set_field(FRAME_PENDING_SHIFT, 0b1, frame_pending as u16);
    }

    /// Set the acknowledgement request field.
    pub fn set_ack_request(&mut self, ack_request: bool) {
        self.set_field(ACK_REQUEST_SHIFT, 0b1, ack_request as u16);
    }

    /// Set the PAN ID compression field.
    pub fn set_pan_id_compression(&mut self, pan_id_compression: bool) {
        self.set_field(PAN_ID_COMPRESSION_SHIFT, 0b1, pan_id_compression as u16);
    }

    /// Set the reserved field.
    pub fn set_reserved(&mut self, reserved: bool) {
        self.set_field(RESERVED_SHIFT, 0b1, reserved as u16);
    }

    /// Set the sequence number suppression field.
    pub fn set_sequence_number_suppression(&mut self, sequence_number_suppression: bool) {
        self.set_field(
            SEQUENCE_NUMBER_SUPPRESSION_SHIFT,
            0b1,
            sequence_number_suppression as u16,
        );
    }

    /// Set the information element present field.
    pub fn set_information_elements_present(&mut self, information_elements_present: bool) {
        self.set_field(
            INFORMATION_ELEMENTS_PRESENT_SHIFT,
            0b1,
            information_elements_present as u16,
        );
    }

    /// Set the destination addressing mode field.
    pub fn set_dst_addressing_mode(&mut self, addressing_mode: AddressingMode) {
        self.set_field(DST_ADDRESSING_MODE_SHIFT, 0b11, addressing_mode as u16);
    }

    /// Set the source addressing mode field.
    pub fn set_src_addressing_mode(&mut self, addressing_mode: AddressingMode) {
        self.set_field(SRC_ADDRESSING_MODE_SHIFT, 0b11, addressing_mode as u16);
    }

    /// Set the frame version field.
    pub fn set_frame_version(&mut self, frame_version: FrameVersion) {
        self.set_field(FRAME_VERSION_SHIFT, 0b11, frame_version as u16);
    }
}
