//! Addressing fields readers and writers.

use super::AddressingRepr;
use super::{Error, Result};

/// An IEEE 802.15.4 address.
///
/// Extended addresses are stored most significant byte first, which is the
/// reverse of their order on the wire.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Address {
    /// No address.
    Absent,
    /// A 16-bit short address.
    Short(u16),
    /// A 64-bit extended address.
    Extended([u8; 8]),
}

impl Address {
    /// The broadcast address.
    pub const BROADCAST: Address = Address::Short(0xffff);

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Return the 8-byte identity of the address.
    ///
    /// Only extended addresses carry one; short and absent addresses map to
    /// all zeros.
    pub fn extended_bytes(&self) -> [u8; 8] {
        match self {
            Address::Extended(value) => *value,
            _ => [0; 8],
        }
    }

    /// Return the 16-bit short address, or zero when the address is not short.
    pub fn short_value(&self) -> u16 {
        match self {
            Address::Short(value) => *value,
            _ => 0,
        }
    }

    /// Return the length of the address in octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        AddressingMode::from(*self).size()
    }
}

impl From<Address> for AddressingMode {
    fn from(value: Address) -> Self {
        match value {
            Address::Absent => AddressingMode::Absent,
            Address::Short(_) => AddressingMode::Short,
            Address::Extended(_) => AddressingMode::Extended,
        }
    }
}

/// Format an 8-byte identity as colon separated hex octets.
pub struct Identity<'a>(pub &'a [u8; 8]);

impl core::fmt::Display for Identity<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let value = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            value[0], value[1], value[2], value[3], value[4], value[5], value[6], value[7]
        )
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Address::Absent => write!(f, "absent"),
            Address::Short(value) => write!(f, "{value:04x}"),
            Address::Extended(value) => write!(f, "{}", Identity(value)),
        }
    }
}

/// IEEE 802.15.4 addressing mode.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AddressingMode {
    /// PAN identifier and address are not present.
    Absent = 0b00,
    /// Reserved addressing mode.
    Reserved = 0b01,
    /// 16-bit short address.
    Short = 0b10,
    /// 64-bit extended address.
    Extended = 0b11,
}

impl AddressingMode {
    /// Return the size of the address in octets.
    pub fn size(&self) -> usize {
        match self {
            Self::Absent | Self::Reserved => 0,
            Self::Short => 2,
            Self::Extended => 8,
        }
    }
}

impl From<u8> for AddressingMode {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::Absent,
            0b01 => Self::Reserved,
            0b10 => Self::Short,
            _ => Self::Extended,
        }
    }
}

const PAN_ID_LEN: usize = 2;

/// A reader/writer for the IEEE 802.15.4 Addressing Fields of a data frame.
///
/// The layout is driven by the two addressing modes:
/// - a destination PAN identifier precedes the destination address unless
///   the destination is absent,
/// - a broadcast frame (destination PAN and short address both `0xffff`)
///   carries an extra source PAN identifier after the destination address,
/// - the source address never has a PAN identifier of its own.
pub struct AddressingFields<T: AsRef<[u8]>> {
    buffer: T,
    dst_mode: AddressingMode,
    src_mode: AddressingMode,
}

impl<T: AsRef<[u8]>> AddressingFields<T> {
    /// Create a new [`AddressingFields`] reader/writer from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error when either addressing mode is reserved, or when the
    /// buffer is too short to contain the fields implied by the modes.
    pub fn new(buffer: T, dst_mode: AddressingMode, src_mode: AddressingMode) -> Result<Self> {
        if dst_mode == AddressingMode::Reserved {
            return Err(Error::ReservedDstAddressingMode);
        }

        if src_mode == AddressingMode::Reserved {
            return Err(Error::ReservedSrcAddressingMode);
        }

        let af = Self::new_unchecked(buffer, dst_mode, src_mode);

        if !af.check_len() {
            return Err(Error::Truncated);
        }

        Ok(af)
    }

    /// Check if the buffer is large enough to contain the addressing fields.
    fn check_len(&self) -> bool {
        // The broadcast check reads the destination fields, so they have to
        // be present before the full length is known.
        let len = self.buffer.as_ref().len();
        len >= self.dst_len() && len >= self.len()
    }

    /// Create a new [`AddressingFields`] reader/writer from a given buffer
    /// without checking the length.
    pub fn new_unchecked(buffer: T, dst_mode: AddressingMode, src_mode: AddressingMode) -> Self {
        Self {
            buffer,
            dst_mode,
            src_mode,
        }
    }

    /// Return the destination addressing mode.
    pub fn dst_addressing_mode(&self) -> AddressingMode {
        self.dst_mode
    }

    /// Return the source addressing mode.
    pub fn src_addressing_mode(&self) -> AddressingMode {
        self.src_mode
    }

    /// Return the length of the destination PAN identifier and address.
    fn dst_len(&self) -> usize {
        match self.dst_mode {
            AddressingMode::Absent | AddressingMode::Reserved => 0,
            mode => PAN_ID_LEN + mode.size(),
        }
    }

    /// Return the length of the Addressing Fields in octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.dst_len()
            + if self.is_broadcast() { PAN_ID_LEN } else { 0 }
            + self.src_mode.size()
    }

    fn read_u16(&self, offset: usize) -> u16 {
        let b = &self.buffer.as_ref()[offset..][..2];
        u16::from_le_bytes([b[0], b[1]])
    }

    fn read_address(&self, offset: usize, mode: AddressingMode) -> Address {
        match mode {
            AddressingMode::Absent | AddressingMode::Reserved => Address::Absent,
            AddressingMode::Short => Address::Short(self.read_u16(offset)),
            AddressingMode::Extended => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&self.buffer.as_ref()[offset..][..8]);
                raw.reverse();
                Address::Extended(raw)
            }
        }
    }

    /// Returns `true` when both the destination PAN identifier and the short
    /// destination address are `0xffff`.
    pub fn is_broadcast(&self) -> bool {
        self.dst_mode == AddressingMode::Short
            && self.read_u16(0) == 0xffff
            && self.read_u16(PAN_ID_LEN) == 0xffff
    }

    /// Return the destination PAN identifier if present.
    pub fn dst_pan_id(&self) -> Option<u16> {
        match self.dst_mode {
            AddressingMode::Short | AddressingMode::Extended => Some(self.read_u16(0)),
            _ => None,
        }
    }

    /// Return the source PAN identifier, only present in broadcast frames.
    pub fn src_pan_id(&self) -> Option<u16> {
        self.is_broadcast().then(|| self.read_u16(self.dst_len()))
    }

    /// Return the PAN identifier the frame belongs to.
    ///
    /// For broadcast frames this is the source PAN identifier, otherwise the
    /// destination PAN identifier.
    pub fn pan_id(&self) -> Option<u16> {
        self.src_pan_id().or_else(|| self.dst_pan_id())
    }

    /// Return the destination [`Address`] as found on the wire.
    pub fn dst_address(&self) -> Address {
        self.read_address(PAN_ID_LEN, self.dst_mode)
    }

    /// Return the source [`Address`].
    pub fn src_address(&self) -> Address {
        self.read_address(self.len() - self.src_mode.size(), self.src_mode)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> AddressingFields<T> {
    fn write_u16(&mut self, offset: usize, value: u16) {
        self.buffer.as_mut()[offset..][..2].copy_from_slice(&value.to_le_bytes());
    }

    fn write_address(&mut self, offset: usize, address: Address) -> usize {
        match address {
            Address::Absent => {}
            Address::Short(value) => self.write_u16(offset, value),
            Address::Extended(value) => {
                let mut raw = value;
                raw.reverse();
                self.buffer.as_mut()[offset..][..8].copy_from_slice(&raw);
            }
        }
        address.len()
    }

    /// Write the fields of an [`AddressingRepr`] into the buffer.
    ///
    /// The addressing modes of the reader/writer are not consulted: the
    /// fields present in the representation are written in order.
    pub fn write_fields(&mut self, fields: &AddressingRepr) {
        let mut offset = 0;

        if let Some(id) = fields.dst_pan_id {
            self.write_u16(offset, id);
            offset += PAN_ID_LEN;
        }

        offset += self.write_address(offset, fields.dst_address);

        if let Some(id) = fields.src_pan_id {
            self.write_u16(offset, id);
            offset += PAN_ID_LEN;
        }

        self.write_address(offset, fields.src_address);
    }
}
