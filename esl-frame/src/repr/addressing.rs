use crate::{Address, AddressingFields};

/// A high-level representation of the Addressing Fields of a data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AddressingRepr {
    /// Destination PAN identifier.
    pub dst_pan_id: Option<u16>,
    /// Destination address, as found on the wire.
    pub dst_address: Address,
    /// Source PAN identifier, only present in broadcast frames.
    pub src_pan_id: Option<u16>,
    /// Source address.
    pub src_address: Address,
}

impl AddressingRepr {
    /// Parse the Addressing Fields.
    pub fn parse(addressing: &AddressingFields<&'_ [u8]>) -> Self {
        Self {
            dst_pan_id: addressing.dst_pan_id(),
            dst_address: addressing.dst_address(),
            src_pan_id: addressing.src_pan_id(),
            src_address: addressing.src_address(),
        }
    }

    /// Returns `true` for broadcast frames.
    pub fn is_broadcast(&self) -> bool {
        self.dst_pan_id == Some(0xffff) && self.dst_address.is_broadcast()
    }

    /// Return the PAN identifier the frame belongs to.
    pub fn pan_id(&self) -> Option<u16> {
        self.src_pan_id.or(self.dst_pan_id)
    }

    /// Return the 8-byte identity of the source.
    pub fn source(&self) -> [u8; 8] {
        self.src_address.extended_bytes()
    }

    /// Return the 8-byte identity of the destination. Broadcast frames are
    /// addressed to `ff:ff:ff:ff:ff:ff:ff:ff`.
    pub fn destination(&self) -> [u8; 8] {
        if self.is_broadcast() {
            [0xff; 8]
        } else {
            self.dst_address.extended_bytes()
        }
    }

    /// Return the length of the Addressing Fields in octets.
    pub fn buffer_len(&self) -> usize {
        self.dst_pan_id.map_or(0, |_| 2)
            + self.dst_address.len()
            + self.src_pan_id.map_or(0, |_| 2)
            + self.src_address.len()
    }

    /// Emit the Addressing Fields into the given buffer.
    pub fn emit(&self, buffer: &mut AddressingFields<&'_ mut [u8]>) {
        buffer.write_fields(self);
    }
}
