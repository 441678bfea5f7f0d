use crate::{AddressingFields, DataFrame, FrameControl, Identity};

mod addressing;
pub use addressing::AddressingRepr;

mod frame_control;
pub use frame_control::FrameControlRepr;

/// A high-level representation of the MAC header of a data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct HeaderRepr {
    /// The frame control field.
    pub frame_control: FrameControlRepr,
    /// The sequence number.
    pub sequence_number: u8,
    /// The addressing fields.
    pub addressing: AddressingRepr,
}

impl HeaderRepr {
    /// Parse the MAC header of a data frame.
    pub fn parse<T: AsRef<[u8]>>(frame: &DataFrame<T>) -> Self {
        Self {
            frame_control: FrameControlRepr::parse(frame.frame_control()),
            sequence_number: frame.sequence_number(),
            addressing: AddressingRepr::parse(&frame.addressing()),
        }
    }

    /// Return the length of the header when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        self.frame_control.buffer_len() + 1 + self.addressing.buffer_len()
    }

    /// Emit the header into a buffer.
    ///
    /// # Panics
    /// Panics if the buffer is shorter than [`buffer_len`].
    ///
    /// [`buffer_len`]: HeaderRepr::buffer_len
    pub fn emit(&self, buffer: &mut [u8]) {
        let (fc, rest) = buffer.split_at_mut(2);
        self.frame_control.emit(&mut FrameControl::new_unchecked(fc));

        rest[0] = self.sequence_number;

        self.addressing.emit(&mut AddressingFields::new_unchecked(
            &mut rest[1..],
            self.frame_control.dst_addressing_mode,
            self.frame_control.src_addressing_mode,
        ));
    }
}

/// One-line summary of the header: PAN, both short addresses, both 8-byte
/// identities and a broadcast marker.
impl core::fmt::Display for HeaderRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let addressing = &self.addressing;

        match addressing.pan_id() {
            Some(pan_id) => write!(f, "PAN {pan_id:04x}")?,
            None => write!(f, "PAN ----")?,
        }

        write!(
            f,
            " S {:04x} {} D {:04x} {}",
            addressing.src_address.short_value(),
            Identity(&addressing.src_address.extended_bytes()),
            addressing.dst_address.short_value(),
            Identity(&addressing.dst_address.extended_bytes()),
        )?;

        if addressing.is_broadcast() {
            write!(f, " BROADCAST")?;
        }

        Ok(())
    }
}
