/// Drops frames that do not belong to the configured PAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanFilter {
    pan_id: u16,
}

impl PanFilter {
    /// Create a filter for the given PAN identifier.
    pub const fn new(pan_id: u16) -> Self {
        Self { pan_id }
    }

    /// Return the PAN identifier frames are accepted from.
    pub fn pan_id(&self) -> u16 {
        self.pan_id
    }

    /// Returns `true` when the frame belongs to the configured PAN. Frames
    /// without a PAN identifier never match.
    pub fn accept(&self, pan_id: Option<u16>) -> bool {
        pan_id == Some(self.pan_id)
    }
}
