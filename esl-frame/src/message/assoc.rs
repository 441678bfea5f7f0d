use esl_macros::frame;

#[frame]
/// A reader/writer for the body of an association request.
pub struct AssocRequest {
    /// Return the protocol version.
    protocol_version: u8,
    /// Return the software version.
    software_version: u64,
    /// Return the hardware type.
    hardware_type: u16,
    /// Return the battery voltage in mV.
    battery_mv: u16,
    /// Return the screen width in pixels.
    screen_pixel_width: u16,
    /// Return the screen width in mm.
    screen_mm_width: u16,
    /// Return the screen height in pixels.
    screen_pixel_height: u16,
    /// Return the screen height in mm.
    screen_mm_height: u16,
    /// Return the bitmap of supported compression methods.
    compressions_supported: u16,
    /// Return the maximum wait time in ms.
    max_wait_ms: u16,
    /// Return the screen type.
    screen_type: u8,
}

/// A high-level representation of an association request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssocRequestRepr {
    /// Protocol version.
    pub protocol_version: u8,
    /// Software version.
    pub software_version: u64,
    /// Hardware type.
    pub hardware_type: u16,
    /// Battery voltage in mV.
    pub battery_mv: u16,
    /// Screen width in pixels.
    pub screen_pixel_width: u16,
    /// Screen width in mm.
    pub screen_mm_width: u16,
    /// Screen height in pixels.
    pub screen_pixel_height: u16,
    /// Screen height in mm.
    pub screen_mm_height: u16,
    /// Bitmap of supported compression methods.
    pub compressions_supported: u16,
    /// Maximum wait time in ms.
    pub max_wait_ms: u16,
    /// Screen type.
    pub screen_type: u8,
}

impl AssocRequestRepr {
    /// Parse an association request body.
    pub fn parse(reader: &AssocRequest<&[u8]>) -> Self {
        Self {
            protocol_version: reader.protocol_version(),
            software_version: reader.software_version(),
            hardware_type: reader.hardware_type(),
            battery_mv: reader.battery_mv(),
            screen_pixel_width: reader.screen_pixel_width(),
            screen_mm_width: reader.screen_mm_width(),
            screen_pixel_height: reader.screen_pixel_height(),
            screen_mm_height: reader.screen_mm_height(),
            compressions_supported: reader.compressions_supported(),
            max_wait_ms: reader.max_wait_ms(),
            screen_type: reader.screen_type(),
        }
    }

    /// Return the length of the body when emitted into a buffer.
    pub const fn buffer_len(&self) -> usize {
        AssocRequest::<&[u8]>::size()
    }

    /// Emit the body into a buffer.
    pub fn emit(&self, writer: &mut AssocRequest<&mut [u8]>) {
        writer.set_protocol_version(self.protocol_version);
        writer.set_software_version(self.software_version);
        writer.set_hardware_type(self.hardware_type);
        writer.set_battery_mv(self.battery_mv);
        writer.set_screen_pixel_width(self.screen_pixel_width);
        writer.set_screen_mm_width(self.screen_mm_width);
        writer.set_screen_pixel_height(self.screen_pixel_height);
        writer.set_screen_mm_height(self.screen_mm_height);
        writer.set_compressions_supported(self.compressions_supported);
        writer.set_max_wait_ms(self.max_wait_ms);
        writer.set_screen_type(self.screen_type);
    }
}

impl core::fmt::Display for AssocRequestRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Assoc request: proto v{}, sw v{}, hw {:04x}, batt {} mV, w {} px ({} mm), h {} px ({} mm), c {:04x}, max wait {} ms, screen type {}",
            self.protocol_version,
            self.software_version,
            self.hardware_type,
            self.battery_mv,
            self.screen_pixel_width,
            self.screen_mm_width,
            self.screen_pixel_height,
            self.screen_mm_height,
            self.compressions_supported,
            self.max_wait_ms,
            self.screen_type,
        )
    }
}

#[frame]
/// A reader/writer for the body of an association response.
pub struct AssocResponse {
    /// Return the checkin delay.
    checkin_delay: u32,
    /// Return the retry delay.
    retry_delay: u32,
    /// Return the number of failed checkins before the screen is blanked.
    failed_checkins_till_blank: u8,
    /// Return the number of failed checkins before the tag disassociates.
    failed_checkins_till_disassociate: u8,
    /// Return the new network key.
    #[bytes(16)]
    new_key: &[u8],
}

/// A high-level representation of an association response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssocResponseRepr {
    /// Checkin delay.
    pub checkin_delay: u32,
    /// Retry delay.
    pub retry_delay: u32,
    /// Number of failed checkins before the screen is blanked.
    pub failed_checkins_till_blank: u8,
    /// Number of failed checkins before the tag disassociates.
    pub failed_checkins_till_disassociate: u8,
    /// New network key, as four little-endian words.
    pub new_key: [u32; 4],
}

impl AssocResponseRepr {
    /// Parse an association response body.
    pub fn parse(reader: &AssocResponse<&[u8]>) -> Self {
        let mut new_key = [0u32; 4];
        for (word, chunk) in new_key.iter_mut().zip(reader.new_key().chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Self {
            checkin_delay: reader.checkin_delay(),
            retry_delay: reader.retry_delay(),
            failed_checkins_till_blank: reader.failed_checkins_till_blank(),
            failed_checkins_till_disassociate: reader.failed_checkins_till_disassociate(),
            new_key,
        }
    }

    /// Return the length of the body when emitted into a buffer.
    pub const fn buffer_len(&self) -> usize {
        AssocResponse::<&[u8]>::size()
    }

    /// Emit the body into a buffer.
    pub fn emit(&self, writer: &mut AssocResponse<&mut [u8]>) {
        writer.set_checkin_delay(self.checkin_delay);
        writer.set_retry_delay(self.retry_delay);
        writer.set_failed_checkins_till_blank(self.failed_checkins_till_blank);
        writer.set_failed_checkins_till_disassociate(self.failed_checkins_till_disassociate);

        let mut new_key = [0u8; 16];
        for (chunk, word) in new_key.chunks_exact_mut(4).zip(self.new_key.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        writer.set_new_key(&new_key);
    }
}

impl core::fmt::Display for AssocResponseRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Assoc response: checkin delay {}, retry delay {}, failed checkins till blank {}, failed checkins till disassociate {}, new key {:08x} {:08x} {:08x} {:08x}",
            self.checkin_delay,
            self.retry_delay,
            self.failed_checkins_till_blank,
            self.failed_checkins_till_disassociate,
            self.new_key[0],
            self.new_key[1],
            self.new_key[2],
            self.new_key[3],
        )
    }
}
