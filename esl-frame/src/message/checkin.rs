use esl_macros::frame;

/// Offset of the encoded checkin temperature: `raw - CHECKIN_TEMP_OFFSET` is
/// the temperature in °C.
pub const CHECKIN_TEMP_OFFSET: u8 = 0x7f;

#[frame]
/// A reader/writer for the body of a checkin.
pub struct Checkin {
    /// Return the software version.
    software_version: u64,
    /// Return the hardware type.
    hardware_type: u16,
    /// Return the battery voltage in mV.
    battery_mv: u16,
    /// Return the link quality of the last received packet.
    last_packet_lqi: u8,
    /// Return the signal strength of the last received packet.
    last_packet_rssi: i8,
    /// Return the offset-encoded temperature.
    temperature: u8,
}

/// A high-level representation of a checkin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CheckinRepr {
    /// Software version.
    pub software_version: u64,
    /// Hardware type.
    pub hardware_type: u16,
    /// Battery voltage in mV.
    pub battery_mv: u16,
    /// Link quality of the last received packet.
    pub last_packet_lqi: u8,
    /// Signal strength of the last received packet.
    pub last_packet_rssi: i8,
    /// Temperature in °C.
    pub temperature: i16,
}

impl CheckinRepr {
    /// Parse a checkin body.
    pub fn parse(reader: &Checkin<&[u8]>) -> Self {
        Self {
            software_version: reader.software_version(),
            hardware_type: reader.hardware_type(),
            battery_mv: reader.battery_mv(),
            last_packet_lqi: reader.last_packet_lqi(),
            last_packet_rssi: reader.last_packet_rssi(),
            temperature: reader.temperature() as i16 - CHECKIN_TEMP_OFFSET as i16,
        }
    }

    /// Return the length of the body when emitted into a buffer.
    pub const fn buffer_len(&self) -> usize {
        Checkin::<&[u8]>::size()
    }

    /// Emit the body into a buffer.
    ///
    /// Temperatures outside of the encodable range wrap around.
    pub fn emit(&self, writer: &mut Checkin<&mut [u8]>) {
        writer.set_software_version(self.software_version);
        writer.set_hardware_type(self.hardware_type);
        writer.set_battery_mv(self.battery_mv);
        writer.set_last_packet_lqi(self.last_packet_lqi);
        writer.set_last_packet_rssi(self.last_packet_rssi);
        writer.set_temperature(self.temperature.wrapping_add(CHECKIN_TEMP_OFFSET as i16) as u8);
    }
}

impl core::fmt::Display for CheckinRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Checkin: sw v{}, hw {:04x}, batt {} mV, LQI {}, RSSI {}, temperature {} *c",
            self.software_version,
            self.hardware_type,
            self.battery_mv,
            self.last_packet_lqi,
            self.last_packet_rssi,
            self.temperature,
        )
    }
}

#[frame]
/// A reader/writer for the body of a checkout, announcing pending updates.
pub struct Checkout {
    /// Return the version of the pending image update.
    image_version: u64,
    /// Return the size of the pending image update.
    image_size: u32,
    /// Return the version of the pending OS update.
    os_version: u64,
    /// Return the size of the pending OS update.
    os_size: u32,
}

/// A high-level representation of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CheckoutRepr {
    /// Version of the pending image update.
    pub image_version: u64,
    /// Size of the pending image update.
    pub image_size: u32,
    /// Version of the pending OS update.
    pub os_version: u64,
    /// Size of the pending OS update.
    pub os_size: u32,
}

impl CheckoutRepr {
    /// Parse a checkout body.
    pub fn parse(reader: &Checkout<&[u8]>) -> Self {
        Self {
            image_version: reader.image_version(),
            image_size: reader.image_size(),
            os_version: reader.os_version(),
            os_size: reader.os_size(),
        }
    }

    /// Return the length of the body when emitted into a buffer.
    pub const fn buffer_len(&self) -> usize {
        Checkout::<&[u8]>::size()
    }

    /// Emit the body into a buffer.
    pub fn emit(&self, writer: &mut Checkout<&mut [u8]>) {
        writer.set_image_version(self.image_version);
        writer.set_image_size(self.image_size);
        writer.set_os_version(self.os_version);
        writer.set_os_size(self.os_size);
    }
}

impl core::fmt::Display for CheckoutRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Checkout: image version {}, image size {}, os version {}, os size {}",
            self.image_version, self.image_size, self.os_version, self.os_size,
        )
    }
}
