use colored::*;
use esl_frame::{AddressingMode, DataFrame, Error, Frame, FrameControl, SecuredPayload};
use esl_rx::{AesCcm, Config, RawFrame, Received, Receiver, RxError};

struct Writer<'b> {
    buffer: &'b mut String,
    indent: usize,
}

impl<'b> Writer<'b> {
    fn new(buffer: &'b mut String) -> Self {
        Self { buffer, indent: 0 }
    }

    fn increase_indent(&mut self) {
        self.indent += 2;
    }

    fn decrease_indent(&mut self) {
        self.indent -= 2;
    }

    fn write(&mut self, s: String) {
        self.buffer.push_str(&" ".repeat(self.indent));
        self.buffer.push_str(&s);
    }

    fn writeln(&mut self, s: String) {
        self.write(s);
        self.buffer.push('\n');
    }

    fn section(&mut self, title: &str) {
        self.writeln(title.underline().bold().to_string());
    }

    fn field(&mut self, name: &str, value: impl core::fmt::Display) {
        self.writeln(format!("{}: {}", name.bold(), value));
    }
}

/// An error in the textual input, before any frame is decoded.
#[derive(Debug, PartialEq)]
pub enum InputError {
    /// The input is not valid hex.
    Hex(hex::FromHexError),
    /// The input does not hold a frame.
    Frame(Error),
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::Hex(err) => write!(f, "invalid hex: {err}"),
            InputError::Frame(err) => write!(f, "invalid frame: {err}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<hex::FromHexError> for InputError {
    fn from(value: hex::FromHexError) -> Self {
        InputError::Hex(value)
    }
}

impl From<Error> for InputError {
    fn from(value: Error) -> Self {
        InputError::Frame(value)
    }
}

/// Read a hex encoded frame. With `psdu` set, the frame is preceded by a PHY
/// length byte.
pub fn read_frame(input: &str, psdu: bool) -> Result<RawFrame, InputError> {
    let data = hex::decode(input.trim())?;

    Ok(if psdu {
        RawFrame::from_psdu(&data)?
    } else {
        RawFrame::new(&data)?
    })
}

/// Return a one line summary of a processed frame.
pub fn summary(result: &Result<Received, RxError>) -> String {
    match result {
        Ok(received @ Received::Message { .. }) => received.to_string(),
        Ok(received) => received.to_string().dimmed().to_string(),
        Err(err @ RxError::FilterMiss { .. }) => format!("dropped: {err}").dimmed().to_string(),
        Err(err) => format!("{}: {err}", "dropped".red().bold()),
    }
}

/// Decodes frames into a sectioned, human readable report.
pub struct FrameParser {
    receiver: Receiver<AesCcm>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl FrameParser {
    pub fn new(config: &Config) -> Self {
        Self {
            receiver: Receiver::new(config),
        }
    }

    pub fn parse_hex(&self, input: &str) -> Result<String, InputError> {
        let data = hex::decode(input.trim())?;
        Ok(self.parse(&data))
    }

    pub fn parse(&self, input: &[u8]) -> String {
        let mut buffer = String::new();
        let mut w = Writer::new(&mut buffer);

        // -----------------------------------------------------------------
        // Frame Control
        // -----------------------------------------------------------------
        if let Ok(fc) = FrameControl::new(input) {
            w.section("Frame Control");
            w.increase_indent();
            w.field(
                "frame type",
                format!("{:?}", fc.frame_type()).bright_blue(),
            );
            w.field("security", fc.security_enabled() as usize);
            w.field("frame pending", fc.frame_pending() as usize);
            w.field("ack request", fc.ack_request() as usize);
            w.field("pan id compression", fc.pan_id_compression() as usize);
            w.field(
                "sequence number suppression",
                fc.sequence_number_suppression() as usize,
            );
            w.field(
                "information elements present",
                fc.information_elements_present() as usize,
            );
            w.field(
                "dst addressing mode",
                format!("{:?}", fc.dst_addressing_mode()),
            );
            w.field(
                "src addressing mode",
                format!("{:?}", fc.src_addressing_mode()),
            );
            w.field(
                "frame version",
                format!("{} ({:?})", fc.frame_version() as usize, fc.frame_version()),
            );
            w.decrease_indent();
        }

        match Frame::new(input) {
            Ok(Frame::Data(frame)) => Self::write_data_frame(&mut w, &frame),
            Ok(Frame::Ack(ack)) => {
                w.section("Sequence Number");
                w.increase_indent();
                w.field("sequence number", ack.sequence_number());
                w.decrease_indent();
            }
            _ => (),
        }

        // -----------------------------------------------------------------
        // Outcome
        // -----------------------------------------------------------------
        match self.receiver.process(input) {
            Ok(Received::Message { message, .. }) => {
                w.section("Message");
                w.increase_indent();
                w.writeln(message.to_string().bright_green().to_string());
                w.decrease_indent();
            }
            Ok(Received::Ack { .. }) => (),
            Ok(Received::Ignored(frame_type)) => {
                w.section("Ignored");
                w.increase_indent();
                w.field("frame type", format!("{frame_type:?}"));
                w.decrease_indent();
            }
            Err(err) => {
                w.section("Dropped");
                w.increase_indent();
                w.field("reason", err.to_string().red());
                if let RxError::FilterMiss { .. } = err {
                    let accepted = self.receiver.filter().pan_id();
                    w.field("accepted pan id", format!("{accepted:04x}"));
                }
                w.decrease_indent();
            }
        }

        buffer
    }

    fn write_data_frame(w: &mut Writer, frame: &DataFrame<&[u8]>) {
        // -----------------------------------------------------------------
        // Sequence Number
        // -----------------------------------------------------------------
        w.section("Sequence Number");
        w.increase_indent();
        w.field("sequence number", frame.sequence_number());
        w.decrease_indent();

        // -----------------------------------------------------------------
        // Addressing
        // -----------------------------------------------------------------
        let addr = frame.addressing();
        w.section("Addressing");
        w.increase_indent();

        if let Some(dst_pan_id) = addr.dst_pan_id() {
            w.field("dst pan id", format!("{dst_pan_id:04x}"));
        }

        if addr.dst_addressing_mode() != AddressingMode::Absent {
            let dst_addr = addr.dst_address();
            w.field(
                "dst addr",
                format!(
                    "{}{}",
                    dst_addr,
                    if addr.is_broadcast() {
                        " (broadcast)"
                    } else {
                        ""
                    }
                ),
            );
        }

        if let Some(src_pan_id) = addr.src_pan_id() {
            w.field("src pan id", format!("{src_pan_id:04x}"));
        }

        if addr.src_addressing_mode() != AddressingMode::Absent {
            w.field("src addr", addr.src_address());
        }
        w.decrease_indent();

        // -----------------------------------------------------------------
        // Secured Payload
        // -----------------------------------------------------------------
        if let Ok(payload) = SecuredPayload::new(frame.payload()) {
            w.section("Secured Payload");
            w.increase_indent();
            w.field("ciphertext", hex::encode(payload.ciphertext()));
            w.field("mic", hex::encode(payload.mic()));
            w.field("frame counter", payload.frame_counter());
            w.decrease_indent();
        }
    }
}
