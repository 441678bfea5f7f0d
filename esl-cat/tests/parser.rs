use esl_cat::{read_frame, summary, FrameParser, InputError};
use esl_rx::{Config, Key, Receiver};

use strip_ansi_escapes::strip;

const ASSOC_REQUEST: &str = "618801474400000100a246ba359bbc3adfdf8548aee5104267187729c56dd5a0a0279a77b9a000822a0000000000";
const CHUNK_RESPONSE: &str =
    "61c803ffffffff4744c7d9b514004b120000f01b59f95e164a7752f30638070000000000";

fn parse(parser: &FrameParser, input: &str) -> String {
    String::from_utf8(strip(parser.parse_hex(input).unwrap())).unwrap()
}

#[test]
fn assoc_request() {
    let output = parse(&FrameParser::default(), ASSOC_REQUEST);
    assert_eq!(
        output,
        "Frame Control
  frame type: Data
  security: 0
  frame pending: 0
  ack request: 1
  pan id compression: 1
  sequence number suppression: 0
  information elements present: 0
  dst addressing mode: Short
  src addressing mode: Short
  frame version: 0 (Ieee802154_2003)
Sequence Number
  sequence number: 1
Addressing
  dst pan id: 4447
  dst addr: 0000
  src addr: 0001
Secured Payload
  ciphertext: a246ba359bbc3adfdf8548aee5104267187729c56dd5a0a0279a77
  mic: b9a00082
  frame counter: 42
Message
  Assoc request: proto v2, sw v1, hw 0001, batt 3000 mV, w 249 px (89 mm), h 180 px (71 mm), c 0001, max wait 10000 ms, screen type 14
"
    );
}

#[test]
fn broadcast_chunk_response() {
    let output = parse(&FrameParser::default(), CHUNK_RESPONSE);
    assert_eq!(
        output,
        "Frame Control
  frame type: Data
  security: 0
  frame pending: 0
  ack request: 1
  pan id compression: 1
  sequence number suppression: 0
  information elements present: 0
  dst addressing mode: Short
  src addressing mode: Extended
  frame version: 0 (Ieee802154_2003)
Sequence Number
  sequence number: 3
Addressing
  dst pan id: ffff
  dst addr: ffff (broadcast)
  src pan id: 4447
  src addr: 00:12:4b:00:14:b5:d9:c7
Secured Payload
  ciphertext: 00f01b59f95e164a77
  mic: 52f30638
  frame counter: 7
Message
  Chunk response: offset 512, os update yes, c0ffee
"
    );
}

#[test]
fn foreign_pan() {
    let parser = FrameParser::new(&Config::new(Key::default(), 0x1234));
    let output = parse(&parser, ASSOC_REQUEST);
    assert!(output.ends_with(
        "Secured Payload
  ciphertext: a246ba359bbc3adfdf8548aee5104267187729c56dd5a0a0279a77
  mic: b9a00082
  frame counter: 42
Dropped
  reason: PAN 4447 filtered
  accepted pan id: 1234
"
    ));
}

#[test]
fn wrong_key() {
    let parser = FrameParser::new(&Config::new(Key::new([0; 16]), 0x4447));
    let output = parse(&parser, ASSOC_REQUEST);
    assert!(output.ends_with(
        "Dropped
  reason: authentication failed
"
    ));
}

#[test]
fn short_payload() {
    let output = parse(&FrameParser::default(), "618801474400000100aabbcc0000");
    assert_eq!(
        output,
        "Frame Control
  frame type: Data
  security: 0
  frame pending: 0
  ack request: 1
  pan id compression: 1
  sequence number suppression: 0
  information elements present: 0
  dst addressing mode: Short
  src addressing mode: Short
  frame version: 0 (Ieee802154_2003)
Sequence Number
  sequence number: 1
Addressing
  dst pan id: 4447
  dst addr: 0000
  src addr: 0001
Dropped
  reason: payload too short for MIC and frame counter
"
    );
}

#[test]
fn ack() {
    let output = parse(&FrameParser::default(), "02002a0000");
    assert_eq!(
        output,
        "Frame Control
  frame type: Ack
  security: 0
  frame pending: 0
  ack request: 0
  pan id compression: 0
  sequence number suppression: 0
  information elements present: 0
  dst addressing mode: Absent
  src addressing mode: Absent
  frame version: 0 (Ieee802154_2003)
Sequence Number
  sequence number: 42
"
    );
}

#[test]
fn too_short() {
    let output = parse(&FrameParser::default(), "41");
    assert_eq!(
        output,
        "Dropped
  reason: frame too short
"
    );

    assert!(matches!(
        FrameParser::default().parse_hex("4"),
        Err(InputError::Hex(_))
    ));
}

#[test]
fn input_lines() {
    let frame = read_frame("05 02002a0000", true);
    assert!(matches!(frame, Err(InputError::Hex(_))));

    let frame = read_frame("0502002a0000", true).unwrap();
    assert_eq!(frame.as_bytes(), &[0x02, 0x00, 0x2a, 0x00, 0x00]);

    let frame = read_frame("  02002a0000\n", false).unwrap();
    assert_eq!(frame.len(), 5);

    assert_eq!(
        read_frame("0602002a0000", true).err(),
        Some(InputError::Frame(esl_frame::Error::Truncated))
    );
}

#[test]
fn summaries() {
    let receiver = Receiver::new(&Config::default());

    let frame = hex::decode(CHUNK_RESPONSE).unwrap();
    assert_eq!(
        String::from_utf8(strip(summary(&receiver.process(&frame)))).unwrap(),
        "[00:12:4b:00:14:b5:d9:c7] to [ff:ff:ff:ff:ff:ff:ff:ff]: Chunk response: offset 512, os update yes, c0ffee"
    );

    let frame = hex::decode("02002a0000").unwrap();
    assert_eq!(
        String::from_utf8(strip(summary(&receiver.process(&frame)))).unwrap(),
        "Ack 42"
    );

    let frame = hex::decode("618801474400000100aabbcc0000").unwrap();
    assert_eq!(
        String::from_utf8(strip(summary(&receiver.process(&frame)))).unwrap(),
        "dropped: payload too short for MIC and frame counter"
    );
}
