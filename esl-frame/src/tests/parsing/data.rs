use crate::*;

#[test]
fn parse_short_short() {
    let frame = [
        0x61, 0x88, 0x2a, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0xc0, 0xff, 0xee, 0x01, 0x02,
        0x03, 0x04, 0x05, 0x00, 0x00, 0x00, 0x34, 0x12,
    ];
    let frame = DataFrame::new(&frame[..]).unwrap();

    test!(
        frame.frame_control().frame_type() => FrameType::Data,
        frame.frame_control().security_enabled() => false,
        frame.frame_control().ack_request() => true,
        frame.frame_control().pan_id_compression() => true,
        frame.frame_control().dst_addressing_mode() => AddressingMode::Short,
        frame.frame_control().src_addressing_mode() => AddressingMode::Short,
        frame.frame_control().frame_version() => FrameVersion::Ieee802154_2003,
        frame.sequence_number() => 0x2a,
        frame.addressing().dst_pan_id() => Some(0x4447),
        frame.addressing().dst_address() => Address::Short(0x0000),
        frame.addressing().src_pan_id() => None,
        frame.addressing().src_address() => Address::Short(0x0001),
        frame.addressing().pan_id() => Some(0x4447),
        frame.header_len() => 9,
        frame.header() => &frame_bytes()[..9],
        frame.payload().len() => 11,
        frame.fcs() => 0x1234,
    );

    let payload = SecuredPayload::new(frame.payload()).unwrap();
    test!(
        payload.ciphertext() => &[0xc0, 0xff, 0xee][..],
        payload.mic() => [0x01, 0x02, 0x03, 0x04],
        payload.frame_counter() => 5,
    );
}

fn frame_bytes() -> [u8; 9] {
    [0x61, 0x88, 0x2a, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00]
}

#[test]
fn parse_broadcast_extended_source() {
    let frame = [
        0x41, 0xc8, 0x01, 0xff, 0xff, 0xff, 0xff, 0x47, 0x44, 0xc7, 0xd9, 0xb5, 0x14, 0x00,
        0x4b, 0x12, 0x00, 0x2b, 0x00, 0x00, 0x00,
    ];
    let frame = DataFrame::new(&frame[..]).unwrap();

    test!(
        frame.frame_control().pan_id_compression() => true,
        frame.frame_control().dst_addressing_mode() => AddressingMode::Short,
        frame.frame_control().src_addressing_mode() => AddressingMode::Extended,
        frame.addressing().is_broadcast() => true,
        frame.addressing().dst_pan_id() => Some(0xffff),
        frame.addressing().dst_address() => Address::BROADCAST,
        frame.addressing().src_pan_id() => Some(0x4447),
        frame.addressing().pan_id() => Some(0x4447),
        frame.addressing().src_address() => Address::Extended([0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7]),
        frame.header_len() => 17,
        frame.payload() => &[0x2b, 0x00][..],
    );

    let header = HeaderRepr::parse(&frame);
    test!(
        header.addressing.source() => [0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7],
        header.addressing.destination() => [0xff; 8],
    );
}

#[test]
fn parse_extended_extended() {
    let frame = [
        0x61, 0xcc, 0x10, 0x47, 0x44, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x18,
        0x17, 0x16, 0x15, 0x14, 0x13, 0x12, 0x11, 0xaa, 0x00, 0x00,
    ];
    let frame = DataFrame::new(&frame[..]).unwrap();

    test!(
        frame.addressing().is_broadcast() => false,
        frame.addressing().pan_id() => Some(0x4447),
        frame.addressing().dst_address() => Address::Extended([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
        frame.addressing().src_address() => Address::Extended([0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18]),
        frame.header_len() => 21,
        frame.payload() => &[0xaa][..],
    );

    let source = HeaderRepr::parse(&frame).addressing.source();
    assert_eq!(
        nonce(SecuredPayload::new_unchecked(&[0u8; 8][..]).frame_counter_bytes(), &source),
        [0, 0, 0, 0, 0x18, 0x17, 0x16, 0x15, 0x14, 0x13, 0x12, 0x11, 0]
    );
}

#[test]
fn parse_rejections() {
    // Security enabled is accepted by the parser.
    let frame = [0x69, 0x88, 0x00, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
    assert!(DataFrame::new(&frame[..]).is_ok());

    // Reserved destination addressing mode.
    let frame = [0x61, 0x84, 0x00, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
    assert_eq!(
        DataFrame::new(&frame[..]).err(),
        Some(Error::ReservedDstAddressingMode)
    );

    // Reserved source addressing mode.
    let frame = [0x61, 0x48, 0x00, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
    assert_eq!(
        DataFrame::new(&frame[..]).err(),
        Some(Error::ReservedSrcAddressingMode)
    );

    // Information elements present.
    let frame = [0x61, 0x8a, 0x00, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
    assert_eq!(
        DataFrame::new(&frame[..]).err(),
        Some(Error::InformationElementsPresent)
    );

    // Header without room for the frame check sequence.
    let frame = [0x61, 0x88, 0x00, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00];
    assert_eq!(DataFrame::new(&frame[..]).err(), Some(Error::Truncated));
}
