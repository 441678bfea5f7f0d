use crate::*;

#[test]
fn parse_assoc_request() {
    let plaintext = hex::decode("f00201000000000000000100b80bf9005900b4004700010010270e").unwrap();
    let EslMessage::AssocRequest(request) = EslMessage::parse(&plaintext).unwrap() else {
        panic!("not an assoc request");
    };

    test!(
        request.protocol_version => 2,
        request.software_version => 1,
        request.hardware_type => 0x0001,
        request.battery_mv => 3000,
        request.screen_pixel_width => 249,
        request.screen_mm_width => 89,
        request.screen_pixel_height => 180,
        request.screen_mm_height => 71,
        request.compressions_supported => 0x0001,
        request.max_wait_ms => 10000,
        request.screen_type => 14,
    );
}

#[test]
fn parse_checkin() {
    let plaintext = hex::decode("f202000000000000000100540bc8d393").unwrap();
    let EslMessage::Checkin(checkin) = EslMessage::parse(&plaintext).unwrap() else {
        panic!("not a checkin");
    };

    test!(
        checkin.software_version => 2,
        checkin.hardware_type => 0x0001,
        checkin.battery_mv => 2900,
        checkin.last_packet_lqi => 200,
        checkin.last_packet_rssi => -45,
        checkin.temperature => 20,
    );
}

#[test]
fn parse_chunk_response() {
    let plaintext = hex::decode("f5000400000001020304").unwrap();
    let EslMessage::ChunkResponse(chunk) = EslMessage::parse(&plaintext).unwrap() else {
        panic!("not a chunk response");
    };

    test!(
        chunk.offset => 1024,
        chunk.os_update => false,
        &chunk.data[..] => &[0x01, 0x02, 0x03, 0x04][..],
    );
}

#[test]
fn message_errors_are_not_structural() {
    let err = EslMessage::parse(&[0xf0, 0x02, 0x01]).unwrap_err();
    test!(
        err => Error::MessageTooShort {
            message_type: MessageType::AssocRequest,
            len: 2,
            expected: 26,
        },
        err.is_structural() => false,
        Error::EmptyMessage.is_structural() => false,
        Error::Truncated.is_structural() => true,
    );
}
