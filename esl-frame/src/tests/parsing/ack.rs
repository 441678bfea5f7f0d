use crate::*;

#[test]
fn parse_ack() {
    let frame = [0x02, 0x00, 0x2a, 0x00, 0x00];
    let frame = Ack::new(&frame[..]).unwrap();

    test!(
        frame.frame_control().frame_type() => FrameType::Ack,
        frame.frame_control().security_enabled() => false,
        frame.frame_control().frame_pending() => false,
        frame.frame_control().ack_request() => false,
        frame.frame_control().pan_id_compression() => false,
        frame.frame_control().sequence_number_suppression() => false,
        frame.frame_control().information_elements_present() => false,
        frame.frame_control().dst_addressing_mode() => AddressingMode::Absent,
        frame.frame_control().frame_version() => FrameVersion::Ieee802154_2003,
        frame.frame_control().src_addressing_mode() => AddressingMode::Absent,
        frame.sequence_number() => 0x2a,
    );
}

#[test]
fn parse_ack_with_frame_pending() {
    let frame = [0x12, 0x00, 0x07, 0xab, 0xcd];
    let frame = Ack::new(&frame[..]).unwrap();

    test!(
        frame.frame_control().frame_pending() => true,
        frame.sequence_number() => 7,
    );
}

#[test]
fn ack_without_sequence_number() {
    let frame = [0x02, 0x00];
    assert_eq!(Ack::new(&frame[..]).err(), Some(Error::Truncated));

    let frame = [0x02, 0x01, 0x2a];
    assert_eq!(
        Ack::new(&frame[..]).err(),
        Some(Error::SequenceNumberSuppressed)
    );
}
