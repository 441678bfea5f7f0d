use super::*;
use std::string::ToString;

mod parsing;

#[test]
fn frame_control_round_trip() {
    for raw in 0..=u16::MAX {
        let bytes = raw.to_le_bytes();
        let repr = FrameControlRepr::parse(FrameControl::new_unchecked(&bytes[..]));

        let mut buffer = [0u8; 2];
        repr.emit(&mut FrameControl::new_unchecked(&mut buffer[..]));

        assert_eq!(buffer, bytes, "frame control {raw:04x}");
    }
}

#[test]
fn addressing_layout() {
    let modes = [
        AddressingMode::Absent,
        AddressingMode::Short,
        AddressingMode::Extended,
    ];

    for dst in modes {
        for src in modes {
            let dst_len = match dst {
                AddressingMode::Absent => 0,
                mode => 2 + mode.size(),
            };
            let header_len = 3 + dst_len + src.size();

            let mut buffer = [0u8; 3 + 10 + 8 + FCS_LEN];
            let mut fc = FrameControl::new_unchecked(&mut buffer[..2]);
            fc.set_frame_type(FrameType::Data);
            fc.set_dst_addressing_mode(dst);
            fc.set_src_addressing_mode(src);

            let frame = DataFrame::new(&buffer[..header_len + FCS_LEN]).unwrap();
            assert_eq!(frame.header_len(), header_len, "{dst:?} {src:?}");
            assert!(frame.payload().is_empty());

            assert_eq!(
                DataFrame::new(&buffer[..header_len + FCS_LEN - 1]).err(),
                Some(Error::Truncated),
                "{dst:?} {src:?}"
            );
        }
    }
}

fn data_frame_control(dst: AddressingMode, src: AddressingMode) -> FrameControlRepr {
    FrameControlRepr {
        frame_type: FrameType::Data,
        security_enabled: false,
        frame_pending: false,
        ack_request: true,
        pan_id_compression: true,
        reserved: false,
        sequence_number_suppression: false,
        information_elements_present: false,
        dst_addressing_mode: dst,
        src_addressing_mode: src,
        frame_version: FrameVersion::Ieee802154_2003,
    }
}

#[test]
fn emit_header() {
    let header = HeaderRepr {
        frame_control: data_frame_control(AddressingMode::Short, AddressingMode::Short),
        sequence_number: 0x2a,
        addressing: AddressingRepr {
            dst_pan_id: Some(0x4447),
            dst_address: Address::Short(0x0000),
            src_pan_id: None,
            src_address: Address::Short(0x0001),
        },
    };

    let mut buffer = vec![0; header.buffer_len() + FCS_LEN];
    header.emit(&mut buffer);

    assert_eq!(
        buffer,
        [0x61, 0x88, 0x2a, 0x47, 0x44, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
    );

    let frame = DataFrame::new(&buffer[..]).unwrap();
    assert_eq!(HeaderRepr::parse(&frame), header);
    assert_eq!(
        header.to_string(),
        "PAN 4447 S 0001 00:00:00:00:00:00:00:00 D 0000 00:00:00:00:00:00:00:00"
    );
}

#[test]
fn emit_broadcast_header() {
    let header = HeaderRepr {
        frame_control: data_frame_control(AddressingMode::Short, AddressingMode::Extended),
        sequence_number: 1,
        addressing: AddressingRepr {
            dst_pan_id: Some(0xffff),
            dst_address: Address::BROADCAST,
            src_pan_id: Some(0x4447),
            src_address: Address::Extended([0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7]),
        },
    };

    let mut buffer = vec![0; header.buffer_len() + FCS_LEN];
    header.emit(&mut buffer);

    assert_eq!(
        buffer,
        [
            0x61, 0xc8, 0x01, 0xff, 0xff, 0xff, 0xff, 0x47, 0x44, 0xc7, 0xd9, 0xb5, 0x14, 0x00,
            0x4b, 0x12, 0x00, 0x00, 0x00,
        ]
    );

    let frame = DataFrame::new(&buffer[..]).unwrap();
    let parsed = HeaderRepr::parse(&frame);
    assert_eq!(parsed, header);
    assert!(parsed.addressing.is_broadcast());
    assert_eq!(parsed.addressing.pan_id(), Some(0x4447));
    assert_eq!(parsed.addressing.destination(), [0xff; 8]);
    assert_eq!(
        parsed.addressing.source(),
        [0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7]
    );
    assert_eq!(
        parsed.to_string(),
        "PAN 4447 S 0000 00:12:4b:00:14:b5:d9:c7 D ffff 00:00:00:00:00:00:00:00 BROADCAST"
    );
}

#[test]
fn header_without_destination() {
    let header = HeaderRepr {
        frame_control: data_frame_control(AddressingMode::Absent, AddressingMode::Short),
        sequence_number: 9,
        addressing: AddressingRepr {
            dst_pan_id: None,
            dst_address: Address::Absent,
            src_pan_id: None,
            src_address: Address::Short(0x1234),
        },
    };

    assert_eq!(header.buffer_len(), 5);
    assert_eq!(header.addressing.pan_id(), None);
    assert_eq!(
        header.to_string(),
        "PAN ---- S 1234 00:00:00:00:00:00:00:00 D 0000 00:00:00:00:00:00:00:00"
    );
}
