#![no_main]

use esl_frame::{EslMessage, Frame, HeaderRepr, SecuredPayload, MAX_FRAME_LEN};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: &[u8]| -> Corpus {
    if data.len() > MAX_FRAME_LEN {
        return Corpus::Reject;
    }

    if let Ok(Frame::Data(frame)) = Frame::new(data) {
        let _ = HeaderRepr::parse(&frame);

        if let Ok(payload) = SecuredPayload::new(frame.payload()) {
            let _ = payload.frame_counter();
            let _ = EslMessage::parse(payload.ciphertext());
        }
    }

    Corpus::Keep
});
