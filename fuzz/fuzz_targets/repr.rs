#![no_main]

use esl_frame::{DataFrame, HeaderRepr, FCS_LEN};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|repr: HeaderRepr| {
    let len = repr.buffer_len() + FCS_LEN;
    let mut buffer = vec![0; len];
    repr.emit(&mut buffer);

    if let Ok(frame) = DataFrame::new(&buffer[..]) {
        let _ = HeaderRepr::parse(&frame);
    }
});
