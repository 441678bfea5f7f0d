#![no_main]

use esl_rx::{Config, Receiver};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let receiver = Receiver::new(&Config::default());
    let _ = receiver.process(data);
});
