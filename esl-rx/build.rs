use std::collections::BTreeMap;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;

const PREFIX: &str = "ESL_RX_";

fn main() {
    // name -> (type, default value, doc)
    let mut configs: BTreeMap<&str, (&str, String, &str)> = BTreeMap::from([
        (
            "DEFAULT_PAN_ID",
            ("u16", "0x4447".into(), "PAN identifier accepted by default."),
        ),
        (
            "DEFAULT_KEY",
            (
                "[u8; 16]",
                "[0xd3, 0x06, 0xd9, 0x34, 0x8e, 0x29, 0xe5, 0xe3, 0x58, 0xbf, 0x29, 0x34, 0x81, 0x20, 0x02, 0xc1]".into(),
                "AES-128 network key used by default.",
            ),
        ),
        (
            "QUEUE_DEPTH",
            ("usize", "8".into(), "Number of frames the receive queue holds."),
        ),
    ]);

    println!("cargo:rerun-if-changed=build.rs");
    for name in configs.keys() {
        println!("cargo:rerun-if-env-changed={PREFIX}{name}");
    }

    for (var, value) in env::vars() {
        if let Some(name) = var.strip_prefix(PREFIX) {
            let Some((_, default, _)) = configs.get_mut(name) else {
                panic!("Wrong configuration name {name}");
            };
            *default = value;
        }
    }

    let mut data = String::new();
    for (name, (ty, value, doc)) in configs.iter() {
        writeln!(data, "/// {doc}").unwrap();
        writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    std::fs::write(out_dir.join("config.rs"), data).unwrap();
}
