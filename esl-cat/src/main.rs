use std::io::BufRead;

use clap::Parser;
use colored::*;
use pollster::FutureExt as _;

use esl_cat::{read_frame, summary, FrameParser};
use esl_rx::config::{parse_pan_id, Key};
use esl_rx::{Config, Receiver, RxQueue};

/// `cat` for ESL frames.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The network key, 32 hex digits.
    #[arg(long, value_parser = Key::from_hex)]
    key: Option<Key>,

    /// The PAN identifier to accept frames from, in hex.
    #[arg(long, value_parser = parse_pan_id)]
    pan: Option<u16>,

    /// Each input line starts with a PHY length byte.
    #[arg(long)]
    psdu: bool,

    /// Hex encoded frames to decode. Frames are read from stdin, one per
    /// line, when none are given.
    #[clap(value_parser(clap::builder::NonEmptyStringValueParser::new()))]
    frames: Vec<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let defaults = Config::default();
    let config = Config::new(
        args.key.unwrap_or(defaults.key),
        args.pan.unwrap_or(defaults.pan_id),
    );

    if args.frames.is_empty() {
        listen(&config, args.psdu);
        return;
    }

    let parser = FrameParser::new(&config);
    for input in &args.frames {
        let data = match read_frame(input, args.psdu) {
            Ok(frame) => frame,
            Err(err) => {
                eprintln!("{}: {err}", "error".red().bold());
                continue;
            }
        };

        print!("{}", parser.parse(data.as_bytes()));
    }
}

/// Feed stdin through the receive queue to the worker, one frame per line.
fn listen(config: &Config, psdu: bool) {
    let receiver = Receiver::new(config);
    let mut queue = RxQueue::new();
    let (mut tx, mut rx) = queue.split();

    std::thread::scope(|s| {
        s.spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        log::error!("reading stdin: {err}");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                match read_frame(&line, psdu) {
                    Ok(frame) => {
                        tx.send(frame);
                    }
                    Err(err) => log::warn!("skipping line: {err}"),
                }
            }
        });

        async {
            receiver
                .run(&mut rx, |result| println!("{}", summary(&result)))
                .await;
        }
        .block_on();
    });

    let dropped = rx.dropped();
    if dropped > 0 {
        eprintln!("{dropped} frames dropped on a full queue");
    }
}
