//! Batch command-line surface.
//!
//! The interactive front end lives elsewhere; this is the headless
//! path: disassemble an image to text, run the frequency finder on its
//! own, or test a signature list against an image.

mod dis;
mod freqscan;
mod sigscan;

use clap::{App, Arg, SubCommand};
use std::io;

/// Parse `$C000`, `0xC000` or plain hex into an address.
pub fn parse_addr(s: &str) -> Option<u32> {
    let trimmed = s
        .trim()
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");

    u32::from_str_radix(trimmed, 16).ok()
}

pub fn invalid_input(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.to_string())
}

pub fn main() -> io::Result<()> {
    let matches = App::new("chipdasm")
        .version("0.1.0")
        .about("Disassembler core for 8-bit program, player and sound rips")
        .subcommand(
            SubCommand::with_name("dis")
                .about("Disassemble a raw image to a listing or source")
                .arg(Arg::with_name("image").required(true).help("Raw input image"))
                .arg(Arg::with_name("output").help("Output file; stdout when omitted"))
                .arg(
                    Arg::with_name("cpu")
                        .long("cpu")
                        .takes_value(true)
                        .default_value("6510")
                        .help("CPU family: 6510, z80 or 8048"),
                )
                .arg(
                    Arg::with_name("org")
                        .long("org")
                        .takes_value(true)
                        .help("Load address; defaults to the image's two-byte header"),
                )
                .arg(
                    Arg::with_name("start")
                        .long("start")
                        .takes_value(true)
                        .help("First address to walk"),
                )
                .arg(
                    Arg::with_name("end")
                        .long("end")
                        .takes_value(true)
                        .help("Last address to walk"),
                )
                .arg(
                    Arg::with_name("state")
                        .long("state")
                        .takes_value(true)
                        .help("JSON cell overrides (labels, comments, classification)"),
                )
                .arg(
                    Arg::with_name("source")
                        .long("source")
                        .help("Emit reassemblable source instead of a listing"),
                )
                .arg(
                    Arg::with_name("upper")
                        .long("upper")
                        .help("Upper-case mnemonics"),
                )
                .arg(
                    Arg::with_name("freq")
                        .long("freq")
                        .help("Run the frequency table finder before walking"),
                ),
        )
        .subcommand(
            SubCommand::with_name("freq")
                .about("Scan an image for note frequency tables")
                .arg(Arg::with_name("image").required(true))
                .arg(Arg::with_name("org").long("org").takes_value(true)),
        )
        .subcommand(
            SubCommand::with_name("sig")
                .about("Match a signature list against an image")
                .arg(Arg::with_name("config").required(true))
                .arg(Arg::with_name("image").required(true)),
        )
        .get_matches();

    match matches.subcommand() {
        ("dis", Some(sub)) => dis::run(sub),
        ("freq", Some(sub)) => freqscan::run(sub),
        ("sig", Some(sub)) => sigscan::run(sub),
        _ => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
    }
}
