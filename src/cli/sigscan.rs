//! The `sig` command

use crate::cli::invalid_input;
use crate::sig;
use clap::ArgMatches;
use std::{fs, io};

pub fn run(matches: &ArgMatches) -> io::Result<()> {
    let config = matches.value_of("config").unwrap_or_default();
    let image = matches.value_of("image").unwrap_or_default();

    let entries = sig::load_signature_file(config)
        .map_err(|e| invalid_input(&format!("{}", e)))?;
    let data = fs::read(image)?;

    let mut hits = 0usize;

    for entry in &entries {
        if entry.matches(&data) {
            println!("{}", entry.name);
            hits += 1;
        }
    }

    if hits == 0 {
        println!("no known players matched");
    }

    Ok(())
}
