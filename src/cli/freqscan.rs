//! The `freq` command

use crate::cli::{invalid_input, parse_addr};
use crate::freq::{FreqOptions, FrequencyFinder};
use crate::mem::MemoryMap;
use clap::ArgMatches;
use std::{fs, io};

pub fn run(matches: &ArgMatches) -> io::Result<()> {
    let image = matches.value_of("image").unwrap_or_default();
    let data = fs::read(image)?;

    if data.is_empty() {
        return Err(invalid_input("empty image"));
    }

    let org = match matches.value_of("org") {
        Some(spec) => parse_addr(spec).ok_or_else(|| invalid_input("bad --org address"))?,
        None => 0,
    };

    let mut map = MemoryMap::new();
    map.load(&data, org as u16);

    let mut finder = FrequencyFinder::new();
    let found = finder.find(
        &data,
        &mut map,
        0,
        data.len() - 1,
        org,
        &FreqOptions::default(),
    );

    if found.is_empty() {
        println!("no frequency tables found");
        return Ok(());
    }

    for m in found {
        let a4_pal = m.a4_raw as f64 * crate::freq::PAL_HZ_FACTOR;

        if m.combined {
            println!(
                "combined table at ${:04X} [{}] (A4 raw ${:04X}, {:.0} Hz PAL)",
                org + m.high_index as u32,
                m.strategy,
                m.a4_raw,
                a4_pal
            );
        } else {
            println!(
                "table pair: high ${:04X}, low ${:04X} [{}] (A4 raw ${:04X}, {:.0} Hz PAL)",
                org + m.high_index as u32,
                org + m.low_index as u32,
                m.strategy,
                m.a4_raw,
                a4_pal
            );
        }
    }

    Ok(())
}
