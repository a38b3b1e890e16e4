//! The `dis` command

use crate::arch::{CpuName, DecodeOptions};
use crate::cli::{invalid_input, parse_addr};
use crate::freq::{FreqOptions, FrequencyFinder};
use crate::listing::{RenderMode, Walker};
use crate::mem::{CellOverride, MemoryMap};
use clap::ArgMatches;
use std::str::FromStr;
use std::{fs, io};

/// Split a raw image into load address and payload: honor `--org` when
/// given, otherwise treat the first two bytes as the little-endian
/// load address the way `.prg` files carry it.
fn image_layout<'a>(data: &'a [u8], org_arg: Option<&str>) -> io::Result<(u16, &'a [u8])> {
    if let Some(spec) = org_arg {
        let org = parse_addr(spec).ok_or_else(|| invalid_input("bad --org address"))?;
        return Ok((org as u16, data));
    }

    if data.len() < 2 {
        return Err(invalid_input("image too short to carry a load address"));
    }

    let org = u16::from_le_bytes([data[0], data[1]]);
    Ok((org, &data[2..]))
}

pub fn run(matches: &ArgMatches) -> io::Result<()> {
    let image = matches.value_of("image").unwrap_or_default();
    let data = fs::read(image)?;

    let cpu_name = CpuName::from_str(matches.value_of("cpu").unwrap_or("6510"))
        .map_err(|_| invalid_input("unknown CPU family"))?;

    let (org, payload) = image_layout(&data, matches.value_of("org"))?;

    let mut map = MemoryMap::new();
    map.load(payload, org);

    if let Some(state) = matches.value_of("state") {
        let text = fs::read_to_string(state)?;
        let overrides: Vec<CellOverride> = serde_json::from_str(&text)
            .map_err(|e| invalid_input(&format!("bad state file: {}", e)))?;
        map.apply_overrides(&overrides);
    }

    if matches.is_present("freq") {
        let mut finder = FrequencyFinder::new();
        let found = finder.find(
            payload,
            &mut map,
            0,
            payload.len().saturating_sub(1),
            org as u32,
            &FreqOptions::default(),
        );

        if !found.is_empty() {
            eprintln!("{}: {} frequency table(s) located", image, found.len());
        }
    }

    let opt = DecodeOptions {
        upper_case: matches.is_present("upper"),
        create_labels: true,
    };

    let start_addr = match matches.value_of("start") {
        Some(spec) => parse_addr(spec).ok_or_else(|| invalid_input("bad --start address"))?,
        None => org as u32,
    };
    let end_addr = match matches.value_of("end") {
        Some(spec) => parse_addr(spec).ok_or_else(|| invalid_input("bad --end address"))?,
        None => org as u32 + payload.len().saturating_sub(1) as u32,
    };

    if end_addr < start_addr || start_addr < org as u32 {
        return Err(invalid_input("walk range falls outside the image"));
    }

    let start = (start_addr - org as u32) as usize;
    let end = (end_addr - org as u32) as usize;

    if end >= payload.len() {
        return Err(invalid_input("walk range falls outside the image"));
    }

    let mode = if matches.is_present("source") {
        RenderMode::Source
    } else {
        RenderMode::Listing
    };

    // two passes: the first discovers labels for forward references,
    // the second renders them in place
    let text = {
        let mut cpu = cpu_name.decoder(opt);
        Walker::new(cpu.as_mut(), mode, opt).walk(payload, start, end, start_addr, &mut map);

        let mut cpu = cpu_name.decoder(opt);
        Walker::new(cpu.as_mut(), mode, opt).walk(payload, start, end, start_addr, &mut map)
    };

    match matches.value_of("output") {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", text),
    }

    Ok(())
}
