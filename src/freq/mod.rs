//! Musical note frequency table finder.
//!
//! Players embed their pitch tables as byte arrays: twelve (or seven)
//! monotonically increasing values per octave, doubling every octave,
//! usually split into low-byte and high-byte halves. The finder scans
//! a raw buffer with a bank of geometry-specific matchers and, on each
//! validated find, writes labels and a PAL/NTSC reference-pitch
//! comment into the memory map so the later disassembly pass renders
//! the tables as what they are.

mod except;
mod strategy;

pub use except::{ERROR, NTSC_HZ_FACTOR, PAL_HZ_FACTOR};
pub use strategy::{Candidate, Strategy, GEO_ORDER, TIER_ONE, TIER_TWO};

use crate::mem::MemoryMap;

/// Side-effect switches for one finder run.
#[derive(Clone, Debug)]
pub struct FreqOptions {
    pub low_label: String,
    pub high_label: String,
    /// Mark matched bytes as data unless already classified.
    pub mark_memory: bool,
    pub create_labels: bool,
    pub create_comments: bool,
}

impl Default for FreqOptions {
    fn default() -> Self {
        FreqOptions {
            low_label: "frequencyLo".to_string(),
            high_label: "frequencyHi".to_string(),
            mark_memory: true,
            create_labels: true,
            create_comments: true,
        }
    }
}

/// One located table pair; ephemeral, reported back to the caller
/// while the durable result lands in the memory map.
#[derive(Clone, Debug)]
pub struct FreqMatch {
    pub high_index: usize,
    pub low_index: usize,
    pub combined: bool,
    /// Name of the matcher geometry that validated the pair.
    pub strategy: &'static str,
    pub a4_raw: u16,
}

/// Reusable scanning engine.
///
/// The engine carries its last-match cursor and the label suffix
/// counter between `find` calls so a caller can scan one file in
/// several slices; `reset` must be called before scanning an unrelated
/// buffer or the suffixes and cursor leak stale state.
pub struct FrequencyFinder {
    last_match: Option<usize>,
    matches: usize,
}

impl FrequencyFinder {
    pub fn new() -> Self {
        FrequencyFinder {
            last_match: None,
            matches: 0,
        }
    }

    /// Clear all cross-call state.
    pub fn reset(&mut self) {
        self.last_match = None;
        self.matches = 0;
    }

    /// Index of the last successful match, if any.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Scan `buf[start..=end]` for frequency tables. `offset` maps a
    /// buffer index to its memory address. Mutates the map per the
    /// options and returns the ephemeral match records.
    ///
    /// Strategy tiers run in fixed order: the full-size geometries,
    /// then (only when those found nothing) the short ones, then the
    /// geometric semitone-run detectors as the last resort. Within a
    /// tier the first strategy to validate at a scan position wins and
    /// the cursor jumps past the matched region.
    pub fn find(
        &mut self,
        buf: &[u8],
        map: &mut MemoryMap,
        start: usize,
        end: usize,
        offset: u32,
        opt: &FreqOptions,
    ) -> Vec<FreqMatch> {
        if buf.is_empty() || start > end {
            return Vec::new();
        }

        let end = end.min(buf.len() - 1);

        let mut found = self.scan_tier(TIER_ONE, buf, map, start, end, offset, opt);

        if found.is_empty() {
            found = self.scan_tier(TIER_TWO, buf, map, start, end, offset, opt);
        }

        if found.is_empty() {
            found = self.scan_geometric(buf, map, start, end, offset, opt);
        }

        found
    }

    fn scan_tier(
        &mut self,
        tier: &[Strategy],
        buf: &[u8],
        map: &mut MemoryMap,
        start: usize,
        end: usize,
        offset: u32,
        opt: &FreqOptions,
    ) -> Vec<FreqMatch> {
        let mut out = Vec::new();
        let mut i = start;

        while i <= end {
            let candidate = tier
                .iter()
                .find_map(|s| strategy::try_match(s, buf, map, i, start, end, offset));

            match candidate {
                Some(c) => {
                    let skip = c.high_span;
                    out.push(self.apply(&c, buf, map, offset, opt));
                    i += skip;
                }
                None => i += 1,
            }
        }

        out
    }

    fn scan_geometric(
        &mut self,
        buf: &[u8],
        map: &mut MemoryMap,
        start: usize,
        end: usize,
        offset: u32,
        opt: &FreqOptions,
    ) -> Vec<FreqMatch> {
        let mut out = Vec::new();
        let mut i = start;

        while i <= end {
            let candidate = GEO_ORDER
                .iter()
                .find_map(|v| strategy::try_geometric(*v, buf, map, i, end, offset));

            match candidate {
                Some(c) => {
                    let skip = c.high_span + if c.combined { 0 } else { c.low_span };
                    out.push(self.apply(&c, buf, map, offset, opt));
                    i += skip;
                }
                None => i += 1,
            }
        }

        out
    }

    /// Write one match into the map: suffix-numbered labels on the two
    /// half-tables, the reference-pitch comment, and the optional data
    /// classification over the covered bytes.
    fn apply(
        &mut self,
        c: &Candidate,
        _buf: &[u8],
        map: &mut MemoryMap,
        offset: u32,
        opt: &FreqOptions,
    ) -> FreqMatch {
        let suffix = if self.matches == 0 {
            String::new()
        } else {
            self.matches.to_string()
        };

        let addr_of = |index: usize| (offset.wrapping_add(index as u32) & 0xFFFF) as u16;
        let a4_raw = a4_reference(&c.values, c.notes_per_octave);

        if opt.create_labels {
            let low_addr = addr_of(c.low_index);
            let cell = map.cell_mut(low_addr);

            if cell.user_label.is_none() {
                cell.decoded_label = Some(format!("{}{}", opt.low_label, suffix));
            }

            if !c.combined {
                let high_addr = addr_of(c.high_index);
                let cell = map.cell_mut(high_addr);

                if cell.user_label.is_none() {
                    cell.decoded_label = Some(format!("{}{}", opt.high_label, suffix));
                }
            }
        }

        if opt.create_comments {
            let comment = a4_comment(a4_raw);

            map.cell_mut(addr_of(c.high_index)).decoded_comment = Some(comment.clone());

            if !c.combined {
                map.cell_mut(addr_of(c.low_index)).decoded_comment = Some(comment);
            }
        }

        if opt.mark_memory {
            let spans = if c.combined {
                vec![(c.high_index, c.high_span)]
            } else {
                vec![(c.high_index, c.high_span), (c.low_index, c.low_span)]
            };

            for (index, span) in spans {
                for k in 0..span {
                    let cell = map.cell_mut(addr_of(index + k));

                    if !cell.is_code && !cell.is_data {
                        cell.is_data = true;
                    }
                }
            }
        }

        self.matches += 1;
        self.last_match = Some(c.high_index);

        FreqMatch {
            high_index: c.high_index,
            low_index: c.low_index,
            combined: c.combined,
            strategy: c.name,
            a4_raw,
        }
    }
}

impl Default for FrequencyFinder {
    fn default() -> Self {
        FrequencyFinder::new()
    }
}

/// The raw table value standing for the A above middle C.
///
/// Chromatic tables carry A in slot 9 of each octave, scale-only
/// tables in slot 5; the reference octave is the fourth. When the
/// table is too short to reach it, the highest available A is doubled
/// up instead (the doubling invariant makes the two equivalent).
fn a4_reference(values: &[u16], notes_per_octave: usize) -> u16 {
    let a_slot = if notes_per_octave == 12 { 9 } else { 5 };

    if values.len() < notes_per_octave * 2 {
        // a bare semitone run carries no octave anchor; fold its A
        // slot into the reference octave's value range
        let mut v = *values.get(a_slot).unwrap_or(&0) as u32;

        while v >= 0x2100 {
            v >>= 1;
        }

        while v != 0 && v < 0x1080 {
            v <<= 1;
        }

        return v as u16;
    }

    let mut octave = 4usize;

    while octave > 0 && octave * notes_per_octave + a_slot >= values.len() {
        octave -= 1;
    }

    let idx = octave * notes_per_octave + a_slot;
    let v = values[idx] as u32;

    (v << (4 - octave)) as u16
}

fn a4_comment(a4_raw: u16) -> String {
    let pal = (a4_raw as f64 * PAL_HZ_FACTOR).round() as u32;
    let ntsc = (a4_raw as f64 * NTSC_HZ_FACTOR).round() as u32;

    format!("A4={} HZ (PAL)  A4={} HZ (NTSC)", pal, ntsc)
}
