//! The matcher strategy bank.
//!
//! Each strategy pairs a structural scanner for a candidate high-byte
//! (or combined) table with a scanner for its low-byte partner, at one
//! fixed geometry: table width, note order, and storage layout. The
//! bank is tried in a fixed priority order and the first strategy to
//! validate a pair at a scan position wins.

use crate::freq::except::{
    dip_forgiven, forgiven, ERROR, GEOMETRIC_EPSILON, SEMITONE,
};
use crate::mem::MemoryMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Two separate byte arrays, one table width apart or anywhere in
    /// the scanned range.
    Split,
    /// One interleaved array of little-endian 16-bit words.
    Combined,
    /// Octave-per-row storage: 16-byte stride, twelve live entries and
    /// four bytes of zero padding per row.
    Grouped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One matcher geometry.
pub struct Strategy {
    pub name: &'static str,
    pub layout: Layout,
    pub direction: Direction,
    /// Table length in notes.
    pub notes: usize,
    /// 12 for chromatic tables, 7 for scale-only players.
    pub notes_per_octave: usize,
}

impl Strategy {
    /// Bytes one half-table (or the combined table) occupies.
    pub fn byte_span(&self) -> usize {
        match self.layout {
            Layout::Split => self.notes,
            Layout::Combined => self.notes * 2,
            Layout::Grouped => (self.notes / self.notes_per_octave) * 16,
        }
    }
}

const fn strat(
    name: &'static str,
    layout: Layout,
    direction: Direction,
    notes: usize,
    notes_per_octave: usize,
) -> Strategy {
    Strategy {
        name,
        layout,
        direction,
        notes,
        notes_per_octave,
    }
}

/// Full-size geometries, tried first.
pub static TIER_ONE: &[Strategy] = &[
    strat("split96", Layout::Split, Direction::Ascending, 96, 12),
    strat("split72", Layout::Split, Direction::Ascending, 72, 12),
    strat("combined96", Layout::Combined, Direction::Ascending, 96, 12),
    strat("combined72", Layout::Combined, Direction::Ascending, 72, 12),
    strat("inverse96", Layout::Split, Direction::Descending, 96, 12),
    strat("inverse72", Layout::Split, Direction::Descending, 72, 12),
    strat("grouped112", Layout::Grouped, Direction::Ascending, 84, 12),
    strat("grouped96", Layout::Grouped, Direction::Ascending, 72, 12),
];

/// Shorter and looser geometries, only consulted when tier one came up
/// empty over the whole range.
pub static TIER_TWO: &[Strategy] = &[
    strat("short90", Layout::Split, Direction::Ascending, 90, 12),
    strat("short65", Layout::Split, Direction::Ascending, 65, 12),
    strat("scale56", Layout::Split, Direction::Ascending, 56, 7),
];

/// A validated high/low pairing, before any memory mutation.
pub struct Candidate {
    pub name: &'static str,
    pub high_index: usize,
    pub low_index: usize,
    pub high_span: usize,
    pub low_span: usize,
    pub combined: bool,
    pub notes_per_octave: usize,
    pub values: Vec<u16>,
}

fn garbage_free(map: &MemoryMap, offset: u32, index: usize, span: usize) -> bool {
    (0..span).all(|k| {
        let addr = (offset.wrapping_add((index + k) as u32) & 0xFFFF) as u16;
        !map.cell(addr).is_garbage
    })
}

/// Pull the high-byte sequence out in ascending note order, or None
/// when the geometry does not fit at `i`.
fn extract_bytes(s: &Strategy, buf: &[u8], i: usize) -> Option<Vec<u8>> {
    let span = s.byte_span();

    if i + span > buf.len() {
        return None;
    }

    let mut bytes = match s.layout {
        Layout::Split => buf[i..i + s.notes].to_vec(),
        Layout::Grouped => {
            let octaves = s.notes / s.notes_per_octave;
            let mut out = Vec::with_capacity(s.notes);

            for oct in 0..octaves {
                let row = i + oct * 16;

                // the pad bytes are part of the shape
                if buf[row + 12..row + 16].iter().any(|b| *b != 0) {
                    return None;
                }

                out.extend_from_slice(&buf[row..row + 12]);
            }

            out
        }
        Layout::Combined => return None,
    };

    if s.direction == Direction::Descending {
        bytes.reverse();
    }

    Some(bytes)
}

/// Structural predicate for a high-byte candidate: the table opens on
/// the `01 01 01` (or `00 01 01 01`) floor and never decreases, save
/// for at most one dip a known encoder is allowed.
fn check_high(bytes: &[u8]) -> bool {
    let prefix_ok = bytes.len() >= 4
        && (bytes[..3] == [1, 1, 1] || bytes[..4] == [0, 1, 1, 1]);

    if !prefix_ok {
        return false;
    }

    let mut dips = 0usize;

    for k in 1..bytes.len() {
        if bytes[k] < bytes[k - 1] {
            if dips > 0 || !dip_forgiven(k, bytes[k - 1], bytes[k]) {
                return false;
            }

            dips += 1;
        }
    }

    true
}

/// Accumulated octave-doubling verification over a reconstructed note
/// table. The differences are summed per note position and the sum is
/// compared against the tolerance, not each octave individually; known
/// encoder artifacts are forgiven from the exception list.
fn octave_sums_ok(values: &[u16], notes_per_octave: usize) -> bool {
    for j in 0..notes_per_octave.min(values.len()) {
        let mut sum = 0u32;
        let mut checks = 0usize;
        let mut k = j;

        while k + notes_per_octave < values.len() && checks < 6 {
            let low = values[k] as i64;
            let high = values[k + notes_per_octave] as i64;

            sum += (high - 2 * low).unsigned_abs() as u32;
            checks += 1;
            k += notes_per_octave;
        }

        if sum > ERROR && !forgiven(j, sum) {
            return false;
        }
    }

    true
}

fn combined_values(s: &Strategy, buf: &[u8], i: usize) -> Option<Vec<u16>> {
    if i + s.notes * 2 > buf.len() {
        return None;
    }

    let mut values = Vec::with_capacity(s.notes);

    for k in 0..s.notes {
        values.push(u16::from_le_bytes([buf[i + 2 * k], buf[i + 2 * k + 1]]));
    }

    Some(values)
}

/// Try one non-geometric strategy at scan position `i`.
pub fn try_match(
    s: &Strategy,
    buf: &[u8],
    map: &MemoryMap,
    i: usize,
    start: usize,
    end: usize,
    offset: u32,
) -> Option<Candidate> {
    let span = s.byte_span();

    if i + span - 1 > end {
        return None;
    }

    match s.layout {
        Layout::Combined => {
            let values = combined_values(s, buf, i)?;

            // interleaved prefix: the first high bytes sit at the odd
            // offsets and open on the same 01 floor
            if buf[i + 1] != 1 || buf[i + 3] != 1 || buf[i + 5] != 1 {
                return None;
            }

            if values.windows(2).any(|w| w[1] < w[0]) {
                return None;
            }

            if !octave_sums_ok(&values, s.notes_per_octave) {
                return None;
            }

            if !garbage_free(map, offset, i, span) {
                return None;
            }

            Some(Candidate {
                name: s.name,
                high_index: i,
                low_index: i,
                high_span: span,
                low_span: span,
                combined: true,
                notes_per_octave: s.notes_per_octave,
                values,
            })
        }
        Layout::Split | Layout::Grouped => {
            let high = extract_bytes(s, buf, i)?;

            if !check_high(&high) {
                return None;
            }

            if !garbage_free(map, offset, i, span) {
                return None;
            }

            // the partner is usually adjacent; fall back to scanning
            // the whole range for the players that keep the halves
            // apart
            let mut candidates = vec![i + span];
            if let Some(before) = i.checked_sub(span) {
                candidates.push(before);
            }

            let scan = candidates.into_iter().chain(start..=end).filter(|l| *l != i);

            for l in scan {
                if l + span > buf.len() || (l >= i && l < i + span) || (i >= l && i < l + span) {
                    continue;
                }

                let low = match extract_bytes(s, buf, l) {
                    Some(low) => low,
                    None => continue,
                };

                if !garbage_free(map, offset, l, span) {
                    continue;
                }

                let values: Vec<u16> = high
                    .iter()
                    .zip(low.iter())
                    .map(|(h, lo)| (*h as u16) << 8 | *lo as u16)
                    .collect();

                if octave_sums_ok(&values, s.notes_per_octave) {
                    return Some(Candidate {
                        name: s.name,
                        high_index: i,
                        low_index: l,
                        high_span: span,
                        low_span: span,
                        combined: false,
                        notes_per_octave: s.notes_per_octave,
                        values,
                    });
                }
            }

            None
        }
    }
}

/// The isolated semitone-run detectors: twelve consecutive values each
/// one equal-tempered semitone above the previous. Tried after
/// everything else, in combined, split and combined-low order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeoVariant {
    Combined,
    Split,
    CombinedLow,
}

pub static GEO_ORDER: &[GeoVariant] = &[
    GeoVariant::Combined,
    GeoVariant::Split,
    GeoVariant::CombinedLow,
];

const GEO_RUN: usize = 12;

fn semitone_run_exact(values: &[u16]) -> bool {
    values.windows(2).all(|w| {
        w[0] != 0 && (w[1] as f64 / w[0] as f64 - SEMITONE).abs() < GEOMETRIC_EPSILON
    })
}

/// Rounding-aware variant for runs whose values are too small for the
/// relative tolerance to survive integer rounding.
fn semitone_run_rounded(values: &[u16]) -> bool {
    values.windows(2).all(|w| {
        w[0] != 0 && {
            let ideal = w[0] as f64 * SEMITONE;
            (w[1] as f64 - ideal).abs() < 0.5 + GEOMETRIC_EPSILON * w[0] as f64
        }
    })
}

pub fn try_geometric(
    variant: GeoVariant,
    buf: &[u8],
    map: &MemoryMap,
    i: usize,
    end: usize,
    offset: u32,
) -> Option<Candidate> {
    match variant {
        GeoVariant::Combined | GeoVariant::CombinedLow => {
            let span = GEO_RUN * 2;

            if i + span - 1 > end || i + span > buf.len() {
                return None;
            }

            let mut values = Vec::with_capacity(GEO_RUN);

            for k in 0..GEO_RUN {
                values.push(u16::from_le_bytes([buf[i + 2 * k], buf[i + 2 * k + 1]]));
            }

            let ok = match variant {
                GeoVariant::Combined => values[0] >= 0x1000 && semitone_run_exact(&values),
                _ => values[0] < 0x1000 && semitone_run_rounded(&values),
            };

            if !ok || !garbage_free(map, offset, i, span) {
                return None;
            }

            Some(Candidate {
                name: "geometric",
                high_index: i,
                low_index: i,
                high_span: span,
                low_span: span,
                combined: true,
                notes_per_octave: 12,
                values,
            })
        }
        GeoVariant::Split => {
            let span = GEO_RUN;

            if i + 2 * span - 1 > end || i + 2 * span > buf.len() {
                return None;
            }

            let l = i + span;
            let values: Vec<u16> = (0..GEO_RUN)
                .map(|k| (buf[i + k] as u16) << 8 | buf[l + k] as u16)
                .collect();

            if values[0] < 0x1000 || !semitone_run_exact(&values) {
                return None;
            }

            if !garbage_free(map, offset, i, span) || !garbage_free(map, offset, l, span) {
                return None;
            }

            Some(Candidate {
                name: "geometric",
                high_index: i,
                low_index: l,
                high_span: span,
                low_span: span,
                combined: false,
                notes_per_octave: 12,
                values,
            })
        }
    }
}
