//! Flat 64K cell map and the operand label contract

use crate::mem::{CellOverride, MemoryCell, RelationKind};

pub const MAP_SIZE: usize = 0x10000;

/// The full 64K address space, one cell per address.
///
/// Allocated once when an image is loaded and replaced wholesale on
/// reload; nothing ever removes a single cell. All operand text rendered
/// by the CPU decoders and the region walker funnels through the
/// `*_text` methods here so that user labels, generated labels and
/// pointer relations resolve the same way everywhere.
pub struct MemoryMap {
    cells: Vec<MemoryCell>,
}

impl MemoryMap {
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(MAP_SIZE);

        for addr in 0..MAP_SIZE {
            cells.push(MemoryCell::new(addr as u16));
        }

        MemoryMap { cells }
    }

    /// Mark the image range and snapshot its bytes.
    ///
    /// The range may wrap the top of the address space; the wrapped tail
    /// lands at the bottom like the real loader would place it.
    pub fn load(&mut self, buf: &[u8], org: u16) {
        for (i, byte) in buf.iter().enumerate().take(MAP_SIZE) {
            let addr = org.wrapping_add(i as u16);
            let cell = &mut self.cells[addr as usize];

            cell.snapshot_byte = *byte;
            cell.is_inside = true;
        }
    }

    pub fn cell(&self, addr: u16) -> &MemoryCell {
        &self.cells[addr as usize]
    }

    pub fn cell_mut(&mut self, addr: u16) -> &mut MemoryCell {
        &mut self.cells[addr as usize]
    }

    /// Attach a generated label to `addr` unless one is already present.
    pub fn note_label(&mut self, addr: u16) {
        let cell = &mut self.cells[addr as usize];

        if cell.label().is_none() {
            cell.decoded_label = Some(format!("W{:04X}", addr));
        }
    }

    /// Label for `addr` with user-over-decoded precedence, falling back
    /// to a literal hex address.
    pub fn label_or_hex(&self, addr: u16) -> String {
        match self.cells[addr as usize].label() {
            Some(l) => l.to_string(),
            None => format!("${:04X}", addr),
        }
    }

    fn anchor_of(&self, addr: u16) -> Option<u16> {
        let cell = &self.cells[addr as usize];

        if cell.relation_kind == RelationKind::None || cell.related < 0 {
            return None;
        }

        Some((cell.related as u32 & 0xFFFF) as u16)
    }

    fn create_at(&mut self, addr: u16, create: bool) {
        if create && self.cells[addr as usize].may_label() {
            self.note_label(addr);
        }
    }

    /// Render a 16-bit address operand.
    ///
    /// Relations on the target win: a table entry renders as
    /// `anchor+N`/`anchor-N` and a pointer half as `<anchor`/`>anchor`,
    /// resolving the anchor's own label one level deep. Otherwise the
    /// target's label is used, and when `create` is set a generated
    /// label is attached to the referenced (anchor) cell if it is inside
    /// the image and not garbage.
    pub fn address_text(&mut self, addr: u16, create: bool) -> String {
        match (self.cells[addr as usize].relation_kind, self.anchor_of(addr)) {
            (RelationKind::PlusOffset, Some(anchor)) => {
                self.create_at(anchor, create);
                let offset = addr.wrapping_sub(anchor);
                format!("{}+{}", self.label_or_hex(anchor), offset)
            }
            (RelationKind::MinusOffset, Some(anchor)) => {
                self.create_at(anchor, create);
                let offset = anchor.wrapping_sub(addr);
                format!("{}-{}", self.label_or_hex(anchor), offset)
            }
            (RelationKind::LowByteOf, Some(anchor)) => {
                self.create_at(anchor, create);
                format!("<{}", self.label_or_hex(anchor))
            }
            (RelationKind::HighByteOf, Some(anchor)) => {
                self.create_at(anchor, create);
                format!(">{}", self.label_or_hex(anchor))
            }
            _ => {
                self.create_at(addr, create);
                self.label_or_hex(addr)
            }
        }
    }

    /// Render an 8-bit direct-page address operand.
    ///
    /// Same contract as `address_text` but the literal fallback keeps
    /// the two-digit form the assembler needs to pick the short
    /// encoding.
    pub fn zero_page_text(&mut self, addr: u8, create: bool) -> String {
        let addr16 = addr as u16;

        if self.anchor_of(addr16).is_some() {
            return self.address_text(addr16, create);
        }

        self.create_at(addr16, create);

        match self.cells[addr as usize].label() {
            Some(l) => l.to_string(),
            None => format!("${:02X}", addr),
        }
    }

    /// Render an immediate operand, without any CPU-specific prefix.
    ///
    /// The relation lives on the cell holding the immediate byte itself:
    /// a low/high pointer-half relation renders as `<label`/`>label`
    /// against the anchor, anything else as a literal `$xx`. The 6502
    /// decoder prepends its `#` marker; the Z80 syntax uses the text
    /// as is.
    pub fn immediate_text(&mut self, operand_addr: u16, value: u8, create: bool) -> String {
        match (
            self.cells[operand_addr as usize].relation_kind,
            self.anchor_of(operand_addr),
        ) {
            (RelationKind::LowByteOf, Some(anchor)) => {
                self.create_at(anchor, create);
                format!("<{}", self.label_or_hex(anchor))
            }
            (RelationKind::HighByteOf, Some(anchor)) => {
                self.create_at(anchor, create);
                format!(">{}", self.label_or_hex(anchor))
            }
            _ => format!("${:02X}", value),
        }
    }

    /// Apply a sparse list of external cell overrides.
    pub fn apply_overrides(&mut self, overrides: &[CellOverride]) {
        for ov in overrides {
            let cell = &mut self.cells[ov.address as usize];

            if let Some(ref l) = ov.user_label {
                cell.user_label = Some(l.clone());
            }
            if let Some(ref c) = ov.user_comment {
                cell.user_comment = Some(c.clone());
            }
            if let Some(ref b) = ov.user_block_comment {
                cell.user_block_comment = Some(b.clone());
            }
            if let Some(code) = ov.is_code {
                cell.is_code = code;
                if !code {
                    cell.decoded_comment = None;
                }
            }
            if let Some(data) = ov.is_data {
                cell.is_data = data;
            }
            if let Some(garbage) = ov.is_garbage {
                cell.is_garbage = garbage;
            }
            if let Some(dt) = ov.data_type {
                cell.data_type = dt;
            }
            if let Some(related) = ov.related {
                cell.related = related;
            }
            if let Some(kind) = ov.relation_kind {
                cell.relation_kind = kind;
            }
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        MemoryMap::new()
    }
}
