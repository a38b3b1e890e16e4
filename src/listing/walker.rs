//! The region walker

use crate::arch::{Cpu, DecodeOptions};
use crate::listing::data;
use crate::mem::{DataType, MemoryMap};

/// What kind of text the walk produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Address and hex-dump columns in front of every line.
    Listing,
    /// Reassemblable source.
    Source,
}

const TEXT_RUN_LIMIT: usize = 16;

/// Walks an address range, classifying each cell and dispatching to
/// the CPU decoder or the data renderers.
///
/// The walker owns nothing but cursors and options; the decoder and
/// map come in by reference so a caller can run several independent
/// walks with separate decoder instances.
pub struct Walker<'a> {
    cpu: &'a mut dyn Cpu,
    mode: RenderMode,
    opt: DecodeOptions,
    /// Treat unclassified cells as code rather than data.
    pub assume_code: bool,
}

impl<'a> Walker<'a> {
    pub fn new(cpu: &'a mut dyn Cpu, mode: RenderMode, opt: DecodeOptions) -> Self {
        Walker {
            cpu,
            mode,
            opt,
            assume_code: true,
        }
    }

    /// Produce the listing for buffer positions `start..=end`, with
    /// `buf[start]` sitting at address `pc`.
    ///
    /// Garbage cells emit nothing but force a fresh origin directive on
    /// the next live cell, since they break code contiguity. A decoder
    /// running out of buffer renders placeholders and the walk simply
    /// carries on until the cursor passes `end`. The program counter
    /// wraps at the top of the 64K space.
    pub fn walk(
        &mut self,
        buf: &[u8],
        start: usize,
        end: usize,
        pc: u32,
        map: &mut MemoryMap,
    ) -> String {
        let mut out = String::new();
        let mut pos = start;
        let mut pc = pc & 0xFFFF;
        let mut need_org = true;

        while pos <= end && pos < buf.len() {
            let addr = pc as u16;

            if map.cell(addr).is_garbage {
                pos += 1;
                pc = pc.wrapping_add(1) & 0xFFFF;
                need_org = true;
                continue;
            }

            if need_org {
                self.emit_org(&mut out, addr);
                need_org = false;
            }

            self.emit_prologue(&mut out, addr, map);

            let is_code = {
                let cell = map.cell(addr);
                cell.is_code || (!cell.is_data && self.assume_code)
            };

            if is_code {
                let d = self.cpu.decode(buf, pos, pc, map);

                map.cell_mut(addr).decoded_comment = self.cpu.last_comment();
                map.cell_mut(addr).is_code = true;

                let consumed = &buf[pos..buf.len().min(pos + d.length)];
                let comment = map.cell(addr).comment().map(str::to_string);
                self.emit(&mut out, addr, consumed, &d.text, comment.as_deref());

                if d.flow.is_final() {
                    out.push('\n');
                }

                pos += d.length;
                pc = pc.wrapping_add(d.length as u32) & 0xFFFF;
            } else {
                let dt = map.cell(addr).data_type;
                let (text, width) = self.render_data(buf, pos, addr, dt, map);

                map.cell_mut(addr).decoded_comment = None;

                let consumed = &buf[pos..buf.len().min(pos + width)];
                let comment = map.cell(addr).comment().map(str::to_string);
                self.emit(&mut out, addr, consumed, &text, comment.as_deref());

                pos += width;
                pc = pc.wrapping_add(width as u32) & 0xFFFF;
            }
        }

        out
    }

    /// One data declaration. Text cells aggregate a run of
    /// consecutive, same-typed, unlabeled data cells into a single
    /// quoted declaration; every other type renders its fixed unit.
    fn render_data(
        &mut self,
        buf: &[u8],
        pos: usize,
        addr: u16,
        dt: DataType,
        map: &mut MemoryMap,
    ) -> (String, usize) {
        let is_text = matches!(
            dt,
            DataType::Text
                | DataType::TextZero
                | DataType::TextHighBit
                | DataType::TextShifted
                | DataType::TextScreenCode
        );

        if !is_text {
            let u = data::render_unit(dt, buf, pos, map, self.opt.create_labels);
            return (u.text, u.width);
        }

        let mut run = 0usize;

        while run < TEXT_RUN_LIMIT && pos + run < buf.len() {
            let cell = map.cell(addr.wrapping_add(run as u16));

            if run > 0
                && (cell.data_type != dt
                    || !cell.is_data
                    || cell.is_garbage
                    || cell.label().is_some()
                    || cell.user_block_comment.is_some())
            {
                break;
            }

            let byte = buf[pos + run];
            run += 1;

            // terminators belong to the run they close
            match dt {
                DataType::TextZero if byte == 0 => break,
                DataType::TextHighBit if byte & 0x80 != 0 => break,
                _ => {}
            }
        }

        if run == 0 {
            let u = data::render_unit(dt, buf, pos, map, self.opt.create_labels);
            return (u.text, u.width);
        }

        (data::render_text_run(dt, &buf[pos..pos + run]), run)
    }

    fn emit_org(&self, out: &mut String, addr: u16) {
        match self.mode {
            RenderMode::Source => {
                out.push_str(&format!("        .org ${:04X}\n", addr));
            }
            RenderMode::Listing => {
                out.push_str(&format!("                  .org ${:04X}\n", addr));
            }
        }
    }

    fn emit_prologue(&self, out: &mut String, addr: u16, map: &MemoryMap) {
        let cell = map.cell(addr);

        if let Some(block) = &cell.user_block_comment {
            for line in block.lines() {
                out.push_str(&format!("; {}\n", line));
            }
        }

        if let Some(label) = cell.label() {
            out.push_str(&format!("{}:\n", label));
        }
    }

    fn emit(&self, out: &mut String, addr: u16, bytes: &[u8], text: &str, comment: Option<&str>) {
        let body = match comment {
            Some(c) => format!("{:<24}; {}", text, c),
            None => text.to_string(),
        };

        match self.mode {
            RenderMode::Listing => {
                let mut dump = String::new();

                for b in bytes.iter().take(4) {
                    dump.push_str(&format!("{:02X} ", b));
                }

                out.push_str(&format!("{:04X}: {:<12}{}\n", addr, dump, body.trim_end()));
            }
            RenderMode::Source => {
                out.push_str(&format!("        {}\n", body.trim_end()));
            }
        }
    }
}
