//! Listing production.
//!
//! The region walker drives a CPU decoder over an address range and
//! stitches the final text together, dispatching data cells to the
//! declaration renderers. Two flavours come out of the same walk: an
//! address-and-hex-dump listing for reading, or plain source that a
//! reassembler accepts.

mod data;
mod walker;

pub use walker::{RenderMode, Walker};
