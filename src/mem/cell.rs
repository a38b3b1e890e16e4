//! Memory cell type

use serde::{Deserialize, Serialize};
use std::{fmt, str};

/// How a data cell should be rendered by the region walker.
///
/// Each variant round-trips through a one-character tag; the tag is what
/// state files store and what the interactive front end shows in its
/// type column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataType {
    /// `.byte $xx`
    HexByte,
    /// `.byte 42`
    DecimalByte,
    /// `.byte %01000010`
    BinaryByte,
    /// `.byte 'c'`
    CharByte,
    /// `.word $xxxx`, little endian
    Word,
    /// `.dbyt $xxxx`, byte-swapped storage
    WordSwapped,
    /// `.faraddr`, three bytes little endian
    Tribyte,
    /// `.dword`, four bytes little endian
    Long,
    /// `.addr`, a 16-bit pointer rendered through the label model
    Address,
    /// `.rta`, a return address as pushed on the stack (target minus one)
    StackWord,
    /// `.byte "..."`, plain text
    Text,
    /// Zero-terminated text
    TextZero,
    /// Text terminated by a byte with the high bit set
    TextHighBit,
    /// Text shifted left one bit (some players pack strings this way)
    TextShifted,
    /// Text in screen codes rather than PETSCII
    TextScreenCode,
}

impl DataType {
    pub fn tag(self) -> char {
        use DataType::*;

        match self {
            HexByte => 'B',
            DecimalByte => 'D',
            BinaryByte => 'Y',
            CharByte => 'C',
            Word => 'W',
            WordSwapped => 'P',
            Tribyte => 'E',
            Long => 'L',
            Address => 'A',
            StackWord => 'S',
            Text => 'T',
            TextZero => 'Z',
            TextHighBit => 'M',
            TextShifted => 'N',
            TextScreenCode => 'I',
        }
    }

}

impl Default for DataType {
    fn default() -> Self {
        DataType::HexByte
    }
}

impl str::FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use DataType::*;

        let mut chars = s.chars();

        let tag = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => return Err(()),
        };

        match tag {
            'B' => Ok(HexByte),
            'D' => Ok(DecimalByte),
            'Y' => Ok(BinaryByte),
            'C' => Ok(CharByte),
            'W' => Ok(Word),
            'P' => Ok(WordSwapped),
            'E' => Ok(Tribyte),
            'L' => Ok(Long),
            'A' => Ok(Address),
            'S' => Ok(StackWord),
            'T' => Ok(Text),
            'Z' => Ok(TextZero),
            'M' => Ok(TextHighBit),
            'N' => Ok(TextShifted),
            'I' => Ok(TextScreenCode),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

derive_deserialize_from_str!(DataType, "valid data type tag");
derive_serialize_from_display!(DataType);

/// Relation of one byte to another cell elsewhere in the map.
///
/// Cells point at each other by raw address plus this tag instead of by
/// reference; the map is a flat fixed-size array and the index is stable
/// for the life of a loaded image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    None,
    /// This byte is the low half of a pointer assembled elsewhere.
    LowByteOf,
    /// This byte is the high half of a pointer assembled elsewhere.
    HighByteOf,
    /// This byte sits N positions after the table anchored at `related`.
    PlusOffset,
    /// This byte sits N positions before the anchor at `related`.
    MinusOffset,
}

impl Default for RelationKind {
    fn default() -> Self {
        RelationKind::None
    }
}

/// One address worth of decode state.
///
/// `user_*` fields come from the interactive editor and always win over
/// their `decoded_*` counterparts at render time. The decoder and the
/// frequency finder only ever touch the `decoded_*` fields and the
/// classification flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryCell {
    pub address: u16,

    /// Copy of the image byte taken at load time.
    pub snapshot_byte: u8,

    pub decoded_comment: Option<String>,
    pub user_comment: Option<String>,
    pub decoded_label: Option<String>,
    pub user_label: Option<String>,

    /// Multi-line comment rendered on its own lines before the cell.
    pub user_block_comment: Option<String>,

    /// True when the address falls inside the loaded image range.
    pub is_inside: bool,

    pub is_code: bool,
    pub is_data: bool,

    /// Garbage cells are skipped entirely: no decoding, no frequency
    /// table may overlap them.
    pub is_garbage: bool,

    pub data_type: DataType,

    /// Address of the related cell, or -1 for none. Only meaningful when
    /// `relation_kind` is not `None`.
    pub related: i32,
    pub relation_kind: RelationKind,
}

impl MemoryCell {
    pub fn new(address: u16) -> Self {
        MemoryCell {
            address,
            snapshot_byte: 0,
            decoded_comment: None,
            user_comment: None,
            decoded_label: None,
            user_label: None,
            user_block_comment: None,
            is_inside: false,
            is_code: false,
            is_data: false,
            is_garbage: false,
            data_type: DataType::default(),
            related: -1,
            relation_kind: RelationKind::None,
        }
    }

    /// The label to render for this cell, if any.
    pub fn label(&self) -> Option<&str> {
        match (&self.user_label, &self.decoded_label) {
            (Some(l), _) if !l.is_empty() => Some(l),
            (_, Some(l)) if !l.is_empty() => Some(l),
            _ => None,
        }
    }

    /// The trailing comment to render for this cell, if any.
    pub fn comment(&self) -> Option<&str> {
        match (&self.user_comment, &self.decoded_comment) {
            (Some(c), _) if !c.is_empty() => Some(c),
            (_, Some(c)) if !c.is_empty() => Some(c),
            _ => None,
        }
    }

    /// True if the decoder may attach a generated label here.
    pub fn may_label(&self) -> bool {
        self.is_inside && !self.is_garbage
    }
}

/// Sparse state-file representation of externally supplied cell state.
///
/// A state file is a JSON list of these; absent fields leave the cell
/// untouched. Full 64K dumps are never serialized.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CellOverride {
    pub address: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_block_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_garbage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_kind: Option<RelationKind>,
}
