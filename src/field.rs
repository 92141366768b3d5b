//! Typed views over a stored field (§3, §6.2).

use crate::convert::{self, LocalMktDate, UtcTimestamp};
use crate::node::{FieldData, Node};
use crate::tag::Tag;

/// SOH, the FIX field separator.
pub const FIELD_SEPARATOR: u8 = 0x01;
/// Display-only stand-in for [`FIELD_SEPARATOR`] in debug/log output.
pub const FIELD_SEPARATOR_DISPLAY: char = '|';
pub const FIELD_KEY_VALUE_SEPARATOR: u8 = b'=';

/// A borrowed view of one field in a [`Node`](crate::node::Node).
///
/// `value()` and the typed accessors borrow from the parser's body
/// buffer; they are valid only for the lifetime of the message that
/// produced them (§5 "Borrowed field slices must not outlive...").
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub tag: Tag,
    pub(crate) body: &'a [u8],
    pub(crate) data: &'a FieldData,
}

impl<'a> Field<'a> {
    pub(crate) fn new(tag: Tag, body: &'a [u8], data: &'a FieldData) -> Self {
        Field { tag, body, data }
    }

    /// Byte length of the raw value, or the repetition count if this
    /// field is a group header.
    pub fn length(&self) -> usize {
        match self.data {
            FieldData::Value { start, end } => (*end - *start) as usize,
            FieldData::Group { count, .. } => *count as usize,
        }
    }

    /// The raw value bytes, or `None` if this field is a group header.
    pub fn value(&self) -> Option<&'a [u8]> {
        match self.data {
            FieldData::Value { start, end } => Some(&self.body[*start as usize..*end as usize]),
            FieldData::Group { .. } => None,
        }
    }

    /// The first child node of the repeating group this field
    /// introduces, if it is a group header with a non-zero count.
    pub fn group(&self) -> Option<Node<'a>> {
        match self.data {
            FieldData::Group {
                first: Some(first), ..
            } => Some(Node::new(first, self.body)),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        self.value()
    }

    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value()?).ok()
    }

    pub fn as_integer(&self) -> Option<i64> {
        convert::parse_signed_integer(self.value()?)
    }

    /// Fixed-point decimal: `(value, num_frac)` where the real number
    /// is `value / 10^num_frac`.
    pub fn as_decimal(&self) -> Option<(i64, u32)> {
        convert::parse_decimal(self.value()?)
    }

    pub fn as_double(&self) -> Option<f64> {
        convert::parse_double(self.value()?)
    }

    pub fn as_bool(&self) -> Option<bool> {
        convert::parse_bool(self.value()?)
    }

    pub fn as_utc_timestamp(&self) -> Option<UtcTimestamp> {
        convert::parse_utc_timestamp(self.value()?)
    }

    pub fn as_local_mkt_date(&self) -> Option<LocalMktDate> {
        convert::parse_local_mkt_date(self.value()?)
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("Field");
        dbg.field("tag", &self.tag);
        match self.value() {
            Some(v) => dbg.field("value", &String::from_utf8_lossy(v)),
            None => dbg.field("group_count", &self.length()),
        };
        dbg.finish()
    }
}
