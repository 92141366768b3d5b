//! The tag reader (§4.5): a cursor over a message body buffer that
//! yields successive tag/value pairs, with a one-slot pushback buffer
//! and a binary-tag mode for the raw-data convention.
//!
//! Unlike the split-on-bytes design this is grounded on, values are
//! handed back as `(start, end)` byte offsets rather than re-borrowed
//! slices: offsets are `Copy`, so the node store (§4.1) can hold them
//! without a lifetime parameter, and the in-place NUL-over-SOH stamp
//! the original uses purely to get a C string becomes unnecessary —
//! Rust slices already carry their own length.

use crate::convert::read_uint_prefix;
use crate::error::MessageError;
use crate::schema::FixVersion;
use crate::tag::Tag;

/// The tag/value pair most recently read.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CurrentTag {
    pub(crate) tag: Tag,
    pub(crate) start: u32,
    pub(crate) end: u32,
}

pub(crate) enum Read {
    Ok,
    Done,
    Error(MessageError),
}

pub(crate) struct TagReader<'a> {
    body: &'a [u8],
    pos: usize,
    poisoned: bool,
    pub(crate) current: CurrentTag,
    has_unread_tag: bool,
    version: FixVersion,
    msg_type: &'a str,
}

impl<'a> TagReader<'a> {
    pub(crate) fn new(body: &'a [u8], version: FixVersion, msg_type: &'a str) -> Self {
        TagReader {
            body,
            pos: 0,
            poisoned: false,
            current: CurrentTag::default(),
            has_unread_tag: false,
            version,
            msg_type,
        }
    }

    fn err(&mut self, detail: std::fmt::Arguments<'_>) -> Read {
        self.poisoned = true;
        Read::Error(crate::error::message_error(self.version, self.msg_type, detail))
    }

    /// Reads a `TAG=` prefix at `self.pos`, leaving `self.pos` just
    /// after the `=`. Does not touch `self.current.tag` on failure.
    fn read_tag_number(&mut self) -> Result<(), ()> {
        let rest = &self.body[self.pos..];
        let Some((tag, digits)) = read_uint_prefix(rest) else {
            return Err(());
        };
        if rest.get(digits) != Some(&b'=') || digits + 1 >= rest.len() {
            return Err(());
        }
        self.current.tag = tag as Tag;
        self.pos += digits + 1;
        Ok(())
    }

    /// Pushes the current tag back; the next `read_next_tag` call
    /// returns it again without re-scanning.
    pub(crate) fn push_back(&mut self) {
        self.has_unread_tag = true;
    }

    /// True right after a tag was pushed back and not yet re-read —
    /// distinguishes "stopped because the tag didn't belong here" from
    /// "stopped because the message genuinely ended".
    pub(crate) fn has_pending(&self) -> bool {
        self.has_unread_tag
    }

    /// Reads the next tag/value pair, honouring any pushed-back tag.
    pub(crate) fn read_next_tag(&mut self) -> Read {
        if self.poisoned {
            return self.err(format_args!("Tag reader used after an error"));
        }

        if self.has_unread_tag {
            self.has_unread_tag = false;
            return Read::Ok;
        }

        if self.pos >= self.body.len() {
            return Read::Done;
        }

        if self.read_tag_number().is_err() {
            return self.err(format_args!("Invalid tag format"));
        }

        let start = self.pos;
        let Some(soh_offset) = self.body[start..].iter().position(|&b| b == 0x01) else {
            return self.err(format_args!("Unexpected end of message"));
        };
        let end = start + soh_offset;

        if end == start {
            let tag = self.current.tag;
            return self.err(format_args!("Value for tag {tag} is missing"));
        }

        self.current.start = start as u32;
        self.current.end = end as u32;
        self.pos = end + 1;

        Read::Ok
    }

    /// Switches into binary mode: `current` must hold a just-read
    /// length value; this reads the next tag header, requires it to
    /// equal `data_tag`, and consumes exactly the declared number of
    /// bytes (which may contain embedded SOH) as its value.
    pub(crate) fn read_binary_tag(&mut self, data_tag: Tag) -> Read {
        if self.poisoned {
            return self.err(format_args!("Tag reader used after an error"));
        }

        let len_tag = self.current.tag;
        let Some(len) = read_uint_prefix(self.value())
            .filter(|&(_, consumed)| consumed == self.value().len())
            .map(|(n, _)| n as usize)
        else {
            return self.err(format_args!("Invalid value length format for tag {len_tag}"));
        };

        if self.read_tag_number().is_err() {
            return self.err(format_args!("Invalid tag format"));
        }

        if self.current.tag != data_tag {
            let got = self.current.tag;
            return self.err(format_args!("Expected tag {data_tag}, but got {got} instead"));
        }

        let start = self.pos;
        if len >= self.body.len().saturating_sub(start) || self.body[start + len] != 0x01 {
            return self.err(format_args!("Invalid value length {len} for tag {data_tag}"));
        }

        self.current.start = start as u32;
        self.current.end = (start + len) as u32;
        self.pos = start + len + 1;

        Read::Ok
    }

    fn value(&self) -> &'a [u8] {
        &self.body[self.current.start as usize..self.current.end as usize]
    }

    /// The value bytes of `current`, for callers outside this module
    /// that already hold a read tag (e.g. a group-count value).
    pub(crate) fn current_value(&self) -> &'a [u8] {
        self.value()
    }
}
