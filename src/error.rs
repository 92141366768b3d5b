//! The two-tier error model (§7): parser-fatal vs message-fatal.

use std::fmt;

use crate::schema::FixVersion;

/// A framing/checksum/length violation. Once set on the parser, the parser
/// is poisoned: no further bytes are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError(pub(crate) String);

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParserError {}

impl ParserError {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        ParserError(text.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A schema violation scoped to the current message. The parser remains
/// usable; only this message is marked complete-with-error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError(pub(crate) String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MessageError {}

impl MessageError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Builds a message-level diagnostic, prefixed with version and type as
/// `FIX message (version 'FIX.4.2', type '0') error: <detail>`.
pub(crate) fn message_error(
    version: FixVersion,
    msg_type: &str,
    detail: fmt::Arguments<'_>,
) -> MessageError {
    MessageError(format!(
        "FIX message (version '{}', type '{}') error: {}",
        version.as_str(),
        msg_type,
        detail
    ))
}

macro_rules! msg_err {
    ($version:expr, $msg_type:expr, $($arg:tt)*) => {
        $crate::error::message_error($version, $msg_type, format_args!($($arg)*))
    };
}

pub(crate) use msg_err;
