//! A streaming, byte-fed parser for the wire-level FIX protocol
//! (versions 4.2, 4.3, 4.4 and 5.0/FIXT.1.1).
//!
//! Bytes go in through [`Parser::feed`]; complete, validated messages
//! come out as a navigable tree of tag/value fields and repeating
//! groups, addressable without copying out of the parser's own buffers.
//! Schemas (which tags are legal where, which introduce raw data or
//! repeating groups) are supplied by the caller through the
//! [`schema::ClassifierLookup`] trait — this crate ships no dictionary
//! of its own. Encoding FIX messages back to wire bytes is out of
//! scope; see the module docs for the rest of what is and isn't here.
//!
//! ```
//! use fix_parser_rs::parser::Parser;
//! use fix_parser_rs::schema::{Classifier, ClassifierLookup, FixVersion, NodeSpec};
//! use fix_parser_rs::tag;
//!
//! static HEARTBEAT: NodeSpec = NodeSpec {
//!     valid_tags: &[tag::MSG_TYPE, tag::MSG_SEQ_NUM, tag::SENDER_COMP_ID, tag::TARGET_COMP_ID, tag::SENDING_TIME],
//!     data_tags: &[],
//!     group_tags: &[],
//!     leading_tag: 0,
//! };
//!
//! fn lookup(_version: FixVersion, msg_type: &str) -> Option<&'static dyn Classifier> {
//!     match msg_type {
//!         "0" => Some(&HEARTBEAT),
//!         _ => None,
//!     }
//! }
//!
//! let mut parser = Parser::new(lookup as fn(FixVersion, &str) -> Option<&'static dyn Classifier>);
//! let wire = b"8=FIXT.1.1\x019=5\x0135=0\x0110=241\x01";
//! let mut messages = parser.feed(wire);
//! let msg = messages.next().expect("one message");
//! assert!(msg.is_ok());
//! assert_eq!(msg.msg_type(), "0");
//! ```

pub mod convert;
pub mod error;
pub mod field;
pub mod message;
pub mod msg_type;
pub mod node;
pub mod parser;
pub mod schema;
pub mod tag;

mod splitter;
mod tag_reader;

pub use error::{MessageError, ParserError};
pub use field::Field;
pub use message::Message;
pub use node::{GroupNode, Node};
pub use parser::Parser;
pub use schema::{Classifier, ClassifierLookup, FixVersion, NodeSpec};
pub use tag::Tag;
