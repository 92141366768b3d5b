//! The structural parser (§4.4): drives the splitter and tag reader
//! together, walking the schema to build each message's field tree.

use crate::error::{msg_err, MessageError, ParserError};
use crate::msg_type::MsgType;
use crate::node::{FieldData, GroupNode, Insert};
use crate::schema::{Classifier, ClassifierLookup, FixVersion};
use crate::splitter::{Outcome, Splitter};
use crate::tag::Tag;
use crate::tag_reader::{Read, TagReader};

/// How deeply repeating groups may nest before a message is rejected
/// (§6.3).
pub const MAX_GROUP_DEPTH: usize = 10;

/// A streaming, byte-fed FIX parser (§2, §6.2).
///
/// Feed it bytes with [`Parser::feed`]; the returned iterator yields one
/// [`Message`](crate::message::Message) per complete frame found in (or
/// completed by) that call. A framing/checksum violation poisons the
/// parser permanently (§7); schema violations are scoped to the single
/// offending message and leave the parser usable (§5).
pub struct Parser<L> {
    body: Vec<u8>,
    splitter: Splitter,
    root: GroupNode,
    classifier_lookup: L,
    error: Option<ParserError>,
}

impl<L: ClassifierLookup> Parser<L> {
    pub fn new(classifier_lookup: L) -> Self {
        Parser {
            body: Vec::new(),
            splitter: Splitter::new(),
            root: GroupNode::new(),
            classifier_lookup,
            error: None,
        }
    }

    /// The parser-fatal error, if the parser has been poisoned by a
    /// framing violation. Once set, [`Parser::feed`] always yields
    /// nothing more.
    pub fn parser_error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Feeds `bytes` to the parser, returning an iterator over however
    /// many complete messages they produce (zero, one, or many — §5
    /// "many messages per feed, or feed split mid-message").
    pub fn feed<'p>(&'p mut self, bytes: &'p [u8]) -> Messages<'p, L> {
        Messages {
            parser: self,
            input: bytes,
            pos: 0,
        }
    }

    /// Runs the splitter until it completes a message or is exhausted;
    /// on completion, walks the schema to build the field tree.
    fn next_message(&mut self, input: &[u8], pos: &mut usize) -> Option<ParsedMessage> {
        if self.error.is_some() {
            return None;
        }

        loop {
            if *pos >= input.len() {
                return None;
            }
            match self.splitter.feed(input, pos, &mut self.body) {
                Outcome::Pending => return None,
                Outcome::Error(e) => {
                    log::warn!("FIX parser poisoned by framing error: {e}");
                    self.error = Some(e);
                    return None;
                }
                Outcome::Complete { version, msg_type } => {
                    self.root.clear();
                    let error = self.parse_message(version, msg_type.as_str());
                    return Some(ParsedMessage {
                        version,
                        msg_type,
                        error,
                    });
                }
            }
        }
    }

    /// §4.4 `parse_message`: look up the classifier for this message
    /// type and read the root node. Any schema/content violation here
    /// is message-fatal, not parser-fatal.
    fn parse_message(&mut self, version: FixVersion, msg_type: &str) -> Option<MessageError> {
        let Some(classifier) = self.classifier_lookup.lookup(version, msg_type) else {
            log::debug!("no classifier for FIX message type '{msg_type}' ({})", version.as_str());
            return Some(msg_err!(version, msg_type, "Unrecognised message"));
        };

        let mut reader = TagReader::new(&self.body, version, msg_type);
        let outcome = match Self::read_node(&mut reader, classifier, &mut self.root, 0, version, msg_type) {
            Ok(()) if reader.has_pending() => {
                // The root has no parent to hand an out-of-place tag up
                // to; per §4.4 step 4, that's where "unknown tag" bites.
                let tag = reader.current.tag;
                Some(msg_err!(version, msg_type, "Unexpected tag {tag}"))
            }
            Ok(()) => None,
            Err(e) => Some(e),
        };
        if let Some(e) = &outcome {
            log::debug!("FIX message error: {e}");
        }
        outcome
    }

    /// §4.4 `read_node` / `process_root_node`: reads tags into `node`
    /// until a tag not valid here is seen (pushed back for the caller)
    /// or the buffer is exhausted. `depth` is this node's nesting level,
    /// 0 for the message root.
    fn read_node(
        reader: &mut TagReader<'_>,
        classifier: &dyn Classifier,
        node: &mut GroupNode,
        depth: usize,
        version: FixVersion,
        msg_type: &str,
    ) -> Result<(), MessageError> {
        loop {
            match reader.read_next_tag() {
                Read::Done => return Ok(()),
                Read::Error(e) => return Err(e),
                Read::Ok => {}
            }

            let tag = reader.current.tag;

            // The leading tag reappearing (once this node already holds
            // fields) starts the next repetition, not a duplicate here.
            if node.size() > 0 && classifier.is_first_in_group(tag) {
                reader.push_back();
                return Ok(());
            }

            if !classifier.is_valid_tag(tag) {
                reader.push_back();
                return Ok(());
            }

            let data_tag = classifier.get_data_tag(tag);
            if data_tag != 0 {
                match reader.read_binary_tag(data_tag) {
                    Read::Done => unreachable!("read_binary_tag never returns Done"),
                    Read::Error(e) => return Err(e),
                    Read::Ok => {}
                }
                // `read_binary_tag` advances `current` onto the data tag
                // itself, so the length tag is never stored — only its
                // payload, keyed by the data tag.
                let start = reader.current.start;
                let end = reader.current.end;
                Self::insert_value(node, data_tag, start, end, version, msg_type)?;
                continue;
            }

            if let Some(sub_classifier) = classifier.get_group_classifier(tag) {
                let count = Self::parse_group_count(reader, tag, version, msg_type)?;
                let first =
                    Self::read_group(reader, sub_classifier, count, depth, version, msg_type)?;
                match node.insert(tag, FieldData::Group { count, first }) {
                    Insert::Inserted => {}
                    Insert::Duplicate(_) => {
                        return Err(msg_err!(version, msg_type, "Duplicate tag {tag}"))
                    }
                    Insert::TooManyTags => {
                        return Err(msg_err!(version, msg_type, "Too many tags in message"))
                    }
                }
                continue;
            }

            let start = reader.current.start;
            let end = reader.current.end;
            Self::insert_value(node, tag, start, end, version, msg_type)?;
        }
    }

    fn insert_value(
        node: &mut GroupNode,
        tag: Tag,
        start: u32,
        end: u32,
        version: FixVersion,
        msg_type: &str,
    ) -> Result<(), MessageError> {
        match node.insert(tag, FieldData::Value { start, end }) {
            Insert::Inserted => Ok(()),
            Insert::Duplicate(_) => Err(msg_err!(version, msg_type, "Duplicate tag {tag}")),
            Insert::TooManyTags => Err(msg_err!(version, msg_type, "Too many tags in message")),
        }
    }

    fn parse_group_count(
        reader: &TagReader<'_>,
        tag: Tag,
        version: FixVersion,
        msg_type: &str,
    ) -> Result<u32, MessageError> {
        crate::convert::parse_strict_uint(reader.current_value())
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| msg_err!(version, msg_type, "Invalid group length format for tag {tag}"))
    }

    /// §4.4 `read_group`: reads `count` repetitions, each required to
    /// start with the group's leading tag; recursion depth is bounded
    /// by [`MAX_GROUP_DEPTH`].
    fn read_group(
        reader: &mut TagReader<'_>,
        classifier: &dyn Classifier,
        count: u32,
        depth: usize,
        version: FixVersion,
        msg_type: &str,
    ) -> Result<Option<Box<GroupNode>>, MessageError> {
        if count == 0 {
            return Ok(None);
        }
        if depth >= MAX_GROUP_DEPTH {
            return Err(msg_err!(version, msg_type, "Repeating groups nested too deeply"));
        }

        let mut nodes = Vec::with_capacity(count as usize);
        for i in 0..count {
            match reader.read_next_tag() {
                Read::Done => {
                    return Err(msg_err!(
                        version,
                        msg_type,
                        "Expected {count} repetitions of a group but found {i}"
                    ))
                }
                Read::Error(e) => return Err(e),
                Read::Ok => {}
            }

            if !classifier.is_first_in_group(reader.current.tag) {
                let tag = reader.current.tag;
                return Err(msg_err!(version, msg_type, "Unexpected tag {tag}"));
            }
            reader.push_back();

            let mut node = GroupNode::new();
            Self::read_node(reader, classifier, &mut node, depth + 1, version, msg_type)?;
            nodes.push(node);
        }

        // Fold back-to-front so the chain comes out in repetition order,
        // without the raw pointers a manual-free implementation would need.
        let mut next = None;
        for mut node in nodes.into_iter().rev() {
            node.next = next;
            next = Some(Box::new(node));
        }
        Ok(next)
    }
}

/// One message's framing result, before its body buffer is wrapped into
/// a public [`Message`](crate::message::Message).
struct ParsedMessage {
    version: FixVersion,
    msg_type: MsgType,
    error: Option<MessageError>,
}

/// The messages completed by one [`Parser::feed`] call.
///
/// Not a [`std::iter::Iterator`]: each [`Message`](crate::message::Message)
/// borrows the parser's reused body buffer and node tree, which the next
/// call to [`Messages::next`] overwrites (§5 "valid only until the next
/// message begins"), so the borrow must stay tied to this struct's own
/// `&mut self` rather than to the feed's lifetime. Drive it with a `while
/// let Some(msg) = messages.next()` loop.
pub struct Messages<'p, L> {
    parser: &'p mut Parser<L>,
    input: &'p [u8],
    pos: usize,
}

impl<'p, L: ClassifierLookup> Messages<'p, L> {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<crate::message::Message<'_>> {
        let parsed = self.parser.next_message(self.input, &mut self.pos)?;
        Some(crate::message::Message {
            version: parsed.version,
            msg_type: parsed.msg_type,
            error: parsed.error.map(|e| e.message().to_string()),
            root: &self.parser.root,
            body: &self.parser.body,
        })
    }
}
