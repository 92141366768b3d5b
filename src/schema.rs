//! The schema (classifier) contract, §4.2 and Design Note "Schema declaration".
//!
//! A classifier is a value with four predicates per message or group
//! node type. This crate never ships a schema-authoring tool: callers
//! supply a [`ClassifierLookup`] that maps `(version, message type)` to a
//! `Classifier`. [`NodeSpec`] is the declarative table form the design
//! notes ask for — arrays of valid tags, data-tag pairs and group links,
//! evaluated once per lookup rather than synthesised from macros.

use crate::tag::Tag;

/// The four FIX versions this parser understands (§1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixVersion {
    Fix4_2,
    Fix4_3,
    Fix4_4,
    Fix5_0,
}

impl FixVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            FixVersion::Fix4_2 => "FIX.4.2",
            FixVersion::Fix4_3 => "FIX.4.3",
            FixVersion::Fix4_4 => "FIX.4.4",
            FixVersion::Fix5_0 => "FIX.5.0",
        }
    }
}

/// A per-node schema: which tags belong here, which are raw-data length
/// tags, which introduce repeating groups, and (for group sub-nodes)
/// which tag must lead every repetition.
pub trait Classifier: Sync {
    /// Does this tag belong in this node?
    fn is_valid_tag(&self, tag: Tag) -> bool;

    /// If `tag` is a length tag introducing a raw-data value, the
    /// companion data tag; otherwise 0.
    fn get_data_tag(&self, tag: Tag) -> Tag;

    /// Is `tag` the mandatory leading tag of this repeating group?
    /// Only meaningful for group sub-node classifiers; message and
    /// top-level node classifiers always answer `false`.
    fn is_first_in_group(&self, tag: Tag) -> bool;

    /// If `tag` is a group-count tag on this node, the classifier for
    /// that group's sub-nodes.
    fn get_group_classifier(&self, tag: Tag) -> Option<&'static dyn Classifier>;
}

/// A function `(version, message type) -> classifier | null`, the top
/// level of the schema contract. Unknown message types must yield
/// `None`, which the structural parser turns into a message-level error
/// rather than a parser-fatal one.
pub trait ClassifierLookup {
    fn lookup(&self, version: FixVersion, msg_type: &str) -> Option<&'static dyn Classifier>;
}

impl<F> ClassifierLookup for F
where
    F: Fn(FixVersion, &str) -> Option<&'static dyn Classifier>,
{
    fn lookup(&self, version: FixVersion, msg_type: &str) -> Option<&'static dyn Classifier> {
        self(version, msg_type)
    }
}

/// A declarative classifier: plain data, evaluated by linear scan. Node
/// tag counts are small (a handful to a few dozen), so a scan beats the
/// bookkeeping of a sorted table or a hash map.
pub struct NodeSpec {
    /// Tags that may legally appear directly in this node.
    pub valid_tags: &'static [Tag],
    /// `(length_tag, data_tag)` pairs for the raw-data convention.
    pub data_tags: &'static [(Tag, Tag)],
    /// `(count_tag, sub_node)` pairs: tags that introduce a repeating
    /// group, and the classifier for its children.
    pub group_tags: &'static [(Tag, &'static NodeSpec)],
    /// The mandatory leading tag of every repetition, when this spec
    /// describes a group's sub-node. `0` for message/root specs, which
    /// are never themselves a repeating group.
    pub leading_tag: Tag,
}

impl Classifier for NodeSpec {
    fn is_valid_tag(&self, tag: Tag) -> bool {
        self.valid_tags.contains(&tag)
    }

    fn get_data_tag(&self, tag: Tag) -> Tag {
        self.data_tags
            .iter()
            .find(|(len_tag, _)| *len_tag == tag)
            .map(|(_, data_tag)| *data_tag)
            .unwrap_or(0)
    }

    fn is_first_in_group(&self, tag: Tag) -> bool {
        self.leading_tag != 0 && self.leading_tag == tag
    }

    fn get_group_classifier(&self, tag: Tag) -> Option<&'static dyn Classifier> {
        self.group_tags
            .iter()
            .find(|(count_tag, _)| *count_tag == tag)
            .map(|(_, spec)| *spec as &'static dyn Classifier)
    }
}
