//! A parsed FIX message: version, type, optional error, and a root
//! [`Node`] over the field tree (§3, §6.2).

use crate::msg_type::MsgType;
use crate::node::{GroupNode, Node};
use crate::schema::FixVersion;

/// One complete parsed message. The root node is never absent, even on
/// error, though an errored message's tree holds only whatever was
/// parsed before the failure (§3).
pub struct Message<'a> {
    pub(crate) version: FixVersion,
    pub(crate) msg_type: MsgType,
    pub(crate) error: Option<String>,
    pub(crate) root: &'a GroupNode,
    pub(crate) body: &'a [u8],
}

impl<'a> Message<'a> {
    pub fn version(&self) -> FixVersion {
        self.version
    }

    pub fn msg_type(&self) -> &str {
        self.msg_type.as_str()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn root(&self) -> Node<'a> {
        Node::new(self.root, self.body)
    }
}

impl std::fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("version", &self.version.as_str())
            .field("msg_type", &self.msg_type.as_str())
            .field("error", &self.error)
            .field("root_size", &self.root.size())
            .finish()
    }
}
