//! The node store (§4.1): an open-addressed hash table from tag number
//! to field record, one per group node.

use crate::tag::Tag;

/// Fixed prime capacity ladder (§6.3). Index 0 means "no table
/// allocated yet".
pub(crate) const CAPS: [usize; 7] = [0, 23, 47, 101, 199, 401, 809];

/// The payload of a slot: either a plain value (byte range into the
/// parser's body buffer) or a group header (repetition count plus a
/// handle to the first child node).
#[derive(Debug, Clone)]
pub(crate) enum FieldData {
    Value { start: u32, end: u32 },
    Group {
        count: u32,
        first: Option<Box<GroupNode>>,
    },
}

impl Default for FieldData {
    fn default() -> Self {
        FieldData::Value { start: 0, end: 0 }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FieldSlot {
    /// 0 means empty.
    pub(crate) tag: Tag,
    pub(crate) data: FieldData,
}

/// Outcome of [`GroupNode::insert`].
pub(crate) enum Insert<'a> {
    /// The tag was not present; it has been stored.
    Inserted,
    /// The tag was already present; here is the existing slot.
    Duplicate(&'a FieldSlot),
    /// The table is already at the top capacity class and full.
    TooManyTags,
}

/// A node in the repeating-group tree: a hash table of fields plus an
/// optional link to the next repetition of the same group (`next`).
#[derive(Debug, Default)]
pub struct GroupNode {
    pub(crate) buff: Vec<FieldSlot>,
    pub(crate) size: usize,
    cap_index: usize,
    pub(crate) next: Option<Box<GroupNode>>,
}

impl GroupNode {
    pub fn new() -> Self {
        GroupNode {
            buff: Vec::new(),
            size: 0,
            cap_index: 0,
            next: None,
        }
    }

    /// Number of fields stored directly in this node (not counting
    /// sibling repetitions or descendants).
    pub fn size(&self) -> usize {
        self.size
    }

    /// The following repetition of the same group, if any.
    pub fn next(&self) -> Option<&GroupNode> {
        self.next.as_deref()
    }

    fn capacity(&self) -> usize {
        CAPS[self.cap_index]
    }

    /// Finds the slot holding `tag`, or the first empty slot on the
    /// probe sequence if `tag` is absent. Returns `None` only when the
    /// table has not been allocated yet (`cap_index == 0`).
    fn probe(&self, tag: Tag) -> Option<usize> {
        let m = self.capacity();
        if m == 0 {
            return None;
        }
        let h2 = 1 + (tag as u64 % (m as u64 - 1));
        let mut h1 = 2654435769u64.wrapping_mul(tag as u64);
        loop {
            let idx = (h1 % m as u64) as usize;
            let slot = &self.buff[idx];
            if slot.tag == 0 || slot.tag == tag {
                return Some(idx);
            }
            h1 = h1.wrapping_add(h2);
        }
    }

    /// Looks up `tag` for reading.
    pub(crate) fn find(&self, tag: Tag) -> Option<&FieldSlot> {
        let idx = self.probe(tag)?;
        let slot = &self.buff[idx];
        (slot.tag == tag).then_some(slot)
    }

    /// Rehashes all occupied slots into the next capacity class.
    fn grow(&mut self) -> bool {
        if self.cap_index == CAPS.len() - 1 {
            return false; // top of the ladder
        }
        let old = std::mem::take(&mut self.buff);
        self.cap_index += 1;
        self.buff = (0..self.capacity()).map(|_| FieldSlot::default()).collect();
        for slot in old {
            if slot.tag > 0 {
                let idx = self.probe(slot.tag).expect("table just allocated");
                self.buff[idx] = slot;
            }
        }
        true
    }

    /// Inserts `tag`/`data`, growing the table first if the load
    /// factor would exceed 3/4. Returns [`Insert::Duplicate`] without
    /// overwriting the existing slot if `tag` is already present.
    pub(crate) fn insert(&mut self, tag: Tag, data: FieldData) -> Insert<'_> {
        if self.size >= (3 * self.capacity()) / 4 && !self.grow() {
            return Insert::TooManyTags;
        }

        let idx = self.probe(tag).expect("table allocated by the check above");
        if self.buff[idx].tag == tag {
            return Insert::Duplicate(&self.buff[idx]);
        }

        self.buff[idx] = FieldSlot { tag, data };
        self.size += 1;
        Insert::Inserted
    }

    /// Resets this node to empty, dropping any attached group chains,
    /// while keeping the allocated table (and its capacity class) for
    /// reuse by the next message.
    pub fn clear(&mut self) {
        if self.size > 0 {
            for slot in &mut self.buff {
                *slot = FieldSlot::default();
            }
            self.size = 0;
        }
    }

    /// Iterates the occupied slots, in hash-table order (not insertion
    /// order — see §5 Ordering).
    pub(crate) fn occupied(&self) -> impl Iterator<Item = &FieldSlot> {
        self.buff.iter().filter(|slot| slot.tag > 0)
    }
}

/// A navigable, read-only view of a [`GroupNode`] paired with the body
/// buffer its field values borrow from (§2 point 4: "a navigable,
/// zero-copy tree of group nodes with fast tag lookup").
#[derive(Clone, Copy)]
pub struct Node<'a> {
    node: &'a GroupNode,
    body: &'a [u8],
}

impl<'a> Node<'a> {
    pub(crate) fn new(node: &'a GroupNode, body: &'a [u8]) -> Self {
        Node { node, body }
    }

    pub fn size(&self) -> usize {
        self.node.size()
    }

    /// The following repetition of the same group, if any.
    pub fn next(&self) -> Option<Node<'a>> {
        self.node.next().map(|n| Node::new(n, self.body))
    }

    /// Looks up a tag directly in this node (not in sibling
    /// repetitions or descendants).
    pub fn get(&self, tag: Tag) -> Option<crate::field::Field<'a>> {
        self.node
            .find(tag)
            .map(|slot| crate::field::Field::new(slot.tag, self.body, &slot.data))
    }

    /// Iterates every field stored directly in this node, in
    /// hash-table order (§5 Ordering: non-group fields are not in wire
    /// order).
    pub fn iter(&self) -> impl Iterator<Item = crate::field::Field<'a>> + 'a {
        let body = self.body;
        self.node
            .occupied()
            .map(move |slot| crate::field::Field::new(slot.tag, body, &slot.data))
    }

    pub fn get_as_integer(&self, tag: Tag) -> Option<i64> {
        self.get(tag)?.as_integer()
    }

    pub fn get_as_decimal(&self, tag: Tag) -> Option<(i64, u32)> {
        self.get(tag)?.as_decimal()
    }

    pub fn get_as_double(&self, tag: Tag) -> Option<f64> {
        self.get(tag)?.as_double()
    }

    pub fn get_as_bool(&self, tag: Tag) -> Option<bool> {
        self.get(tag)?.as_bool()
    }

    pub fn get_as_str(&self, tag: Tag) -> Option<&'a str> {
        self.get(tag)?.as_str()
    }

    pub fn get_group(&self, tag: Tag) -> Option<Node<'a>> {
        self.get(tag)?.group()
    }
}
