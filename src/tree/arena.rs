//! Node types and the arena that owns them

use crate::model::{Digest, Entry};

/// Stable index of a node in a [`NodeArena`]
pub(crate) type NodeId = usize;

/// A node in the merkle tree
///
/// An internal node always has a left child. A node with no right child is a
/// hanging node whose digest passes through from the left child.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Leaf {
        entry: Entry,
        digest: Digest,
    },
    Internal {
        digest: Digest,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl Node {
    pub(crate) fn leaf(entry: Entry, digest: Digest) -> Self {
        Node::Leaf { entry, digest }
    }

    /// A hanging node over `child`, carrying the child's digest
    pub(crate) fn hanging(child: NodeId, digest: Digest) -> Self {
        Node::Internal {
            digest,
            left: child,
            right: None,
        }
    }

    pub(crate) fn digest(&self) -> Digest {
        match self {
            Node::Leaf { digest, .. } | Node::Internal { digest, .. } => *digest,
        }
    }

    pub(crate) fn entry(&self) -> Option<&Entry> {
        match self {
            Node::Leaf { entry, .. } => Some(entry),
            Node::Internal { .. } => None,
        }
    }

    pub(crate) fn left(&self) -> Option<NodeId> {
        match self {
            Node::Internal { left, .. } => Some(*left),
            Node::Leaf { .. } => None,
        }
    }

    pub(crate) fn right(&self) -> Option<NodeId> {
        match self {
            Node::Internal { right, .. } => *right,
            Node::Leaf { .. } => None,
        }
    }
}

/// Dense node storage addressed by [`NodeId`]
///
/// Removed slots go on a free list and are reused by later allocations, so
/// ids held by the tree stay valid until the node itself is removed.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        self.slots
            .get(id)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("dangling node id {id}"))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots
            .get_mut(id)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("dangling node id {id}"))
    }

    pub(crate) fn digest(&self, id: NodeId) -> Digest {
        self.get(id).digest()
    }

    /// Remove a single node, returning it. Its children are left in place.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node {
        let node = self
            .slots
            .get_mut(id)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("double free of node id {id}"));
        self.free.push(id);
        node
    }

    /// Remove a node and everything below it, returning the removed leaves'
    /// entries in left-to-right order.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match self.remove(id) {
                Node::Leaf { entry, .. } => entries.push(entry),
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push(right);
                    }
                    stack.push(left);
                }
            }
        }
        entries
    }

    /// Number of live nodes
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
