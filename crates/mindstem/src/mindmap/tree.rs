//! Mind map tree
//!
//! A fixed three-tier tree: one root, level-1 branches under the root, and
//! level-2 leaves under each branch. Trees are built once by the parser and
//! never mutated afterwards.

use serde::Serialize;
use std::fmt;

/// Depth of a node in the three-tier tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLevel {
    Root,
    Branch,
    Leaf,
}

impl NodeLevel {
    /// Numeric depth: 0, 1 or 2
    pub fn depth(&self) -> u8 {
        match self {
            NodeLevel::Root => 0,
            NodeLevel::Branch => 1,
            NodeLevel::Leaf => 2,
        }
    }
}

/// Stable identifier derived from a node's level and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Root,
    Branch(usize),
    Leaf(usize, usize),
}

impl NodeId {
    pub fn level(&self) -> NodeLevel {
        match self {
            NodeId::Root => NodeLevel::Root,
            NodeId::Branch(_) => NodeLevel::Branch,
            NodeId::Leaf(_, _) => NodeLevel::Leaf,
        }
    }

    /// Index of the level-1 column this node belongs to
    pub fn branch_index(&self) -> Option<usize> {
        match self {
            NodeId::Root => None,
            NodeId::Branch(i) | NodeId::Leaf(i, _) => Some(*i),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Root => write!(f, "root"),
            NodeId::Branch(i) => write!(f, "l1-{}", i),
            NodeId::Leaf(i, j) => write!(f, "l1-{}-l2-{}", i, j),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One node of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: NodeId,
    /// Label with escape sequences already turned into line breaks
    text: String,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(id: NodeId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn level(&self) -> NodeLevel {
        self.id.level()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Label split at its line breaks
    pub fn lines(&self) -> Vec<&str> {
        crate::core::label_lines(&self.text)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A parsed mind map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MindMap {
    root: Node,
}

impl MindMap {
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Level-1 nodes in display order
    pub fn branches(&self) -> &[Node] {
        &self.root.children
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.branches().iter().map(|b| b.children.len()).sum()
    }

    /// Look a node up by its identifier
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        match id {
            NodeId::Root => Some(&self.root),
            NodeId::Branch(i) => self.root.children.get(i),
            NodeId::Leaf(i, j) => self.root.children.get(i)?.children.get(j),
        }
    }

    /// Pre-order traversal: root, then each branch followed by its leaves
    pub fn walk(&self) -> impl Iterator<Item = &Node> + '_ {
        std::iter::once(&self.root).chain(
            self.root
                .children
                .iter()
                .flat_map(|branch| std::iter::once(branch).chain(branch.children.iter())),
        )
    }
}

/// Incremental builder used by the parser.
///
/// Ids are assigned here from insertion order, which keeps them in sync with
/// display order.
#[derive(Debug)]
pub(crate) struct MindMapBuilder {
    root: Node,
}

impl MindMapBuilder {
    pub(crate) fn new(root_text: impl Into<String>) -> Self {
        Self {
            root: Node::new(NodeId::Root, root_text),
        }
    }

    pub(crate) fn push_branch(&mut self, text: impl Into<String>) -> NodeId {
        let id = NodeId::Branch(self.root.children.len());
        self.root.children.push(Node::new(id, text));
        id
    }

    /// Attach a leaf to the most recent branch. Returns `None` when there is
    /// no branch yet.
    pub(crate) fn push_leaf(&mut self, text: impl Into<String>) -> Option<NodeId> {
        let branch_index = self.root.children.len().checked_sub(1)?;
        let branch = &mut self.root.children[branch_index];
        let id = NodeId::Leaf(branch_index, branch.children.len());
        branch.children.push(Node::new(id, text));
        Some(id)
    }

    pub(crate) fn finish(self) -> MindMap {
        MindMap { root: self.root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MindMap {
        let mut builder = MindMapBuilder::new("Root");
        builder.push_branch("A");
        builder.push_leaf("A1");
        builder.push_leaf("A2");
        builder.push_branch("B");
        builder.finish()
    }

    #[test]
    fn test_ids_follow_positions() {
        let map = sample();
        assert_eq!(map.branches()[0].id(), NodeId::Branch(0));
        assert_eq!(map.branches()[0].children()[1].id(), NodeId::Leaf(0, 1));
        assert_eq!(map.branches()[1].id().to_string(), "l1-1");
        assert_eq!(NodeId::Leaf(2, 3).to_string(), "l1-2-l2-3");
    }

    #[test]
    fn test_leaf_without_branch_is_rejected() {
        let mut builder = MindMapBuilder::new("Root");
        assert_eq!(builder.push_leaf("orphan"), None);
        assert_eq!(builder.finish().node_count(), 1);
    }

    #[test]
    fn test_walk_is_preorder() {
        let map = sample();
        let texts: Vec<&str> = map.walk().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["Root", "A", "A1", "A2", "B"]);
    }

    #[test]
    fn test_find_and_counts() {
        let map = sample();
        assert_eq!(map.find(NodeId::Leaf(0, 1)).map(Node::text), Some("A2"));
        assert!(map.find(NodeId::Leaf(1, 0)).is_none());
        assert_eq!(map.node_count(), 5);
        assert_eq!(map.leaf_count(), 2);
    }

    #[test]
    fn test_levels() {
        let map = sample();
        let depths: Vec<u8> = map.walk().map(|n| n.level().depth()).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1]);
    }
}
