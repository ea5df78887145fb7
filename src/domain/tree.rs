use generational_arena::{Arena, Index};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::format::{clean, Glyph, NEW_LINE};

static NEXT_TREE_TAG: AtomicU64 = AtomicU64::new(0);

/// Handle to a node stored in a [`Tree`].
///
/// Carries the tag of the tree that issued it. A handle from another tree,
/// or one whose node no longer exists, reads as absent and is rejected by
/// mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    /// Parent in the arena, None for roots and detached nodes
    parent: Option<NodeId>,
    /// Children in the arena, in render order
    children: Vec<NodeId>,
    /// Draw branch glyphs for this node
    print_prefix: bool,
}

impl<T> Node<T> {
    fn new(value: T, print_prefix: bool) -> Self {
        Self {
            value,
            parent: None,
            children: Vec::new(),
            print_prefix,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn print_prefix(&self) -> bool {
        self.print_prefix
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based multi-way tree.
///
/// Nodes live in a generational arena and refer to each other by [`NodeId`].
/// The parent link is a plain index, so ownership flows only from the arena
/// to the nodes. Nodes made with [`Tree::new_node`] stay detached until they
/// are attached with [`Tree::add_children`].
#[derive(Debug)]
pub struct Tree<T> {
    /// Stamped into every NodeId this tree issues
    tag: u64,
    arena: Arena<Node<T>>,
    root: NodeId,
}

impl<T> Tree<T> {
    /// Creates a tree whose root draws branch glyphs.
    pub fn new(value: T) -> Self {
        Self::with_print_prefix(value, true)
    }

    pub fn with_print_prefix(value: T, print_prefix: bool) -> Self {
        let tag = NEXT_TREE_TAG.fetch_add(1, Ordering::Relaxed);
        let mut arena = Arena::new();
        let root = NodeId {
            tree: tag,
            index: arena.insert(Node::new(value, print_prefix)),
        };
        Self { tag, arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached node. Its print-prefix flag is replaced by the
    /// parent's when it gets attached.
    #[instrument(level = "trace", skip_all)]
    pub fn new_node(&mut self, value: T) -> NodeId {
        NodeId {
            tree: self.tag,
            index: self.arena.insert(Node::new(value, true)),
        }
    }

    /// Creates a node and attaches it as the last child of `parent`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn add_child(&mut self, parent: NodeId, value: T) -> DomainResult<NodeId> {
        self.require(parent)?;
        let child = self.new_node(value);
        self.attach(parent, child);
        Ok(child)
    }

    /// Attaches existing nodes to `parent`, appended in iteration order.
    ///
    /// Each child takes `parent` as its parent and copies the parent's
    /// current print-prefix flag. Every child is checked before any is
    /// attached; on error the tree is left as it was.
    #[instrument(level = "trace", skip(self, children))]
    pub fn add_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> DomainResult<()> {
        self.require(parent)?;
        let children: Vec<NodeId> = children.into_iter().collect();

        let mut seen = HashSet::with_capacity(children.len());
        for &child in &children {
            let node = self.require(child)?;
            if child == self.root {
                return Err(rejected("the tree root cannot become a child".to_string()));
            }
            if node.parent.is_some() {
                return Err(rejected(format!("node {:?} already has a parent", child)));
            }
            if !seen.insert(child) {
                return Err(rejected(format!("node {:?} given twice", child)));
            }
            if self.ancestors(parent).any(|id| id == child) {
                return Err(rejected(format!(
                    "attaching {:?} under {:?} would create a cycle",
                    child, parent
                )));
            }
        }

        for child in children {
            self.attach(parent, child);
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let print_prefix = match self.node_mut(parent) {
            Some(node) => {
                node.children.push(child);
                node.print_prefix
            }
            None => return,
        };
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
            node.print_prefix = print_prefix;
        }
    }

    fn require(&self, id: NodeId) -> DomainResult<&Node<T>> {
        self.node(id)
            .ok_or_else(|| rejected(format!("node {:?} does not belong to this tree", id)))
    }

    /// `None` for ids issued by another tree or for removed nodes.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        if id.tree != self.tag {
            return None;
        }
        self.arena.get(id.index)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.tree != self.tag {
            return None;
        }
        self.arena.get_mut(id.index)
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(Node::value)
    }

    pub fn set_value(&mut self, id: NodeId, value: T) -> DomainResult<()> {
        self.require(id)?;
        if let Some(node) = self.node_mut(id) {
            node.value = value;
        }
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).map(Node::children)
    }

    pub fn is_root(&self, id: NodeId) -> Option<bool> {
        self.node(id).map(Node::is_root)
    }

    pub fn is_leaf(&self, id: NodeId) -> Option<bool> {
        self.node(id).map(Node::is_leaf)
    }

    /// 1-based depth of `id`, computed by walking the parent links.
    pub fn level(&self, id: NodeId) -> Option<usize> {
        let node = self.node(id)?;
        match node.parent {
            None => Some(1),
            Some(parent) => self.level(parent).map(|level| level + 1),
        }
    }

    pub fn print_prefix(&self, id: NodeId) -> Option<bool> {
        self.node(id).map(Node::print_prefix)
    }

    /// Sets the flag on `id` and overwrites it on every descendant.
    #[instrument(level = "trace", skip(self))]
    pub fn set_print_prefix(&mut self, id: NodeId, print_prefix: bool) -> DomainResult<()> {
        self.require(id)?;
        let subtree: Vec<NodeId> = self.iter_from(id).map(|(id, _)| id).collect();
        debug!(nodes = subtree.len(), print_prefix, "cascading print prefix");
        for id in subtree {
            if let Some(node) = self.node_mut(id) {
                node.print_prefix = print_prefix;
            }
        }
        Ok(())
    }

    /// Height of the tree below the root; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        match self.node(id) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        self.iter_from(self.root)
    }

    /// Pre-order traversal of the subtree at `id`.
    pub fn iter_from(&self, id: NodeId) -> TreeIterator<'_, T> {
        TreeIterator::new(self, id)
    }

    fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }
}

fn rejected(message: String) -> DomainError {
    debug!("rejected attach: {}", message);
    DomainError::invalid(message)
}

impl<T: fmt::Display> Tree<T> {
    /// Renders the whole tree from the root.
    pub fn format(&self) -> String {
        let mut buffer = String::new();
        self.format_helper(&mut buffer, self.root, "", true);
        buffer
    }

    /// Renders the subtree at `id`. A non-root start is drawn as a last child
    /// with no ancestor prefix.
    pub fn format_from(&self, id: NodeId) -> Option<String> {
        self.node(id)?;
        let mut buffer = String::new();
        self.format_helper(&mut buffer, id, "", true);
        Some(buffer)
    }

    fn format_helper(&self, buffer: &mut String, id: NodeId, prefix: &str, is_last: bool) {
        let Some(node) = self.node(id) else {
            return;
        };
        let value = clean(&node.value.to_string());

        if node.is_root() {
            buffer.push_str(&value);
        } else {
            let branch = match (node.print_prefix, is_last) {
                (false, _) => Glyph::Space,
                (true, true) => Glyph::LastBranch,
                (true, false) => Glyph::Branch,
            };
            buffer.push_str(prefix);
            buffer.push_str(branch.as_str());
            buffer.push_str(&value);
        }
        buffer.push_str(NEW_LINE);

        let mut child_prefix = prefix.to_string();
        if !node.is_root() {
            if is_last || !node.print_prefix {
                child_prefix.push_str(Glyph::Space.as_str());
            } else {
                child_prefix.push_str(Glyph::Pipe.as_str());
            }
        }

        let count = node.children.len();
        for (i, &child) in node.children.iter().enumerate() {
            self.format_helper(buffer, child, &child_prefix, i + 1 == count);
        }
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.node(start).is_some() {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev().copied());
                return Some((current, node));
            }
        }
        None
    }
}

/// Walks from a node up to its root, the node itself first.
struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(print_prefix: bool) -> (Tree<&'static str>, NodeId, NodeId, NodeId) {
        let mut tree = Tree::with_print_prefix("root", print_prefix);
        let root = tree.root();
        let child1 = tree.add_child(root, "child1").unwrap();
        let child2 = tree.add_child(root, "child2").unwrap();
        let grand_child = tree.add_child(child1, "grandChild").unwrap();
        (tree, child1, child2, grand_child)
    }

    #[test]
    fn test_format_without_prefix() {
        let (tree, ..) = sample(false);
        assert_eq!(
            tree.format(),
            "root\n\r   child1\n\r      grandChild\n\r   child2\n\r"
        );
    }

    #[test]
    fn test_format_with_prefix() {
        let (tree, ..) = sample(true);
        assert_eq!(
            tree.format(),
            "root\n\r├─ child1\n\r│  └─ grandChild\n\r└─ child2\n\r"
        );
    }

    #[test]
    fn test_level_walks_parents() {
        let (tree, child1, _, grand_child) = sample(true);
        assert_eq!(tree.level(tree.root()), Some(1));
        assert_eq!(tree.level(child1), Some(2));
        assert_eq!(tree.level(grand_child), Some(3));
    }

    #[test]
    fn test_iter_is_preorder() {
        let (tree, ..) = sample(true);
        let values: Vec<_> = tree.iter().map(|(_, n)| *n.value()).collect();
        assert_eq!(values, ["root", "child1", "grandChild", "child2"]);
    }

    #[test]
    fn test_ids_from_another_tree_are_absent() {
        let (mut tree, ..) = sample(true);
        let other = Tree::new("other");
        assert_eq!(tree.root().index, other.root().index);
        assert!(tree.node(other.root()).is_none());
        assert!(tree.node_mut(other.root()).is_none());
        assert!(tree.require(other.root()).is_err());
    }

    #[test]
    fn test_ancestors_start_at_node() {
        let (tree, child1, _, grand_child) = sample(true);
        let path: Vec<_> = tree.ancestors(grand_child).collect();
        assert_eq!(path, [grand_child, child1, tree.root()]);
    }
}
