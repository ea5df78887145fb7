/*
Bridge to the `termtree` crate, for callers that already print trees with it.
termtree draws its own glyphs and line endings; the output is not the
gormat rendering format.
 */
use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::{NodeId, Tree};
use crate::format::clean;

pub trait ToTermTree {
    fn to_term_tree(&self) -> TermTree<String>;
}

impl<T: Display> ToTermTree for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_term_tree(&self) -> TermTree<String> {
        fn build<T: Display>(tree: &Tree<T>, idx: NodeId) -> TermTree<String> {
            let label = tree
                .value(idx)
                .map(|v| clean(&v.to_string()))
                .unwrap_or_default();
            let leaves: Vec<_> = tree
                .children(idx)
                .unwrap_or_default()
                .iter()
                .map(|&child| build(tree, child))
                .collect();
            TermTree::new(label).with_leaves(leaves)
        }

        build(self, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_term_tree_keeps_structure() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let a = tree.add_child(root, "a").unwrap();
        tree.add_child(a, " a1\t").unwrap();
        tree.add_child(root, "b").unwrap();

        let term = tree.to_term_tree();
        assert_eq!(term.root, "root");
        assert_eq!(term.leaves.len(), 2);
        assert_eq!(term.leaves[0].leaves[0].root, "a1");
        assert!(term.to_string().contains("a1"));
    }
}
