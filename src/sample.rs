//! Sample data used by the CLI to show off both renderings.

use tracing::{debug, instrument};

use crate::domain::{DomainResult, Item, OrderedList, Tree};

/// Builds a three-level tree below "root" with `fan_out` children per node.
#[instrument(level = "debug")]
pub fn sample_tree(fan_out: usize, print_prefix: bool) -> DomainResult<Tree<String>> {
    let mut tree = Tree::with_print_prefix("root".to_string(), print_prefix);
    let root = tree.root();

    for i in 1..=fan_out {
        let child = tree.new_node(format!("child-{i}"));
        tree.add_children(root, [child])?;

        for j in 1..=fan_out {
            let grand_child = tree.add_child(child, format!("grand-child-{i}-{j}"))?;

            let great: Vec<_> = (1..=fan_out)
                .map(|k| tree.new_node(format!("grand-grand child-{i}-{j}-{k}")))
                .collect();
            tree.add_children(grand_child, great)?;
        }
    }

    debug!(nodes = tree.len(), depth = tree.depth(), "sample tree built");
    Ok(tree)
}

/// One rendered step of the list walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStep {
    pub heading: &'static str,
    pub rendered: String,
}

/// Replays the list walkthrough: fill, insert in the middle without a
/// prefix, then remove it again under a different prefix.
#[instrument(level = "debug")]
pub fn list_walkthrough(prefix: Option<char>) -> DomainResult<Vec<ListStep>> {
    let mut list = OrderedList::new(prefix);
    for value in 1..=9 {
        list.push_back(Item::new(value))?;
    }
    list.push_front(Item::new(0))?;

    let mut steps = vec![ListStep {
        heading: "## Initial with Prefix",
        rendered: list.format(),
    }];

    list.push_at(Item::new(10), 5)?;
    list.set_prefix(None);
    steps.push(ListStep {
        heading: "## Added 10 && without prefix",
        rendered: list.format(),
    });

    list.pop_at(5);
    list.set_prefix('-');
    steps.push(ListStep {
        heading: "## removed 10 && with prefix",
        rendered: list.format(),
    });

    Ok(steps)
}
