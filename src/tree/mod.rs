pub mod builder;
pub mod delimiter;
pub mod entry;
pub mod node;

pub use builder::{build, EmptyPathPolicy, OrderingPolicy, PathTreeBuilder};
pub use delimiter::{detect_delimiter, Delimiter};
pub use entry::{entries_from_json, entries_from_rows, parse_entries, EntryValue, TreeEntry};
pub use node::TreeNode;

use serde::Serialize;

/// Root nodes of a built tree, with lookup and traversal helpers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTree {
    roots: Vec<TreeNode>,
}

impl PathTree {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<TreeNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order depth-first iteration over every node
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// First node (pre-order) whose value equals `value`.
    ///
    /// Values are unique among siblings only. With per-entry delimiter
    /// detection, `"a.b"` and `"a.b/c"` both produce a node valued `"a.b"`: a
    /// child of `a` and a root. Use [`find_all`](Self::find_all) to see both.
    pub fn find(&self, value: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.value == value)
    }

    /// Every node whose value equals `value`, pre-order
    pub fn find_all(&self, value: &str) -> Vec<&TreeNode> {
        self.iter().filter(|node| node.value == value).collect()
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Values of all leaf nodes, pre-order
    pub fn leaf_values(&self) -> Vec<&str> {
        self.iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.value.as_str())
            .collect()
    }

    /// Render titles as an indented outline, two spaces per level
    pub fn render_indented(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(&TreeNode, usize)> = self.roots.iter().rev().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&node.title);
            out.push('\n');
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        out
    }
}

impl From<Vec<TreeNode>> for PathTree {
    fn from(roots: Vec<TreeNode>) -> Self {
        Self::new(roots)
    }
}

/// Iterator returned by [`PathTree::iter`]
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a PathTree {
    type Item = &'a TreeNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
