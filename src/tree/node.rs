use serde::{Deserialize, Serialize};

/// One level of a path hierarchy, shaped for a tree select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Fully assembled path up to and including this node
    pub key: String,
    /// Selection value, always equal to `key`
    pub value: String,
    /// Display label (last path segment unless overridden by an entry label)
    pub title: String,
    /// Child nodes in the order chosen by the builder
    #[serde(default)]
    pub children: Vec<TreeNode>,
    /// Set to `Some(true)` when the builder marks nodes selectable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
}

impl TreeNode {
    /// Create a childless node whose title defaults to `segment`
    pub fn new(path: impl Into<String>, segment: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            key: path.clone(),
            value: path,
            title: segment.into(),
            children: Vec::new(),
            selectable: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// This node's value followed by every value beneath it, pre-order
    pub fn descendant_values(&self) -> Vec<&str> {
        let mut values = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            values.push(node.value.as_str());
            stack.extend(node.children.iter().rev());
        }
        values
    }

    /// Sort children by value at every level below this node
    pub(crate) fn sort_children(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.children.sort_by(|a, b| a.value.cmp(&b.value));
            stack.extend(node.children.iter_mut());
        }
    }
}

impl Drop for TreeNode {
    // Detach descendants onto a heap stack so a deep chain does not drop recursively
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> TreeNode {
        let mut root = TreeNode::new("a", "a");
        let mut b = TreeNode::new("a/b", "b");
        b.children.push(TreeNode::new("a/b/c", "c"));
        root.children.push(b);
        root.children.push(TreeNode::new("a/d", "d"));
        root
    }

    #[test]
    fn test_node_creation() {
        let node = TreeNode::new("a/b", "b");
        assert_eq!(node.key, "a/b");
        assert_eq!(node.value, "a/b");
        assert_eq!(node.title, "b");
        assert!(node.is_leaf());
        assert_eq!(node.selectable, None);
    }

    #[test]
    fn test_descendant_values_are_pre_order() {
        assert_eq!(chain().descendant_values(), vec!["a", "a/b", "a/b/c", "a/d"]);
    }

    #[test]
    fn test_sort_children_recurses() {
        let mut root = TreeNode::new("x", "x");
        let mut z = TreeNode::new("x/z", "z");
        z.children.push(TreeNode::new("x/z/2", "2"));
        z.children.push(TreeNode::new("x/z/1", "1"));
        root.children.push(z);
        root.children.push(TreeNode::new("x/a", "a"));

        root.sort_children();

        assert_eq!(root.children[0].value, "x/a");
        assert_eq!(root.children[1].children[0].value, "x/z/1");
    }

    #[test]
    fn test_serialization_omits_unset_selectable() {
        let json = serde_json::to_value(TreeNode::new("a", "a")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "a", "value": "a", "title": "a", "children": []})
        );

        let mut node = TreeNode::new("a", "a");
        node.selectable = Some(true);
        let json = serde_json::to_value(node).unwrap();
        assert_eq!(json["selectable"], serde_json::json!(true));
    }
}
