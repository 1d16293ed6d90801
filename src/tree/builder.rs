//! Path tree construction
//!
//! Entries are folded into a tree one at a time. Every prefix of an entry's
//! path becomes a node under the node of the previous prefix, and a prefix that
//! already exists under that parent is reused rather than duplicated. The
//! result is rebuilt from scratch on each call; nothing is cached between
//! builds.

use super::delimiter::{detect_delimiter, Delimiter};
use super::entry::TreeEntry;
use super::node::TreeNode;
use super::PathTree;
use crate::config::BuilderConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How children are ordered under each parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Order in which each prefix was first encountered
    #[default]
    InsertionOrder,
    /// Lexicographic by node value, applied at every level
    Sorted,
}

/// What to do with a non-blank raw path that has no segments, such as `"//"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPathPolicy {
    /// Drop the entry
    #[default]
    Skip,
    /// Emit a single root node keyed by the whole trimmed string
    DegenerateRoot,
}

/// Flat node storage used while building.
///
/// Nodes refer to their children by index, so neither construction nor
/// teardown recurses with path depth. A child is always pushed after its
/// parent, which lets [`Arena::into_roots`] assemble the nested tree in one
/// reverse pass.
#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    roots: Children,
}

/// Child indices under one parent, with a lookup by assembled path
#[derive(Default)]
struct Children {
    order: Vec<usize>,
    index: HashMap<String, usize>,
}

struct Slot {
    path: String,
    title: String,
    children: Children,
}

impl Arena {
    /// Index of the node for `path` under `parent` (`None` for the roots),
    /// created with `segment` as its title when missing
    fn get_or_insert(&mut self, parent: Option<usize>, path: &str, segment: &str) -> usize {
        let siblings = match parent {
            Some(parent) => &self.slots[parent].children,
            None => &self.roots,
        };
        if let Some(&idx) = siblings.index.get(path) {
            return idx;
        }

        tracing::trace!("creating node {path}");
        let idx = self.slots.len();
        self.slots.push(Slot {
            path: path.to_string(),
            title: segment.to_string(),
            children: Children::default(),
        });
        let siblings = match parent {
            Some(parent) => &mut self.slots[parent].children,
            None => &mut self.roots,
        };
        siblings.order.push(idx);
        siblings.index.insert(path.to_string(), idx);
        idx
    }

    fn into_roots(self, selectable: bool) -> Vec<TreeNode> {
        let mut built: Vec<Option<TreeNode>> = (0..self.slots.len()).map(|_| None).collect();

        // Children have higher indices than their parents, so they are done first
        for (idx, slot) in self.slots.into_iter().enumerate().rev() {
            let mut node = TreeNode::new(slot.path, slot.title);
            node.children = slot
                .children
                .order
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            if selectable {
                node.selectable = Some(true);
            }
            built[idx] = Some(node);
        }

        self.roots
            .order
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}

/// Converts path entries into a tree of [`TreeNode`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTreeBuilder {
    delimiter: Option<Delimiter>,
    ordering: OrderingPolicy,
    empty_paths: EmptyPathPolicy,
    selectable: bool,
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BuilderConfig) -> Self {
        Self {
            delimiter: config.delimiter.resolve(),
            ordering: config.ordering,
            empty_paths: config.empty_paths,
            selectable: config.selectable,
        }
    }

    /// Use one delimiter for the whole batch instead of detecting it per entry
    pub fn delimiter(mut self, delimiter: Option<Delimiter>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn empty_paths(mut self, policy: EmptyPathPolicy) -> Self {
        self.empty_paths = policy;
        self
    }

    /// Mark every node `selectable: true` in the output
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Build the root nodes for `entries`.
    ///
    /// Entries without a usable path are skipped, never reported as errors.
    pub fn build<I, E>(&self, entries: I) -> Vec<TreeNode>
    where
        I: IntoIterator<Item = E>,
        E: Into<TreeEntry>,
    {
        let mut arena = Arena::default();
        let mut accepted = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            let entry = entry.into();
            if self.insert(&mut arena, &entry) {
                accepted += 1;
            } else {
                skipped += 1;
            }
        }

        let mut nodes = arena.into_roots(self.selectable);
        if self.ordering == OrderingPolicy::Sorted {
            nodes.sort_by(|a, b| a.value.cmp(&b.value));
            for node in &mut nodes {
                node.sort_children();
            }
        }

        tracing::debug!(
            accepted,
            skipped,
            roots = nodes.len(),
            ordering = ?self.ordering,
            "built path tree"
        );
        nodes
    }

    /// Like [`build`](Self::build), wrapped in a [`PathTree`] for querying
    pub fn build_tree<I, E>(&self, entries: I) -> PathTree
    where
        I: IntoIterator<Item = E>,
        E: Into<TreeEntry>,
    {
        PathTree::new(self.build(entries))
    }

    /// Fold one entry into `arena`, returning false when it was skipped
    fn insert(&self, arena: &mut Arena, entry: &TreeEntry) -> bool {
        let Some(path) = entry.path() else {
            tracing::debug!(?entry, "skipping entry without a usable path");
            return false;
        };

        let delimiter = self.delimiter.unwrap_or_else(|| detect_delimiter(path));
        let segments = delimiter.segments(path);

        if segments.is_empty() {
            if entry.is_raw() && self.empty_paths == EmptyPathPolicy::DegenerateRoot {
                arena.get_or_insert(None, path, path);
                return true;
            }
            tracing::debug!(path, "skipping path with no segments");
            return false;
        }

        let separator = delimiter.as_char();
        let last = segments.len() - 1;
        let mut assembled = String::with_capacity(path.len());
        let mut parent = None;

        for (depth, segment) in segments.into_iter().enumerate() {
            if depth > 0 {
                assembled.push(separator);
            }
            assembled.push_str(segment);

            let idx = arena.get_or_insert(parent, &assembled, segment);
            if depth == last {
                if let Some(label) = entry.label() {
                    arena.slots[idx].title = label.to_string();
                }
            }
            parent = Some(idx);
        }
        true
    }
}

/// Build with per-entry delimiter detection (or `delimiter` when given) and
/// insertion-ordered children.
pub fn build<I, E>(entries: I, delimiter: Option<Delimiter>) -> Vec<TreeNode>
where
    I: IntoIterator<Item = E>,
    E: Into<TreeEntry>,
{
    PathTreeBuilder::new().delimiter(delimiter).build(entries)
}
