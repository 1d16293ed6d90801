// Path tree library - builds hierarchical select trees from delimited paths

pub mod config;
#[cfg(feature = "runtime")]
pub mod config_io;
pub mod selection;
#[cfg(feature = "runtime")]
pub mod services;
pub mod tree;

pub use selection::{normalize_selection, Selection, SelectionValue};
pub use tree::{
    build, detect_delimiter, Delimiter, EmptyPathPolicy, OrderingPolicy, PathTree,
    PathTreeBuilder, TreeEntry, TreeNode,
};
