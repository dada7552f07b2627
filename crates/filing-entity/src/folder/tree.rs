//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use filing_core::types::FolderId;

/// A node in a folder tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Depth level (0 for root folders).
    pub depth: u32,
    /// Number of direct child folders.
    pub child_count: u64,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folders in this subtree, including this node.
    pub fn subtree_size(&self) -> u64 {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FolderNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A snapshot of the whole forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the forest.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the forest.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Build a tree from root nodes, counting every folder.
    pub fn from_roots(roots: Vec<FolderNode>) -> Self {
        let total_folders = roots.iter().map(FolderNode::subtree_size).sum();
        Self {
            roots,
            total_folders,
        }
    }

    /// Find a root node by name.
    pub fn root(&self, name: &str) -> Option<&FolderNode> {
        self.roots.iter().find(|r| r.name == name)
    }
}
