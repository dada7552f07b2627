//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filing_core::types::FolderId;

/// A folder in the hierarchy.
///
/// `parent_id` is a non-owning back-reference; ownership flows from parent
/// to child through `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Parent folder ID (`None` for root folders).
    pub parent_id: Option<FolderId>,
    /// Direct children, in insertion order.
    pub children: Vec<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Build a fresh folder with a new id and the current time.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            parent_id,
            children: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this folder has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Position of `child` among this folder's children.
    pub fn child_position(&self, child: FolderId) -> Option<usize> {
        self.children.iter().position(|id| *id == child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_root_folder() {
        let folder = Folder::new("Documents", None);
        assert!(folder.is_root());
        assert!(folder.is_leaf());
        assert!(folder.updated_at.is_none());
    }

    #[test]
    fn test_child_position() {
        let mut parent = Folder::new("Documents", None);
        let a = FolderId::new();
        let b = FolderId::new();
        parent.children.extend([a, b]);
        assert_eq!(parent.child_position(b), Some(1));
        assert_eq!(parent.child_position(FolderId::new()), None);
    }
}
