//! Folder hierarchy behaviour switches.

use serde::{Deserialize, Serialize};

/// Rules applied by the folder hierarchy manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Re-check sibling name uniqueness on rename and move.
    ///
    /// Creation always checks. Turning this off restores the legacy
    /// behaviour where rename and move accept colliding names.
    #[serde(default = "default_true")]
    pub strict_sibling_names: bool,
}

impl HierarchyConfig {
    /// Configuration that only validates names on creation.
    pub fn legacy() -> Self {
        Self {
            strict_sibling_names: false,
        }
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            strict_sibling_names: true,
        }
    }
}

fn default_true() -> bool {
    true
}
