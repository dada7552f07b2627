//! Error taxonomy for folder hierarchy operations.
//!
//! Every variant is a caller precondition violation. None of them is
//! retryable, and an operation that returns one has not mutated the forest.

use filing_core::error::AppError;
use filing_core::types::FolderId;
use thiserror::Error;

/// Errors produced by [`FilingSystem`](crate::FilingSystem) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The supplied folder name is the empty string.
    #[error("folder name required")]
    EmptyName,

    /// The supplied name contains the path separator `/`.
    #[error("folder name '{name}' must not contain '/'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A sibling already carries the supplied name.
    #[error("a folder named '{name}' already exists at this level")]
    DuplicateName {
        /// The colliding name.
        name: String,
    },

    /// The move target is the folder itself or one of its descendants.
    #[error("cannot move folder {folder} into {destination}, which is inside its own subtree")]
    CyclicMove {
        /// The folder being moved.
        folder: FolderId,
        /// The rejected destination.
        destination: FolderId,
    },

    /// The id does not name a live folder (never created, or deleted).
    #[error("folder {0} not found")]
    NotFound(FolderId),
}

impl From<HierarchyError> for AppError {
    fn from(err: HierarchyError) -> Self {
        match &err {
            HierarchyError::EmptyName
            | HierarchyError::InvalidName { .. }
            | HierarchyError::CyclicMove { .. } => {
                AppError::validation(err.to_string())
            }
            HierarchyError::DuplicateName { .. } => AppError::conflict(err.to_string()),
            HierarchyError::NotFound(_) => AppError::not_found(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filing_core::error::ErrorKind;

    #[test]
    fn test_maps_to_app_error_kinds() {
        let id = FolderId::new();
        let cases = [
            (HierarchyError::EmptyName, ErrorKind::Validation),
            (
                HierarchyError::InvalidName {
                    name: "a/b".to_string(),
                },
                ErrorKind::Validation,
            ),
            (
                HierarchyError::DuplicateName {
                    name: "Docs".to_string(),
                },
                ErrorKind::Conflict,
            ),
            (
                HierarchyError::CyclicMove {
                    folder: id,
                    destination: id,
                },
                ErrorKind::Validation,
            ),
            (HierarchyError::NotFound(id), ErrorKind::NotFound),
        ];

        for (err, kind) in cases {
            let app: AppError = err.into();
            assert_eq!(app.kind, kind);
            assert!(app.is_caller_error());
        }
    }

    #[test]
    fn test_duplicate_message_names_folder() {
        let err = HierarchyError::DuplicateName {
            name: "Photos".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "a folder named 'Photos' already exists at this level"
        );
    }
}
