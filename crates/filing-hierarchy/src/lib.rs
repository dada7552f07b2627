//! # filing-hierarchy
//!
//! The folder hierarchy manager. [`FilingSystem`] owns a forest of folders
//! in an arena keyed by [`FolderId`](filing_core::types::FolderId) and keeps
//! the tree invariants intact across create, rename, move and delete.
//! [`FolderService`] shares one forest between tasks behind a single lock.

pub mod error;
pub mod forest;
pub mod service;

pub use error::HierarchyError;
pub use forest::FilingSystem;
pub use service::FolderService;
