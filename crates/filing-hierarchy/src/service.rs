//! Shared folder service.
//!
//! Wraps one [`FilingSystem`] in a single `RwLock` so the whole forest is
//! guarded by one lock. A move touches two subtrees at once; with one lock
//! there is no lock ordering to get wrong.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use filing_core::config::HierarchyConfig;
use filing_core::error::AppError;
use filing_core::types::FolderId;
use filing_entity::folder::{Folder, FolderTree};

use crate::forest::FilingSystem;

/// Folder operations over a shared forest.
///
/// Cloning the service yields another handle to the same forest.
#[derive(Debug, Clone, Default)]
pub struct FolderService {
    /// The guarded forest.
    forest: Arc<RwLock<FilingSystem>>,
}

impl FolderService {
    /// Creates a service over a new, empty forest.
    pub fn new(config: HierarchyConfig) -> Self {
        Self::from_system(FilingSystem::with_config(config))
    }

    /// Creates a service over an existing forest.
    pub fn from_system(forest: FilingSystem) -> Self {
        Self {
            forest: Arc::new(RwLock::new(forest)),
        }
    }

    /// Lists root folders.
    pub async fn list_root_folders(&self) -> Vec<Folder> {
        self.forest.read().await.root_folders()
    }

    /// Lists the direct children of a folder.
    pub async fn list_children(&self, folder_id: FolderId) -> Result<Vec<Folder>, AppError> {
        Ok(self.forest.read().await.subfolders(folder_id)?)
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, folder_id: FolderId) -> Result<Folder, AppError> {
        Ok(self.forest.read().await.get(folder_id)?)
    }

    /// Creates a root folder, or a subfolder when `parent_id` is set.
    pub async fn create_folder(
        &self,
        parent_id: Option<FolderId>,
        name: &str,
    ) -> Result<Folder, AppError> {
        let mut forest = self.forest.write().await;
        let folder = match parent_id {
            None => forest.create_root(name)?,
            Some(parent) => forest.create_subfolder(parent, name)?,
        };

        info!(
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        folder_id: FolderId,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        let folder = self.forest.write().await.rename(folder_id, new_name)?;

        info!(folder_id = %folder_id, new_name = %new_name, "Folder renamed");

        Ok(folder)
    }

    /// Moves a folder under a new parent.
    pub async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: FolderId,
    ) -> Result<Folder, AppError> {
        let folder = self
            .forest
            .write()
            .await
            .move_folder(folder_id, new_parent_id)?;

        info!(folder_id = %folder_id, new_parent = %new_parent_id, "Folder moved");

        Ok(folder)
    }

    /// Deletes a folder and all its contents, returning the removed folders
    /// in level order.
    pub async fn delete_folder(&self, folder_id: FolderId) -> Result<Vec<Folder>, AppError> {
        let removed = self.forest.write().await.delete(folder_id)?;

        info!(
            folder_id = %folder_id,
            removed = removed.len(),
            "Folder deleted"
        );

        Ok(removed)
    }

    /// Returns a nested snapshot of the whole forest.
    pub async fn get_tree(&self) -> FolderTree {
        self.forest.read().await.tree()
    }

    /// Resolves a `/`-separated path to a folder.
    pub async fn resolve_path(&self, path: &str) -> Option<Folder> {
        self.forest.read().await.resolve_path(path)
    }

    /// Gets the breadcrumb trail from the root to the given folder.
    pub async fn get_breadcrumbs(&self, folder_id: FolderId) -> Result<Vec<Folder>, AppError> {
        Ok(self.forest.read().await.breadcrumbs(folder_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filing_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_and_list() {
        let service = FolderService::new(HierarchyConfig::default());
        let docs = service.create_folder(None, "Documents").await.unwrap();
        service
            .create_folder(Some(docs.id), "Photos")
            .await
            .unwrap();

        assert_eq!(service.list_root_folders().await.len(), 1);
        let children = service.list_children(docs.id).await.unwrap();
        assert_eq!(children[0].name, "Photos");
    }

    #[tokio::test]
    async fn test_errors_surface_as_app_errors() {
        let service = FolderService::default();
        service.create_folder(None, "Documents").await.unwrap();

        let err = service
            .create_folder(None, "Documents")
            .await
            .expect_err("duplicate root");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = service
            .create_folder(None, "")
            .await
            .expect_err("empty name");
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .get_folder(FolderId::new())
            .await
            .expect_err("unknown id");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_clones_share_one_forest() {
        let service = FolderService::default();
        let other = service.clone();
        let docs_id = service.create_folder(None, "Documents").await.unwrap().id;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let svc = other.clone();
                tokio::spawn(async move {
                    svc.create_folder(Some(docs_id), &format!("child-{i}")).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.list_children(docs_id).await.unwrap().len(), 8);
        assert_eq!(service.get_tree().await.total_folders, 9);
    }

    #[tokio::test]
    async fn test_cyclic_move_rejected() {
        let service = FolderService::default();
        let a = service.create_folder(None, "A").await.unwrap();
        let x = service.create_folder(Some(a.id), "X").await.unwrap();

        let err = service.move_folder(a.id, x.id).await.expect_err("cycle");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(service.get_folder(a.id).await.unwrap().is_root());
    }

    #[tokio::test]
    async fn test_delete_and_breadcrumbs() {
        let service = FolderService::default();
        let docs = service.create_folder(None, "Documents").await.unwrap();
        let photos = service
            .create_folder(Some(docs.id), "Photos")
            .await
            .unwrap();

        let crumbs = service.get_breadcrumbs(photos.id).await.unwrap();
        assert_eq!(crumbs.len(), 2);
        assert_eq!(
            service
                .resolve_path("/Documents/Photos")
                .await
                .map(|f| f.id),
            Some(photos.id)
        );

        let removed = service.delete_folder(docs.id).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(service.list_root_folders().await.is_empty());
    }
}
