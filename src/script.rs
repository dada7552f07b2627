//! Replays a JSON script of folder operations against a folder service.
//!
//! Steps address folders by materialized path (`/Documents/Photos`). A
//! rejected step is logged and recorded; later steps still run.

use serde::{Deserialize, Serialize};
use tracing::warn;

use filing_core::error::AppError;
use filing_entity::folder::Folder;
use filing_hierarchy::FolderService;

/// One scripted folder operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Create a root folder.
    CreateRoot {
        /// Folder name.
        name: String,
    },
    /// Create a folder inside `parent`.
    CreateSubfolder {
        /// Path of the parent folder.
        parent: String,
        /// Folder name.
        name: String,
    },
    /// Rename the folder at `path`.
    Rename {
        /// Path of the folder.
        path: String,
        /// New name.
        name: String,
    },
    /// Move the folder at `path` under `destination`.
    Move {
        /// Path of the folder.
        path: String,
        /// Path of the new parent.
        destination: String,
    },
    /// Delete the folder at `path` with its subtree.
    Delete {
        /// Path of the folder.
        path: String,
    },
}

/// A step that was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// Zero-based index of the step in the script.
    pub index: usize,
    /// The rejection reason.
    pub error: String,
}

/// Outcome of a script run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptReport {
    /// Number of steps applied.
    pub applied: usize,
    /// Steps that were rejected.
    pub failures: Vec<StepFailure>,
}

/// Parses a script from JSON.
pub fn parse(source: &str) -> Result<Vec<Step>, AppError> {
    Ok(serde_json::from_str(source)?)
}

/// Runs every step in order, collecting rejections.
pub async fn run(service: &FolderService, steps: &[Step]) -> ScriptReport {
    let mut report = ScriptReport::default();
    for (index, step) in steps.iter().enumerate() {
        match apply(service, step).await {
            Ok(()) => report.applied += 1,
            Err(e) => {
                warn!(step = index, error = %e, "Script step rejected");
                report.failures.push(StepFailure {
                    index,
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

async fn apply(service: &FolderService, step: &Step) -> Result<(), AppError> {
    match step {
        Step::CreateRoot { name } => {
            service.create_folder(None, name).await?;
        }
        Step::CreateSubfolder { parent, name } => {
            let parent = lookup(service, parent).await?;
            service.create_folder(Some(parent.id), name).await?;
        }
        Step::Rename { path, name } => {
            let folder = lookup(service, path).await?;
            service.rename_folder(folder.id, name).await?;
        }
        Step::Move { path, destination } => {
            let folder = lookup(service, path).await?;
            let destination = lookup(service, destination).await?;
            service.move_folder(folder.id, destination.id).await?;
        }
        Step::Delete { path } => {
            let folder = lookup(service, path).await?;
            service.delete_folder(folder.id).await?;
        }
    }
    Ok(())
}

async fn lookup(service: &FolderService, path: &str) -> Result<Folder, AppError> {
    service
        .resolve_path(path)
        .await
        .ok_or_else(|| AppError::not_found(format!("No folder at path '{path}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        {"op": "create_root", "name": "A"},
        {"op": "create_root", "name": "B"},
        {"op": "create_subfolder", "parent": "/A", "name": "X"},
        {"op": "create_subfolder", "parent": "/A/X", "name": "Y"},
        {"op": "move", "path": "/A", "destination": "/A/X/Y"},
        {"op": "move", "path": "/A/X", "destination": "/B"},
        {"op": "rename", "path": "/B/X", "name": "Z"},
        {"op": "create_root", "name": "A"},
        {"op": "delete", "path": "/A"}
    ]"#;

    #[test]
    fn test_parse_steps() {
        let steps = parse(SCRIPT).expect("valid script");
        assert_eq!(steps.len(), 9);
        assert!(matches!(&steps[2], Step::CreateSubfolder { parent, name } if parent == "/A" && name == "X"));
        assert!(parse(r#"[{"op": "explode"}]"#).is_err());
    }

    #[tokio::test]
    async fn test_run_applies_and_reports() {
        let service = FolderService::default();
        let steps = parse(SCRIPT).expect("valid script");

        let report = run(&service, &steps).await;

        // The cyclic move and the duplicate root are rejected.
        let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, [4, 7]);
        assert_eq!(report.applied, 7);

        let tree = service.get_tree().await;
        assert_eq!(tree.roots.len(), 1);
        let b = tree.root("B").expect("B survives");
        let z = b.child("Z").expect("X moved under B and renamed");
        assert_eq!(z.child("Y").map(|y| y.depth), Some(2));
    }

    #[tokio::test]
    async fn test_slash_in_name_cannot_shadow_a_path() {
        let service = FolderService::default();
        let steps = parse(
            r#"[
                {"op": "create_root", "name": "a/b"},
                {"op": "create_root", "name": "a"},
                {"op": "create_subfolder", "parent": "/a", "name": "b"},
                {"op": "create_subfolder", "parent": "/a/b", "name": "c"},
                {"op": "delete", "path": "/a/b"}
            ]"#,
        )
        .expect("valid script");

        let report = run(&service, &steps).await;
        let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, [0]);
        assert!(report.failures[0].error.contains("must not contain '/'"));

        let tree = service.get_tree().await;
        assert_eq!(tree.total_folders, 1);
        assert!(tree.root("a").is_some_and(|a| a.children.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_path_is_reported() {
        let service = FolderService::default();
        let steps = vec![Step::Delete {
            path: "/nowhere".to_string(),
        }];
        let report = run(&service, &steps).await;
        assert_eq!(report.applied, 0);
        assert!(report.failures[0].error.contains("/nowhere"));
    }
}
