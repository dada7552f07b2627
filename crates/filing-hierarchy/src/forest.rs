//! The folder forest: an arena of folders plus the ordered root set.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use tracing::debug;

use filing_core::config::HierarchyConfig;
use filing_core::types::FolderId;
use filing_entity::folder::{Folder, FolderNode, FolderTree};

use crate::error::HierarchyError;

type Result<T> = std::result::Result<T, HierarchyError>;

/// Separator between names in a materialized path. Names may not contain it.
pub const PATH_SEPARATOR: char = '/';

/// An owned forest of folders.
///
/// Folders live in an arena keyed by id; parent and child links are ids
/// into that arena. A folder is live exactly while it is reachable from
/// `roots`, and `parent_id` is `None` exactly for members of `roots`.
///
/// Mutations take `&mut self`, so a single forest is single-threaded. Use
/// [`FolderService`](crate::FolderService) to share one across tasks.
#[derive(Debug, Clone, Default)]
pub struct FilingSystem {
    /// Every live folder.
    folders: HashMap<FolderId, Folder>,
    /// Root folders in insertion order.
    roots: Vec<FolderId>,
    /// Validation rules.
    config: HierarchyConfig,
}

impl FilingSystem {
    /// Creates an empty forest with the default (strict) rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty forest with the given rules.
    pub fn with_config(config: HierarchyConfig) -> Self {
        Self {
            folders: HashMap::new(),
            roots: Vec::new(),
            config,
        }
    }

    /// Number of live folders.
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether the forest holds no folders.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Whether `id` names a live folder.
    pub fn contains(&self, id: FolderId) -> bool {
        self.folders.contains_key(&id)
    }

    /// Returns a snapshot of a folder.
    pub fn get(&self, id: FolderId) -> Result<Folder> {
        self.node(id).cloned()
    }

    /// Adds a new folder to the root of the forest.
    ///
    /// The name only has to be unique among the other root folders.
    pub fn create_root(&mut self, name: &str) -> Result<Folder> {
        validate_name(name)?;
        self.ensure_unique(&self.roots, name, None)?;

        let folder = Folder::new(name, None);
        self.roots.push(folder.id);
        self.folders.insert(folder.id, folder.clone());

        debug!(folder_id = %folder.id, name, "Root folder added");
        Ok(folder)
    }

    /// Adds a new folder inside `parent`.
    ///
    /// The name only has to be unique among `parent`'s direct children.
    pub fn create_subfolder(&mut self, parent: FolderId, name: &str) -> Result<Folder> {
        validate_name(name)?;
        self.ensure_unique(&self.node(parent)?.children, name, None)?;

        let folder = Folder::new(name, Some(parent));
        self.node_mut(parent)?.children.push(folder.id);
        self.folders.insert(folder.id, folder.clone());

        debug!(folder_id = %folder.id, parent_id = %parent, name, "Subfolder added");
        Ok(folder)
    }

    /// Root folders in insertion order.
    pub fn root_folders(&self) -> Vec<Folder> {
        self.collect(&self.roots)
    }

    /// Direct children of `folder` in insertion order.
    pub fn subfolders(&self, folder: FolderId) -> Result<Vec<Folder>> {
        Ok(self.collect(&self.node(folder)?.children))
    }

    /// Renames a folder in place, keeping its id.
    ///
    /// With `strict_sibling_names` the new name must not collide with a
    /// sibling. Renaming a folder to its current name always succeeds.
    pub fn rename(&mut self, folder: FolderId, new_name: &str) -> Result<Folder> {
        validate_name(new_name)?;
        let parent = self.node(folder)?.parent_id;
        if self.config.strict_sibling_names {
            self.ensure_unique(self.siblings(parent)?, new_name, Some(folder))?;
        }

        let node = self.node_mut(folder)?;
        node.name = new_name.to_string();
        node.updated_at = Some(Utc::now());
        Ok(node.clone())
    }

    /// Moves `folder` (with its subtree) to the end of `destination`'s
    /// children.
    ///
    /// Rejected with [`HierarchyError::CyclicMove`] when `destination` is
    /// `folder` or lies inside its subtree. Every check runs before the
    /// first mutation, so a rejected move leaves the folder where it was.
    pub fn move_folder(&mut self, folder: FolderId, destination: FolderId) -> Result<Folder> {
        let (name, old_parent) = {
            let node = self.node(folder)?;
            (node.name.clone(), node.parent_id)
        };
        let target = self.node(destination)?;

        if folder == destination || self.is_descendant(destination, folder)? {
            return Err(HierarchyError::CyclicMove {
                folder,
                destination,
            });
        }
        if self.config.strict_sibling_names {
            self.ensure_unique(&target.children, &name, Some(folder))?;
        }

        self.detach(folder, old_parent);
        self.node_mut(destination)?.children.push(folder);
        let node = self.node_mut(folder)?;
        node.parent_id = Some(destination);

        debug!(
            folder_id = %folder,
            from = ?old_parent,
            to = %destination,
            "Folder moved"
        );
        Ok(node.clone())
    }

    /// Deletes `folder` and its entire subtree.
    ///
    /// The folder is first detached from its parent (or the root set),
    /// which costs O(siblings). The subtree is then removed level by level
    /// from an explicit queue, which costs O(subtree size). Returns the
    /// removed folders in level order, starting with `folder`.
    ///
    /// Deleting an id that is no longer live yields
    /// [`HierarchyError::NotFound`].
    pub fn delete(&mut self, folder: FolderId) -> Result<Vec<Folder>> {
        let parent = self.node(folder)?.parent_id;
        self.detach(folder, parent);

        let mut removed = Vec::new();
        let mut queue = VecDeque::from([folder]);
        let mut levels = 0usize;

        while !queue.is_empty() {
            let level: Vec<FolderId> = queue.drain(..).collect();
            for id in level {
                if let Some(node) = self.folders.remove(&id) {
                    queue.extend(node.children.iter().copied());
                    removed.push(node);
                }
            }
            levels += 1;
        }

        debug!(
            folder_id = %folder,
            removed = removed.len(),
            levels,
            "Folder subtree deleted"
        );
        Ok(removed)
    }

    /// Ids of the folder's ancestors, nearest first.
    pub fn ancestors(&self, folder: FolderId) -> Result<Vec<FolderId>> {
        let mut chain = Vec::new();
        let mut current = self.node(folder)?.parent_id;
        while let Some(id) = current {
            chain.push(id);
            current = self.node(id)?.parent_id;
        }
        Ok(chain)
    }

    /// The folders from the root down to and including `folder`.
    pub fn breadcrumbs(&self, folder: FolderId) -> Result<Vec<Folder>> {
        let mut trail = vec![self.get(folder)?];
        for id in self.ancestors(folder)? {
            trail.push(self.get(id)?);
        }
        trail.reverse();
        Ok(trail)
    }

    /// The materialized path of a folder, e.g. `/Documents/Photos`.
    ///
    /// Names never contain [`PATH_SEPARATOR`], so the path names exactly
    /// one folder and [`resolve_path`](Self::resolve_path) inverts it.
    pub fn path(&self, folder: FolderId) -> Result<String> {
        let mut path = String::new();
        for crumb in self.breadcrumbs(folder)? {
            path.push(PATH_SEPARATOR);
            path.push_str(&crumb.name);
        }
        Ok(path)
    }

    /// Looks up a folder by its materialized path.
    ///
    /// Empty segments are ignored, so `/a//b/` resolves like `/a/b`.
    /// Returns `None` for an empty path.
    pub fn resolve_path(&self, path: &str) -> Option<Folder> {
        let mut segments = path.split(PATH_SEPARATOR).filter(|s| !s.is_empty());
        let mut current = self.find_named(&self.roots, segments.next()?)?;
        for segment in segments {
            current = self.find_named(&self.folders.get(&current)?.children, segment)?;
        }
        self.folders.get(&current).cloned()
    }

    /// Finds a direct child of `parent` (or a root when `parent` is `None`)
    /// by name.
    pub fn child_named(&self, parent: Option<FolderId>, name: &str) -> Result<Option<Folder>> {
        let siblings = self.siblings(parent)?;
        Ok(self
            .find_named(siblings, name)
            .and_then(|id| self.folders.get(&id).cloned()))
    }

    /// A nested snapshot of the whole forest.
    ///
    /// Snapshots are built without recursion, but a [`FolderNode`] is a
    /// nested value: dropping or serializing one still recurses once per
    /// level. For very deep forests walk with
    /// [`subfolders`](Self::subfolders) instead.
    pub fn tree(&self) -> FolderTree {
        let roots = self
            .roots
            .iter()
            .filter_map(|id| self.build_node(*id, 0))
            .collect();
        FolderTree::from_roots(roots)
    }

    /// A nested snapshot of the subtree rooted at `folder`.
    pub fn subtree(&self, folder: FolderId) -> Result<FolderNode> {
        let depth = self.ancestors(folder)?.len() as u32;
        self.build_node(folder, depth)
            .ok_or(HierarchyError::NotFound(folder))
    }

    fn node(&self, id: FolderId) -> Result<&Folder> {
        self.folders.get(&id).ok_or(HierarchyError::NotFound(id))
    }

    fn node_mut(&mut self, id: FolderId) -> Result<&mut Folder> {
        self.folders.get_mut(&id).ok_or(HierarchyError::NotFound(id))
    }

    /// The sibling sequence a folder under `parent` belongs to.
    fn siblings(&self, parent: Option<FolderId>) -> Result<&[FolderId]> {
        match parent {
            None => Ok(self.roots.as_slice()),
            Some(id) => Ok(self.node(id)?.children.as_slice()),
        }
    }

    fn ensure_unique(
        &self,
        siblings: &[FolderId],
        name: &str,
        except: Option<FolderId>,
    ) -> Result<()> {
        let taken = siblings
            .iter()
            .filter(|id| Some(**id) != except)
            .filter_map(|id| self.folders.get(id))
            .any(|f| f.name == name);
        if taken {
            return Err(HierarchyError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn find_named(&self, siblings: &[FolderId], name: &str) -> Option<FolderId> {
        siblings
            .iter()
            .copied()
            .find(|id| self.folders.get(id).is_some_and(|f| f.name == name))
    }

    /// Whether `candidate` lies strictly below `ancestor`.
    fn is_descendant(&self, candidate: FolderId, ancestor: FolderId) -> Result<bool> {
        Ok(self.ancestors(candidate)?.contains(&ancestor))
    }

    /// Removes `folder` from its parent's children, or from the root set.
    fn detach(&mut self, folder: FolderId, parent: Option<FolderId>) {
        match parent {
            None => self.roots.retain(|id| *id != folder),
            Some(id) => {
                if let Some(p) = self.folders.get_mut(&id) {
                    if let Some(pos) = p.child_position(folder) {
                        p.children.remove(pos);
                    }
                }
            }
        }
    }

    fn collect(&self, ids: &[FolderId]) -> Vec<Folder> {
        ids.iter()
            .filter_map(|id| self.folders.get(id))
            .cloned()
            .collect()
    }

    /// Builds the snapshot of one subtree with an explicit stack of
    /// partially built nodes, so depth does not consume call stack.
    fn build_node(&self, id: FolderId, depth: u32) -> Option<FolderNode> {
        struct Frame {
            id: FolderId,
            depth: u32,
            next_child: usize,
            children: Vec<FolderNode>,
        }

        self.folders.get(&id)?;
        let mut stack = vec![Frame {
            id,
            depth,
            next_child: 0,
            children: Vec::new(),
        }];

        loop {
            let frame = stack.last_mut()?;
            let folder = self.folders.get(&frame.id)?;

            if let Some(&child) = folder.children.get(frame.next_child) {
                frame.next_child += 1;
                if self.folders.contains_key(&child) {
                    let depth = frame.depth + 1;
                    stack.push(Frame {
                        id: child,
                        depth,
                        next_child: 0,
                        children: Vec::new(),
                    });
                }
                continue;
            }

            let done = stack.pop()?;
            let node = FolderNode {
                id: done.id,
                name: folder.name.clone(),
                depth: done.depth,
                child_count: done.children.len() as u64,
                children: done.children,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return Some(node),
            }
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(HierarchyError::EmptyName);
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(HierarchyError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
