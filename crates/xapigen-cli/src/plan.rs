//! Build plan: the complete output tree of one run, applied atomically.
//!
//! Nothing is written while units are generated. The plan collects every
//! output file first, then [`BuildPlan::apply`] writes it into a staging
//! directory next to the output location and swaps it in with renames. A run
//! that fails at any point leaves the previous output untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use xapigen_core::{GenError, GenResult};

const STAGING_PREFIX: &str = ".xapigen-staging-";
const BACKUP_PREFIX: &str = ".xapigen-previous-";

/// Contents of one planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
    /// Generated source text.
    Content(String),

    /// A hand-written file placed verbatim (hard link, or copy where links
    /// are not possible).
    Link(PathBuf),
}

/// The output tree of one generation run.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    root: PathBuf,
    entries: BTreeMap<PathBuf, PlanEntry>,
}

impl BuildPlan {
    /// Create an empty plan for the output location `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Plan a generated file at `relative`. Returns the entry it replaced.
    pub fn add_file(&mut self, relative: impl Into<PathBuf>, content: String) -> Option<PlanEntry> {
        self.entries
            .insert(relative.into(), PlanEntry::Content(content))
    }

    /// Plan a hand-written file at `relative`. Returns the entry it replaced.
    pub fn add_link(
        &mut self,
        relative: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
    ) -> Option<PlanEntry> {
        self.entries
            .insert(relative.into(), PlanEntry::Link(source.into()))
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&PlanEntry> {
        self.entries.get(relative.as_ref())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Path, &PlanEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_path(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the output location with exactly the planned tree.
    ///
    /// Anything previously at the output location is discarded once the new
    /// tree is in place.
    pub fn apply(&self) -> GenResult<()> {
        let parent = match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| GenError::io(parent, e))?;

        for (relative, entry) in &self.entries {
            let target = staging.path().join(relative);
            if let Some(dir) = target.parent() {
                fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;
            }

            match entry {
                PlanEntry::Content(content) => {
                    fs::write(&target, content).map_err(|e| GenError::io(&target, e))?;
                }
                PlanEntry::Link(source) => {
                    if fs::hard_link(source, &target).is_err() {
                        fs::copy(source, &target).map_err(|e| GenError::io(source, e))?;
                    }
                }
            }
        }

        tracing::debug!(
            staging = %staging.path().display(),
            files = self.entries.len(),
            "staged output tree"
        );

        swap_into_place(staging.keep(), &self.root, parent)
    }
}

/// Move the staged tree to `root`, restoring the previous tree on failure.
fn swap_into_place(staged: PathBuf, root: &Path, parent: &Path) -> GenResult<()> {
    if fs::symlink_metadata(root).is_err() {
        return fs::rename(&staged, root).map_err(|e| {
            let _ = fs::remove_dir_all(&staged);
            GenError::io(root, e)
        });
    }

    let backup = match tempfile::Builder::new()
        .prefix(BACKUP_PREFIX)
        .tempdir_in(parent)
    {
        Ok(backup) => backup,
        Err(e) => {
            let _ = fs::remove_dir_all(&staged);
            return Err(GenError::io(parent, e));
        }
    };
    let previous = backup.path().join("previous");

    if let Err(e) = fs::rename(root, &previous) {
        let _ = fs::remove_dir_all(&staged);
        return Err(GenError::io(root, e));
    }

    if let Err(e) = fs::rename(&staged, root) {
        let _ = fs::rename(&previous, root);
        let _ = fs::remove_dir_all(&staged);
        return Err(GenError::io(root, e));
    }

    // Dropping the backup directory removes the previous tree.
    drop(backup);
    Ok(())
}

impl fmt::Display for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} files)", self.root.display(), self.entries.len())?;
        for (relative, entry) in &self.entries {
            match entry {
                PlanEntry::Content(content) => {
                    writeln!(f, "  {} ({} bytes)", relative.display(), content.len())?;
                }
                PlanEntry::Link(source) => {
                    writeln!(f, "  {} -> {}", relative.display(), source.display())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "plan/plan_tests.rs"]
mod plan_tests;
