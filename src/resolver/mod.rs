//! Filename resolution against the image tree
//!
//! The resolver walks the image root once per candidate name, checking each
//! visited directory for `candidate + extension`. It is the dominant cost
//! center of a run: O(tree size) per call, invoked up to three times per
//! work item (see [`variants`]).

pub mod variants;

pub use variants::VariantStrategy;

use crate::error::{ResolveError, ResolveResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Image extensions checked per directory, in match-priority order
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".png"];

/// Locates image files by exact filename under a fixed root
#[derive(Debug, Clone)]
pub struct ImageResolver {
    /// Root of the tree to search
    root: PathBuf,
}

impl ImageResolver {
    /// Create a resolver rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the search root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Search the tree for `base_name + ext` for any known image extension
    ///
    /// Directories are visited in traversal order (depth-first, parents
    /// before children); within a directory, extensions are checked in
    /// [`IMAGE_EXTENSIONS`] order. Returns the first match, or `Ok(None)`
    /// if the traversal completes without one.
    ///
    /// Per-entry errors (unreadable subdirectory, entry vanishing mid-walk)
    /// are logged and skipped. Only a failure on the root itself is an
    /// error, since that means no search happened at all.
    pub fn resolve(&self, base_name: &str) -> ResolveResult<Option<PathBuf>> {
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ResolveError::RootWalk {
                        root: self.root.clone(),
                        source: err,
                    });
                }
                Err(err) => {
                    debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            for ext in IMAGE_EXTENSIONS {
                let candidate = entry.path().join(format!("{}{}", base_name, ext));
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "Image found");
                    return Ok(Some(candidate));
                }
            }
        }

        Ok(None)
    }
}
