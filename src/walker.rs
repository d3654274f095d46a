use std::fs::Metadata;
use std::path::Path;

use crate::entry::DirEntry;
use crate::error::WalkError;
use crate::traits::{is_dot_entry, DirLister, ListMode};

// ---------------------------------------------------------------------------
// Visit
// ---------------------------------------------------------------------------

/// What a visitor wants the walk to do next.
#[derive(Debug)]
pub enum Visit {
    /// Keep going.
    Continue,

    /// For a directory: do not descend, carry on with its siblings.
    ///
    /// For anything else this travels up like an error until it reaches an
    /// enclosing directory, which stops listing its remaining entries. It
    /// never makes the walk as a whole fail.
    SkipDir,

    /// Abort the walk and return this error from [`TreeWalker::walk`].
    Fail(WalkError),
}

impl From<Result<(), WalkError>> for Visit {
    fn from(res: Result<(), WalkError>) -> Self {
        match res {
            Ok(())   => Visit::Continue,
            Err(err) => Visit::Fail(err),
        }
    }
}

// ---------------------------------------------------------------------------
// TreeWalker
// ---------------------------------------------------------------------------

/// Pre-order directory walker over an injected [`DirLister`].
///
/// The root is reported first, each directory before its contents, and
/// siblings in the order the lister returns them. Symbolic links are
/// reported as themselves and never followed.
#[derive(Debug)]
pub struct TreeWalker<L> {
    lister: L,
}

impl<L: DirLister> TreeWalker<L> {
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Walk the tree rooted at `root`, calling `visitor` once per path.
    ///
    /// The visitor receives the path, its metadata when the stat succeeded,
    /// and the error when something failed for that path: a failed stat
    /// (no metadata) or a failed listing of a directory (with metadata; the
    /// directory was already visited once without an error).
    ///
    /// # Errors
    ///
    /// The first [`Visit::Fail`] returned by the visitor, unchanged.
    pub fn walk<F>(&self, root: impl AsRef<Path>, mut visitor: F) -> Result<(), WalkError>
    where
        F: FnMut(&Path, Option<&Metadata>, Option<WalkError>) -> Visit,
    {
        let root = root.as_ref();
        let outcome = match lstat(root) {
            Ok(meta) => self.visit(root, &meta, &mut visitor),
            Err(err) => visitor(root, None, Some(err)),
        };

        match outcome {
            Visit::Continue | Visit::SkipDir => Ok(()),
            Visit::Fail(err) => Err(err),
        }
    }

    fn visit<F>(&self, path: &Path, meta: &Metadata, visitor: &mut F) -> Visit
    where
        F: FnMut(&Path, Option<&Metadata>, Option<WalkError>) -> Visit,
    {
        tracing::trace!("visiting {}", path.display());

        match visitor(path, Some(meta), None) {
            Visit::Continue => {}
            Visit::SkipDir if meta.is_dir() => return Visit::Continue,
            other => return other,
        }

        if !meta.is_dir() {
            return Visit::Continue;
        }

        let names = match self.lister.list_os(path, ListMode::All) {
            Ok(names) => names,
            Err(err) => return visitor(path, Some(meta), Some(err)),
        };

        for name in names.iter().filter(|name| !is_dot_entry(name)) {
            let child = path.join(name);
            match lstat(&child) {
                Err(err) => match visitor(&child, None, Some(err)) {
                    Visit::Continue | Visit::SkipDir => {}
                    fail => return fail,
                },
                Ok(child_meta) => match self.visit(&child, &child_meta, visitor) {
                    Visit::Continue => {}
                    Visit::SkipDir if child_meta.is_dir() => {}
                    other => return other,
                },
            }
        }

        Visit::Continue
    }

    /// List `dir` one level deep, with metadata for every entry.
    ///
    /// `dir` itself is resolved through symbolic links; its entries are
    /// not. `.` and `..` are never returned.
    ///
    /// # Errors
    ///
    /// Fails if `dir` cannot be stat'ed, cannot be listed, or if any entry
    /// cannot be stat'ed. On failure the entries gathered so far are
    /// discarded; only the error is returned.
    pub fn read_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<DirEntry>, WalkError> {
        let dir = dir.as_ref();
        std::fs::metadata(dir).map_err(|e| WalkError::io(dir, e))?;

        self.lister
            .list_os(dir, ListMode::All)?
            .into_iter()
            .filter(|name| !is_dot_entry(name))
            .map(|name| -> Result<DirEntry, WalkError> {
                let path = dir.join(&name);
                let metadata = lstat(&path)?;
                let name = name.to_string_lossy().into_owned();
                Ok(DirEntry { path, name, metadata })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stat without following symbolic links.
fn lstat(path: &Path) -> Result<Metadata, WalkError> {
    std::fs::symlink_metadata(path).map_err(|e| WalkError::io(path, e))
}
