//! # lsdir
//!
//! Directory listing and deterministic tree walking, driven by `ls`.
//!
//! Directory contents are discovered by running an external listing program
//! and parsing its output, not by reading the directory directly. Walks are
//! pre-order and follow the listing order, which `ls` keeps lexical.
//!
//! The listing strategy is a trait, [`DirLister`]. [`LsLister`] runs the
//! external tool, resolved once when it is built; [`NativeLister`] reads the
//! directory with the standard library. [`TreeWalker`] works over either.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lsdir::{walk_tree, Visit};
//!
//! walk_tree("src", |path, meta, err| {
//!     if let Some(err) = err {
//!         return Visit::Fail(err);
//!     }
//!     if meta.is_some_and(|m| m.is_dir()) && path.ends_with("target") {
//!         return Visit::SkipDir;
//!     }
//!     println!("{}", path.display());
//!     Visit::Continue
//! })?;
//! # Ok::<(), lsdir::WalkError>(())
//! ```
//!
//! # Choosing a Lister
//!
//! The free functions resolve `ls` on every call. To resolve it once, or to
//! swap the strategy, build a [`TreeWalker`]:
//!
//! ```rust,no_run
//! use lsdir::{DirLister, LsLister, NativeLister, TreeWalker, Visit};
//!
//! let walker = TreeWalker::new(LsLister::locate()?);
//! let mut count = 0;
//! walker.walk(".", |_, _, _| {
//!     count += 1;
//!     Visit::Continue
//! })?;
//!
//! let names = NativeLister.list_all(std::path::Path::new("."))?;
//! assert_eq!(&names[..2], [".", ".."]);
//! # Ok::<(), lsdir::WalkError>(())
//! ```

#![forbid(unsafe_code)]

mod builder;
mod entry;
mod error;
mod lister;
mod traits;
mod walker;

use std::fs::Metadata;
use std::path::Path;

use lister::MissingTool;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::LsListerBuilder;
pub use entry::{DirEntry, EntryKind};
pub use error::WalkError;
pub use lister::{LsLister, NativeLister};
pub use traits::{DirLister, ListMode};
pub use walker::{TreeWalker, Visit};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Names in `dir`, as printed by `ls <dir>`.
///
/// # Errors
///
/// [`WalkError::ToolNotFound`] if `ls` cannot be resolved, otherwise an
/// invocation failure (missing directory, permission denied, non-zero exit).
pub fn list_visible(dir: impl AsRef<Path>) -> Result<Vec<String>, WalkError> {
    LsLister::locate()?.list_visible(dir.as_ref())
}

/// Names in `dir` including hidden ones, `.` and `..`, as printed by
/// `ls -a <dir>`.
pub fn list_all(dir: impl AsRef<Path>) -> Result<Vec<String>, WalkError> {
    LsLister::locate()?.list_all(dir.as_ref())
}

/// Entries of `dir` with their metadata. See [`TreeWalker::read_dir`].
pub fn read_dir(dir: impl AsRef<Path>) -> Result<Vec<DirEntry>, WalkError> {
    TreeWalker::new(LsLister::locate()?).read_dir(dir)
}

/// Walk the tree rooted at `root` with an [`LsLister`].
///
/// See [`TreeWalker::walk`] for the visiting rules. `ls` is resolved once
/// up front. If it cannot be found the root is still stat'ed and visited,
/// and [`WalkError::ToolNotFound`] reaches the visitor as the listing error
/// for the root directory.
///
/// # Example
///
/// ```rust,no_run
/// use lsdir::{walk_tree, Visit};
///
/// let mut paths = Vec::new();
/// walk_tree("/etc", |path, _, err| match err {
///     Some(err) if err.is_not_found() => Visit::Continue,
///     Some(err) => Visit::Fail(err),
///     None => {
///         paths.push(path.to_path_buf());
///         Visit::Continue
///     }
/// })?;
/// # Ok::<(), lsdir::WalkError>(())
/// ```
pub fn walk_tree<F>(root: impl AsRef<Path>, visitor: F) -> Result<(), WalkError>
where
    F: FnMut(&Path, Option<&Metadata>, Option<WalkError>) -> Visit,
{
    match LsLister::locate() {
        Ok(lister) => TreeWalker::new(lister).walk(root, visitor),
        Err(WalkError::ToolNotFound { program, search_path }) => {
            tracing::debug!("{} not found, listings will fail", program);
            TreeWalker::new(MissingTool::new(program, search_path)).walk(root, visitor)
        }
        Err(err) => Err(err),
    }
}
