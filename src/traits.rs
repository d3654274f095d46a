use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::error::WalkError;

/// Which entries a [`DirLister`] should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Visible entries only, like a bare `ls`.
    Visible,

    /// Hidden entries too, plus the `.` and `..` pseudo-entries, like `ls -a`.
    All,
}

/// Produces the names inside a single directory.
///
/// [`TreeWalker`](crate::TreeWalker) depends on this trait rather than on a
/// particular listing strategy. [`LsLister`](crate::LsLister) shells out to
/// an external tool; [`NativeLister`](crate::NativeLister) reads the
/// directory directly. Tests can supply their own.
///
/// Implementors provide [`list_os`](DirLister::list_os), which keeps names
/// byte-for-byte so that walks can stat every entry. The `String` methods
/// are derived from it and decode lossily.
///
/// # Ordering
///
/// Walk order is exactly the order returned here. Implementations should not
/// return duplicates, and only [`ListMode::All`] may include `.` and `..`.
///
/// # Thread Safety
///
/// `Send + Sync` are required so one lister can back independent walks on
/// separate threads.
///
/// # Example
///
/// ```rust
/// use std::ffi::OsString;
/// use std::path::Path;
/// use lsdir::{DirLister, ListMode, WalkError};
///
/// struct Fixed(Vec<&'static str>);
///
/// impl DirLister for Fixed {
///     fn list_os(&self, _dir: &Path, mode: ListMode) -> Result<Vec<OsString>, WalkError> {
///         let mut names: Vec<OsString> = self.0.iter().map(OsString::from).collect();
///         if mode == ListMode::All {
///             names.splice(0..0, [OsString::from("."), OsString::from("..")]);
///         }
///         Ok(names)
///     }
/// }
///
/// let lister = Fixed(vec!["a.txt", "b.txt"]);
/// assert_eq!(lister.list_all(Path::new("x")).unwrap(), [".", "..", "a.txt", "b.txt"]);
/// ```
pub trait DirLister: Send + Sync {
    /// List the entries of `dir` in the given mode, names unaltered.
    fn list_os(&self, dir: &Path, mode: ListMode) -> Result<Vec<OsString>, WalkError>;

    /// List the entries of `dir` as UTF-8, replacing invalid sequences.
    fn list(&self, dir: &Path, mode: ListMode) -> Result<Vec<String>, WalkError> {
        let names = self.list_os(dir, mode)?;
        if names.iter().any(|name| name.to_str().is_none()) {
            tracing::warn!("non-UTF-8 names in {}, decoding lossily", dir.display());
        }
        Ok(names
            .into_iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    /// Equivalent to `ls <dir>`.
    fn list_visible(&self, dir: &Path) -> Result<Vec<String>, WalkError> {
        self.list(dir, ListMode::Visible)
    }

    /// Equivalent to `ls -a <dir>`.
    fn list_all(&self, dir: &Path) -> Result<Vec<String>, WalkError> {
        self.list(dir, ListMode::All)
    }
}

impl<L: DirLister + ?Sized> DirLister for &L {
    fn list_os(&self, dir: &Path, mode: ListMode) -> Result<Vec<OsString>, WalkError> {
        (**self).list_os(dir, mode)
    }
}

/// `.` or `..`, which no walk or `read_dir` ever reports.
pub(crate) fn is_dot_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}
