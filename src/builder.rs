use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::WalkError;
use crate::lister::LsLister;

// ---------------------------------------------------------------------------
// LsListerBuilder
// ---------------------------------------------------------------------------

/// Configures and resolves an [`LsLister`].
///
/// Created via [`LsLister::builder()`]. The program is resolved once, in
/// [`build()`](LsListerBuilder::build); the resulting lister never searches
/// the path again.
///
/// # Example
///
/// ```rust,no_run
/// use lsdir::LsLister;
///
/// let lister = LsLister::builder()
///     .program("ls")
///     .all_flag("-A")
///     .search_path("/usr/bin:/bin")
///     .build()?;
/// # Ok::<(), lsdir::WalkError>(())
/// ```
pub struct LsListerBuilder {
    program:     String,
    all_flag:    OsString,
    search_path: Option<OsString>,
}

impl Default for LsListerBuilder {
    fn default() -> Self {
        Self {
            program:     "ls".to_string(),
            all_flag:    OsString::from("-a"),
            search_path: None,
        }
    }
}

impl LsListerBuilder {
    /// Program to run. A bare name is looked up in the search path; a name
    /// containing `/` is used as given.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    /// Flag passed in [`ListMode::All`](crate::ListMode::All). Defaults to `-a`.
    pub fn all_flag(mut self, flag: impl Into<OsString>) -> Self {
        self.all_flag = flag.into();
        self
    }

    /// Colon-separated directories to search. Defaults to `$PATH`.
    pub fn search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Resolve the program and return a ready lister.
    ///
    /// # Errors
    ///
    /// [`WalkError::ToolNotFound`] when no executable candidate exists.
    pub fn build(self) -> Result<LsLister, WalkError> {
        let search_path = self
            .search_path
            .or_else(|| std::env::var_os("PATH"))
            .unwrap_or_default();

        let resolved = if self.program.contains('/') {
            let candidate = PathBuf::from(&self.program);
            is_executable(&candidate).then_some(candidate)
        } else {
            find_in_path(&self.program, &search_path)
        };

        match resolved {
            Some(program) => {
                tracing::debug!("resolved {} to {}", self.program, program.display());
                Ok(LsLister::new(program, self.all_flag))
            }
            None => Err(WalkError::ToolNotFound {
                program:     self.program,
                search_path: search_path.to_string_lossy().into_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First executable `dir/name` across the search path.
fn find_in_path(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
