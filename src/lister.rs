use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builder::LsListerBuilder;
use crate::error::WalkError;
use crate::traits::{DirLister, ListMode};

// ---------------------------------------------------------------------------
// LsLister
// ---------------------------------------------------------------------------

/// Lists directories by running an external `ls` and parsing its output.
///
/// The program path is resolved once when the lister is built. Each call
/// runs `<program> [all_flag] <dir>` and splits stdout on `\n`. Names are
/// returned in the tool's order; nothing is sorted or filtered here.
///
/// Names containing a newline cannot be represented in this format and come
/// back split across several entries.
#[derive(Debug, Clone)]
pub struct LsLister {
    program:  PathBuf,
    all_flag: OsString,
}

impl LsLister {
    pub(crate) fn new(program: PathBuf, all_flag: OsString) -> Self {
        Self { program, all_flag }
    }

    /// Resolve `ls` on `PATH` with default options.
    pub fn locate() -> Result<Self, WalkError> {
        Self::builder().build()
    }

    pub fn builder() -> LsListerBuilder {
        LsListerBuilder::default()
    }

    /// The resolved program this lister runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DirLister for LsLister {
    fn list_os(&self, dir: &Path, mode: ListMode) -> Result<Vec<OsString>, WalkError> {
        let mut cmd = Command::new(&self.program);
        if mode == ListMode::All {
            cmd.arg(&self.all_flag);
        }
        cmd.arg(operand(dir));

        tracing::debug!(?mode, "running {} on {}", self.program.display(), dir.display());

        let output = cmd.output().map_err(|source| WalkError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(WalkError::CommandFailed {
                program: self.program.clone(),
                path:    dir.to_path_buf(),
                code:    output.status.code(),
                stderr:  String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(parse_listing(&output.stdout))
    }
}

/// Keep a leading `-` in a path from being read as a flag.
fn operand(dir: &Path) -> PathBuf {
    if dir.as_os_str().to_string_lossy().starts_with('-') {
        Path::new(".").join(dir)
    } else {
        dir.to_path_buf()
    }
}

/// Split tool output into names, dropping the empty tail left by a trailing
/// newline. Name bytes are kept as printed.
fn parse_listing(out: &[u8]) -> Vec<OsString> {
    let mut names: Vec<OsString> = out.split(|&b| b == b'\n').map(name_from_bytes).collect();
    if names.last().is_some_and(|last| last.is_empty()) {
        names.pop();
    }
    names
}

#[cfg(unix)]
fn name_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn name_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

// ---------------------------------------------------------------------------
// MissingTool
// ---------------------------------------------------------------------------

/// Stands in for an [`LsLister`] whose program could not be resolved.
///
/// Every listing fails with [`WalkError::ToolNotFound`], so a walk still
/// stats and visits the root and hands the failure to the visitor.
#[derive(Debug, Clone)]
pub(crate) struct MissingTool {
    program:     String,
    search_path: String,
}

impl MissingTool {
    pub(crate) fn new(program: String, search_path: String) -> Self {
        Self { program, search_path }
    }
}

impl DirLister for MissingTool {
    fn list_os(&self, _dir: &Path, _mode: ListMode) -> Result<Vec<OsString>, WalkError> {
        Err(WalkError::ToolNotFound {
            program:     self.program.clone(),
            search_path: self.search_path.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// NativeLister
// ---------------------------------------------------------------------------

/// Lists directories with `std::fs::read_dir`, shaped like `ls` output.
///
/// Names are sorted byte-wise. [`ListMode::Visible`] drops dot-prefixed
/// names; [`ListMode::All`] keeps them and puts `.` and `..` first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLister;

impl DirLister for NativeLister {
    fn list_os(&self, dir: &Path, mode: ListMode) -> Result<Vec<OsString>, WalkError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| WalkError::io(dir, e))? {
            let entry = entry.map_err(|e| WalkError::io(dir, e))?;
            let name = entry.file_name();
            if mode == ListMode::Visible && name.to_string_lossy().starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();

        if mode == ListMode::All {
            names.splice(0..0, [OsString::from("."), OsString::from("..")]);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_single_trailing_newline() {
        assert_eq!(parse_listing(b"a\nb\n"), ["a", "b"]);
    }

    #[test]
    fn keeps_last_name_without_trailing_newline() {
        assert_eq!(parse_listing(b"a\nb"), ["a", "b"]);
    }

    #[test]
    fn empty_output_is_empty_listing() {
        assert!(parse_listing(b"").is_empty());
    }

    #[test]
    fn inner_blank_lines_are_kept() {
        assert_eq!(parse_listing(b"a\n\nb\n"), ["a", "", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_keep_their_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let names = parse_listing(b"caf\xe9.txt\nplain\n");
        assert_eq!(names[0].as_bytes(), b"caf\xe9.txt");
        assert_eq!(names[1], "plain");
    }

    #[test]
    fn missing_tool_fails_every_listing() {
        let lister = MissingTool::new("ls".to_string(), String::new());
        let err = lister.list_all(Path::new(".")).unwrap_err();

        assert!(matches!(err, WalkError::ToolNotFound { ref program, .. } if program == "ls"));
    }

    #[test]
    fn dash_prefixed_operand_is_made_relative() {
        assert_eq!(operand(Path::new("-rf")), Path::new("./-rf"));
        assert_eq!(operand(Path::new("/tmp/-rf")), Path::new("/tmp/-rf"));
    }
}
