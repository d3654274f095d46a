use std::fs::Metadata;
use std::path::PathBuf;

/// A single item produced by [`read_dir`](crate::read_dir).
///
/// Pairs the listed name with the platform metadata for the joined path.
/// `metadata` comes from `symlink_metadata`, so a symbolic link is described
/// as itself and never as its target.
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path to the entry: the listed directory joined with `name`.
    pub path: PathBuf,

    /// The listed name, decoded lossily if it is not UTF-8. `path` keeps
    /// the original bytes.
    pub name: String,

    /// Metadata of `path`, not following symbolic links.
    pub metadata: Metadata,
}

impl DirEntry {
    pub fn kind(&self) -> EntryKind {
        EntryKind::from(&self.metadata)
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl From<&Metadata> for EntryKind {
    fn from(meta: &Metadata) -> Self {
        let ft = meta.file_type();
        if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        }
    }
}
