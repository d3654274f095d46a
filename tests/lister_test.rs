use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use lsdir::{DirLister, EntryKind, LsLister, NativeLister, TreeWalker, WalkError};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Structure:
/// ```
/// tmp/
///   notes.md
///   report.txt
///   subdir/
///     other.rs
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("notes.md"), "some notes").unwrap();
    fs::write(root.join("report.txt"), "quarterly report").unwrap();

    let sub = root.join("subdir");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("other.rs"), "fn main() {}").unwrap();

    dir
}

fn ls() -> LsLister {
    LsLister::locate().expect("ls should be on PATH")
}

fn as_set(names: &[String]) -> BTreeSet<&str> {
    names.iter().map(String::as_str).collect()
}

// ---------------------------------------------------------------------------
// LsLister
// ---------------------------------------------------------------------------

#[test]
fn visible_lists_every_child() {
    let dir = setup_test_dir();
    let names = ls().list_visible(dir.path()).unwrap();

    assert_eq!(names, ["notes.md", "report.txt", "subdir"]);
}

#[test]
fn all_includes_self_and_parent() {
    let dir = setup_test_dir();
    let names = ls().list_all(dir.path()).unwrap();

    assert!(names.iter().any(|n| n == "."));
    assert!(names.iter().any(|n| n == ".."));
}

#[test]
fn all_minus_dots_matches_visible_without_hidden_files() {
    let dir = setup_test_dir();
    let lister = ls();

    let visible = lister.list_visible(dir.path()).unwrap();
    let mut all = lister.list_all(dir.path()).unwrap();
    all.retain(|n| n != "." && n != "..");

    assert_eq!(as_set(&visible), as_set(&all));
}

#[test]
fn hidden_entries_only_in_all_mode() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(".hidden"), "").unwrap();
    let lister = ls();

    let visible = lister.list_visible(dir.path()).unwrap();
    let all = lister.list_all(dir.path()).unwrap();

    assert!(!visible.iter().any(|n| n == ".hidden"));
    assert!(all.iter().any(|n| n == ".hidden"));
}

#[test]
fn empty_directory_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ls().list_visible(dir.path()).unwrap().is_empty());
}

#[test]
fn missing_directory_is_invocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = ls().list_all(&missing).unwrap_err();
    assert!(err.is_invocation_failure(), "unexpected error: {err:?}");
    assert_eq!(err.path(), Some(&missing));
}

#[test]
fn directory_named_like_a_flag_lists_fine() {
    let dir = tempfile::tempdir().unwrap();
    let odd = dir.path().join("-l");
    fs::create_dir(&odd).unwrap();
    fs::write(odd.join("inside.txt"), "").unwrap();

    let names = ls().list_visible(&odd).unwrap();
    assert_eq!(names, ["inside.txt"]);
}

#[test]
fn free_functions_use_ls() {
    let dir = setup_test_dir();
    assert_eq!(
        lsdir::list_visible(dir.path()).unwrap(),
        ls().list_visible(dir.path()).unwrap()
    );
    assert!(lsdir::list_all(dir.path()).unwrap().iter().any(|n| n == ".."));
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn unknown_program_is_tool_not_found() {
    let err = LsLister::builder()
        .program("definitely-not-a-listing-tool")
        .build()
        .unwrap_err();

    assert!(matches!(err, WalkError::ToolNotFound { ref program, .. } if program == "definitely-not-a-listing-tool"));
}

#[test]
fn empty_search_path_is_tool_not_found() {
    let err = LsLister::builder().search_path("").build().unwrap_err();
    assert!(matches!(err, WalkError::ToolNotFound { .. }));
}

#[test]
fn explicit_program_path_is_used_as_given() {
    let located = ls();
    let explicit = LsLister::builder()
        .program(located.program().to_string_lossy())
        .search_path("")
        .build()
        .unwrap();

    assert_eq!(explicit.program(), located.program());
}

#[test]
fn custom_all_flag_is_passed() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(".hidden"), "").unwrap();

    // -A: hidden entries without . and ..
    let lister = LsLister::builder().all_flag("-A").build().unwrap();
    let names = lister.list_all(dir.path()).unwrap();

    assert!(names.iter().any(|n| n == ".hidden"));
    assert!(!names.iter().any(|n| n == "." || n == ".."));
}

// ---------------------------------------------------------------------------
// NativeLister
// ---------------------------------------------------------------------------

#[test]
fn native_agrees_with_ls() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(".hidden"), "").unwrap();

    let native = NativeLister.list_all(dir.path()).unwrap();
    let external = ls().list_all(dir.path()).unwrap();
    assert_eq!(as_set(&native), as_set(&external));

    let native = NativeLister.list_visible(dir.path()).unwrap();
    let external = ls().list_visible(dir.path()).unwrap();
    assert_eq!(as_set(&native), as_set(&external));
}

#[test]
fn native_puts_dots_first_then_sorted() {
    let dir = setup_test_dir();
    let names = NativeLister.list_all(dir.path()).unwrap();

    assert_eq!(names, [".", "..", "notes.md", "report.txt", "subdir"]);
}

#[test]
fn native_missing_directory_is_not_found() {
    let err = NativeLister.list_all(Path::new("/no/such/dir/here")).unwrap_err();
    assert!(err.is_not_found());
}

// ---------------------------------------------------------------------------
// read_dir
// ---------------------------------------------------------------------------

#[test]
fn read_dir_skips_dots_and_reports_kinds() {
    let dir = setup_test_dir();
    let entries = lsdir::read_dir(dir.path()).unwrap();

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["notes.md", "report.txt", "subdir"]);

    assert_eq!(entries[0].kind(), EntryKind::File);
    assert_eq!(entries[2].kind(), EntryKind::Dir);
    assert!(entries[2].is_dir());
    assert_eq!(entries[2].path, dir.path().join("subdir"));
    assert_eq!(entries[1].metadata.len(), "quarterly report".len() as u64);
}

#[test]
fn read_dir_matches_std() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(".hidden"), "x").unwrap();

    let ours: BTreeSet<_> = lsdir::read_dir(dir.path())
        .unwrap()
        .into_iter()
        .map(|e| (e.name, e.metadata.len()))
        .collect();
    let expected: BTreeSet<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                e.metadata().unwrap().len(),
            )
        })
        .collect();

    assert_eq!(ours, expected);
}

#[test]
fn read_dir_missing_directory_fails_before_listing() {
    let dir = tempfile::tempdir().unwrap();
    let err = TreeWalker::new(NativeLister)
        .read_dir(dir.path().join("gone"))
        .unwrap_err();

    assert!(err.is_not_found());
}

#[cfg(unix)]
#[test]
fn read_dir_reports_symlinks_as_links() {
    let dir = setup_test_dir();
    std::os::unix::fs::symlink(dir.path().join("subdir"), dir.path().join("link")).unwrap();

    let entries = TreeWalker::new(ls()).read_dir(dir.path()).unwrap();
    let link = entries.iter().find(|e| e.name == "link").unwrap();

    assert_eq!(link.kind(), EntryKind::Symlink);
    assert!(!link.is_dir());
}
