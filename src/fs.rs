//! Filesystem access used by the file browser.

use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait FileSystem {
    /// Directories and regular files directly inside `path`. Entries that are
    /// neither (broken links, sockets) are left out.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = ?entry.path(), "skipping non UTF-8 file name");
                continue;
            };
            // follow symlinks so a link to a directory browses like one
            let Ok(meta) = std::fs::metadata(entry.path()) else {
                continue;
            };
            if meta.is_dir() || meta.is_file() {
                entries.push(DirEntry {
                    name,
                    is_dir: meta.is_dir(),
                });
            }
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_dirs_and_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("a.txt"), "hello\n").unwrap();

        let mut entries = OsFileSystem.list_dir(tmp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry { name: "a.txt".into(), is_dir: false },
                DirEntry { name: "sub".into(), is_dir: true },
            ]
        );
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(OsFileSystem.list_dir(&tmp.path().join("nope")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();
        assert!(OsFileSystem.list_dir(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("f");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(OsFileSystem.read_file(&path).unwrap(), b"abc");
    }
}
