//! File browser built on [`ChoiceList`].

use std::path::{Component, Path, PathBuf};

use crate::content::decode_text;
use crate::error::BrowseError;
use crate::fs::{DirEntry, FileSystem};

use super::choice_list::ChoiceList;

/// Label of the synthetic "go up one level" entry.
pub const GO_UP: &str = "../";

/// Absolute, normalized directory the browser is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCursor {
    path: PathBuf,
}

impl DirectoryCursor {
    /// Normalize `path` lexically. `..` never climbs above the root.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let mut normalized = PathBuf::from("/");
        for component in path.as_ref().components() {
            match component {
                Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
                Component::RootDir => normalized.push(Component::RootDir),
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(name) => normalized.push(name),
            }
        }
        Self { path: normalized }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.parent().is_none()
    }

    pub fn child(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// The parent directory, or the root itself when already there.
    pub fn parent(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEntry {
    Up,
    Dir(String),
    File(String),
}

impl BrowserEntry {
    pub fn label(&self) -> String {
        match self {
            BrowserEntry::Up => GO_UP.to_string(),
            BrowserEntry::Dir(name) => format!("{name}/"),
            BrowserEntry::File(name) => name.clone(),
        }
    }
}

/// A text file picked in the browser (or named on the command line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub path: PathBuf,
    /// Raw lines, before display normalization.
    pub lines: Vec<String>,
}

/// Read and validate a text file.
pub fn load_file<F: FileSystem>(fs: &F, path: &Path) -> Result<LoadedFile, BrowseError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let bytes = fs.read_file(path).map_err(|source| BrowseError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = decode_text(&name, &bytes)?;
    Ok(LoadedFile {
        name,
        path: path.to_path_buf(),
        lines,
    })
}

/// What happened after the user picked an entry.
#[derive(Debug)]
pub enum BrowseStep {
    /// Still browsing: moved to another directory or an error is showing.
    Stay,
    Chosen(LoadedFile),
}

pub struct FileBrowser<'a, F: FileSystem> {
    fs: &'a F,
    cursor: DirectoryCursor,
    entries: Vec<BrowserEntry>,
    list: ChoiceList,
}

impl<'a, F: FileSystem> FileBrowser<'a, F> {
    pub fn open(
        fs: &'a F,
        start: DirectoryCursor,
        title: &str,
        error_ticks: u32,
    ) -> Result<Self, BrowseError> {
        let listing = list(fs, start.path())?;
        let entries = entries_for(&start, listing);
        let list = ChoiceList::new(title, body_for(&start), labels(&entries))
            .with_error_ticks(error_ticks);
        Ok(Self {
            fs,
            cursor: start,
            entries,
            list,
        })
    }

    /// Open at `start`, or when that fails at its nearest readable parent
    /// and then at `fallback`. The original failure is shown as a banner in
    /// whichever directory opened. Errors only when nothing can be listed.
    pub fn open_nearest(
        fs: &'a F,
        start: DirectoryCursor,
        fallback: &DirectoryCursor,
        title: &str,
        error_ticks: u32,
    ) -> Result<Self, BrowseError> {
        let err = match Self::open(fs, start.clone(), title, error_ticks) {
            Ok(browser) => return Ok(browser),
            Err(err) => err,
        };
        let candidates = start
            .path()
            .ancestors()
            .skip(1)
            .map(DirectoryCursor::new)
            .chain(std::iter::once(fallback.clone()));
        for candidate in candidates {
            if let Ok(mut browser) = Self::open(fs, candidate, title, error_ticks) {
                tracing::warn!(
                    error = %err,
                    opened = ?browser.cursor.path(),
                    "browse directory unavailable, opened fallback"
                );
                browser.list.set_error(err.banner_lines());
                return Ok(browser);
            }
        }
        Err(err)
    }

    pub fn cursor(&self) -> &DirectoryCursor {
        &self.cursor
    }

    pub fn list_mut(&mut self) -> &mut ChoiceList {
        &mut self.list
    }

    /// Act on the entry at `index`. Failures stay inside the browser as an
    /// error banner and leave the cursor where it was.
    pub fn select(&mut self, index: usize) -> BrowseStep {
        let Some(entry) = self.entries.get(index).cloned() else {
            return BrowseStep::Stay;
        };
        self.list.clear_error();

        let result = match entry {
            BrowserEntry::Up => self.enter(DirectoryCursor::new(self.cursor.parent())),
            BrowserEntry::Dir(name) => self.enter(DirectoryCursor::new(self.cursor.child(&name))),
            BrowserEntry::File(name) => match load_file(self.fs, &self.cursor.child(&name)) {
                Ok(file) => {
                    tracing::info!(path = ?file.path, lines = file.lines.len(), "file selected");
                    return BrowseStep::Chosen(file);
                }
                Err(err) => Err(err),
            },
        };

        if let Err(err) = result {
            tracing::warn!(error = %err, cursor = ?self.cursor.path(), "browse failed");
            self.list.set_error(err.banner_lines());
        }
        BrowseStep::Stay
    }

    fn enter(&mut self, target: DirectoryCursor) -> Result<(), BrowseError> {
        let listing = list(self.fs, target.path())?;
        tracing::debug!(path = ?target.path(), "entered directory");
        self.entries = entries_for(&target, listing);
        self.list.body = body_for(&target);
        self.list.set_choices(labels(&self.entries));
        self.cursor = target;
        Ok(())
    }
}

fn list<F: FileSystem>(fs: &F, path: &Path) -> Result<Vec<DirEntry>, BrowseError> {
    fs.list_dir(path).map_err(|source| BrowseError::ListDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Sorted entries, with the go-up entry first unless at the root.
fn entries_for(cursor: &DirectoryCursor, listing: Vec<DirEntry>) -> Vec<BrowserEntry> {
    let mut entries: Vec<BrowserEntry> = listing
        .into_iter()
        .map(|e| {
            if e.is_dir {
                BrowserEntry::Dir(e.name)
            } else {
                BrowserEntry::File(e.name)
            }
        })
        .collect();
    entries.sort_by_key(BrowserEntry::label);
    if !cursor.is_root() {
        entries.insert(0, BrowserEntry::Up);
    }
    entries
}

fn labels(entries: &[BrowserEntry]) -> Vec<String> {
    entries.iter().map(BrowserEntry::label).collect()
}

fn body_for(cursor: &DirectoryCursor) -> Vec<Vec<String>> {
    vec![
        vec!["Select a text file".to_string()],
        vec![format!("Path: {}", cursor.path().display())],
    ]
}
