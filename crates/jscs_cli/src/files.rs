//! File traversal for the CLI.

use crate::lint_warn;
use glob::Paths;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A list of ignored-by-default directory/file names.
const IGNORED: [&str; 1] = ["node_modules"];
/// Extensions of files the checker runs on.
const CHECKED_FILES: [&str; 2] = ["js", "mjs"];

/// A loaded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFile {
    pub source: String,
    pub path: PathBuf,
}

/// The structure responsible for loading the files a run operates on.
#[derive(Debug, Clone, Default)]
pub struct FileWalker {
    pub files: HashMap<PathBuf, JsFile>,
}

impl FileWalker {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every checkable file under a compiled glob pattern, skipping
    /// unreadable entries with a warning.
    pub fn from_glob(paths: Paths) -> Self {
        let mut files = HashMap::new();
        for entry in paths.filter_map(Result::ok) {
            if is_ignored(&entry) {
                continue;
            }
            let walker = WalkDir::new(&entry)
                .into_iter()
                .filter_entry(|e| !IGNORED.contains(&&*e.file_name().to_string_lossy()));
            for file in walker.filter_map(Result::ok) {
                let path = file.path();
                if !path.is_file() || !has_checked_extension(path) {
                    continue;
                }
                match read_to_string(path) {
                    Ok(source) => {
                        files.insert(
                            path.to_owned(),
                            JsFile {
                                source,
                                path: path.to_owned(),
                            },
                        );
                    }
                    Err(err) => {
                        lint_warn!("failed to read file {}: {}", path.display(), err);
                    }
                }
            }
        }
        Self { files }
    }
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .map(|name| IGNORED.contains(&&*name.to_string_lossy()))
        .unwrap_or(false)
}

fn has_checked_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| CHECKED_FILES.contains(&&*ext.to_string_lossy()))
        .unwrap_or(false)
}
