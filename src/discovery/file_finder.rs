use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Scope of a discovered Dart source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileScope {
    Production,
    Test,
}

impl FileScope {
    /// Determine scope from a path relative to the project root.
    ///
    /// A directory component named `test` or `integration_test` anywhere
    /// above the file marks it as test scope. The file name itself does
    /// not participate, so `lib/test.dart` stays production.
    pub fn from_relative_path(path: &Path) -> Self {
        let in_test_dir = path
            .parent()
            .map(|dir| {
                dir.components().any(|c| {
                    matches!(
                        c.as_os_str().to_str(),
                        Some("test") | Some("integration_test")
                    )
                })
            })
            .unwrap_or(false);

        if in_test_dir {
            FileScope::Test
        } else {
            FileScope::Production
        }
    }
}

/// Represents a discovered Dart source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Scope derived from the directory layout
    pub scope: FileScope,
}

impl SourceFile {
    pub fn new(path: PathBuf, scope: FileScope) -> Self {
        Self { path, scope }
    }

    /// Load and return owned contents
    pub fn read_contents(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }

    /// Base file name, the token other files are scanned for
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Project files split by scope
#[derive(Debug, Default)]
pub struct ClassifiedFiles {
    pub production: Vec<SourceFile>,
    pub test: Vec<SourceFile>,
}

impl ClassifiedFiles {
    pub fn total(&self) -> usize {
        self.production.len() + self.test.len()
    }
}

/// Pub build cache directory, never scanned
const CACHE_DIR: &str = ".dart_tool";

/// File finder for discovering Dart sources in a project
pub struct FileFinder;

impl FileFinder {
    pub fn new() -> Self {
        Self
    }

    /// Find every `.dart` file under `root`, split into production and
    /// test scope.
    ///
    /// Both result vectors are sorted by path, so callers never depend
    /// on the OS directory iteration order.
    pub fn classify(&self, root: &Path) -> ClassifiedFiles {
        debug!("Scanning for Dart files in: {}", root.display());

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| entry.file_name() != CACHE_DIR)
            .build();

        let mut files = ClassifiedFiles::default();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("dart") {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            let scope = FileScope::from_relative_path(relative);
            trace!("Found {:?}: {}", scope, path.display());

            let file = SourceFile::new(path.to_path_buf(), scope);
            match scope {
                FileScope::Production => files.production.push(file),
                FileScope::Test => files.test.push(file),
            }
        }

        files.production.sort_by(|a, b| a.path.cmp(&b.path));
        files.test.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            "Found {} production and {} test files",
            files.production.len(),
            files.test.len()
        );
        files
    }
}

impl Default for FileFinder {
    fn default() -> Self {
        Self::new()
    }
}
