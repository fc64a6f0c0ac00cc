use regex::Regex;
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Prefix of Dart built-in libraries; never a pubspec dependency
const SDK_PREFIX: &str = "dart:";

/// Extracts referenced package names from Dart import directives.
///
/// Matching is line-oriented and deliberately shallow: two anchored
/// patterns, no tokenization. Imports split over several lines, imports
/// inside block comments, and interpolated strings are not understood.
pub struct ImportExtractor {
    package_import: Regex,
    plain_import: Regex,
}

impl ImportExtractor {
    pub fn new() -> Self {
        Self {
            package_import: Regex::new(r#"^import ["']package:([^"']+)["']"#)
                .expect("valid package import pattern"),
            plain_import: Regex::new(r#"^import ["']([^"']+)["']"#)
                .expect("valid plain import pattern"),
        }
    }

    /// Extract the set of top-level package names referenced by `contents`.
    ///
    /// The `package:` form wins over the plain form on any given line;
    /// lines matching neither contribute nothing.
    pub fn extract(&self, contents: &str) -> HashSet<String> {
        let mut packages = HashSet::new();

        for line in contents.lines() {
            if let Some(caps) = self.package_import.captures(line) {
                if let Some(name) = caps[1].split('/').next() {
                    packages.insert(name.to_string());
                }
            } else if let Some(caps) = self.plain_import.captures(line) {
                let import_path = &caps[1];
                if import_path.starts_with(SDK_PREFIX) {
                    continue;
                }
                if let Some(first) = import_path.split('/').next() {
                    if !first.is_empty() && !first.starts_with('.') {
                        packages.insert(first.to_string());
                    }
                }
            }
        }

        packages
    }

    /// Read `path` and extract its referenced packages.
    ///
    /// I/O failures surface to the caller; the batch caller decides
    /// whether to abort or skip the file.
    pub fn extract_file(&self, path: &Path) -> io::Result<HashSet<String>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(self.extract(&contents))
    }
}

impl Default for ImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}
