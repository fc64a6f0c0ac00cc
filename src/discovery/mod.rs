mod file_finder;

pub use file_finder::{ClassifiedFiles, FileFinder, FileScope, SourceFile};
