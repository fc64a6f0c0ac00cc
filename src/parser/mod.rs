mod imports;
pub mod pubspec;

pub use imports::ImportExtractor;
pub use pubspec::{read_declared_dependencies, ManifestError};
