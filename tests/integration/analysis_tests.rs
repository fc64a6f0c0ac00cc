//! Integration tests for the pubsweep analysis pipeline
//!
//! Each test builds a scratch Dart project with tempfile and runs the
//! full analyzer over it.

use pubsweep::Analyzer;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("create parent dirs");
    fs::write(path, contents).expect("write fixture file");
}

fn pubspec_with(deps: &[&str], dev_deps: &[&str]) -> String {
    let mut doc = String::from("name: fixture_app\nversion: 1.0.0\n");
    if !deps.is_empty() {
        doc.push_str("dependencies:\n");
        for dep in deps {
            doc.push_str(&format!("  {dep}: ^1.0.0\n"));
        }
    }
    if !dev_deps.is_empty() {
        doc.push_str("dev_dependencies:\n");
        for dep in dev_deps {
            doc.push_str(&format!("  {dep}: ^1.0.0\n"));
        }
    }
    doc
}

#[test]
fn test_unused_dependency_reported() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http", "collection"], &[]));
    write_file(root, "lib/main.dart", "import 'package:http/http.dart';\n\nvoid main() {}\n");

    let result = Analyzer::new().analyze(root).unwrap();

    let unused: Vec<_> = result.unused_dependencies.iter().cloned().collect();
    assert_eq!(unused, vec!["collection"]);
}

#[test]
fn test_used_dependencies_never_reported() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http"], &[]));
    write_file(root, "lib/main.dart", "import 'package:http/http.dart';\n");

    let result = Analyzer::new().analyze(root).unwrap();
    assert!(result.unused_dependencies.is_empty());
}

#[test]
fn test_unused_file_detection() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&[], &[]));
    // x imports y, so y is referenced; nothing mentions x
    write_file(root, "lib/x.dart", "import 'y.dart';\n\nvoid main() {}\n");
    write_file(root, "lib/y.dart", "class Y {}\n");

    let result = Analyzer::new().analyze(root).unwrap();

    assert!(result.unused_files.contains(&PathBuf::from("lib/x.dart")));
    assert!(!result.unused_files.contains(&PathBuf::from("lib/y.dart")));
}

#[test]
fn test_sole_file_is_always_unused() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&[], &[]));
    write_file(root, "lib/only.dart", "void main() {}\n");

    let result = Analyzer::new().analyze(root).unwrap();
    assert_eq!(result.unused_files.len(), 1);
    assert!(result.unused_files.contains(&PathBuf::from("lib/only.dart")));
}

#[test]
fn test_test_files_count_for_dependencies_but_not_as_referrers() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http"], &["mockito"]));
    write_file(root, "lib/main.dart", "import 'package:http/http.dart';\n");
    write_file(
        root,
        "test/main_test.dart",
        "import 'package:mockito/mockito.dart';\nimport 'package:fixture_app/main.dart';\n",
    );

    let result = Analyzer::new().analyze(root).unwrap();

    // mockito is imported from the test file, so it is used
    assert!(result.unused_dependencies.is_empty());

    // main.dart is mentioned by the test file, but test files are not
    // referrers, so it still counts as unused among its production peers
    assert!(result.unused_files.contains(&PathBuf::from("lib/main.dart")));

    // and test files are never candidates themselves
    assert!(!result
        .unused_files
        .contains(&PathBuf::from("test/main_test.dart")));
}

#[test]
fn test_reference_inside_string_counts_as_used() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&[], &[]));
    write_file(
        root,
        "lib/a.dart",
        "void main() {\n  print('see helper.dart');\n}\n",
    );
    write_file(root, "lib/helper.dart", "int helper() => 1;\n");

    let result = Analyzer::new().analyze(root).unwrap();

    // substring containment is the contract: a mention inside a string
    // literal keeps the file alive
    assert!(!result.unused_files.contains(&PathBuf::from("lib/helper.dart")));
}

#[test]
fn test_ignore_pattern_excludes_files_everywhere() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&[], &[]));
    write_file(root, "lib/main.dart", "void main() {}\n");
    write_file(root, "lib/generated/models.dart", "class Models {}\n");

    let without_ignore = Analyzer::new().analyze(root).unwrap();
    assert!(without_ignore
        .unused_files
        .contains(&PathBuf::from("lib/generated/models.dart")));

    let with_ignore = Analyzer::new()
        .with_ignore_patterns(vec!["**/generated/**".to_string()])
        .analyze(root)
        .unwrap();
    assert!(!with_ignore
        .unused_files
        .contains(&PathBuf::from("lib/generated/models.dart")));

    // membership of non-ignored files is unaffected
    assert!(with_ignore
        .unused_files
        .contains(&PathBuf::from("lib/main.dart")));
}

#[test]
fn test_ignored_files_do_not_contribute_imports() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http"], &[]));
    write_file(root, "lib/main.dart", "void main() {}\n");
    write_file(
        root,
        "lib/generated/client.dart",
        "import 'package:http/http.dart';\n",
    );

    let result = Analyzer::new()
        .with_ignore_patterns(vec!["**/generated/**".to_string()])
        .analyze(root)
        .unwrap();

    // the only import of http lives in an ignored file
    assert!(result.unused_dependencies.contains("http"));
}

#[test]
fn test_cache_dir_is_invisible() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["hidden_pkg"], &[]));
    write_file(root, "lib/main.dart", "void main() {}\n");
    write_file(
        root,
        ".dart_tool/flutter_build/generated_main.dart",
        "import 'package:hidden_pkg/hidden.dart';\n// main.dart\n",
    );

    let result = Analyzer::new().analyze(root).unwrap();

    // the cache file neither contributes imports nor acts as a referrer
    assert!(result.unused_dependencies.contains("hidden_pkg"));
    assert!(result.unused_files.contains(&PathBuf::from("lib/main.dart")));
    assert_eq!(result.unused_files.len(), 1);
}

#[test]
fn test_missing_manifest_aborts() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "lib/main.dart", "void main() {}\n");

    let err = Analyzer::new().analyze(temp.path()).unwrap_err();
    assert!(err.to_string().contains("pubspec.yaml not found"));
}

#[test]
fn test_malformed_manifest_aborts() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "pubspec.yaml", "dependencies: just a string\n");
    write_file(temp.path(), "lib/main.dart", "void main() {}\n");

    let err = Analyzer::new().analyze(temp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn test_analysis_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http", "yaml"], &[]));
    write_file(root, "lib/main.dart", "import 'package:http/http.dart';\nimport 'app.dart';\n");
    write_file(root, "lib/app.dart", "class App {}\n");
    write_file(root, "lib/orphan.dart", "class Orphan {}\n");

    let first = Analyzer::new().analyze(root).unwrap();
    let second = Analyzer::new().analyze(root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http", "collection"], &["mockito"]));
    write_file(root, "lib/main.dart", "import 'package:http/http.dart';\nimport 'app.dart';\n");
    write_file(root, "lib/app.dart", "import 'screens/home.dart';\n");
    write_file(root, "lib/screens/home.dart", "class Home {}\n");
    write_file(root, "lib/orphan.dart", "class Orphan {}\n");
    write_file(root, "test/app_test.dart", "import 'package:mockito/mockito.dart';\n");

    let sequential = Analyzer::new().analyze(root).unwrap();
    let parallel = Analyzer::new().with_parallel(true).analyze(root).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_empty_project_reports_all_dependencies_unused() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "pubspec.yaml", &pubspec_with(&["http", "yaml"], &[]));

    let result = Analyzer::new().analyze(root).unwrap();
    assert_eq!(result.unused_dependencies.len(), 2);
    assert!(result.unused_files.is_empty());
}
