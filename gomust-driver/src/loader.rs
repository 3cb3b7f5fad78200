//! Package loading
//!
//! Resolves the command-line inputs to a concrete file set, parses each
//! file, and groups them into one read-only `Package` for the generator.
//! Loading completes fully before any scanning begins; nothing downstream
//! re-enters the filesystem.

use gomust_common::GenError;
use gomust_frontend::{Frontend, Package};
use std::fs;
use std::path::PathBuf;

/// Resolve the input paths to the .go files of one package. A single
/// directory argument expands to its non-recursive `.go` files minus
/// `_test.go` files, sorted by name; explicit files are taken in argument
/// order.
fn resolve_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, GenError> {
    if inputs.len() == 1 && inputs[0].is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(&inputs[0])? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_file() && name.ends_with(".go") && !name.ends_with("_test.go") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Ok(inputs.to_vec())
    }
}

/// Load and parse the requested package. Zero files, or files disagreeing
/// on the package clause, fail with `NoPackageFound`.
pub fn load_package(inputs: &[PathBuf]) -> Result<Package, GenError> {
    let files = resolve_files(inputs)?;
    if files.is_empty() {
        return Err(GenError::NoPackageFound);
    }

    let mut parsed = Vec::with_capacity(files.len());
    for path in &files {
        let filename = path.display().to_string();
        log::debug!("loading {}", filename);
        let source = fs::read_to_string(path)?;
        parsed.push(Frontend::parse_file(&filename, &source)?);
    }

    let name = parsed[0].package_name.clone();
    if parsed.iter().any(|file| file.package_name != name) {
        return Err(GenError::NoPackageFound);
    }

    log::debug!("loaded package {} ({} files)", name, parsed.len());
    Ok(Package {
        name,
        files: parsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_directory_excludes_tests() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.go", "package p\n");
        write(dir.path(), "b.go", "package p\n");
        write(dir.path(), "a_test.go", "package p\n\nfunc broken(");
        write(dir.path(), "notes.txt", "not go");

        let pkg = load_package(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(pkg.name, "p");
        assert_eq!(pkg.files.len(), 2);
        assert!(pkg.files[0].filename.ends_with("a.go"));
        assert!(pkg.files[1].filename.ends_with("b.go"));
    }

    #[test]
    fn test_load_explicit_files_in_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = write(dir.path(), "b.go", "package p\n");
        let a = write(dir.path(), "a.go", "package p\n");

        let pkg = load_package(&[b, a]).unwrap();
        assert!(pkg.files[0].filename.ends_with("b.go"));
        assert!(pkg.files[1].filename.ends_with("a.go"));
    }

    #[test]
    fn test_empty_directory_is_no_package() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_package(&[dir.path().to_path_buf()]).unwrap_err();
        assert_eq!(err, GenError::NoPackageFound);
    }

    #[test]
    fn test_no_inputs_is_no_package() {
        let err = load_package(&[]).unwrap_err();
        assert_eq!(err, GenError::NoPackageFound);
    }

    #[test]
    fn test_package_name_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.go", "package one\n");
        let b = write(dir.path(), "b.go", "package two\n");

        let err = load_package(&[a, b]).unwrap_err();
        assert_eq!(err, GenError::NoPackageFound);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_package(&[PathBuf::from("/no/such/file.go")]).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }

    #[test]
    fn test_parse_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.go", "func f() {}\n");

        let err = load_package(&[bad]).unwrap_err();
        assert!(matches!(err, GenError::Parse { .. }));
    }
}
