//! Directory scanning for the discovery driver.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::emit::normalize;
use crate::error::ScanError;
use crate::syntax::discover_file;

/// Discover controllers in every `*.rs` file under `dir`, recursively.
///
/// Returns the identifiers sorted and deduplicated. Entries that cannot be
/// walked, files that cannot be read and files that do not parse are skipped
/// with a warning; only a missing `dir` is an error.
pub fn scan_directory(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingInputDirectory(dir.to_path_buf()));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %ScanError::from(err), "skipping directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "rs") {
            continue;
        }
        match scan_file(path) {
            Ok(controllers) => found.extend(controllers),
            Err(err) => tracing::warn!(error = %err, "skipping unreadable file"),
        }
    }

    let found = normalize(found);
    tracing::debug!(count = found.len(), dir = %dir.display(), "scan finished");
    Ok(found)
}

/// Controllers declared in one source file, in declaration order.
///
/// A file that does not parse yields nothing; one that cannot be read as
/// UTF-8 text is [`ScanError::ReadFile`].
pub fn scan_file(path: &Path) -> Result<Vec<String>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    match syn::parse_file(&content) {
        Ok(file) => {
            let found = discover_file(&file);
            tracing::debug!(file = %path.display(), controllers = ?found, "scanned");
            Ok(found)
        }
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "skipping unparsable file");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_is_reported() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("controllers");
        assert!(matches!(
            scan_directory(&missing),
            Err(ScanError::MissingInputDirectory(path)) if path == missing
        ));
    }

    #[test]
    fn scans_nested_rust_files_only() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("admin")).unwrap();
        fs::write(
            tmp.path().join("users.rs"),
            "#[controller(\"users\")]\nimpl UserController {}\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("admin/audit.rs"),
            "impl ControllerDiscoverable for AuditController {}\nimpl ControllerDiscoverable for UserController {}\n",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "impl ControllerDiscoverable for Ignored {}").unwrap();

        let found = scan_directory(tmp.path()).unwrap();
        assert_eq!(found, ["AuditController", "UserController"]);
    }

    #[test]
    fn unparsable_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.rs"), "impl {{{ nope").unwrap();
        fs::write(tmp.path().join("ok.rs"), "impl ControllerDiscoverable for Ok {}").unwrap();
        assert_eq!(scan_directory(tmp.path()).unwrap(), ["Ok"]);
    }

    #[test]
    fn non_utf8_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.rs"), "impl ControllerDiscoverable for A {}").unwrap();
        fs::write(tmp.path().join("b.rs"), [0xff, 0xfe, 0x78]).unwrap();

        assert!(matches!(
            scan_file(&tmp.path().join("b.rs")),
            Err(ScanError::ReadFile { .. })
        ));
        assert_eq!(scan_directory(tmp.path()).unwrap(), ["A"]);
    }
}
