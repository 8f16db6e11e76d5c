//! Filename validation and path resolution.
//!
//! [`resolve`] is the sole sanitization boundary: every filesystem path the
//! server touches is produced here, from the base name of client input joined
//! beneath the storage root.

use std::path::{Path, PathBuf};

/// The single file extension the API accepts.
pub const ALLOWED_EXTENSION: &str = "xlsx";

/// Resolve a client-supplied filename to a path inside the storage root.
///
/// Only the base name of `file_name` is kept; directory components,
/// including `..` segments, are discarded. Pure function, no I/O.
#[must_use]
pub fn resolve(root: &Path, file_name: &str) -> PathBuf {
    let base = Path::new(file_name)
        .file_name()
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    root.join(base)
}

/// Check that a filename's lowercased extension is the allowed one.
#[must_use]
pub fn is_xlsx(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ALLOWED_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_name() {
        let root = Path::new("/srv/storage");
        assert_eq!(
            resolve(root, "data.xlsx"),
            PathBuf::from("/srv/storage/data.xlsx")
        );
    }

    #[test]
    fn test_resolve_strips_traversal_segments() {
        let root = Path::new("/srv/storage");
        for input in [
            "../data.xlsx",
            "../../etc/data.xlsx",
            "/etc/data.xlsx",
            "a/b/../data.xlsx",
            "..\\data.xlsx", // backslash is part of the base name on unix, still no separator
        ] {
            let resolved = resolve(root, input);
            assert_eq!(resolved.parent(), Some(root), "input: {input}");
        }
    }

    #[test]
    fn test_resolve_keeps_base_name_only() {
        let root = Path::new("/srv/storage");
        assert_eq!(
            resolve(root, "../../secret.xlsx"),
            PathBuf::from("/srv/storage/secret.xlsx")
        );
    }

    #[test]
    fn test_is_xlsx() {
        assert!(is_xlsx("report.xlsx"));
        assert!(is_xlsx("REPORT.XLSX"));
        assert!(is_xlsx("a.b.xlsx"));

        assert!(!is_xlsx(""));
        assert!(!is_xlsx("report"));
        assert!(!is_xlsx("report.txt"));
        assert!(!is_xlsx("report.xlsx.txt"));
        assert!(!is_xlsx(".xlsx")); // hidden file, no extension
    }
}
