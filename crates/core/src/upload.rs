//! Upload rules: accepted MIME types, size cap and stored-filename shape.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum upload size in megabytes.
pub const MAX_UPLOAD_MB: u64 = 10;

/// Maximum upload size in bytes (inclusive).
pub const MAX_UPLOAD_BYTES: u64 = MAX_UPLOAD_MB * 1024 * 1024;

/// URL prefix uploaded files are served under.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "text/markdown",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.\-]").expect("valid regex"));

pub fn is_allowed_type(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

pub fn is_allowed_size(size_bytes: u64) -> bool {
    size_bytes <= MAX_UPLOAD_BYTES
}

/// Reject a file whose type is not on the allow-list.
pub fn validate_file_type(mime_type: &str) -> Result<(), CoreError> {
    if !is_allowed_type(mime_type) {
        return Err(CoreError::Validation(
            "Invalid file type. Allowed: images, PDFs, text files, Word documents".into(),
        ));
    }
    Ok(())
}

/// Reject a file larger than [`MAX_UPLOAD_BYTES`].
pub fn validate_file_size(size_bytes: u64) -> Result<(), CoreError> {
    if !is_allowed_size(size_bytes) {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum size is {MAX_UPLOAD_MB}MB"
        )));
    }
    Ok(())
}

/// Replace every character outside `[a-zA-Z0-9.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Name a file is stored under: `{unix_millis}-{sanitized original name}`.
pub fn stored_filename(original: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{}", sanitize_filename(original))
}

/// Public URL for a stored file.
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_and_documents_allowed() {
        assert!(is_allowed_type("image/png"));
        assert!(is_allowed_type("application/pdf"));
        assert!(is_allowed_type("text/markdown"));
    }

    #[test]
    fn zip_rejected() {
        assert!(!is_allowed_type("application/zip"));
        assert!(validate_file_type("application/zip").is_err());
    }

    #[test]
    fn size_cap_is_inclusive() {
        assert!(is_allowed_size(MAX_UPLOAD_BYTES));
        assert!(!is_allowed_size(MAX_UPLOAD_BYTES + 1));
        assert!(validate_file_size(11 * 1024 * 1024).is_err());
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename("report-v2.pdf"), "report-v2.pdf");
    }

    #[test]
    fn stored_name_and_url() {
        let name = stored_filename("a b.txt", 1_700_000_000_000);
        assert_eq!(name, "1700000000000-a_b.txt");
        assert_eq!(public_url(&name), "/uploads/1700000000000-a_b.txt");
    }
}
