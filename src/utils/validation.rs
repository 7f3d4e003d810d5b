use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use validator::Validate;

use crate::error::{Error, Result};

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Same loose shape check the interview form applies to ad-hoc interviewers.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"))
        .is_match(email)
}

/// Candidate documents accept PDF, images and Word files.
pub const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx"];

/// MIME type derived from the file extension, the way a browser file input reports it.
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Rejects a file before any upload request is built.
pub fn check_upload(file_name: &str, mime_type: &str, size: u64, max_bytes: u64) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = mime_type.trim().to_ascii_lowercase();

    if !DOCUMENT_MIME_TYPES.contains(&mime.as_str())
        || !DOCUMENT_EXTENSIONS.contains(&extension.as_str())
    {
        return Err(Error::Validation(
            "Invalid file type. Please upload a PDF, JPG, PNG, DOC or DOCX file".to_string(),
        ));
    }
    if size == 0 {
        return Err(Error::Validation("The selected file is empty".to_string()));
    }
    if size > max_bytes {
        return Err(Error::Validation(format!(
            "File size must be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

    const MB: u64 = 1024 * 1024;

    fn check(file_name: &str, mime_type: &str, size: u64) -> Result<()> {
        check_upload(file_name, mime_type, size, DEFAULT_MAX_UPLOAD_BYTES)
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jane.doe@corp.example"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("jane@corp"));
        assert!(!is_valid_email("jane doe@corp.io"));
        assert!(!is_valid_email("jane@@corp.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn document_uploads_respect_allow_list_and_size() {
        assert!(check("degree.pdf", "application/pdf", MB).is_ok());
        assert!(check("degree.PDF", "application/pdf", 5 * MB).is_ok());
        assert!(check("degree.pdf", "application/pdf", 5 * MB + 1).is_err());
        assert!(check("setup.exe", "application/x-msdownload", MB).is_err());
        assert!(check("notes.txt", "text/plain", 10).is_err());
        // A renamed executable keeps failing on the MIME check.
        assert!(check("cv.pdf", "application/x-msdownload", 10).is_err());
        assert!(check("empty.pdf", "application/pdf", 0).is_err());
    }

    #[test]
    fn rejection_messages() {
        let err = check("photo.webp", "image/webp", MB).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Invalid file type. Please upload a PDF, JPG, PNG, DOC or DOCX file"
        );
        let err = check("scan.png", "image/png", 6 * MB).unwrap_err();
        assert_eq!(err.user_message(), "File size must be less than 5MB");
    }

    #[test]
    fn mime_guess() {
        assert_eq!(guess_mime_type(Path::new("a/b/cv.DOCX")), Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"));
        assert_eq!(guess_mime_type(Path::new("noext")), None);
    }
}
