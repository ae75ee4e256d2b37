use std::path::Path;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::{Error, Result};

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "jpg", "png"];

pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Drops any directory part a client may send along with the name.
pub fn sanitize_file_name(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    last.trim().to_string()
}

pub fn ensure_allowed_extension(file_name: &str) -> Result<()> {
    match file_extension(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(Error::BadRequest(format!("File type .{} is not allowed", ext))),
        None => Err(Error::BadRequest(format!(
            "File '{}' has no extension; allowed: {}",
            file_name,
            ALLOWED_EXTENSIONS.join(", ")
        ))),
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    match file_extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// `Content-Disposition` value for a download: an ASCII `filename` for old
/// clients plus the exact name as RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    // form encoding turns spaces into `+` and keeps `*`; neither is an attr-char
    let encoded = url::form_urlencoded::byte_serialize(file_name.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A");
    format!("attachment; filename=\"{}\"; filename*=UTF-8''{}", fallback, encoded)
}

pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Pulls the `file` part out of a multipart body. Other parts are skipped;
/// a part with no file name counts as "nothing selected".
pub async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = sanitize_file_name(field.file_name().unwrap_or_default());
        let data = field.bytes().await?;
        if file_name.is_empty() {
            return Ok(None);
        }
        return Ok(Some(UploadedFile { file_name, data }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_case_insensitive() {
        assert!(ensure_allowed_extension("resume.PDF").is_ok());
        assert!(ensure_allowed_extension("photo.Png").is_ok());
        assert!(ensure_allowed_extension("cv.docx").is_ok());
    }

    #[test]
    fn rejects_other_types() {
        assert!(matches!(
            ensure_allowed_extension("notes.txt"),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            ensure_allowed_extension("photo.jpeg"),
            Err(Error::BadRequest(_))
        ));
        assert!(ensure_allowed_extension("README").is_err());
    }

    #[test]
    fn strips_client_directories() {
        assert_eq!(sanitize_file_name(r"C:\Users\hr\简历.pdf"), "简历.pdf");
        assert_eq!(sanitize_file_name("/tmp/r.pdf"), "r.pdf");
        assert_eq!(sanitize_file_name("r.pdf"), "r.pdf");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[test]
    fn disposition_carries_ascii_fallback_and_utf8_name() {
        assert_eq!(
            content_disposition("简历.pdf"),
            "attachment; filename=\"__.pdf\"; filename*=UTF-8''%E7%AE%80%E5%8E%86.pdf"
        );
        assert_eq!(
            content_disposition("my \"cv\" v2*.pdf"),
            "attachment; filename=\"my _cv_ v2*.pdf\"; filename*=UTF-8''my%20%22cv%22%20v2%2A.pdf"
        );
    }
}
