// 📎 Uploads - type checks for images (document editor) and PDFs (PDF editor)
// Files are only checked by MIME type / extension. Contents are never read.

use crate::errors::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    /// MIME type reported by the picker; may be empty
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Pdf,
}

impl UploadKind {
    /// What the picker asks for, as shown in error messages
    pub fn expected(&self) -> &'static str {
        match self {
            UploadKind::Image => "an image (image/*)",
            UploadKind::Pdf => "a PDF file (.pdf)",
        }
    }
}

impl FileUpload {
    pub fn new(name: &str, mime: &str, size_bytes: u64) -> Self {
        FileUpload {
            name: name.to_string(),
            mime: mime.to_string(),
            size_bytes,
        }
    }

    /// Build from a local path, guessing the MIME type from the extension
    pub fn from_path(path: &Path, size_bytes: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = guess_mime(&name).unwrap_or_default();
        FileUpload {
            name,
            mime: mime.to_string(),
            size_bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Size in megabytes with one decimal, e.g. "1.5 MB"
    pub fn size_label(&self) -> String {
        format!("{:.1} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }

    pub fn is_kind(&self, kind: UploadKind) -> bool {
        let mime = self.mime.trim().to_lowercase();
        let ext = self.extension();

        match kind {
            UploadKind::Image => {
                mime.starts_with("image/")
                    || ext.is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            }
            UploadKind::Pdf => mime == "application/pdf" || ext.as_deref() == Some("pdf"),
        }
    }
}

/// Accept `upload` if it is of the requested kind
pub fn accept(kind: UploadKind, upload: FileUpload) -> Result<FileUpload> {
    if upload.is_kind(kind) {
        tracing::info!(file = %upload.name, size = upload.size_bytes, "upload accepted");
        Ok(upload)
    } else {
        tracing::warn!(file = %upload.name, mime = %upload.mime, "upload rejected");
        Err(HubError::unsupported(&upload.name, kind.expected()))
    }
}

fn guess_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_string_lossy().to_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_by_mime_or_extension() {
        assert!(accept(UploadKind::Image, FileUpload::new("photo", "image/png", 10)).is_ok());
        assert!(accept(UploadKind::Image, FileUpload::new("logo.JPG", "", 10)).is_ok());
        assert!(accept(UploadKind::Image, FileUpload::new("cv.pdf", "application/pdf", 10)).is_err());
    }

    #[test]
    fn test_pdf_only_for_pdf_editor() {
        assert!(accept(UploadKind::Pdf, FileUpload::new("form.pdf", "", 0)).is_ok());
        assert!(accept(UploadKind::Pdf, FileUpload::new("scan", "application/pdf", 0)).is_ok());

        let err = accept(UploadKind::Pdf, FileUpload::new("notes.docx", "", 0)).unwrap_err();
        assert_eq!(err, HubError::unsupported("notes.docx", "a PDF file (.pdf)"));
    }

    #[test]
    fn test_from_path_guesses_mime() {
        let upload = FileUpload::from_path(Path::new("/tmp/contract.pdf"), 2048);
        assert_eq!(upload.name, "contract.pdf");
        assert_eq!(upload.mime, "application/pdf");
        assert!(upload.is_kind(UploadKind::Pdf));
    }

    #[test]
    fn test_size_label() {
        assert_eq!(FileUpload::new("a.pdf", "", 1_572_864).size_label(), "1.5 MB");
        assert_eq!(FileUpload::new("a.pdf", "", 0).size_label(), "0.0 MB");
    }
}
