//! PDF upload intake: pulls the `file` field out of a multipart form and
//! checks that it is a non-empty PDF within the configured size limit.

use axum::extract::{multipart::MultipartError, Multipart};
use axum::http::StatusCode;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub const FILE_FIELD: &str = "file";
pub const PDF_MIME: &str = "application/pdf";
const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Only PDF files are supported")]
    NotPdf,

    #[error("File exceeds the {limit_mb} MB upload limit")]
    TooLarge { limit_mb: usize },

    #[error("Malformed upload: {0}")]
    Malformed(String),
}

impl UploadError {
    fn from_multipart(err: MultipartError, max_bytes: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge {
                limit_mb: bytes_to_mb(max_bytes),
            }
        } else {
            UploadError::Malformed(err.body_text())
        }
    }
}

/// A validated PDF ready to be forwarded to the analysis service.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl PdfUpload {
    /// Accepts the file when it is declared as `application/pdf`, or when the
    /// client sent no useful type and the name ends in `.pdf`. The body must
    /// also carry the PDF signature.
    pub fn validate(
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
        max_bytes: usize,
    ) -> Result<Self, UploadError> {
        let file_name = file_name.trim();
        if file_name.is_empty() || bytes.is_empty() {
            return Err(UploadError::NoFileSelected);
        }

        if bytes.len() > max_bytes {
            return Err(UploadError::TooLarge {
                limit_mb: bytes_to_mb(max_bytes),
            });
        }

        let declared_pdf = match content_type.map(str::trim) {
            Some(PDF_MIME) => true,
            None | Some("") | Some("application/octet-stream") => {
                file_name.to_ascii_lowercase().ends_with(".pdf")
            }
            Some(_) => false,
        };

        if !declared_pdf || !bytes.starts_with(PDF_SIGNATURE) {
            return Err(UploadError::NotPdf);
        }

        Ok(Self {
            file_name: file_name.to_string(),
            bytes,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Size in megabytes with two decimals, e.g. `"0.25 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }
}

/// Reads the first `file` field of a multipart form and validates it.
/// Other fields are skipped.
pub async fn read_pdf_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<PdfUpload, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::from_multipart(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::from_multipart(e, max_bytes))?;

        return PdfUpload::validate(&file_name, content_type.as_deref(), bytes, max_bytes);
    }

    Err(UploadError::MissingFile)
}

fn bytes_to_mb(bytes: usize) -> usize {
    bytes / (1024 * 1024)
}
