//! Files selected for upload and their local validation.

use std::path::Path;

use reqwest::multipart::Part;

use crate::error::ApiError;

const MIB: usize = 1024 * 1024;

/// Largest avatar the profile endpoint accepts.
pub const MAX_AVATAR_BYTES: usize = 5 * MIB;

/// Largest product image the media service accepts.
pub const MAX_PRODUCT_IMAGE_BYTES: usize = 2 * MIB;

const AVATAR_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];
const PRODUCT_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// A file held in memory, ready to be sent as a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the content type from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Client(format!("cannot read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let content_type = content_type_for(&file_name).to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check the file against the avatar rules.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` with the message shown to the user.
    pub fn validate_avatar(&self) -> Result<(), ApiError> {
        if !AVATAR_TYPES.contains(&self.content_type.as_str()) {
            return Err(ApiError::Validation(
                "Invalid file format. Please use JPG, PNG, GIF, or WebP.".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(ApiError::Validation(
                "File is empty. Please select a valid image.".to_string(),
            ));
        }
        if self.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::Validation(
                "File is too large. Maximum size is 5MB.".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the file against the product image rules.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` naming the offending file.
    pub fn validate_product_image(&self) -> Result<(), ApiError> {
        if !PRODUCT_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(ApiError::Validation(format!(
                "Invalid file format for {}. Please use JPG, PNG, or WebP.",
                self.file_name
            )));
        }
        if self.is_empty() {
            return Err(ApiError::Validation(format!(
                "File {} is empty. Please select a valid image.",
                self.file_name
            )));
        }
        if self.len() > MAX_PRODUCT_IMAGE_BYTES {
            return Err(ApiError::Validation(format!(
                "File {} is too large. Maximum size is 2MB.",
                self.file_name
            )));
        }
        Ok(())
    }

    /// Convert into a multipart part carrying the file name and MIME type.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the content type is not a valid MIME type.
    pub fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| ApiError::Client(e.to_string()))
    }
}

/// MIME type for a file name, by extension.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
