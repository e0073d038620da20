//! Multipart upload payloads
//!
//! Every file goes under one repeated field name, in the order the caller
//! added it. Control flags such as `override_existing` are not part of the
//! payload; they travel as query parameters on the descriptor.

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::{Error, Result};

/// Field name the backend expects uploaded files under.
pub const DEFAULT_FILE_FIELD: &str = "files";

/// One file of an upload, held fully in memory.
#[derive(Debug, Clone)]
pub struct FilePart {
    file_name: String,
    content_type: Option<String>,
    content: Bytes,
}

impl FilePart {
    /// Create a part from in-memory content.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content: content.into(),
        }
    }

    /// Read a file from disk into a part named after the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the path has no file name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::InvalidRequest(format!("Path '{}' has no usable file name", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, content))
    }

    /// Set the MIME type sent for this part.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Get the file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the MIME type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the raw content.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.content.to_vec()).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| Error::InvalidRequest(format!("Invalid MIME type '{}': {}", mime, e))),
            None => Ok(part),
        }
    }
}

/// A multipart upload body.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    field_name: String,
    files: Vec<FilePart>,
    fields: Vec<(String, String)>,
}

impl Default for UploadPayload {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadPayload {
    /// Create an empty payload using [`DEFAULT_FILE_FIELD`].
    pub fn new() -> Self {
        Self {
            field_name: DEFAULT_FILE_FIELD.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Build a payload from a list of files, keeping their order.
    pub fn from_files(files: impl IntoIterator<Item = FilePart>) -> Self {
        Self::new().files(files)
    }

    /// Use a different repeated field name for the files.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Append one file.
    pub fn file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    /// Append several files.
    pub fn files(mut self, files: impl IntoIterator<Item = FilePart>) -> Self {
        self.files.extend(files);
        self
    }

    /// Append a scalar text field to the multipart body.
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    /// Get the repeated file field name.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Get the files in upload order.
    pub fn file_parts(&self) -> &[FilePart] {
        &self.files
    }

    /// Get the scalar text fields.
    pub fn text_fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Whether the payload carries no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all file contents in bytes.
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.content.len()).sum()
    }

    pub(crate) fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for file in self.files {
            form = form.part(self.field_name.clone(), file.into_part()?);
        }
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Query-string flags accepted by the upload endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOptions {
    /// Replace rows that already exist instead of skipping them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_existing: Option<bool>,
}

impl UploadOptions {
    /// Options that replace existing rows.
    pub fn overriding() -> Self {
        Self {
            override_existing: Some(true),
        }
    }
}
