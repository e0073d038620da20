//! Saving binary exports
//!
//! A [`DownloadSink`] persists a [`BlobResponse`] under a file name. The
//! bundled [`DirectorySink`] writes into a directory through a hidden
//! temporary file that is renamed into place once fully written, so a
//! partially written export never carries the final name.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::{BlobResponse, RequestDescriptor};

/// Persists a downloaded payload.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Store `blob` under `filename` and return where it ended up.
    async fn save(&self, blob: &BlobResponse, filename: &str) -> Result<PathBuf>;
}

/// Sink that writes files into one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Write into `dir`, creating it on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, blob: &BlobResponse, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;

        fs::create_dir_all(&self.dir).await?;

        let target = self.dir.join(filename);
        let staging = self.dir.join(format!(".{}.part", filename));

        if let Err(e) = fs::write(&staging, blob.body()).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        fs::rename(&staging, &target).await?;

        tracing::info!(
            path = %target.display(),
            bytes = blob.body().len(),
            "Saved download"
        );
        Ok(target)
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
        || filename.contains('\0');

    if invalid {
        return Err(Error::InvalidRequest(format!(
            "'{}' is not a plain file name",
            filename
        )));
    }
    Ok(())
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// An RFC 5987 `filename*=UTF-8''...` parameter wins over a plain
/// `filename=`. Directory components are stripped.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_parameters(header).into_iter().map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };

        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let value = value.trim();
                let encoded = match value.split_once("''") {
                    Some((charset, rest)) if charset.eq_ignore_ascii_case("utf-8") => rest,
                    Some(_) => continue,
                    None => value,
                };
                extended = urlencoding::decode(encoded).ok().map(|s| s.into_owned());
            }
            "filename" => {
                plain = Some(unquote(value.trim()));
            }
            _ => {}
        }
    }

    extended
        .or(plain)
        .map(|name| {
            name.rsplit(['/', '\\'])
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .filter(|name| !name.is_empty())
}

/// Split a header value on `;` outside of quoted strings.
fn split_parameters(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in header.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

/// Drop the surrounding quotes of a quoted-string and undo `\` escapes.
fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"') else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => break,
            _ => out.push(c),
        }
    }
    out
}

impl Client {
    /// Run a binary call and save a successful result through `sink`.
    ///
    /// The file name comes from `Content-Disposition`, falling back to
    /// `fallback_name`.
    ///
    /// # Errors
    ///
    /// A failure status is classified and reported like any JSON call and
    /// returned as [`Error::Api`]; nothing is written in that case.
    pub async fn download(
        &self,
        request: RequestDescriptor,
        sink: &dyn DownloadSink,
        fallback_name: &str,
    ) -> Result<PathBuf> {
        let blob = self.send_blob(request).await?;

        if !blob.is_success() {
            return Err(self.reject_blob(blob));
        }

        let filename = blob
            .suggested_filename()
            .unwrap_or_else(|| fallback_name.to_string());
        sink.save(&blob, &filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseEnvelope;
    use http::{HeaderMap, StatusCode};

    fn blob(body: &'static [u8]) -> BlobResponse {
        ResponseEnvelope::new(StatusCode::OK, HeaderMap::new(), body).into_blob()
    }

    #[test]
    fn test_plain_filename() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="nav_export.xlsx""#),
            Some("nav_export.xlsx".to_string())
        );
        assert_eq!(
            filename_from_content_disposition("attachment; filename=nav.csv"),
            Some("nav.csv".to_string())
        );
    }

    #[test]
    fn test_extended_filename_wins() {
        let header = "attachment; filename=\"export.xlsx\"; filename*=UTF-8''%E5%87%80%E5%80%BC.xlsx";
        assert_eq!(
            filename_from_content_disposition(header),
            Some("净值.xlsx".to_string())
        );
    }

    #[test]
    fn test_filename_strips_directories() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
        assert_eq!(filename_from_content_disposition("inline"), None);
        assert_eq!(filename_from_content_disposition(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_semicolon_inside_quoted_filename() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="nav;2024.xlsx""#),
            Some("nav;2024.xlsx".to_string())
        );
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="a;b.csv"; size=42"#),
            Some("a;b.csv".to_string())
        );
    }

    #[test]
    fn test_escaped_quote_in_filename() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="q3 \"final\".xlsx""#),
            Some(r#"q3 "final".xlsx"#.to_string())
        );
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="x\";y.csv""#),
            Some(r#"x";y.csv"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_directory_sink_writes_and_renames() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));

        let path = sink.save(&blob(b"PK\x03\x04"), "strategies.xlsx").await.unwrap();

        assert_eq!(path, dir.path().join("exports").join("strategies.xlsx"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"PK\x03\x04");
        assert!(!dir.path().join("exports").join(".strategies.xlsx.part").exists());
    }

    #[tokio::test]
    async fn test_directory_sink_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        for name in ["", "..", "a/b.xlsx", "a\\b.xlsx"] {
            let result = sink.save(&blob(b"x"), name).await;
            assert!(matches!(result, Err(Error::InvalidRequest(_))), "{name:?}");
        }
    }
}
