use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::i18n::Language;

/// One data line keyed by header name, in header order.
pub type CsvRow = IndexMap<String, String>;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please upload a CSV file ({0})")]
    NotCsv(String),

    #[error("No file selected")]
    NoFile,

    #[error("Failed to process the CSV file. Please check the format. ({0})")]
    Unreadable(#[source] std::io::Error),

    #[error("Failed to process the CSV file. Please check the format. (not UTF-8)")]
    Encoding,
}

impl UploadError {
    /// Short inline message shown next to the drop zone.
    pub fn inline_key(&self) -> &'static str {
        match self {
            UploadError::NotCsv(_) => "upload.notCsv",
            UploadError::NoFile => "upload.noFile",
            UploadError::Unreadable(_) | UploadError::Encoding => "upload.failed",
        }
    }
}

/// Accept a file by name or MIME type only; content is never inspected.
pub fn is_csv(name: &str, mime: Option<&str>) -> bool {
    mime == Some("text/csv") || name.ends_with(".csv")
}

/// Split `text` into rows keyed by the first line's headers.
///
/// Blank lines are skipped. A line with fewer values than headers leaves the
/// trailing keys out; values beyond the last header are dropped. Repeated
/// header names keep the last value. Quoting is not understood: a comma
/// inside quotes still splits the field.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let mut lines = text.split('\n');
    let headers: Vec<&str> = match lines.next() {
        Some(first) => first.split(',').map(str::trim).collect(),
        None => return Vec::new(),
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            headers
                .iter()
                .zip(line.split(',').map(str::trim))
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style notification. The caller decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

/// The upload panel: at most one selected file, an inline error, and an
/// upload action that is only enabled while a valid file is selected.
#[derive(Debug)]
pub struct CsvUpload {
    language: Language,
    file: Option<SelectedFile>,
    error: Option<String>,
}

impl CsvUpload {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            file: None,
            error: None,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pick a file. A non-CSV name clears the selection and sets the inline
    /// error; picking again after a rejection is always allowed.
    pub fn select(&mut self, path: &Path, mime: Option<&str>) -> Result<(), UploadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_csv(&name, mime) {
            tracing::info!(file = %name, "upload rejected: not a CSV file");
            let err = UploadError::NotCsv(name);
            self.file = None;
            self.error = Some(self.language.t(err.inline_key()));
            return Err(err);
        }
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        self.file = Some(SelectedFile {
            path: path.to_path_buf(),
            name,
            size,
        });
        self.error = None;
        Ok(())
    }

    /// Read and parse the selected file, hand the rows to `on_upload`, and
    /// return the success notice. On failure the callback is not invoked,
    /// the inline error is set and the file stays selected so the user can
    /// retry or pick another one.
    pub fn upload(&mut self, on_upload: impl FnOnce(Vec<CsvRow>)) -> Result<Notice, UploadError> {
        let Some(file) = self.file.as_ref() else {
            return Err(UploadError::NoFile);
        };
        match read_rows(&file.path) {
            Ok(rows) => {
                let count = rows.len();
                tracing::info!(file = %file.name, rows = count, "CSV file processed");
                on_upload(rows);
                self.error = None;
                Ok(Notice::success(
                    self.language.t("upload.processed"),
                    self.language
                        .t("upload.processedDesc")
                        .replace("{count}", &count.to_string()),
                ))
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "CSV upload failed");
                self.error = Some(self.language.t(err.inline_key()));
                Err(err)
            }
        }
    }

    /// The notification that accompanies a failed upload.
    pub fn failure_notice(&self) -> Notice {
        Notice::error(
            self.language.t("upload.errorTitle"),
            self.language.t("upload.errorDesc"),
        )
    }
}

fn read_rows(path: &Path) -> Result<Vec<CsvRow>, UploadError> {
    let bytes = std::fs::read(path).map_err(UploadError::Unreadable)?;
    let text = String::from_utf8(bytes).map_err(|_| UploadError::Encoding)?;
    Ok(parse_csv(&text))
}
