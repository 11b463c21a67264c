use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::errors::MatchError;

pub const JOB_TEXT_FIELD: &str = "job_text";
pub const RESUME_FILE_FIELD: &str = "resume";
pub const RESUME_TEXT_FIELD: &str = "resume_text";

/// Accepted resume extensions and the MIME type each is sent with.
const RESUME_MIME_TYPES: &[(&str, &str)] = &[
    (".pdf", "application/pdf"),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".txt", "text/plain"),
];

/// A resume picked from disk. Only the extension is checked, never the content.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
    pub mime: &'static str,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, MatchError> {
        let file_name = file_name.into();
        let mime = mime_for(&file_name)
            .ok_or_else(|| MatchError::UnsupportedFile(file_name.clone()))?;
        Ok(Self {
            file_name,
            bytes: bytes.into(),
            mime,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, MatchError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MatchError::UnsupportedFile(path.display().to_string()))?
            .to_string();
        // Reject before reading so a wrong pick never loads a large file.
        if mime_for(&file_name).is_none() {
            return Err(MatchError::UnsupportedFile(file_name));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let lower = file_name.to_lowercase();
    RESUME_MIME_TYPES
        .iter()
        .find(|(ext, _)| lower.ends_with(ext))
        .map(|(_, mime)| *mime)
}

/// Where the resume comes from. A file always wins over pasted text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    File(ResumeFile),
    Text(String),
}

/// The resume + job description payload sent to the scoring service.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest {
    pub job_text: String,
    pub resume: ResumeSource,
}

impl MatchRequest {
    /// Applies the precedence rule: a selected file replaces any typed resume text.
    pub fn new(resume_text: &str, file: Option<&ResumeFile>, job_text: &str) -> Self {
        let resume = match file {
            Some(f) => ResumeSource::File(f.clone()),
            None => ResumeSource::Text(resume_text.to_string()),
        };
        Self {
            job_text: job_text.to_string(),
            resume,
        }
    }

    /// Multipart field names in the order they are appended.
    pub fn field_names(&self) -> [&'static str; 2] {
        let resume_field = match self.resume {
            ResumeSource::File(_) => RESUME_FILE_FIELD,
            ResumeSource::Text(_) => RESUME_TEXT_FIELD,
        };
        [JOB_TEXT_FIELD, resume_field]
    }

    pub fn into_form(self) -> Result<Form, MatchError> {
        let form = Form::new().text(JOB_TEXT_FIELD, self.job_text);
        let form = match self.resume {
            ResumeSource::File(file) => form.part(
                RESUME_FILE_FIELD,
                Part::stream_with_length(file.bytes.clone(), file.bytes.len() as u64)
                    .file_name(file.file_name)
                    .mime_str(file.mime)?,
            ),
            ResumeSource::Text(text) => form.text(RESUME_TEXT_FIELD, text),
        };
        Ok(form)
    }
}
