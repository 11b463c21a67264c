use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::form::MatchForm;
use crate::models::ResumeFile;

/// Score a resume against a job description using a remote scoring service.
#[derive(Parser, Debug)]
#[command(name = "matcher", version, about)]
pub struct Cli {
    /// Root URL of the scoring service (overrides MATCHER_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a resume and a job description and print the match score
    Match(MatchArgs),

    /// Check that the scoring service is up
    Health,
}

#[derive(Args, Debug, Default)]
pub struct MatchArgs {
    /// Resume file to upload (.pdf, .docx or .txt). Takes precedence over resume text.
    #[arg(long)]
    pub resume_file: Option<PathBuf>,

    /// Resume pasted as text
    #[arg(long, conflicts_with = "resume_text_file")]
    pub resume_text: Option<String>,

    /// Read the pasted resume text from a file
    #[arg(long)]
    pub resume_text_file: Option<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "job_file")]
    pub job_text: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the service's recommendations
    #[arg(long)]
    pub recommendations: bool,
}

impl MatchArgs {
    /// Fills a fresh form from the flags, reading any referenced files.
    /// Text files are taken verbatim.
    pub async fn to_form(&self) -> Result<MatchForm> {
        let mut form = MatchForm::new();

        let resume_text = match (&self.resume_text, &self.resume_text_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_text(path).await?,
            (None, None) => String::new(),
        };
        form.set_resume_text(resume_text);

        if let Some(path) = &self.resume_file {
            let file = ResumeFile::from_path(path)
                .await
                .with_context(|| format!("Failed to load resume file {}", path.display()))?;
            form.set_file(file);
        }

        let job_text = match (&self.job_text, &self.job_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_text(path).await?,
            (None, None) => String::new(),
        };
        form.set_job_text(job_text);

        Ok(form)
    }
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
