//! Prompt context as it arrives from the outside world.
//!
//! [`PromptContext`] mirrors the loose, everything-optional shape callers hand
//! over (JSON or TOML). It is converted into the typed [`FileContext`] and
//! [`BugReport`] inputs before anything is rendered.

use crate::prompt::types::{
    null_as_default, BugReport, FileContext, FileRecord, ProjectBlock, ProjectDetails, QaPair,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid JSON context: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML context: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported context file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("context has no user_feedback")]
    MissingFeedback,
}

/// Serialization format of a context file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFormat {
    Json,
    Toml,
}

impl ContextFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ContextError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(ContextFormat::Json),
            Some("toml") => Ok(ContextFormat::Toml),
            _ => Err(ContextError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// The "relevant files" switch: either a plain flag or the list of relevant paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelevantFiles {
    Flag(bool),
    Paths(Vec<String>),
}

impl Default for RelevantFiles {
    fn default() -> Self {
        RelevantFiles::Flag(false)
    }
}

impl RelevantFiles {
    pub fn is_set(&self) -> bool {
        match self {
            RelevantFiles::Flag(flag) => *flag,
            RelevantFiles::Paths(paths) => !paths.is_empty(),
        }
    }
}

/// Loose prompt context. Every field is optional and defaults to absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptContext {
    #[serde(deserialize_with = "null_as_default")]
    pub relevant_files: RelevantFiles,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<FileRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub relevant_file_objects: Vec<FileRecord>,
    pub user_instructions: Option<String>,
    pub user_feedback: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_qa: Vec<QaPair>,
    /// Structured project description.
    pub project: Option<ProjectDetails>,
    /// Already rendered project description. Wins over `project` when both are given.
    pub project_details: Option<String>,
}

impl PromptContext {
    pub fn from_json(text: &str) -> Result<Self, ContextError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, ContextError> {
        Ok(toml::from_str(text)?)
    }

    pub fn parse(text: &str, format: ContextFormat) -> Result<Self, ContextError> {
        match format {
            ContextFormat::Json => Self::from_json(text),
            ContextFormat::Toml => Self::from_toml(text),
        }
    }

    /// The typed file context.
    ///
    /// When relevance is given as a list of paths and no relevant records were supplied,
    /// the records are picked out of `files` by path.
    pub fn file_context(&self) -> FileContext {
        if !self.relevant_files.is_set() {
            return FileContext::all(self.files.clone());
        }

        match &self.relevant_files {
            RelevantFiles::Paths(paths) if self.relevant_file_objects.is_empty() => {
                FileContext::with_relevant_paths(self.files.clone(), paths)
            }
            _ => FileContext {
                files: self.files.clone(),
                relevant: Some(self.relevant_file_objects.clone()),
            },
        }
    }

    pub fn project_block(&self) -> ProjectBlock {
        if let Some(text) = self.project_details.as_ref().filter(|t| !t.is_empty()) {
            return ProjectBlock::Rendered(text.clone());
        }

        match &self.project {
            Some(details) => ProjectBlock::Details(details.clone()),
            None => ProjectBlock::None,
        }
    }

    /// The typed bug report. Fails only when there is no feedback at all.
    pub fn bug_report(&self) -> Result<BugReport, ContextError> {
        let feedback = self
            .user_feedback
            .as_ref()
            .ok_or(ContextError::MissingFeedback)?;

        let mut report = BugReport::new(feedback.clone())
            .with_project(self.project_block())
            .with_files(self.file_context());

        if let Some(instructions) = &self.user_instructions {
            report = report.with_instructions(instructions.clone());
        }
        report.additional_qa = self.additional_qa.clone();

        Ok(report)
    }
}
