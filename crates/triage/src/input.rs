use crate::prelude::*;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use triage_core::prompt::{FileContext, FileRecord};
use triage_core::{ContextFormat, PromptContext};

/// Where project files come from: a context file, files on disk, or both.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ContextArgs {
    /// Prompt context file (.json or .toml)
    #[arg(short, long, env = "TRIAGE_CONTEXT")]
    pub context: Option<PathBuf>,

    /// Read a project file from disk and include it (repeatable)
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,

    /// Mark a path as relevant to the task (repeatable)
    #[arg(short, long = "relevant")]
    pub relevant: Vec<String>,

    /// Describe a file as PATH=DESCRIPTION (repeatable)
    #[arg(short, long = "describe")]
    pub describe: Vec<String>,
}

impl ContextArgs {
    /// Load the context file, or an empty context when none was given.
    pub fn load_context(&self) -> Result<PromptContext> {
        match &self.context {
            Some(path) => load_context(path),
            None => Ok(PromptContext::default()),
        }
    }

    /// Combine the context's files with the command line ones.
    ///
    /// Files read from disk replace the content of context records with the same path,
    /// known and relevant alike. `--relevant` overrides any relevance the context carried.
    pub fn resolve_files(&self, ctx: &PromptContext) -> Result<FileContext> {
        let mut files = ctx.file_context();

        for path in &self.files {
            let record = read_file_record(path)?;
            for relevant in files
                .relevant
                .iter_mut()
                .flatten()
                .filter(|f| f.path == record.path)
            {
                relevant.content = record.content.clone();
            }
            match files.files.iter_mut().find(|f| f.path == record.path) {
                Some(existing) => existing.content = record.content,
                None => files.files.push(record),
            }
        }

        for entry in &self.describe {
            let (path, description) = split_pair(entry, "--describe", "PATH=DESCRIPTION")?;
            let mut described = false;
            for file in files
                .files
                .iter_mut()
                .chain(files.relevant.iter_mut().flatten())
                .filter(|f| f.path == path)
            {
                file.description = Some(description.clone());
                described = true;
            }
            if !described {
                warn!("--describe names unknown file {path}");
            }
        }

        if !self.relevant.is_empty() {
            files = FileContext::with_relevant_paths(files.files, &self.relevant);
        }

        for path in files.unknown_relevant_paths() {
            warn!("relevant file {path} is not among the known project files");
        }

        debug!(
            "resolved {} files ({} relevant)",
            files.files.len(),
            files.relevant.as_ref().map_or(0, Vec::len)
        );

        Ok(files)
    }
}

/// Read and parse a context file, picking the format from its extension.
pub fn load_context(path: &Path) -> Result<PromptContext> {
    let format = ContextFormat::from_path(path).map_err(Error::from)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| f!("Failed to read context file '{}'", path.display()))?;

    debug!("loading {format:?} context from {}", path.display());

    let ctx = PromptContext::parse(&text, format).map_err(Error::from)?;
    Ok(ctx)
}

/// Read a file from disk into a record keyed by the path as given.
pub fn read_file_record(path: &Path) -> Result<FileRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| f!("Failed to read file '{}'", path.display()))?;

    Ok(FileRecord::new(path.display().to_string(), content))
}

/// Read a path, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("Failed to read stdin");
    }

    std::fs::read_to_string(path).with_context(|| f!("Failed to read '{}'", path.display()))
}

/// Split `KEY=VALUE` on the first `=`. Both sides are trimmed and the key must be non-empty.
pub fn split_pair(
    value: &str,
    flag: &'static str,
    expected: &'static str,
) -> Result<(String, String)> {
    let invalid = || Error::InvalidArgument {
        flag,
        value: value.to_string(),
        expected,
    };

    let (key, rest) = value.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid().into());
    }

    Ok((key.to_string(), rest.trim().to_string()))
}
