use serde::{Deserialize, Deserializer, Serialize};

/// Read `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One project file as tracked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Project-relative path. The only identity a record has.
    pub path: String,
    /// Full text content of the file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Optional one-line summary of what the file contains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of lines in the content, counted the way `str::lines` does.
    ///
    /// Empty content has zero lines and a trailing newline does not open a new one,
    /// so `"x=1\n"` is a single line.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// The description as supplied. An empty string counts as no description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// The files known to the project and, optionally, the subset relevant to the task.
///
/// `relevant` being `Some` switches the listing into "relevant files" mode: every known
/// path is listed, but only the relevant files have their content dumped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
    pub files: Vec<FileRecord>,
    pub relevant: Option<Vec<FileRecord>>,
}

impl FileContext {
    /// All known files, no relevance filter.
    pub fn all(files: Vec<FileRecord>) -> Self {
        Self {
            files,
            relevant: None,
        }
    }

    /// Known files plus the records whose path appears in `paths`.
    ///
    /// Relevant records keep the order of `files`; paths that match nothing are ignored.
    pub fn with_relevant_paths<S: AsRef<str>>(files: Vec<FileRecord>, paths: &[S]) -> Self {
        let relevant = files
            .iter()
            .filter(|file| paths.iter().any(|p| p.as_ref() == file.path))
            .cloned()
            .collect();

        Self {
            files,
            relevant: Some(relevant),
        }
    }

    /// True when there is nothing to list: no known files and no relevance filter.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.relevant.is_none()
    }

    /// Relevant paths that are not among the known files.
    ///
    /// Rendering does not reject these; callers decide whether to care.
    pub fn unknown_relevant_paths(&self) -> Vec<&str> {
        match &self.relevant {
            Some(relevant) => relevant
                .iter()
                .filter(|r| !self.files.iter().any(|f| f.path == r.path))
                .map(|r| r.path.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// A question previously asked of the user together with their answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A named dependency with a one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// High level description of the project under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_dependencies: Vec<Dependency>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub package_dependencies: Vec<Dependency>,
}

/// Where the project-details section of a bug report comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectBlock {
    /// No project section at all.
    #[default]
    None,
    /// Render from structured details.
    Details(ProjectDetails),
    /// Text produced elsewhere, inserted verbatim.
    Rendered(String),
}

/// Everything needed to compose a bug-report triage prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugReport {
    pub project: ProjectBlock,
    pub files: FileContext,
    /// Testing instructions the user was given, if any.
    pub user_instructions: Option<String>,
    /// What the user reported. Always rendered, even when empty.
    pub user_feedback: String,
    /// Earlier clarifying questions and their answers, oldest first.
    pub additional_qa: Vec<QaPair>,
}

impl BugReport {
    pub fn new(user_feedback: impl Into<String>) -> Self {
        Self {
            user_feedback: user_feedback.into(),
            ..Default::default()
        }
    }

    /// Set testing instructions. An empty string leaves them unset.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.user_instructions = if instructions.is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    pub fn with_files(mut self, files: FileContext) -> Self {
        self.files = files;
        self
    }

    pub fn with_project(mut self, project: ProjectBlock) -> Self {
        self.project = project;
        self
    }

    pub fn with_qa(mut self, qa: QaPair) -> Self {
        self.additional_qa.push(qa);
        self
    }
}
