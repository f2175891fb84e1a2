//! Core library for triage
//!
//! This crate is the **Functional Core** of the triage tool: it turns project
//! state and user feedback into the text prompts handed to a coding assistant.
//! The `triage` binary is the Imperative Shell that reads files, parses
//! arguments and prints.
//!
//! All functions here are pure. The same input always renders byte-identical
//! output, nothing is logged and nothing touches the filesystem, so every
//! behavior is tested with inline fixture data.
//!
//! # Module Organization
//!
//! - [`prompt`]: file listing, project details and bug-report prompt rendering
//! - [`context`]: loose JSON/TOML prompt context and its conversion to typed inputs
//! - [`questions`]: the fixed clarifying-question catalog and reply validation
//!
//! # Example Usage
//!
//! ```rust
//! use triage_core::prompt::{build_bug_report_prompt, BugReport, FileContext, FileRecord};
//!
//! let files = vec![FileRecord::new("src/app.js", "start();\n").with_description("entry point")];
//! let report = BugReport::new("The save button does nothing")
//!     .with_files(FileContext::with_relevant_paths(files, &["src/app.js"]));
//!
//! let prompt = build_bug_report_prompt(&report);
//! assert!(prompt.contains("* `src/app.js: entry point`"));
//! assert!(prompt.contains("---START_OF_FILES---"));
//! ```

pub mod context;
pub mod prompt;
pub mod questions;

pub use context::{ContextError, ContextFormat, PromptContext, RelevantFiles};
pub use prompt::{build_bug_report_prompt, render_file_listing};
pub use questions::{validate_selection, ClarifyingQuestion, SelectionError};
