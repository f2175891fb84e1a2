pub mod bug_report;
pub mod files;
pub mod project;
pub mod types;

pub use bug_report::build_bug_report_prompt;
pub use files::{render_file_listing, END_OF_FILES, START_OF_FILES};
pub use project::{render_project_block, render_project_details};
pub use types::{
    BugReport, Dependency, FileContext, FileRecord, ProjectBlock, ProjectDetails, QaPair,
};
