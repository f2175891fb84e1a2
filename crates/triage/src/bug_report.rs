use crate::input::{read_input, split_pair, ContextArgs};
use crate::prelude::{eprintln, println, *};
use log::debug;
use std::path::PathBuf;
use triage_core::prompt::{BugReport, QaPair};
use triage_core::build_bug_report_prompt;

#[derive(Debug, clap::Parser)]
#[command(name = "bug-report")]
#[command(about = "Compose a bug-report triage prompt")]
pub struct App {
    #[command(flatten)]
    pub input: ContextArgs,

    /// User feedback describing the problem (overrides the context file)
    #[arg(long, env = "TRIAGE_FEEDBACK")]
    pub feedback: Option<String>,

    /// Testing instructions the user followed (overrides the context file)
    #[arg(long)]
    pub instructions: Option<String>,

    /// Earlier clarifying exchange as QUESTION=ANSWER, appended in order (repeatable)
    #[arg(long = "qa")]
    pub qa: Vec<String>,

    /// File holding an already rendered project description ("-" for stdin)
    #[arg(long)]
    pub project_details: Option<PathBuf>,
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let report = build_report(&app)?;

    debug!(
        "composing bug report: instructions={}, qa={}",
        report.user_instructions.is_some(),
        report.additional_qa.len()
    );

    let prompt = build_bug_report_prompt(&report);

    if global.verbose {
        eprintln!("Files: {}", report.files.files.len());
        eprintln!("Previous Q/A pairs: {}", report.additional_qa.len());
        eprintln!("Prompt length: {} chars", prompt.len());
    }

    println!("{}", prompt);

    Ok(())
}

/// Load the context and layer the command line overrides on top of it.
///
/// `--feedback` and `--instructions` replace the context values, `--qa` pairs are
/// appended after the context's transcript and `--project-details` replaces any
/// project section.
fn build_report(app: &App) -> Result<BugReport> {
    let mut ctx = app.input.load_context()?;

    if let Some(feedback) = &app.feedback {
        ctx.user_feedback = Some(feedback.clone());
    }
    if let Some(instructions) = &app.instructions {
        ctx.user_instructions = Some(instructions.clone());
    }
    for entry in &app.qa {
        let (question, answer) = split_pair(entry, "--qa", "QUESTION=ANSWER")?;
        ctx.additional_qa.push(QaPair::new(question, answer));
    }
    if let Some(path) = &app.project_details {
        ctx.project_details = Some(read_input(path)?);
    }

    let files = app.input.resolve_files(&ctx)?;
    let mut report = ctx.bug_report().map_err(Error::from)?;
    report.files = files;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use triage_core::prompt::ProjectBlock;
    use triage_core::ContextError;

    fn app(context: Option<PathBuf>) -> App {
        App {
            input: ContextArgs {
                context,
                ..Default::default()
            },
            feedback: None,
            instructions: None,
            qa: vec![],
            project_details: None,
        }
    }

    fn write_context(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("ctx.json");
        fs::write(
            &path,
            r#"{
                "user_feedback": "from context",
                "user_instructions": "context steps",
                "additional_qa": [{"question": "first", "answer": "one"}],
                "project_details": "context project"
            }"#,
        )
        .unwrap();
        path
    }

    // ============================================================================
    // Overrides
    // ============================================================================

    #[test]
    fn test_context_values_without_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let report = build_report(&app(Some(write_context(&temp_dir)))).unwrap();

        assert_eq!(report.user_feedback, "from context");
        assert_eq!(report.user_instructions.as_deref(), Some("context steps"));
        assert_eq!(report.additional_qa, vec![QaPair::new("first", "one")]);
        assert_eq!(report.project, ProjectBlock::Rendered("context project".to_string()));
    }

    #[test]
    fn test_flags_override_context() {
        let temp_dir = TempDir::new().unwrap();
        let details = temp_dir.path().join("project.md");
        fs::write(&details, "flag project\n").unwrap();

        let report = build_report(&App {
            feedback: Some("from flag".to_string()),
            instructions: Some("flag steps".to_string()),
            qa: vec!["second = two".to_string(), "third=three".to_string()],
            project_details: Some(details),
            ..app(Some(write_context(&temp_dir)))
        })
        .unwrap();

        assert_eq!(report.user_feedback, "from flag");
        assert_eq!(report.user_instructions.as_deref(), Some("flag steps"));
        assert_eq!(
            report.additional_qa,
            vec![
                QaPair::new("first", "one"),
                QaPair::new("second", "two"),
                QaPair::new("third", "three"),
            ]
        );
        assert_eq!(report.project, ProjectBlock::Rendered("flag project\n".to_string()));
    }

    #[test]
    fn test_feedback_flag_without_context() {
        let report = build_report(&App {
            feedback: Some("button broken".to_string()),
            ..app(None)
        })
        .unwrap();

        assert_eq!(report.user_feedback, "button broken");
        assert!(report.files.is_empty());
        assert_eq!(report.project, ProjectBlock::None);
    }

    // ============================================================================
    // Failures
    // ============================================================================

    #[test]
    fn test_missing_feedback_is_a_context_error() {
        let err = build_report(&app(None)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Context(ContextError::MissingFeedback))
        ));
    }

    #[test]
    fn test_malformed_qa_flag() {
        let err = build_report(&App {
            feedback: Some("x".to_string()),
            qa: vec!["no separator".to_string()],
            ..app(None)
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidArgument { flag: "--qa", .. })
        ));
    }

    #[test]
    fn test_missing_project_details_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = build_report(&App {
            feedback: Some("x".to_string()),
            project_details: Some(temp_dir.path().join("missing.md")),
            ..app(None)
        });
        assert!(result.is_err());
    }
}
