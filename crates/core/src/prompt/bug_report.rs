use super::files::render_file_listing;
use super::project::render_project_block;
use super::types::{BugReport, QaPair};
use crate::questions::ClarifyingQuestion;

const FRAMING: &str = "You're working on a new app and the user has just been testing it.";

const CLOSING: &str = "\
Your job is to decide whether the feedback gives you enough information to solve the problem. \
If it does, do not ask any questions. If it does not, ask for the information you are missing.

When choosing questions, keep the following in mind:
- After the user answers, you must be able to solve the problem.
- Note the category each missing piece belongs to (\"general\", \"frontend\", \"backend\", \"database\", \"devops\", \"other\").
- The user is not very technical. They must be able to answer without looking at the code, so never ask how something is implemented or for code snippets.
- Ask only for information you actually need, in clear, short questions.
- Ask the least amount of questions that gets you the information you need.
- Ask only questions from the list below.
- Ask them in the same order as they appear in the list.
- Never repeat a question.

Here is the list of questions you can ask:";

/// Compose the bug-report triage prompt.
///
/// Sections appear in a fixed order separated by a blank line. Testing instructions,
/// the Q/A transcript, the project section and the file listing are left out entirely
/// when there is nothing to show; the user feedback section is always present.
pub fn build_bug_report_prompt(report: &BugReport) -> String {
    let mut parts = vec![FRAMING.to_string()];

    let project = render_project_block(&report.project);
    if !project.is_empty() {
        parts.push(project);
    }

    if !report.files.is_empty() {
        parts.push(render_file_listing(&report.files));
    }

    if let Some(instructions) = report.user_instructions.as_deref().filter(|i| !i.is_empty()) {
        parts.push(format!(
            "The user was given instructions on how to test if the app is working correctly. \
             Here are the instructions:\n```\n{}\n```",
            instructions
        ));
    }

    parts.push(format!(
        "The user wrote this feedback:\n```\n{}\n```",
        report.user_feedback
    ));

    if !report.additional_qa.is_empty() {
        parts.push(format!(
            "Here are questions and answers that you already asked the user:\n```\n{}\n```",
            qa_transcript(&report.additional_qa)
        ));
    }

    parts.push(format!("{CLOSING}\n{}", question_list()));

    parts.join("\n\n")
}

fn qa_transcript(qa: &[QaPair]) -> String {
    qa.iter()
        .map(|pair| format!("Q: {}\nA: {}", pair.question, pair.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

fn question_list() -> String {
    ClarifyingQuestion::ALL
        .iter()
        .map(|q| format!("\"{}\"", q.text()))
        .collect::<Vec<_>>()
        .join("\n")
}
