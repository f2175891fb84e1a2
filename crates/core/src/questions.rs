//! The fixed catalog of clarifying questions a triage assistant may ask, and
//! validation of the questions it actually picked.
//!
//! The assistant is told to ask the fewest questions necessary, only from the
//! catalog, in catalog order and never twice. [`validate_selection`] checks a
//! reply against exactly those rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One entry of the clarifying-question catalog. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarifyingQuestion {
    MoreInformation,
    FrontendLogs,
    BackendLogs,
    ExpectedBehavior,
    AffectedPage,
}

impl ClarifyingQuestion {
    /// The whole catalog, in the order questions must be asked.
    pub const ALL: [ClarifyingQuestion; 5] = [
        ClarifyingQuestion::MoreInformation,
        ClarifyingQuestion::FrontendLogs,
        ClarifyingQuestion::BackendLogs,
        ClarifyingQuestion::ExpectedBehavior,
        ClarifyingQuestion::AffectedPage,
    ];

    /// Exact wording shown to the assistant.
    pub fn text(self) -> &'static str {
        match self {
            ClarifyingQuestion::MoreInformation => {
                "Can you please provide more information on what exactly you mean?"
            }
            ClarifyingQuestion::FrontendLogs => "Can you please provide logs from the frontend?",
            ClarifyingQuestion::BackendLogs => "Can you please provide logs from the backend?",
            ClarifyingQuestion::ExpectedBehavior => {
                "What is the expected behavior and what is current behaviour?"
            }
            ClarifyingQuestion::AffectedPage => "On what page does the issue happen?",
        }
    }

    /// Zero-based position in the catalog.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Look a question up by its wording.
    ///
    /// Surrounding whitespace and double quotes are ignored, nothing else is.
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim().trim_matches('"').trim();
        Self::ALL.into_iter().find(|q| q.text() == text)
    }
}

impl fmt::Display for ClarifyingQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The area a piece of missing information belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Frontend,
    Backend,
    Database,
    Devops,
    Other,
}

/// One question the assistant wants answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingData {
    pub category: Category,
    pub question: String,
}

/// The assistant's structured reply to a bug-report prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReportResponse {
    #[serde(default)]
    pub missing_data: Vec<MissingData>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid response JSON: {0}")]
    InvalidJson(String),

    #[error("question #{index} is not in the catalog: {question:?}")]
    UnknownQuestion { index: usize, question: String },

    #[error("question #{index} repeats an earlier question: {question}")]
    Repeated {
        index: usize,
        question: ClarifyingQuestion,
    },

    #[error("question #{index} is out of catalog order: {question:?} cannot follow {after:?}")]
    OutOfOrder {
        index: usize,
        question: ClarifyingQuestion,
        after: ClarifyingQuestion,
    },
}

/// Parse an assistant reply, tolerating a surrounding ```json fence.
pub fn parse_response(text: &str) -> Result<BugReportResponse, SelectionError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| SelectionError::InvalidJson(e.to_string()))
}

/// Check that the selected questions form an ordered, duplicate-free subsequence
/// of the catalog. An empty selection means the report is already actionable.
pub fn validate_selection(
    selection: &[MissingData],
) -> Result<Vec<ClarifyingQuestion>, SelectionError> {
    let mut accepted: Vec<ClarifyingQuestion> = Vec::with_capacity(selection.len());

    for (index, entry) in selection.iter().enumerate() {
        let question = ClarifyingQuestion::from_text(&entry.question).ok_or_else(|| {
            SelectionError::UnknownQuestion {
                index,
                question: entry.question.clone(),
            }
        })?;

        if accepted.contains(&question) {
            return Err(SelectionError::Repeated { index, question });
        }

        if let Some(&after) = accepted.last() {
            if question < after {
                return Err(SelectionError::OutOfOrder {
                    index,
                    question,
                    after,
                });
            }
        }

        accepted.push(question);
    }

    Ok(accepted)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(category: Category, q: ClarifyingQuestion) -> MissingData {
        MissingData {
            category,
            question: q.text().to_string(),
        }
    }

    // ============================================================================
    // Catalog
    // ============================================================================

    #[test]
    fn test_catalog_order_matches_positions() {
        for (i, q) in ClarifyingQuestion::ALL.iter().enumerate() {
            assert_eq!(q.position(), i);
        }
    }

    #[test]
    fn test_from_text_round_trips_every_question() {
        for q in ClarifyingQuestion::ALL {
            assert_eq!(ClarifyingQuestion::from_text(q.text()), Some(q));
        }
    }

    #[test]
    fn test_from_text_ignores_quotes_and_whitespace() {
        assert_eq!(
            ClarifyingQuestion::from_text("  \"On what page does the issue happen?\"\n"),
            Some(ClarifyingQuestion::AffectedPage)
        );
    }

    #[test]
    fn test_from_text_rejects_paraphrase() {
        assert_eq!(
            ClarifyingQuestion::from_text("Which page has the issue?"),
            None
        );
    }

    // ============================================================================
    // validate_selection
    // ============================================================================

    #[test]
    fn test_empty_selection_is_valid() {
        assert_eq!(validate_selection(&[]), Ok(vec![]));
    }

    #[test]
    fn test_ordered_subsequence_is_accepted() {
        let selection = vec![
            ask(Category::General, ClarifyingQuestion::MoreInformation),
            ask(Category::Backend, ClarifyingQuestion::BackendLogs),
            ask(Category::Frontend, ClarifyingQuestion::AffectedPage),
        ];

        assert_eq!(
            validate_selection(&selection),
            Ok(vec![
                ClarifyingQuestion::MoreInformation,
                ClarifyingQuestion::BackendLogs,
                ClarifyingQuestion::AffectedPage,
            ])
        );
    }

    #[test]
    fn test_unknown_question_is_rejected() {
        let selection = vec![MissingData {
            category: Category::Database,
            question: "What database do you use?".to_string(),
        }];

        assert!(matches!(
            validate_selection(&selection),
            Err(SelectionError::UnknownQuestion { index: 0, .. })
        ));
    }

    #[test]
    fn test_repeated_question_is_rejected() {
        let selection = vec![
            ask(Category::Frontend, ClarifyingQuestion::FrontendLogs),
            ask(Category::Frontend, ClarifyingQuestion::FrontendLogs),
        ];

        assert_eq!(
            validate_selection(&selection),
            Err(SelectionError::Repeated {
                index: 1,
                question: ClarifyingQuestion::FrontendLogs,
            })
        );
    }

    #[test]
    fn test_out_of_order_question_is_rejected() {
        let selection = vec![
            ask(Category::Backend, ClarifyingQuestion::BackendLogs),
            ask(Category::Frontend, ClarifyingQuestion::FrontendLogs),
        ];

        assert_eq!(
            validate_selection(&selection),
            Err(SelectionError::OutOfOrder {
                index: 1,
                question: ClarifyingQuestion::FrontendLogs,
                after: ClarifyingQuestion::BackendLogs,
            })
        );
    }

    // ============================================================================
    // parse_response
    // ============================================================================

    #[test]
    fn test_parse_plain_json() {
        let text = r#"{"missing_data": [{"category": "frontend", "question": "Can you please provide logs from the frontend?"}]}"#;
        let response = parse_response(text).unwrap();

        assert_eq!(response.missing_data.len(), 1);
        assert_eq!(response.missing_data[0].category, Category::Frontend);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"missing_data\": []}\n```\n";
        assert_eq!(parse_response(text).unwrap(), BugReportResponse::default());
    }

    #[test]
    fn test_parse_missing_field_defaults() {
        assert_eq!(parse_response("{}").unwrap(), BugReportResponse::default());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_response("not json"),
            Err(SelectionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_unknown_category() {
        let text = r#"{"missing_data": [{"category": "cloud", "question": "x"}]}"#;
        assert!(parse_response(text).is_err());
    }
}
