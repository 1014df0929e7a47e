//! Pulls the review result JSON out of the model's terminal free-text
//! reply.
//!
//! The model is instructed to return a single bare object, but replies are
//! routinely wrapped in prose or formatting. The candidate payload is the
//! substring from the first `{` to the last `}` inclusive; anything else
//! is a typed error for the caller to degrade on.

use thiserror::Error;

use revet_types::{Issue, ReviewResult};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model reply")]
    NoJsonObject,

    #[error("failed to parse extracted JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extract and normalize the review result from a terminal reply.
///
/// A decoded object maps directly onto `ReviewResult`; a decoded array is
/// treated as the issue list with an empty summary.
pub fn review_result(raw: &str) -> Result<ReviewResult, ExtractError> {
    let start = raw.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    let value: serde_json::Value = serde_json::from_str(&raw[start..=end])?;
    match value {
        serde_json::Value::Array(_) => {
            let issues: Vec<Issue> = serde_json::from_value(value)?;
            Ok(ReviewResult::from_issues(issues))
        }
        _ => Ok(serde_json::from_value(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let raw = r#"Here is the result: {"summary":{"total_files_analyzed":2},"issues":[]} thanks"#;

        let result = review_result(raw).unwrap();
        assert_eq!(result.summary.total_files_analyzed, 2);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn text_without_braces_is_a_typed_error() {
        let err = review_result("No issues found, great job!").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonObject));
    }

    #[test]
    fn reversed_braces_are_a_typed_error() {
        let err = review_result("} nothing here {").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonObject));
    }

    #[test]
    fn unparseable_candidate_is_a_parse_error() {
        let err = review_result("prefix { not json } suffix").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn issues_and_summary_fields_are_normalized() {
        let raw = r#"{"summary":{"total_files_analyzed":1,"total_issues":1,"critical":1},
            "issues":[{"file":"a.py","line_start":3,"line_end":3,"severity":"CRITICAL",
            "category":"SECURITY","comment":"hardcoded secret","suggested_fix":"use env"}]}"#;

        let result = review_result(raw).unwrap();
        assert_eq!(result.summary.critical, 1);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].category, "SECURITY");
        assert_eq!(result.issues[0].suggested_fix.as_deref(), Some("use env"));
    }

    #[test]
    fn multiline_payload_with_surrounding_prose_parses() {
        let raw = "warning first\n{\"summary\":{\"total_files_analyzed\":1,\"total_issues\":0,\
                   \"critical\":0,\"major\":0,\"minor\":0},\"issues\":[]}\ntrailing note";

        let result = review_result(raw).unwrap();
        assert_eq!(result.summary.total_files_analyzed, 1);
    }
}
