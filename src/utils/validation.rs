// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(SearchError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_top_k(top_k: usize) -> Result<()> {
        if top_k == 0 {
            return Err(SearchError::Validation(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if top_k > 1000 {
            return Err(SearchError::Validation(
                "top_k too large (max 1000)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_concurrency(concurrency: usize) -> Result<()> {
        if concurrency == 0 {
            return Err(SearchError::Validation(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if concurrency > 64 {
            return Err(SearchError::Validation(
                "Concurrency too large (max 64)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_corpus_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SearchError::Validation(format!(
                "Corpus file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(SearchError::Validation(format!(
                "Corpus path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Resolve agent identifiers, rejecting missing or blank values
    pub fn validate_agent_ids(
        agent_id: Option<&str>,
        agent_alias_id: Option<&str>,
    ) -> Result<(String, String)> {
        let agent_id = agent_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SearchError::Validation(
                    "agent.agent_id is not configured".to_string(),
                )
            })?;

        let agent_alias_id = agent_alias_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SearchError::Validation(
                    "agent.agent_alias_id is not configured".to_string(),
                )
            })?;

        Ok((agent_id.to_string(), agent_alias_id.to_string()))
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            text.to_string()
        } else {
            let truncated: String = text.chars().take(max_length).collect();
            format!("{}...", truncated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_content_not_empty() {
        assert!(Validator::validate_content_not_empty("content").is_ok());
        assert!(Validator::validate_content_not_empty("").is_err());
        assert!(Validator::validate_content_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_top_k() {
        assert!(Validator::validate_top_k(1).is_ok());
        assert!(Validator::validate_top_k(100).is_ok());
        assert!(Validator::validate_top_k(0).is_err());
        assert!(Validator::validate_top_k(1001).is_err());
    }

    #[test]
    fn test_validate_concurrency() {
        assert!(Validator::validate_concurrency(4).is_ok());
        assert!(Validator::validate_concurrency(0).is_err());
        assert!(Validator::validate_concurrency(65).is_err());
    }

    #[test]
    fn test_validate_corpus_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("corpus.txt");
        fs::write(&file_path, "one document per line").unwrap();

        assert!(Validator::validate_corpus_file(&file_path).is_ok());
        assert!(Validator::validate_corpus_file(Path::new("/nonexistent")).is_err());
        assert!(Validator::validate_corpus_file(temp.path()).is_err());
    }

    #[test]
    fn test_validate_agent_ids() {
        let resolved = Validator::validate_agent_ids(Some("TH1THHQ3EV"), Some("DDJBKJXA9I"));
        assert_eq!(
            resolved.unwrap(),
            ("TH1THHQ3EV".to_string(), "DDJBKJXA9I".to_string())
        );

        assert!(Validator::validate_agent_ids(None, Some("alias")).is_err());
        assert!(Validator::validate_agent_ids(Some("agent"), None).is_err());
        assert!(Validator::validate_agent_ids(Some("  "), Some("alias")).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("αβγδε", 3), "αβγ...");
    }
}
