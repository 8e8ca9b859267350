// file: src/models/search_result.rs
// description: Search result model with similarity scores
// reference: Used for vector similarity search results

use crate::models::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based rank within the returned result sequence
    pub rank: usize,

    /// Cosine similarity score (higher is more similar, typically 0.0-1.0)
    pub score: f32,

    /// The matched document
    pub document: Document,
}

impl SearchResult {
    pub fn new(rank: usize, score: f32, document: Document) -> Self {
        Self {
            rank,
            score,
            document,
        }
    }

    /// Format as a ranked display row, truncating long document text
    pub fn format_row(&self, max_content_len: usize) -> String {
        let preview: String = if self.document.char_count() > max_content_len {
            let truncated: String = self.document.text.chars().take(max_content_len).collect();
            format!("{}...", truncated)
        } else {
            self.document.text.clone()
        };

        format!("{}. Score: {:.4} | {}", self.rank, self.score, preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(text: &str) -> Document {
        Document::new(0, text.to_string())
    }

    #[test]
    fn test_search_result_creation() {
        let result = SearchResult::new(1, 0.95, document("Test content"));

        assert_eq!(result.rank, 1);
        assert_eq!(result.score, 0.95);
        assert_eq!(result.document.text, "Test content");
    }

    #[test]
    fn test_format_row_four_decimal_score() {
        let result = SearchResult::new(2, 0.87, document("AWS Lambda lets you run code"));
        let row = result.format_row(300);

        assert_eq!(row, "2. Score: 0.8700 | AWS Lambda lets you run code");
    }

    #[test]
    fn test_format_row_truncates_long_text() {
        let result = SearchResult::new(1, 0.5, document("this is a very long content line"));
        let row = result.format_row(10);

        assert!(row.contains("this is a ..."));
        assert!(!row.contains("very long content"));
    }

    #[test]
    fn test_format_row_multibyte_safe() {
        let result = SearchResult::new(1, 0.25, document("αβγδεζηθικλ"));
        let row = result.format_row(4);

        assert!(row.contains("αβγδ..."));
    }
}
