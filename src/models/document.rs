// file: src/models/document.rs
// description: indexed document model with content hashing
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Content hash, stable across runs for identical text
    pub id: String,

    /// 0-based submission position within the index
    pub position: usize,

    /// Original document text as submitted
    pub text: String,

    /// Unix timestamp of indexing
    pub indexed_at: u64,
}

impl Document {
    pub fn new(position: usize, text: String) -> Self {
        let id = Self::compute_hash(&text);
        let indexed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            id,
            position,
            text,
            indexed_at,
        }
    }

    fn compute_hash(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(0, "Amazon EC2 provides compute capacity.".to_string());

        assert_eq!(doc.position, 0);
        assert!(!doc.id.is_empty());
        assert_eq!(doc.id.len(), 64);
        assert!(doc.indexed_at > 0);
    }

    #[test]
    fn test_hash_consistency() {
        let a = Document::new(0, "same text".to_string());
        let b = Document::new(7, "same text".to_string());
        assert_eq!(a.id, b.id);

        let c = Document::new(0, "different text".to_string());
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_char_count_multibyte() {
        let doc = Document::new(0, "héllo".to_string());
        assert_eq!(doc.char_count(), 5);
    }
}
