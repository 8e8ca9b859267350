// file: src/search/index.rs
// description: in-memory vector index with brute-force cosine ranking
// reference: internal data structures

use crate::error::{Result, SearchError};
use crate::models::Document;
use std::cmp::Ordering;

/// A document paired with its similarity score for one query.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub score: f32,
    pub document: Document,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    document: Document,
    vector: Vec<f32>,
}

/// Append-only in-memory vector index.
///
/// All vectors must share one dimensionality, fixed by the first insert.
/// Search is brute-force cosine similarity over every entry; ties keep
/// submission order (the sort is stable).
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: Option<usize>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dimensions = None;
    }

    pub fn insert(&mut self, document: Document, vector: Vec<f32>) -> Result<()> {
        if vector.is_empty() {
            return Err(SearchError::Index(
                "Cannot index an empty vector".to_string(),
            ));
        }

        if let Some(dims) = self.dimensions {
            if dims != vector.len() {
                return Err(SearchError::Index(format!(
                    "Vector dimension mismatch: index holds {}-dimensional vectors, got {}",
                    dims,
                    vector.len()
                )));
            }
        } else {
            self.dimensions = Some(vector.len());
        }

        self.entries.push(IndexEntry { document, vector });
        Ok(())
    }

    /// Score every entry against `query` and return the top `top_k`
    /// by descending similarity.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredDocument> {
        let mut scored: Vec<ScoredDocument> = self
            .entries
            .iter()
            .map(|entry| ScoredDocument {
                score: cosine_similarity(query, &entry.vector),
                document: entry.document.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}

/// Cosine similarity in `[-1.0, 1.0]`.
///
/// Returns 0.0 for empty, mismatched, or near-zero-norm vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
