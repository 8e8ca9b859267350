// file: src/search/engine.rs
// description: semantic search facade tying the embedding client to the in-memory index
// reference: library orchestration

use crate::bedrock::{TitanEmbeddingClient, load_sdk_config};
use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::models::{Document, SearchResult};
use crate::search::index::{ScoredDocument, VectorIndex};
use crate::utils::Validator;
use tracing::{debug, info};

/// Semantic search over an in-memory corpus, embedded remotely.
///
/// Documents submitted to [`index`](Self::index) are embedded through the
/// configured Titan model and held in process memory; there is no
/// persistence between runs.
pub struct SemanticSearch {
    embedder: TitanEmbeddingClient,
    index: VectorIndex,
    batch_size: usize,
}

impl SemanticSearch {
    /// Build an engine bound to the configured model, region, and profile.
    pub async fn connect(config: &Config) -> Result<Self> {
        let sdk_config = load_sdk_config(&config.aws).await;
        let embedder = TitanEmbeddingClient::new(
            &sdk_config,
            config.embedding.model_id.clone(),
            config.embedding.dimensions,
            config.embedding.max_concurrency,
        );

        info!(
            "Semantic search engine ready (model: {})",
            config.embedding.model_id
        );

        Ok(Self {
            embedder,
            index: VectorIndex::new(),
            batch_size: config.embedding.max_concurrency.max(1),
        })
    }

    pub fn model_id(&self) -> &str {
        self.embedder.model_id()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Embed and index an ordered batch of documents. Repeated calls
    /// append; duplicate texts become distinct entries.
    pub async fn index<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<usize> {
        self.index_with_progress(documents, |_, _| {}).await
    }

    /// Same as [`index`](Self::index), reporting `(embedded, total)` after
    /// each embedding batch completes.
    ///
    /// The batch is applied atomically: an embedding failure leaves the
    /// index exactly as it was before the call.
    pub async fn index_with_progress<S, F>(
        &mut self,
        documents: &[S],
        mut progress: F,
    ) -> Result<usize>
    where
        S: AsRef<str>,
        F: FnMut(usize, usize),
    {
        if documents.is_empty() {
            return Err(SearchError::Validation(
                "No documents to index".to_string(),
            ));
        }

        for document in documents {
            Validator::validate_content_not_empty(document.as_ref())?;
        }

        let total = documents.len();
        let start_position = self.index.len();
        let texts: Vec<String> = documents
            .iter()
            .map(|d| d.as_ref().to_string())
            .collect();

        let mut staged: Vec<(Document, Vec<f32>)> = Vec::with_capacity(total);

        for batch in texts.chunks(self.batch_size) {
            let vectors = self.embedder.embed_batch(batch).await?;

            for (text, vector) in batch.iter().zip(vectors) {
                let position = start_position + staged.len();
                staged.push((Document::new(position, text.clone()), vector));
            }

            progress(staged.len(), total);
        }

        // All staged vectors must agree before anything touches the index,
        // otherwise a mid-append failure would leave a partial batch behind
        if let Some(dims) = staged.first().map(|(_, v)| v.len()) {
            if let Some((_, drifted)) = staged.iter().find(|(_, v)| v.len() != dims) {
                return Err(SearchError::Index(format!(
                    "Embedding dimension drift within batch: {} then {}",
                    dims,
                    drifted.len()
                )));
            }
        }

        for (document, vector) in staged {
            self.index.insert(document, vector)?;
        }

        info!(
            "Indexed {} documents ({} total in index)",
            total,
            self.index.len()
        );

        Ok(total)
    }

    /// Embed the query and return the `top_k` most similar documents,
    /// ranked 1-based in descending score order.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        Validator::validate_content_not_empty(query)
            .map_err(|_| SearchError::Validation("Query is empty".to_string()))?;
        Validator::validate_top_k(top_k)?;

        if self.index.is_empty() {
            return Err(SearchError::Index(
                "Index is empty; index documents before searching".to_string(),
            ));
        }

        debug!("Searching for: {}", query);

        let query_vector = self.embedder.embed(query).await?;
        let scored = self.index.search(&query_vector, top_k);

        Ok(rank_results(scored))
    }
}

/// Assign 1-based ranks matching position in the scored sequence.
fn rank_results(scored: Vec<ScoredDocument>) -> Vec<SearchResult> {
    scored
        .into_iter()
        .enumerate()
        .map(|(i, s)| SearchResult::new(i + 1, s.score, s.document))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: f32, text: &str) -> ScoredDocument {
        ScoredDocument {
            score,
            document: Document::new(0, text.to_string()),
        }
    }

    #[test]
    fn test_rank_results_assigns_one_based_positions() {
        let results = rank_results(vec![
            scored(0.91, "top"),
            scored(0.66, "middle"),
            scored(0.12, "bottom"),
        ]);

        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(results[0].document.text, "top");
        assert_eq!(results[2].document.text, "bottom");
    }

    #[test]
    fn test_rank_results_empty() {
        assert!(rank_results(vec![]).is_empty());
    }
}
