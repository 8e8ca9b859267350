// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod bedrock;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod utils;

pub use bedrock::{
    AgentReply, AgentTranscript, BedrockAgentClient, TitanEmbeddingClient, load_sdk_config,
    new_session_id,
};
pub use config::{AgentConfig, AwsConfig, Config, EmbeddingConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use models::{Document, SearchResult};
pub use search::{
    IndexStats, ProgressTracker, ScoredDocument, SemanticSearch, VectorIndex, cosine_similarity,
};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _index = VectorIndex::new();
        let _transcript = AgentTranscript::new();
    }
}
