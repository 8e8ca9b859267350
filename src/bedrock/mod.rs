// file: src/bedrock/mod.rs
// description: Bedrock service clients module exports
// reference: internal module structure

pub mod agent;
pub mod client;
pub mod embeddings;

pub use agent::{AgentReply, AgentTranscript, BedrockAgentClient, new_session_id};
pub use client::load_sdk_config;
pub use embeddings::TitanEmbeddingClient;
