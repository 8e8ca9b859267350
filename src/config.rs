// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub aws: AwsConfig,
    pub embedding: EmbeddingConfig,
    pub agent: AgentConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsConfig {
    pub region: String,
    /// Named credential profile; falls back to the default chain when unset
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    pub model_id: String,
    /// Output dimensions, only honored by Titan v2 models
    pub dimensions: Option<usize>,
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    pub agent_id: Option<String>,
    pub agent_alias_id: Option<String>,
    pub session_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub default_top_k: usize,
    pub preview_chars: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BEDROCK_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            aws: AwsConfig {
                region: "ap-northeast-1".to_string(),
                profile: None,
            },
            embedding: EmbeddingConfig {
                model_id: "amazon.titan-embed-text-v1".to_string(),
                dimensions: None,
                max_concurrency: 4,
            },
            agent: AgentConfig {
                agent_id: None,
                agent_alias_id: None,
                session_prefix: "session".to_string(),
            },
            search: SearchConfig {
                default_top_k: 5,
                preview_chars: 300,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.aws.region.trim().is_empty() {
            return Err(SearchError::Config(
                "aws.region must not be empty".to_string(),
            ));
        }

        if self.embedding.model_id.trim().is_empty() {
            return Err(SearchError::Config(
                "embedding.model_id must not be empty".to_string(),
            ));
        }

        if self.embedding.max_concurrency == 0 {
            return Err(SearchError::Config(
                "embedding.max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.search.default_top_k == 0 {
            return Err(SearchError::Config(
                "search.default_top_k must be greater than 0".to_string(),
            ));
        }

        if self.agent.session_prefix.trim().is_empty() {
            return Err(SearchError::Config(
                "agent.session_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.embedding.model_id, "amazon.titan-embed-text-v1");
        assert_eq!(config.search.default_top_k, 5);
    }

    #[test]
    fn test_validate_rejects_empty_region() {
        let mut config = Config::default_config();
        config.aws.region = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default_config();
        config.search.default_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default_config();
        config.embedding.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[aws]
region = "eu-central-1"
profile = "research"

[embedding]
model_id = "amazon.titan-embed-text-v2:0"
dimensions = 512
max_concurrency = 8

[agent]
agent_id = "TH1THHQ3EV"
agent_alias_id = "DDJBKJXA9I"
session_prefix = "test-session"

[search]
default_top_k = 3
preview_chars = 120
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.aws.profile.as_deref(), Some("research"));
        assert_eq!(config.embedding.dimensions, Some(512));
        assert_eq!(config.agent.agent_id.as_deref(), Some("TH1THHQ3EV"));
        assert_eq!(config.search.default_top_k, 3);
    }
}
