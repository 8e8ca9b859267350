// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use bedrock_search::utils::logging;
use bedrock_search::{
    BedrockAgentClient, Config, HealthCheck, HealthReport, OperationTimer, ProgressTracker,
    SemanticSearch, TitanEmbeddingClient, Validator, load_sdk_config, new_session_id,
};
use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Demo corpus used when no corpus file is supplied
const SAMPLE_CORPUS: &[&str] = &[
    "Amazon Bedrock is a fully managed service that offers a choice of high-performing foundation models.",
    "Amazon S3 is an object storage service offering industry-leading scalability.",
    "Amazon EC2 provides secure and resizable compute capacity in the cloud.",
    "AWS Lambda lets you run code without provisioning or managing servers.",
    "Amazon DynamoDB is a key-value and document database that delivers single-digit millisecond performance at any scale.",
    "Amazon RDS makes it easy to set up, operate, and scale a relational database in the cloud.",
    "Amazon SageMaker is a fully managed machine learning service.",
    "AWS Step Functions is a serverless orchestration service.",
    "Amazon API Gateway is a fully managed service for creating, publishing, and securing APIs.",
    "AWS CloudFormation provides a common language to model and provision AWS resources in your cloud environment.",
];

#[derive(Parser)]
#[command(name = "bedrock_search")]
#[command(version = "0.1.0")]
#[command(about = "Semantic search and agent streaming for Amazon Bedrock", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus and run one or more semantic queries against it
    Search {
        /// Query text (repeat for multiple queries)
        #[arg(required = true)]
        queries: Vec<String>,

        /// Corpus file with one document per line (defaults to a built-in sample)
        #[arg(long, value_name = "FILE")]
        corpus: Option<PathBuf>,

        #[arg(short, long, value_name = "NUM")]
        top_k: Option<usize>,
    },

    /// Invoke the configured Bedrock agent and stream its response
    Ask {
        /// Input text for the agent
        message: String,

        /// Session identifier (defaults to a fresh timestamp-derived id)
        #[arg(long)]
        session_id: Option<String>,
    },

    /// Verify configuration and connectivity to the Bedrock services
    Check {
        /// Send a probe embedding request to the model
        #[arg(long)]
        probe: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    info!("Bedrock Search");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Search {
            queries,
            corpus,
            top_k,
        } => {
            cmd_search(&config, &queries, corpus.as_deref(), top_k, cli.color).await?;
        }
        Commands::Ask {
            message,
            session_id,
        } => {
            cmd_ask(&config, &message, session_id).await?;
        }
        Commands::Check { probe } => {
            cmd_check(&config, probe).await?;
        }
    }

    Ok(())
}

fn load_corpus(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(path) => {
            Validator::validate_corpus_file(path)?;

            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read corpus file {}", path.display()))?;

            let documents: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();

            if documents.is_empty() {
                anyhow::bail!("Corpus file {} contains no documents", path.display());
            }

            info!(
                "Loaded {} documents from {}",
                documents.len(),
                path.display()
            );
            Ok(documents)
        }
        None => {
            info!("No corpus file given, using the built-in sample corpus");
            Ok(SAMPLE_CORPUS.iter().map(|s| s.to_string()).collect())
        }
    }
}

async fn cmd_search(
    config: &Config,
    queries: &[String],
    corpus: Option<&Path>,
    top_k: Option<usize>,
    color: bool,
) -> Result<()> {
    let top_k = top_k.unwrap_or(config.search.default_top_k);
    Validator::validate_top_k(top_k)?;

    let documents = load_corpus(corpus)?;

    let mut engine = SemanticSearch::connect(config)
        .await
        .context("Failed to initialize the search engine")?;

    let timer = OperationTimer::new("corpus indexing");
    let tracker = ProgressTracker::with_color(documents.len(), color);
    tracker.add_chars_processed(documents.iter().map(|d| d.chars().count() as u64).sum());

    engine
        .index_with_progress(&documents, |embedded, _total| {
            tracker.set_position(embedded);
        })
        .await
        .context("Corpus indexing failed")?;

    tracker.finish();
    timer.finish_with_count(documents.len());

    for query in queries {
        let results = engine
            .search(query, top_k)
            .await
            .with_context(|| format!("Search failed for query \"{}\"", query))?;

        println!("\nQuery: {}", query);
        println!("{}", "-".repeat(50));

        for result in &results {
            println!("{}", result.format_row(config.search.preview_chars));
        }
    }

    println!();
    info!("Search complete");

    Ok(())
}

async fn cmd_ask(config: &Config, message: &str, session_id: Option<String>) -> Result<()> {
    let (agent_id, agent_alias_id) = Validator::validate_agent_ids(
        config.agent.agent_id.as_deref(),
        config.agent.agent_alias_id.as_deref(),
    )?;

    let session_id = session_id.unwrap_or_else(|| new_session_id(&config.agent.session_prefix));

    info!("Agent ID: {}", agent_id);
    info!("Agent Alias ID: {}", agent_alias_id);
    info!("Session ID: {}", session_id);

    println!("{}", "-".repeat(80));
    println!("Agent Response:");
    println!("{}", "-".repeat(40));

    let sdk_config = load_sdk_config(&config.aws).await;
    let client = BedrockAgentClient::new(&sdk_config, agent_id, agent_alias_id);

    let timer = OperationTimer::new("agent invocation");

    // Broad catch: any invocation failure is printed and the run completes
    // without a transcript
    let reply = match client
        .invoke_streaming(&session_id, message, |chunk| {
            print!("{}", chunk);
            let _ = std::io::stdout().flush();
        })
        .await
    {
        Ok(reply) => Some(reply),
        Err(e) => {
            error!("Agent invocation failed: {}", e);
            println!(
                "{}",
                logging::format_error(&format!("Error invoking agent: {}", e))
            );
            None
        }
    };

    timer.finish();

    println!();
    println!("{}", "-".repeat(80));

    match reply {
        Some(reply) => {
            println!(
                "{}",
                logging::format_success(&format!(
                    "Agent run complete ({} chunks, session {})",
                    reply.chunks, reply.session_id
                ))
            );
        }
        None => {
            println!(
                "{}",
                logging::format_warning("Agent run produced no response")
            );
        }
    }

    Ok(())
}

async fn cmd_check(config: &Config, probe: bool) -> Result<()> {
    info!("Checking configuration and Bedrock connectivity");

    let mut checks = Vec::new();
    checks.push(HealthCheck::healthy("configuration", Duration::ZERO));

    let sdk_config = load_sdk_config(&config.aws).await;

    if probe {
        let embedder = TitanEmbeddingClient::new(
            &sdk_config,
            config.embedding.model_id.clone(),
            config.embedding.dimensions,
            config.embedding.max_concurrency,
        );

        let timer = OperationTimer::new("embedding probe");
        match embedder.embed("connectivity probe").await {
            Ok(vector) => {
                info!("Probe embedding dimension: {}", vector.len());
                checks.push(HealthCheck::healthy("embedding-model", timer.finish()));
            }
            Err(e) => {
                checks.push(HealthCheck::unhealthy(
                    "embedding-model",
                    e.to_string(),
                    timer.finish(),
                ));
            }
        }
    } else {
        info!("Skipping embedding probe (use --probe to invoke the model)");
    }

    match Validator::validate_agent_ids(
        config.agent.agent_id.as_deref(),
        config.agent.agent_alias_id.as_deref(),
    ) {
        Ok((agent_id, _)) => {
            info!("Agent configured: {}", agent_id);
            checks.push(HealthCheck::healthy("agent-runtime", Duration::ZERO));
        }
        Err(e) => {
            checks.push(HealthCheck::degraded(
                "agent-runtime",
                format!("{} (the ask command will be unavailable)", e),
                Duration::ZERO,
            ));
        }
    }

    let report = HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string());
    println!("\n{}", report.format());

    Ok(())
}
