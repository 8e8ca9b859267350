// file: src/bedrock/agent.rs
// description: Bedrock agent runtime client with streamed completion handling
// reference: https://docs.rs/aws-sdk-bedrockagentruntime

use crate::error::{Result, SearchError};
use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::Client;
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_smithy_types::error::display::DisplayErrorContext;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info};

static LAST_SESSION_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generate a session identifier from the current time in milliseconds.
///
/// The timestamp is forced strictly increasing across calls, so rapid or
/// concurrent invocations never share a session.
pub fn new_session_id(prefix: &str) -> String {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_SESSION_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(0);

    format!("{}-{}", prefix, now.max(prev + 1))
}

/// Accumulates streamed completion chunks in arrival order.
#[derive(Debug, Clone, Default)]
pub struct AgentTranscript {
    text: String,
    chunks: usize,
}

impl AgentTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk's bytes as UTF-8 (lossily) and append it.
    /// Returns the decoded fragment.
    pub fn append(&mut self, bytes: &[u8]) -> String {
        let fragment = String::from_utf8_lossy(bytes).into_owned();
        self.text.push_str(&fragment);
        self.chunks += 1;
        fragment
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Completed agent invocation: the full response text plus stream metadata.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub session_id: String,
    pub text: String,
    pub chunks: usize,
}

#[derive(Clone)]
pub struct BedrockAgentClient {
    client: Client,
    agent_id: String,
    agent_alias_id: String,
}

impl BedrockAgentClient {
    pub fn new(sdk_config: &SdkConfig, agent_id: String, agent_alias_id: String) -> Self {
        Self {
            client: Client::new(sdk_config),
            agent_id,
            agent_alias_id,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn agent_alias_id(&self) -> &str {
        &self.agent_alias_id
    }

    /// Invoke the agent and drain its completion stream.
    ///
    /// `on_chunk` fires once per decoded chunk, in arrival order, before the
    /// fragment is appended to the returned transcript. Non-chunk events
    /// (traces, file parts, return-control payloads) are skipped.
    pub async fn invoke_streaming<F>(
        &self,
        session_id: &str,
        input: &str,
        mut on_chunk: F,
    ) -> Result<AgentReply>
    where
        F: FnMut(&str),
    {
        debug!(
            "Invoking agent {} (alias {}) with session {}",
            self.agent_id, self.agent_alias_id, session_id
        );

        let output = self
            .client
            .invoke_agent()
            .agent_id(&self.agent_id)
            .agent_alias_id(&self.agent_alias_id)
            .session_id(session_id)
            .input_text(input)
            .send()
            .await
            .map_err(|e| {
                SearchError::Agent(format!(
                    "InvokeAgent failed for agent {}: {}",
                    self.agent_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        let mut completion = output.completion;
        let mut transcript = AgentTranscript::new();
        let mut skipped = 0usize;

        while let Some(event) = completion.recv().await.map_err(|e| {
            SearchError::Agent(format!(
                "Completion stream error: {}",
                DisplayErrorContext(&e)
            ))
        })? {
            match event {
                ResponseStream::Chunk(part) => {
                    if let Some(bytes) = part.bytes() {
                        let fragment = transcript.append(bytes.as_ref());
                        on_chunk(&fragment);
                    }
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} non-chunk completion events", skipped);
        }

        info!(
            "Agent response complete ({} chunks, {} chars)",
            transcript.chunk_count(),
            transcript.text().len()
        );

        let chunks = transcript.chunk_count();
        Ok(AgentReply {
            session_id: session_id.to_string(),
            text: transcript.into_text(),
            chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transcript_preserves_arrival_order() {
        let mut transcript = AgentTranscript::new();

        let first = transcript.append(b"Study A starts on day 5. ");
        let second = transcript.append(b"Study B follows ");
        let third = transcript.append(b"on day 8.");

        assert_eq!(first, "Study A starts on day 5. ");
        assert_eq!(second, "Study B follows ");
        assert_eq!(third, "on day 8.");
        assert_eq!(
            transcript.text(),
            "Study A starts on day 5. Study B follows on day 8."
        );
        assert_eq!(transcript.chunk_count(), 3);
    }

    #[test]
    fn test_transcript_decodes_invalid_utf8_lossily() {
        let mut transcript = AgentTranscript::new();
        transcript.append(&[0x48, 0x69, 0xFF]);

        assert_eq!(transcript.text(), "Hi\u{FFFD}");
        assert_eq!(transcript.chunk_count(), 1);
    }

    #[test]
    fn test_transcript_empty_state() {
        let transcript = AgentTranscript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.chunk_count(), 0);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(new_session_id("session")));
        }
    }

    #[test]
    fn test_session_ids_are_monotonic() {
        let extract = |id: &str| -> i64 {
            id.rsplit('-').next().unwrap().parse().unwrap()
        };

        let mut last = extract(&new_session_id("session"));
        for _ in 0..100 {
            let next = extract(&new_session_id("session"));
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_session_id_uses_prefix() {
        let id = new_session_id("test-session");
        assert!(id.starts_with("test-session-"));
    }
}
