use std::collections::VecDeque;
use std::env;
use std::error::Error as StdError;
use std::fmt;

use tracing::debug;

use crate::api::{ChatRequest, ChatResponse};
use crate::core::config::Config;
use crate::core::message::Message;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const MISSING_KEY: &str = "OPENAI_API_KEY environment variable not set.\n\
Please set your API key:\n\
  export OPENAI_API_KEY=\"your-api-key-here\"\n\
Optionally, you can also set a custom base URL:\n\
  export OPENAI_BASE_URL=\"https://api.openai.com/v1\"";

/// Failures at the completion boundary.
///
/// `Init` means the backend could not be prepared at all and ends the
/// program; everything else is a per-request fault the caller recovers from
/// by substituting a fallback utterance.
#[derive(Debug)]
pub enum CompletionError {
    Init { reason: String },
    Request { source: reqwest::Error },
    Status { status: reqwest::StatusCode },
}

impl CompletionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CompletionError::Init { .. })
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Init { reason } => {
                write!(f, "completion backend initialization failed: {reason}")
            }
            CompletionError::Request { source } => {
                write!(f, "completion request failed: {source}")
            }
            CompletionError::Status { status } => {
                write!(f, "completion request rejected with status {status}")
            }
        }
    }
}

impl StdError for CompletionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CompletionError::Request { source } => Some(source),
            _ => None,
        }
    }
}

/// Boundary to the external text-completion service. Synchronous and
/// blocking; the interaction loop issues at most one call at a time.
pub trait CompletionBackend {
    /// Produce one assistant utterance for the conversation so far. The
    /// returned text is already stripped of role-marker artifacts, but may
    /// be empty; the caller substitutes a fallback for low-signal replies.
    fn generate(&mut self, conversation: &VecDeque<Message>) -> Result<String, CompletionError>;
}

/// Default backend: a blocking, non-streaming client for OpenAI-compatible
/// `/chat/completions` endpoints. The HTTP client is constructed on the
/// first `generate` call and memoized for the process lifetime.
pub struct HttpCompletion {
    model: String,
    base_url: String,
    api_key: Option<String>,
    client: Option<reqwest::blocking::Client>,
}

impl HttpCompletion {
    pub fn new(model: String, base_url: String, api_key: Option<String>) -> Self {
        Self {
            model,
            base_url,
            api_key,
            client: None,
        }
    }

    /// Resolve backend settings from the config file and the environment.
    /// `OPENAI_BASE_URL` overrides the config file; the API key only ever
    /// comes from `OPENAI_API_KEY`.
    pub fn from_config(config: &Config) -> Self {
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(model, base_url, env::var("OPENAI_API_KEY").ok())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&mut self) -> Result<&reqwest::blocking::Client, CompletionError> {
        if let Some(ref client) = self.client {
            return Ok(client);
        }
        debug!(base_url = %self.base_url, model = %self.model, "initializing completion client");
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| CompletionError::Init {
                reason: format!("could not construct HTTP client: {e}"),
            })?;
        Ok(self.client.insert(client))
    }
}

impl CompletionBackend for HttpCompletion {
    fn generate(&mut self, conversation: &VecDeque<Message>) -> Result<String, CompletionError> {
        let api_key = match self.api_key.clone() {
            Some(key) => key,
            None => {
                return Err(CompletionError::Init {
                    reason: MISSING_KEY.to_string(),
                })
            }
        };

        let request = ChatRequest::from_conversation(self.model.clone(), conversation.iter());
        let url = format!("{}/chat/completions", self.base_url);
        debug!(turns = conversation.len(), %url, "requesting completion");

        let client = self.client()?;
        let response = client
            .post(&url)
            .bearer_auth(&api_key)
            .json(&request)
            .send()
            .map_err(|source| CompletionError::Request { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status { status });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|source| CompletionError::Request { source })?;
        let raw = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(clean_reply(&raw))
    }
}

/// Strip prompt echo and role-marker artifacts some backends leak into the
/// reply text. Interior newlines are preserved; only the outer whitespace
/// is trimmed.
pub fn clean_reply(raw: &str) -> String {
    let without_echo = match raw.find("USER:") {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    without_echo.replace("ASSISTANT:", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_performs_no_initialization() {
        let backend = HttpCompletion::new(
            "gpt-4o".to_string(),
            "http://localhost:1/v1".to_string(),
            None,
        );
        assert!(backend.client.is_none());
    }

    #[test]
    fn missing_api_key_is_a_fatal_init_fault() {
        let mut backend = HttpCompletion::new(
            "gpt-4o".to_string(),
            "http://localhost:1/v1".to_string(),
            None,
        );
        let mut conversation = VecDeque::new();
        conversation.push_back(Message::seed());

        match backend.generate(&conversation) {
            Err(err) => assert!(err.is_fatal(), "expected init fault, got {err}"),
            Ok(_) => panic!("generate without a key must fail"),
        }
    }

    #[test]
    fn clean_reply_strips_markers_and_echo() {
        assert_eq!(clean_reply("ASSISTANT: hi there"), "hi there");
        assert_eq!(clean_reply("hi there\nUSER: hello again"), "hi there");
        assert_eq!(clean_reply("  padded  "), "padded");
    }

    #[test]
    fn clean_reply_preserves_interior_newlines() {
        assert_eq!(
            clean_reply("first line\nsecond line\n"),
            "first line\nsecond line"
        );
    }

    #[test]
    fn clean_reply_of_noise_only_is_empty() {
        assert_eq!(clean_reply("ASSISTANT:   "), "");
        assert_eq!(clean_reply(""), "");
    }

    #[test]
    fn request_faults_are_not_fatal() {
        let err = CompletionError::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        };
        assert!(!err.is_fatal());
    }
}
