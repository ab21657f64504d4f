//! OpenAI-compatible API client.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{AiError, AiResult};
use crate::json::extract_json;

/// Speech-to-text model.
pub const TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// Chat model for transcript analysis and notes generation.
pub const ANALYSIS_MODEL: &str = "llama-3.3-70b-instruct";

/// Chat model for syllabus roadmap generation.
pub const ROADMAP_MODEL: &str = "llama-3.1-70b-instruct";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API base URL (`OPENAI_API_BASE`)
    pub base_url: String,
    /// API key (`OPENAI_API_KEY`)
    pub api_key: String,
    /// Retries after a transient failure
    pub max_retries: u32,
    /// Base delay for exponential backoff (doubles each attempt)
    pub retry_base_delay: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl AiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AiError::config("OPENAI_API_KEY not set"))?;
        let base_url =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url,
            api_key,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(300),
        })
    }
}

/// Client for the hosted speech-to-text and chat endpoints.
pub struct AiClient {
    config: AiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl AiClient {
    /// Create a new client.
    pub fn new(config: AiConfig) -> AiResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(AiConfig::from_env()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Transcribe an audio file.
    pub async fn transcribe(&self, audio_path: &Path) -> AiResult<String> {
        info!("Starting transcription for {}", audio_path.display());

        let bytes = tokio::fs::read(audio_path).await?;
        let filename = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let url = self.endpoint("audio/transcriptions");
        let response: TranscriptionResponse = self
            .with_retry("transcribe", || {
                let part = Part::bytes(bytes.clone()).file_name(filename.clone());
                let form = Form::new()
                    .part("file", part)
                    .text("model", TRANSCRIPTION_MODEL);
                self.post_multipart(&url, form)
            })
            .await?;

        info!("Transcription complete ({} chars)", response.text.len());
        Ok(response.text)
    }

    /// Run a chat completion and return the assistant message content.
    pub async fn chat(&self, model: &str, system: &str, user: &str) -> AiResult<String> {
        debug!("Chat completion with model {}", model);

        let url = self.endpoint("chat/completions");
        let response: ChatResponse = self
            .with_retry("chat", || {
                let request = ChatRequest {
                    model,
                    messages: vec![
                        ChatMessage {
                            role: "system",
                            content: system,
                        },
                        ChatMessage {
                            role: "user",
                            content: user,
                        },
                    ],
                };
                self.post_json(&url, request)
            })
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AiError::EmptyResponse)
    }

    /// Run a chat completion and salvage-parse the content as JSON.
    pub async fn chat_json(&self, model: &str, system: &str, user: &str) -> AiResult<Value> {
        let content = self.chat(model, system, user).await?;
        extract_json(&content)
    }

    async fn post_json<B, T>(&self, url: &str, body: B) -> AiResult<T>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_multipart<T>(&self, url: &str, form: Form) -> AiResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> AiResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(500).collect();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// Retry transient failures with exponential backoff.
    async fn with_retry<T, F, Fut>(&self, operation: &str, attempt_fn: F) -> AiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AiResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self
                        .config
                        .retry_base_delay
                        .saturating_mul(2u32.pow(attempt - 1));
                    warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        operation, attempt, self.config.max_retries, delay, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> AiConfig {
        AiConfig {
            base_url,
            api_key: "test-key".to_string(),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(5),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn transcribe_posts_multipart_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello class"})))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::TempDir::new().unwrap();
        let audio = tmp.path().join("lecture.mp3");
        tokio::fs::write(&audio, b"fake audio").await.unwrap();

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let text = client.transcribe(&audio).await.unwrap();
        assert_eq!(text, "hello class");
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "plain text answer"}}]
            })))
            .mount(&server)
            .await;

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let content = client
            .chat(ANALYSIS_MODEL, "system", "user prompt")
            .await
            .unwrap();
        assert_eq!(content, "plain text answer");
    }

    #[tokio::test]
    async fn chat_json_salvages_fenced_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "```json\n{\"topicsCovered\": []}\n```"}}]
            })))
            .mount(&server)
            .await;

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let value = client
            .chat_json(ANALYSIS_MODEL, "system", "user")
            .await
            .unwrap();
        assert!(value["topicsCovered"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transient_server_errors_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "recovered"}}]
            })))
            .mount(&server)
            .await;

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let content = client.chat(ANALYSIS_MODEL, "s", "u").await.unwrap();
        assert_eq!(content, "recovered");
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let err = client.chat(ANALYSIS_MODEL, "s", "u").await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = AiClient::new(test_config(server.uri())).unwrap();
        let err = client.chat(ANALYSIS_MODEL, "s", "u").await.unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse));
    }
}
