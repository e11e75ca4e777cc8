//! Chat completions client for product copywriting.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::CopywriterConfig;

use super::error::{ApiErrorResponse, CopywriterError};
use super::types::{ChatMessage, ChatRequest, ChatResponse};

const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TEMPERATURE: f32 = 0.7;

const SEO_SYSTEM_PROMPT: &str = "You are an e-commerce copywriter. Write a concise, \
    search-engine-friendly product description in plain prose. No markdown, no headings, \
    at most 120 words.";

const GENERATE_SYSTEM_PROMPT: &str = "You are an e-commerce copywriter helping a \
    marketplace vendor. Answer with the requested copy only, no preamble.";

/// Chat completions client.
///
/// Cheap to clone; configuration and the HTTP client live behind an `Arc`.
#[derive(Clone)]
pub struct CopywriterClient {
    inner: Arc<CopywriterClientInner>,
}

struct CopywriterClientInner {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl CopywriterClient {
    /// Create a new copywriter client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &CopywriterConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(CopywriterClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                model: config.model.clone(),
            }),
        }
    }

    /// Draft an SEO-friendly description for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error response,
    /// or produces an empty completion.
    #[instrument(skip(self), fields(model = %self.inner.model))]
    pub async fn seo_description(
        &self,
        product_name: &str,
        keywords: &[String],
    ) -> Result<String, CopywriterError> {
        let mut prompt = format!("Product: {product_name}");
        if !keywords.is_empty() {
            prompt.push_str(&format!("\nTarget keywords: {}", keywords.join(", ")));
        }

        self.complete(vec![
            ChatMessage::system(SEO_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .await
    }

    /// Generate free-form product copy from a vendor's prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error response,
    /// or produces an empty completion.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, CopywriterError> {
        self.complete(vec![
            ChatMessage::system(GENERATE_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .await
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CopywriterError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            messages,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        };

        let response = self
            .inner
            .client
            .post(format!("{}/chat/completions", self.inner.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CopywriterError::Parse(format!("Failed to parse response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(CopywriterError::EmptyCompletion);
        }
        Ok(content.trim().to_owned())
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> CopywriterError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return CopywriterError::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return CopywriterError::Unauthorized(body);
        }

        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => CopywriterError::Api {
                error_type: parsed.error.error_type,
                message: parsed.error.message,
            },
            Err(_) => CopywriterError::Api {
                error_type: status.to_string(),
                message: body,
            },
        }
    }
}
