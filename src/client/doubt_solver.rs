use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use super::ChatBackend;
use super::response_parser::parse_error_response;
use crate::config::models::GatewayConfig;
use crate::errors::ChatError;
use crate::models::DoubtRequest;
use crate::session::SessionContext;
use crate::stream::{DeltaStream, decode_stream};

/// HTTP client for the doubt-solver function.
/// Calls `POST {functions_url}/{doubt_solver_function}` and decodes the
/// `text/event-stream` body it proxies from the AI gateway.
pub struct DoubtSolverClient {
    http_client: reqwest::Client,
    url: String,
    publishable_key: String,
}

impl DoubtSolverClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;
        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: &GatewayConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            url: config.doubt_solver_url(),
            publishable_key: config.publishable_key.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn bearer(&self, ctx: &SessionContext) -> String {
        let token = ctx.access_token().unwrap_or(&self.publishable_key);
        format!("Bearer {token}")
    }
}

#[async_trait]
impl ChatBackend for DoubtSolverClient {
    async fn stream_answer(
        &self,
        ctx: &SessionContext,
        request: &DoubtRequest,
    ) -> Result<DeltaStream, ChatError> {
        request.validate()?;

        info!(
            subject = %request.subject,
            history = request.conversation_history.len(),
            signed_in = ctx.is_signed_in(),
            "Requesting doubt solver answer"
        );

        let response = self
            .http_client
            .post(&self.url)
            .header("Authorization", self.bearer(ctx))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_response(status, &body));
        }

        debug!(status, "Doubt solver stream opened");
        Ok(decode_stream(response.bytes_stream()))
    }
}
