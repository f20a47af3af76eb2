#[cfg(test)]
#[path = "ragbot_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::payload;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Answer;
use crate::domain::models::ClientName;
use crate::domain::models::QuestionAnsweringClient;

const RUNNING_STATUS: &str = "Server is running";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AskRequest {
    query: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StatusResponse {
    status: Option<String>,
}

/// Self-hosted retrieval service. Same contract as InfinitiView, served
/// under `/api/ask` with `query`/`reply` naming.
pub struct RagBot {
    url: String,
    timeout: String,
}

impl Default for RagBot {
    fn default() -> RagBot {
        return RagBot {
            url: Config::get(ConfigKey::ApiURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl QuestionAnsweringClient for RagBot {
    fn name(&self) -> ClientName {
        return ClientName::RagBot;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("RagBot API URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "RagBot is not reachable");
                bail!("RagBot is not reachable");
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "RagBot health check failed");
            bail!("RagBot health check failed");
        }

        let status = res.json::<StatusResponse>().await?;
        if status.status.as_deref() != Some(RUNNING_STATUS) {
            tracing::error!(status = ?status.status, "RagBot reported an unexpected status");
            bail!("RagBot is not running");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn ask(&self, question: &str) -> Result<Answer> {
        let req = AskRequest {
            query: question.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/ask", url = self.url.trim_end_matches('/')))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make ask request to RagBot"
            );
            bail!(format!("HTTP error! status: {}", res.status().as_u16()));
        }

        let body = payload::unwrap_body(res.json::<Value>().await?);
        tracing::debug!(body = ?body, "Ask response");

        let response_text =
            payload::text_field(&body, "reply").or_else(|| return payload::text_field(&body, "response"));

        return Ok(Answer {
            response_text,
            engine_label: payload::text_field(&body, "ai_engine"),
            properties: payload::properties_field(&body),
        });
    }
}
