#[cfg(test)]
#[path = "infinitiview_test.rs"]
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

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AskRequest {
    question: String,
}

pub struct InfinitiView {
    url: String,
    timeout: String,
}

impl Default for InfinitiView {
    fn default() -> InfinitiView {
        return InfinitiView {
            url: Config::get(ConfigKey::ApiURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl QuestionAnsweringClient for InfinitiView {
    fn name(&self) -> ClientName {
        return ClientName::InfinitiView;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("InfinitiView API URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "InfinitiView is not reachable");
                bail!("InfinitiView is not reachable");
            }
        };

        // API gateways answer the bare stage URL with a 4xx, which still
        // proves the endpoint is up.
        let status = res.status().as_u16();
        if status >= 500 {
            tracing::error!(status = status, "InfinitiView health check failed");
            bail!("InfinitiView health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn ask(&self, question: &str) -> Result<Answer> {
        let req = AskRequest {
            question: question.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/ask", url = self.url.trim_end_matches('/')))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make ask request to InfinitiView"
            );
            bail!(format!("HTTP error! status: {}", res.status().as_u16()));
        }

        let body = payload::unwrap_body(res.json::<Value>().await?);
        tracing::debug!(body = ?body, "Ask response");

        return Ok(Answer {
            response_text: payload::text_field(&body, "response"),
            engine_label: payload::text_field(&body, "ai_engine"),
            properties: payload::properties_field(&body),
        });
    }
}
