#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Answer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ClientName {
    InfinitiView,
    RagBot,
}

impl ClientName {
    pub fn parse(text: &str) -> Option<ClientName> {
        return ClientName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait QuestionAnsweringClient {
    fn name(&self) -> ClientName;

    /// Used at startup to verify the remote endpoint is reachable before the
    /// first question is sent.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single question. Any transport failure, non-success status or
    /// undecodable payload is returned as an error.
    async fn ask(&self, question: &str) -> Result<Answer>;
}

pub type ClientBox = Box<dyn QuestionAnsweringClient + Send + Sync>;
