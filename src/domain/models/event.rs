use anyhow::Result;

use super::Answer;
use super::PendingAsk;

#[derive(Debug)]
pub enum Event {
    AnswerReceived(PendingAsk, Result<Answer>),
    HealthCheckFailed(String),
}
