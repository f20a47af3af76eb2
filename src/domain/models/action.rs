use super::PendingAsk;

#[derive(Debug)]
pub enum Action {
    Ask(PendingAsk),
    HealthCheck(),
}
