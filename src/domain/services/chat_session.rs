#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::watch;

use crate::domain::models::Answer;
use crate::domain::models::Message;
use crate::domain::models::MessageKind;
use crate::domain::models::PendingAsk;
use crate::domain::models::QuestionAnsweringClient;

pub const NO_RESPONSE_TEXT: &str = "No response received";
pub const ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Read-only copy of a chat session handed to observers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub history: Vec<Message>,
    pub pending: bool,
    pub last_error: Option<String>,
}

/// Owns the message log of a single conversation and tracks the one ask
/// allowed in flight at a time.
///
/// Ids come from a counter owned by the session that only ever moves
/// forward, including across `clear_session`. Every clear also bumps the
/// generation so answers to questions asked before the clear are dropped.
pub struct ChatSession {
    history: Vec<Message>,
    pending: bool,
    last_error: Option<String>,
    next_id: u64,
    generation: u64,
    watcher: watch::Sender<SessionSnapshot>,
}

impl Default for ChatSession {
    fn default() -> ChatSession {
        return ChatSession::new();
    }
}

impl ChatSession {
    pub fn new() -> ChatSession {
        let (watcher, _) = watch::channel(SessionSnapshot::default());
        return ChatSession {
            history: vec![],
            pending: false,
            last_error: None,
            next_id: 1,
            generation: 0,
            watcher,
        };
    }

    pub fn history(&self) -> &[Message] {
        return &self.history;
    }

    pub fn is_pending(&self) -> bool {
        return self.pending;
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.last_error.as_deref();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        return SessionSnapshot {
            history: self.history.clone(),
            pending: self.pending,
            last_error: self.last_error.clone(),
        };
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        return self.watcher.subscribe();
    }

    fn notify(&self) {
        self.watcher.send_replace(self.snapshot());
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        return id;
    }

    pub fn append_system_message(&mut self, text: &str) -> u64 {
        let id = self.allocate_id();
        self.history.push(Message::new(id, MessageKind::System, text));
        self.notify();

        return id;
    }

    /// Accepts a question and marks the session as pending. Returns `None`
    /// without touching anything when the question is blank or another ask
    /// is still outstanding.
    pub fn begin_send(&mut self, question: &str) -> Option<PendingAsk> {
        if question.trim().is_empty() {
            return None;
        }
        if self.pending {
            tracing::debug!("Ignoring question while another is pending");
            return None;
        }

        let id = self.allocate_id();
        self.history.push(Message::new(id, MessageKind::User, question));
        self.pending = true;
        self.last_error = None;
        self.notify();

        return Some(PendingAsk {
            question: question.to_string(),
            generation: self.generation,
        });
    }

    /// Records the outcome of an ask started with `begin_send`. Returns
    /// false when the ask belongs to a session state that has since been
    /// cleared, in which case nothing changes.
    pub fn complete_send(&mut self, ask: PendingAsk, res: Result<Answer>) -> bool {
        if ask.generation != self.generation {
            tracing::debug!(
                ask_generation = ask.generation,
                generation = self.generation,
                "Discarding answer for a cleared session"
            );
            return false;
        }

        let id = self.allocate_id();
        match res {
            Ok(answer) => {
                let text = answer
                    .response_text
                    .filter(|e| return !e.is_empty())
                    .unwrap_or_else(|| return NO_RESPONSE_TEXT.to_string());
                let engine_label = answer.engine_label.filter(|e| return !e.is_empty());

                self.history.push(Message::new_assistant(
                    id,
                    &text,
                    engine_label,
                    answer.properties,
                ));
            }
            Err(err) => {
                tracing::error!(error = ?err, question = %ask.question, "Failed to get an answer");
                self.history.push(Message::new(id, MessageKind::Error, ERROR_TEXT));
                self.last_error = Some(format!("{err:#}"));
            }
        }

        self.pending = false;
        self.notify();

        return true;
    }

    pub async fn send_message(
        &mut self,
        client: &(dyn QuestionAnsweringClient + Send + Sync),
        question: &str,
    ) {
        let ask = match self.begin_send(question) {
            Some(ask) => ask,
            None => return,
        };

        let res = client.ask(&ask.question).await;
        self.complete_send(ask, res);
    }

    pub fn clear_session(&mut self) {
        self.history = vec![];
        self.pending = false;
        self.last_error = None;
        self.generation += 1;
        self.notify();
    }
}
