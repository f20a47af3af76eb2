#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageKind;
use crate::domain::models::QuickAction;
use crate::domain::models::SlashCommand;
use crate::domain::services::formatters;
use crate::domain::services::ChatSession;
use crate::domain::services::LinkRenderer;

pub const WELCOME_TEXT: &str = "👋 Welcome to InfinitiView! I'm your AI real estate assistant. Ask me about properties, locations, virtual tours, or anything real estate related.";

pub fn help_text() -> String {
    let quick_actions = [
        ("/properties (/p)", QuickAction::Properties),
        ("/tours (/t)", QuickAction::VirtualTours),
        ("/locations (/l)", QuickAction::Locations),
        ("/assist (/a)", QuickAction::Assist),
    ]
    .iter()
    .map(|(command, action)| {
        return format!(
            "- {command} - {}: asks \"{}\"",
            action.label(),
            action.question()
        );
    })
    .collect::<Vec<String>>()
    .join("\n");

    let text = format!(
        r#"
COMMANDS:
- /clear (/c) - Clears the conversation. Answers still on their way are dropped.
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit InfinitiView.

QUICK ACTIONS:
{quick_actions}

Links in answers are listed as "View Link (URL)", or "View Virtual Tour (URL)" for tours.
        "#
    );

    return text.trim().to_string();
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Busy,
    Sent,
    Cleared,
    Help,
    Quit,
}

/// Applies a line of user input to the session, forwarding accepted questions
/// to the actions service.
pub fn handle_input(
    session: &mut ChatSession,
    input: &str,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<InputOutcome> {
    let mut question = input.to_string();

    if let Some(command) = SlashCommand::parse(input) {
        if command.is_quit() {
            return Ok(InputOutcome::Quit);
        }
        if command.is_help() {
            return Ok(InputOutcome::Help);
        }
        if command.is_clear() {
            session.clear_session();
            session.append_system_message(WELCOME_TEXT);
            return Ok(InputOutcome::Cleared);
        }
        if let Some(action) = command.quick_action() {
            question = action.question().to_string();
        }
    }

    if question.trim().is_empty() {
        return Ok(InputOutcome::Ignored);
    }
    if session.is_pending() {
        return Ok(InputOutcome::Busy);
    }

    if let Some(ask) = session.begin_send(&question) {
        tx.send(Action::Ask(ask))?;
        return Ok(InputOutcome::Sent);
    }

    return Ok(InputOutcome::Ignored);
}

pub fn handle_event(session: &mut ChatSession, event: Event) {
    match event {
        Event::AnswerReceived(ask, res) => {
            session.complete_send(ask, res);
        }
        Event::HealthCheckFailed(err) => {
            session.append_system_message(&format!(
                "Hey, it looks like the {client} service at {url} isn't reachable right now. You can still ask, but answers may fail until it is back.\n\nError: {err}",
                client = Config::get(ConfigKey::Client),
                url = Config::get(ConfigKey::ApiURL),
            ));
        }
    }
}

pub fn message_header(message: &Message) -> String {
    let mut header = message.author();
    if let Some(engine_label) = &message.engine_label {
        header = format!("{header} ({engine_label})");
    }

    let timestamp = formatters::format_relative_timestamp(&message.created_at.to_rfc3339());
    return format!("{header} - {timestamp}");
}

pub fn message_lines(message: &Message) -> Vec<String> {
    let mut lines = vec![message_header(message)];

    if message.kind == MessageKind::Assistant {
        lines.extend(LinkRenderer::to_lines(&LinkRenderer::render(
            &message.text,
        )));
    } else {
        lines.extend(message.text.split('\n').map(|e| return e.to_string()));
    }

    for property in &message.properties {
        lines.push("".to_string());
        lines.extend(
            property
                .card_lines()
                .iter()
                .map(|e| return format!("  {e}")),
        );
    }

    return lines;
}

fn paint_header(message: &Message, header: &str) -> String {
    match message.kind {
        MessageKind::User => return Paint::cyan(header).bold().to_string(),
        MessageKind::Assistant => return Paint::green(header).bold().to_string(),
        MessageKind::System => return Paint::blue(header).bold().to_string(),
        MessageKind::Error => return Paint::red(header).bold().to_string(),
    }
}

#[derive(Default)]
struct ChatView {
    last_printed_id: u64,
}

impl ChatView {
    fn print_new(&mut self, session: &ChatSession) {
        for message in session.history() {
            if message.id <= self.last_printed_id {
                continue;
            }
            self.last_printed_id = message.id;

            let lines = message_lines(message);
            println!();
            println!("{}", paint_header(message, &lines[0]));
            for line in &lines[1..] {
                println!("{line}");
            }
        }
    }

    fn print_notice(&self, text: &str) {
        println!("{}", Paint::yellow(text).italic());
    }

    fn print_prompt(&self, session: &ChatSession) -> Result<()> {
        if session.is_pending() {
            self.print_notice("AI is thinking...");
        }

        print!("{} ", Paint::new(">").bold());
        std::io::stdout().flush()?;

        return Ok(());
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut session = ChatSession::new();
    let mut view = ChatView::default();

    session.append_system_message(WELCOME_TEXT);
    tx.send(Action::HealthCheck())?;

    view.print_new(&session);
    view.print_notice("Type /help for commands and quick actions.");
    view.print_prompt(&session)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                match handle_input(&mut session, &line, &tx)? {
                    InputOutcome::Quit => break,
                    InputOutcome::Help => println!("\n{}", help_text()),
                    InputOutcome::Cleared => view.print_notice("Chat cleared."),
                    InputOutcome::Busy => {
                        view.print_notice("Still waiting on the last answer, hang tight.")
                    }
                    InputOutcome::Sent | InputOutcome::Ignored => (),
                }
            }
            event = rx.recv() => {
                let event = match event {
                    Some(event) => event,
                    None => break,
                };

                handle_event(&mut session, event);
            }
        }

        view.print_new(&session);
        view.print_prompt(&session)?;
    }

    println!();
    return Ok(());
}
