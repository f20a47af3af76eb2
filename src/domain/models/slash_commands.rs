#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use super::QuickAction;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    /// Commands take no arguments. Input with trailing words is not a
    /// command, so it goes out as a regular question instead.
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let trimmed = text.trim();
        if trimmed.contains(char::is_whitespace) {
            return None;
        }

        let cmd = SlashCommand {
            command: trimmed.to_string(),
        };
        if cmd.is_quit() || cmd.is_clear() || cmd.is_help() || cmd.quick_action().is_some() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn quick_action(&self) -> Option<QuickAction> {
        match self.command.as_str() {
            "/p" | "/properties" => return Some(QuickAction::Properties),
            "/t" | "/tours" => return Some(QuickAction::VirtualTours),
            "/l" | "/locations" => return Some(QuickAction::Locations),
            "/a" | "/assist" => return Some(QuickAction::Assist),
            _ => return None,
        }
    }
}
