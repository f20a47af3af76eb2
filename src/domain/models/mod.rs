mod action;
mod answer;
mod client;
mod event;
mod message;
mod property;
mod quick_action;
mod slash_commands;

pub use action::*;
pub use answer::*;
pub use client::*;
pub use event::*;
pub use message::*;
pub use property::*;
pub use quick_action::*;
pub use slash_commands::*;
