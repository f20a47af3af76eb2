pub mod actions;
mod chat_session;
pub mod formatters;
mod link_renderer;

pub use chat_session::*;
pub use link_renderer::*;
