//! Host boundary: inbound messages and the reply capability

use async_trait::async_trait;
use eyre::Result;

/// An inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message body
    pub text: String,

    /// Channel the reply goes to
    pub channel: String,

    /// Whether the bot was directly addressed
    pub addressed: bool,
}

impl Message {
    /// Create a new message
    pub fn new(text: impl Into<String>, channel: impl Into<String>, addressed: bool) -> Self {
        Self {
            text: text.into(),
            channel: channel.into(),
            addressed,
        }
    }
}

/// Sends text replies back through the host
#[async_trait]
pub trait Replier: Send + Sync {
    async fn send_reply(&self, channel: &str, text: &str) -> Result<()>;
}
