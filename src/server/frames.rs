//! Wire frames exchanged over the live connection.

use serde::{Deserialize, Serialize};

/// Tag carried by typed frames (`{"type": ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Typing,
    Users,
}

/// Raw inbound frame. Every field is optional: clients only send the keys
/// relevant to the frame they mean, and missing fields default rather than
/// fail.
#[derive(Debug, Default, Deserialize)]
pub struct RawFrame {
    pub join: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub nick: Option<String>,
    pub text: Option<String>,
    pub typing: Option<bool>,
}

/// Classified inbound frame.
#[derive(Debug, PartialEq)]
pub enum InboundFrame {
    /// `{"join": nickname}`: (re)announce a nickname
    Join { nick: String },
    /// `{"type": "typing", ...}`: typing indicator, relayed verbatim
    Typing { nick: String, typing: bool },
    /// anything else: a chat message
    Chat { nick: String, text: String },
}

/// Decide what an inbound frame means. A `join` key wins over everything
/// else, a `typing` type wins over chat, and the rest is chat.
pub fn classify(raw: RawFrame) -> InboundFrame {
    if let Some(nick) = raw.join {
        return InboundFrame::Join { nick };
    }
    if raw.kind.as_deref() == Some("typing") {
        return InboundFrame::Typing {
            nick: raw.nick.unwrap_or_default(),
            typing: raw.typing.unwrap_or(false),
        };
    }
    InboundFrame::Chat {
        nick: raw.nick.unwrap_or_default(),
        text: raw.text.unwrap_or_default(),
    }
}

/// Outbound chat frame: `{"nick", "text", "ts"}`.
#[derive(Debug, Serialize)]
pub struct ChatFrame<'a> {
    pub nick: &'a str,
    pub text: &'a str,
    pub ts: i64,
}

/// Outbound presence refresh: `{"type": "users", "users": [...], "count": N}`.
#[derive(Debug, Serialize)]
pub struct UsersFrame {
    pub r#type: FrameKind,
    pub users: Vec<String>,
    pub count: usize,
}

impl UsersFrame {
    pub fn new(users: Vec<String>) -> Self {
        let count = users.len();
        Self {
            r#type: FrameKind::Users,
            users,
            count,
        }
    }
}

/// Outbound typing indicator: `{"type": "typing", "nick", "typing"}`.
#[derive(Debug, Serialize)]
pub struct TypingFrame<'a> {
    pub r#type: FrameKind,
    pub nick: &'a str,
    pub typing: bool,
}

impl<'a> TypingFrame<'a> {
    pub fn new(nick: &'a str, typing: bool) -> Self {
        Self {
            r#type: FrameKind::Typing,
            nick,
            typing,
        }
    }
}
