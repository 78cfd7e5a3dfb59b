//! Inbound events, decoupled from teloxide update types.

use teloxide::types::{InlineQuery, Message, User};
use teloxide::utils::command::BotCommands;

/// Commands the bot answers. Other commands are ignored.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the service menu.
    Start,
    /// Show usage hint.
    Help,
}

impl Command {
    /// Parse a leading command, ignoring case of the command name.
    ///
    /// `/start@other_bot` is addressed to another bot and yields `None`.
    pub fn from_text(text: &str, bot_username: &str) -> Option<Self> {
        let (name, mention) = leading_command(text)?;
        if let Some(mention) = mention
            && !mention.eq_ignore_ascii_case(bot_username)
        {
            return None;
        }
        Self::parse(&format!("/{}", name.to_ascii_lowercase()), bot_username).ok()
    }
}

/// Command name and optional `@mention` at the start of `text`.
///
/// Mirrors the platform's `bot_command` entity: `/` followed by at least one
/// of `[A-Za-z0-9_]`. `/`, `/ hi` and `/привет` are not commands.
fn leading_command(text: &str) -> Option<(&str, Option<&str>)> {
    let rest = text.strip_prefix('/')?;
    let token = rest.split(char::is_whitespace).next().unwrap_or("");
    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (token, None),
    };
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let name_len = name.chars().take_while(|c| is_word(*c)).count();
    if name_len == 0 {
        return None;
    }
    if name_len < name.len() {
        // "/start-now" still carries the "/start" entity
        return Some((&name[..name_len], None));
    }
    Some((name, mention))
}

/// Who an event came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    /// `None` for inline queries, which are not tied to a chat.
    pub chat_id: Option<i64>,
    pub user_id: Option<u64>,
    pub display_name: Option<String>,
}

impl Origin {
    pub fn from_message(msg: &Message) -> Self {
        let user = msg.from.as_ref();
        Self {
            chat_id: Some(msg.chat.id.0),
            user_id: user.map(|u| u.id.0),
            display_name: user.and_then(display_name),
        }
    }

    pub fn from_inline_query(query: &InlineQuery) -> Self {
        Self {
            chat_id: None,
            user_id: Some(query.from.id.0),
            display_name: display_name(&query.from),
        }
    }
}

fn display_name(user: &User) -> Option<String> {
    let name = user.first_name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Help,
    Text(String),
    InlineQuery(String),
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Text(_) => "text",
            Self::InlineQuery(_) => "inline",
        }
    }
}

impl From<Command> for EventKind {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Self::Start,
            Command::Help => Self::Help,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub origin: Origin,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(origin: Origin, kind: EventKind) -> Self {
        Self { origin, kind }
    }
}

/// True for plain text that should go to the menu lookup.
pub fn is_plain_text(text: &str) -> bool {
    leading_command(text).is_none()
}
