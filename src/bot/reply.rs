//! Outbound replies produced by the handlers.

use serde::Serialize;

/// How the platform should render a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Formatting {
    Plain,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessage {
    pub text: String,
    pub formatting: Formatting,
    /// Reply keyboard, one button per row.
    pub menu: Option<Vec<String>>,
}

impl TextMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Formatting::Plain,
            menu: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Formatting::Html,
            menu: None,
        }
    }

    pub fn with_menu(mut self, buttons: Vec<String>) -> Self {
        self.menu = Some(buttons);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReplyStep {
    Text(TextMessage),
    /// "typing..." presence indicator. Best-effort.
    Typing,
}

/// One selectable inline query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineResult {
    pub id: String,
    pub title: String,
    /// Short text shown under the title in the result list.
    pub description: Option<String>,
    /// Message inserted into the chat when the result is chosen.
    pub body: String,
    pub formatting: Formatting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutboundReply {
    Messages(Vec<ReplyStep>),
    Inline {
        results: Vec<InlineResult>,
        /// Seconds the client may cache the answer.
        cache_time: u32,
    },
}

impl OutboundReply {
    pub fn text(message: TextMessage) -> Self {
        Self::Messages(vec![ReplyStep::Text(message)])
    }

    /// Text messages in order, skipping presence steps.
    pub fn texts(&self) -> Vec<&TextMessage> {
        match self {
            Self::Messages(steps) => steps
                .iter()
                .filter_map(|s| match s {
                    ReplyStep::Text(t) => Some(t),
                    ReplyStep::Typing => None,
                })
                .collect(),
            Self::Inline { .. } => Vec::new(),
        }
    }

    pub fn inline_results(&self) -> &[InlineResult] {
        match self {
            Self::Inline { results, .. } => results,
            Self::Messages(_) => &[],
        }
    }
}
