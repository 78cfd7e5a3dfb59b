//! Telegram client using teloxide.

use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, InlineQueryResult, InlineQueryResultArticle, InputMessageContent,
    InputMessageContentText, KeyboardButton, KeyboardMarkup, ParseMode,
};
use tracing::warn;

use crate::bot::reply::{Formatting, InlineResult, OutboundReply, ReplyStep, TextMessage};

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub async fn send_text(&self, chat_id: i64, message: &TextMessage) -> Result<(), String> {
        let mut request = self.bot.send_message(ChatId(chat_id), message.text.as_str());

        if let Some(mode) = parse_mode(message.formatting) {
            request = request.parse_mode(mode);
        }

        if let Some(ref buttons) = message.menu {
            request = request.reply_markup(menu_keyboard(buttons));
        }

        request.await.map(|_| ()).map_err(|e| {
            let msg = format!("Failed to send: {e}");
            warn!("{}", msg);
            msg
        })
    }

    /// Show "typing..." in the chat. Failure is logged and ignored.
    pub async fn send_typing(&self, chat_id: i64) {
        if let Err(e) = self
            .bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
        {
            warn!("Failed to send typing indicator to {}: {e}", chat_id);
        }
    }

    /// Execute message steps in order. Stops at the first failed send.
    pub async fn deliver(&self, chat_id: i64, reply: &OutboundReply) -> Result<(), String> {
        let OutboundReply::Messages(steps) = reply else {
            return Err("inline results cannot be sent to a chat".to_string());
        };

        for step in steps {
            match step {
                ReplyStep::Text(message) => {
                    self.send_text(chat_id, message).await?;
                }
                ReplyStep::Typing => self.send_typing(chat_id).await,
            }
        }
        Ok(())
    }

    pub async fn answer_inline(&self, query: &InlineQuery, reply: &OutboundReply) -> Result<(), String> {
        let OutboundReply::Inline { results, cache_time } = reply else {
            return Err("only inline results can answer an inline query".to_string());
        };

        let articles: Vec<InlineQueryResult> = results.iter().map(to_article).collect();

        self.bot
            .answer_inline_query(query.id.clone(), articles)
            .cache_time(*cache_time)
            .await
            .map_err(|e| {
                let msg = format!("Failed to answer inline query: {e}");
                warn!("{}", msg);
                msg
            })?;

        Ok(())
    }
}

fn parse_mode(formatting: Formatting) -> Option<ParseMode> {
    match formatting {
        Formatting::Plain => None,
        Formatting::Html => Some(ParseMode::Html),
    }
}

fn menu_keyboard(buttons: &[String]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = buttons
        .iter()
        .map(|b| vec![KeyboardButton::new(b.as_str())])
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

fn to_article(result: &InlineResult) -> InlineQueryResult {
    let mut content = InputMessageContentText::new(result.body.as_str());
    if let Some(mode) = parse_mode(result.formatting) {
        content = content.parse_mode(mode);
    }

    let mut article = InlineQueryResultArticle::new(
        result.id.as_str(),
        result.title.as_str(),
        InputMessageContent::Text(content),
    );
    if let Some(ref description) = result.description {
        article = article.description(description.as_str());
    }

    InlineQueryResult::Article(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_keyboard_one_button_per_row() {
        let keyboard = menu_keyboard(&["a".to_string(), "b".to_string()]);
        assert_eq!(keyboard.keyboard.len(), 2);
        assert!(keyboard.keyboard.iter().all(|row| row.len() == 1));
        assert_eq!(keyboard.keyboard[1][0].text, "b");
    }

    #[test]
    fn test_parse_mode_mapping() {
        assert_eq!(parse_mode(Formatting::Plain), None);
        assert_eq!(parse_mode(Formatting::Html), Some(ParseMode::Html));
    }
}
