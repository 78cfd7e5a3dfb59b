//! Event handlers. Pure functions of the catalog and the event.

use teloxide::utils::html;

use crate::bot::catalog::ServiceCatalog;
use crate::bot::event::{EventKind, InboundEvent, Origin};
use crate::bot::reply::{Formatting, InlineResult, OutboundReply, ReplyStep, TextMessage};

/// Name used when the user has no usable first name.
pub const GUEST_NAME: &str = "гость";

pub const GREETING_PREFIX: &str = "👋 Привет, ";

pub const MENU_PROMPT: &str = "Выбери интересующий раздел:";

pub const HELP_TEXT: &str = "Введите /start, чтобы увидеть список услуг.";

pub const UNKNOWN_SELECTION: &str = "Выберите услугу из меню или введите /help.";

pub const NOT_FOUND_ID: &str = "no_results";

pub const NOT_FOUND_TITLE: &str = "😕 Ничего не найдено";

pub const NOT_FOUND_BODY: &str =
    "По вашему запросу ничего не найдено. Попробуйте: подбор, аутсорсинг, консалтинг.";

/// Shown for an empty inline query. Independent of the catalog.
pub const INLINE_HINTS: [(&str, &str); 3] = [
    ("Подбор персонала", "Подбор руководителей и специалистов."),
    ("Аутсорсинг", "Аутсорсинг бизнес-функций."),
    ("Консалтинг", "Стратегия, управление, финансы."),
];

/// Max chars of a description shown in the inline result list.
pub const MAX_INLINE_DESCRIPTION: usize = 80;

pub const ELLIPSIS: &str = "...";

/// Inline answers must not be cached by the client for long.
pub const INLINE_CACHE_TIME: u32 = 1;

pub fn dispatch(catalog: &ServiceCatalog, event: &InboundEvent) -> OutboundReply {
    match &event.kind {
        EventKind::Start => handle_start(catalog, &event.origin),
        EventKind::Help => handle_help(),
        EventKind::Text(text) => handle_text(catalog, text),
        EventKind::InlineQuery(query) => handle_inline_query(catalog, query),
    }
}

pub fn handle_start(catalog: &ServiceCatalog, origin: &Origin) -> OutboundReply {
    let name = origin
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(GUEST_NAME);

    let greeting = format!(
        "{GREETING_PREFIX}{}!\n\n\
         Я бот компании <b>ASCR</b>.\n\
         Мы предлагаем профессиональные услуги в области:\n\n\
         💼 Подбор персонала\n\
         🧾 Аутсорсинг бизнес-функций\n\
         📊 Консалтинг\n\n\
         Чтобы узнать подробнее — нажми кнопку ниже 👇",
        html::escape(name)
    );

    let menu = catalog.names().map(str::to_string).collect();

    OutboundReply::Messages(vec![
        ReplyStep::Text(TextMessage::html(greeting)),
        ReplyStep::Typing,
        ReplyStep::Text(TextMessage::plain(MENU_PROMPT).with_menu(menu)),
    ])
}

pub fn handle_help() -> OutboundReply {
    OutboundReply::text(TextMessage::plain(HELP_TEXT))
}

pub fn handle_text(catalog: &ServiceCatalog, text: &str) -> OutboundReply {
    let reply = catalog.get(text).unwrap_or(UNKNOWN_SELECTION);
    OutboundReply::text(TextMessage::plain(reply))
}

pub fn handle_inline_query(catalog: &ServiceCatalog, query: &str) -> OutboundReply {
    let query = query.trim().to_lowercase();

    let results = if query.is_empty() {
        INLINE_HINTS
            .iter()
            .enumerate()
            .map(|(i, (title, desc))| InlineResult {
                id: format!("hint-{i}"),
                title: format!("🔹 {title}"),
                description: Some((*desc).to_string()),
                body: html_card(title, desc),
                formatting: Formatting::Html,
            })
            .collect()
    } else {
        let found: Vec<InlineResult> = catalog
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.name.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
            })
            .map(|(i, entry)| InlineResult {
                id: format!("service-{i}"),
                title: format!("📋 {}", entry.name),
                description: Some(shorten(&entry.description, MAX_INLINE_DESCRIPTION)),
                body: html_card(&entry.name, &entry.description),
                formatting: Formatting::Html,
            })
            .collect();

        if found.is_empty() {
            vec![not_found()]
        } else {
            found
        }
    };

    OutboundReply::Inline {
        results,
        cache_time: INLINE_CACHE_TIME,
    }
}

fn not_found() -> InlineResult {
    InlineResult {
        id: NOT_FOUND_ID.to_string(),
        title: NOT_FOUND_TITLE.to_string(),
        description: None,
        body: NOT_FOUND_BODY.to_string(),
        formatting: Formatting::Plain,
    }
}

/// Bold title, blank line, text.
fn html_card(title: &str, text: &str) -> String {
    format!("<b>{}</b>\n\n{}", html::escape(title), html::escape(text))
}

/// Cut to `max_chars` chars and append an ellipsis, only if longer.
pub fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Shortened form of user input for log lines.
pub fn log_preview(text: &str) -> String {
    text.chars().take(100).collect()
}
