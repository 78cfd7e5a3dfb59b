mod bot;
mod config;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;

use bot::handlers::log_preview;
use bot::{dispatch, is_plain_text, Command, EventKind, InboundEvent, Origin, ServiceCatalog, TelegramClient};
use config::Config;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    // Setup logging
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("servicebot.log"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        );

    // Guard must live until shutdown so buffered lines get flushed
    let _guard = match log_file {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_filter(
                            tracing_subscriber::EnvFilter::from_default_env()
                                .add_directive(tracing::Level::INFO.into()),
                        ),
                )
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(stdout_layer).init();
            warn!("Failed to open log file in {}: {e}, logging to stdout only", log_dir.display());
            None
        }
    };

    info!("🚀 Starting servicebot...");

    let catalog = match ServiceCatalog::standard() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    };
    info!("Catalog loaded: {} service(s)", catalog.len());
    match serde_json::to_string(catalog.as_ref()) {
        Ok(json) => debug!("Catalog: {json}"),
        Err(e) => warn!("Failed to serialize catalog: {e}"),
    }

    let bot = Bot::new(&config.telegram_token);
    let client = Arc::new(TelegramClient::new(bot.clone()));

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::filter_map(|msg: Message, me: Me| {
                        msg.text().and_then(|t| Command::from_text(t, me.username()))
                    })
                    .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_some_and(is_plain_text))
                        .endpoint(handle_text),
                ),
        )
        .branch(Update::filter_inline_query().endpoint(handle_inline_query));

    info!("✅ Bot is running (long polling)");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![catalog, client])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    msg: Message,
    cmd: Command,
    catalog: Arc<ServiceCatalog>,
    client: Arc<TelegramClient>,
) -> ResponseResult<()> {
    let event = InboundEvent::new(Origin::from_message(&msg), cmd.into());
    reply_in_chat(&event, &catalog, &client).await;
    Ok(())
}

async fn handle_text(
    msg: Message,
    catalog: Arc<ServiceCatalog>,
    client: Arc<TelegramClient>,
) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t.to_string(),
        None => return Ok(()),
    };

    let event = InboundEvent::new(Origin::from_message(&msg), EventKind::Text(text));
    reply_in_chat(&event, &catalog, &client).await;
    Ok(())
}

async fn handle_inline_query(
    query: InlineQuery,
    catalog: Arc<ServiceCatalog>,
    client: Arc<TelegramClient>,
) -> ResponseResult<()> {
    let event = InboundEvent::new(
        Origin::from_inline_query(&query),
        EventKind::InlineQuery(query.query.clone()),
    );
    log_event(&event);

    let reply = dispatch(&catalog, &event);
    debug!("Answering with {} inline result(s)", reply.inline_results().len());
    if let Err(e) = client.answer_inline(&query, &reply).await {
        warn!("Inline answer to user {} dropped: {e}", query.from.id);
    }
    Ok(())
}

async fn reply_in_chat(event: &InboundEvent, catalog: &ServiceCatalog, client: &TelegramClient) {
    log_event(event);
    let Some(chat_id) = event.origin.chat_id else {
        warn!("Event without a chat, nowhere to reply");
        return;
    };
    let reply = dispatch(catalog, event);
    debug!("Sending {} message(s) to chat {}", reply.texts().len(), chat_id);
    if let Err(e) = client.deliver(chat_id, &reply).await {
        warn!("Reply to chat {} dropped: {e}", chat_id);
    }
}

fn log_event(event: &InboundEvent) {
    let user = event
        .origin
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match &event.kind {
        EventKind::Text(text) | EventKind::InlineQuery(text) => {
            info!("📨 {} from {user}: \"{}\"", event.kind.label(), log_preview(text));
        }
        EventKind::Start | EventKind::Help => {
            info!("📨 /{} from {user}", event.kind.label());
        }
    }
}
