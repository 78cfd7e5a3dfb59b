//! Bot module - answers menu selections and inline searches over the service catalog.

pub mod catalog;
pub mod event;
pub mod handlers;
pub mod reply;
pub mod telegram;


pub use catalog::ServiceCatalog;
pub use event::{is_plain_text, Command, EventKind, InboundEvent, Origin};
pub use handlers::dispatch;
pub use telegram::TelegramClient;
