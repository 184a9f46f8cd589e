//! Telegram update handlers.
//!
//! Each handler validates the update, takes the per-chat lock, and calls
//! into the `cupid-core` engine; rendering of engine outcomes is shared in
//! `render`.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use crate::router::AppState;

mod callback;
mod commands;
mod keyboards;
mod render;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            let _guard = state.chat_locks.lock_chat(chat_id).await;
            return commands::handle_command(bot, msg, state).await;
        }

        // Fixed command matching only; free text gets a gentle pointer.
        let _ = state
            .messenger
            .send_html(
                cupid_core::domain::ChatId(chat_id),
                "❓ I only understand commands and buttons. Send /help for the list.",
            )
            .await;
    }

    Ok(())
}
