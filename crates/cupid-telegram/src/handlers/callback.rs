use std::sync::Arc;

use teloxide::prelude::*;

use cupid_core::domain::{ChatId, ExclusionKind, UserId};

use crate::router::AppState;

use super::{commands, keyboards, render};

/// Parsed button payloads. Favorite/blacklist taps carry the candidate id in
/// the callback data so they stay valid after newer cards arrive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Search,
    Next,
    Favorite(i64),
    Blacklist(i64),
    ShowFavorites,
    ShowBlacklist,
}

fn parse_action(data: &str) -> Option<Action> {
    match data {
        "search" => return Some(Action::Search),
        "next" => return Some(Action::Next),
        "favorites" => return Some(Action::ShowFavorites),
        "blacklist" => return Some(Action::ShowBlacklist),
        _ => {}
    }
    let (prefix, id) = data.split_once(':')?;
    let id = id.parse::<i64>().ok()?;
    match prefix {
        "fav" => Some(Action::Favorite(id)),
        "ban" => Some(Action::Blacklist(id)),
        _ => None,
    }
}

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let data = q.data.clone().unwrap_or_default();
    let Some(chat) = q.message.as_ref().map(|m| m.chat.id.0) else {
        let _ = state.messenger.answer_callback(&q.id, None).await;
        return Ok(());
    };
    let chat_id = ChatId(chat);
    let user_id = UserId(q.from.id.0 as i64);

    let Some(action) = parse_action(&data) else {
        // Stale or malformed payload; acknowledge and move on.
        let _ = state.messenger.answer_callback(&q.id, None).await;
        return Ok(());
    };

    let _guard = state.chat_locks.lock_chat(chat).await;

    match action {
        Action::Search => {
            let _ = state.messenger.answer_callback(&q.id, None).await;
            match state.engine.resolve(user_id).await {
                Ok(outcome) => render::send_resolve_outcome(&state, chat_id, outcome).await,
                Err(err) => render::send_engine_error(&state, chat_id, err).await,
            }
        }

        Action::Next => {
            let _ = state.messenger.answer_callback(&q.id, None).await;
            match state.engine.next(user_id).await {
                Ok(outcome) => render::send_next_outcome(&state, chat_id, outcome).await,
                Err(err) => render::send_engine_error(&state, chat_id, err).await,
            }
        }

        Action::Favorite(target) => {
            add_exclusion(&state, &q.id, chat_id, user_id, target, ExclusionKind::Favorite).await;
        }

        Action::Blacklist(target) => {
            add_exclusion(&state, &q.id, chat_id, user_id, target, ExclusionKind::Blacklist)
                .await;
        }

        Action::ShowFavorites => {
            let _ = state.messenger.answer_callback(&q.id, None).await;
            commands::send_exclusion_list(&state, chat_id, user_id, ExclusionKind::Favorite)
                .await;
        }

        Action::ShowBlacklist => {
            let _ = state.messenger.answer_callback(&q.id, None).await;
            commands::send_exclusion_list(&state, chat_id, user_id, ExclusionKind::Blacklist)
                .await;
        }
    }

    Ok(())
}

async fn add_exclusion(
    state: &AppState,
    callback_id: &str,
    chat_id: ChatId,
    owner: UserId,
    target: i64,
    kind: ExclusionKind,
) {
    let (ack, followup) = match kind {
        ExclusionKind::Favorite => ("Added to favorites", "❤️ Added to your favorites."),
        ExclusionKind::Blacklist => ("Added to blacklist", "🙈 You won't see this user again."),
    };

    match state.engine.add_exclusion(kind, owner, UserId(target)).await {
        Ok(()) => {
            let _ = state.messenger.answer_callback(callback_id, Some(ack)).await;
            let _ = state
                .messenger
                .send_keyboard(chat_id, followup, keyboards::after_action())
                .await;
        }
        Err(err) => {
            let _ = state.messenger.answer_callback(callback_id, None).await;
            render::send_engine_error(state, chat_id, err).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_actions() {
        assert_eq!(parse_action("search"), Some(Action::Search));
        assert_eq!(parse_action("next"), Some(Action::Next));
        assert_eq!(parse_action("favorites"), Some(Action::ShowFavorites));
        assert_eq!(parse_action("blacklist"), Some(Action::ShowBlacklist));
    }

    #[test]
    fn parses_targeted_actions() {
        assert_eq!(parse_action("fav:42"), Some(Action::Favorite(42)));
        assert_eq!(parse_action("ban:7"), Some(Action::Blacklist(7)));
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(parse_action(""), None);
        assert_eq!(parse_action("fav:"), None);
        assert_eq!(parse_action("fav:abc"), None);
        assert_eq!(parse_action("zap:1"), None);
        assert_eq!(parse_action("askuser:1:2"), None);
    }
}
