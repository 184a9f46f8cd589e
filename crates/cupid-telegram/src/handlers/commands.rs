use std::sync::Arc;

use teloxide::prelude::*;

use cupid_core::{
    domain::{ChatId, ExclusionKind, Gender, Profile, UserId},
    formatting,
};

use crate::router::AppState;

use super::{keyboards, render};

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

fn parse_age(rest: &str) -> Option<u16> {
    let age = rest.trim().parse::<u16>().ok()?;
    (18..=120).contains(&age).then_some(age)
}

const WELCOME: &str = "🎉 <b>Welcome to Cupid!</b>\n\n\
This bot helps you meet people in your city.\n\n\
Set up your profile first:\n\
• /age 30\n\
• /gender m or /gender f\n\
• /city Springfield\n\
• /interest hiking (optional, repeatable)\n\n\
Then tap 🔍 Search below.";

const HELP: &str = "🤖 <b>Cupid commands</b>\n\n\
• /start — create your profile\n\
• /me — show your profile\n\
• /age, /gender, /city — update your profile\n\
• /interest &lt;name&gt; — add an interest\n\
• /interests — list your interests\n\
• /search — find new candidates\n\
• /next — show the next candidate\n\
• /favorites, /blacklist — your lists\n\n\
🔘 Buttons under each candidate: ❤️ favorite, 🙈 blacklist, ➡️ next.";

pub async fn handle_command(
    _bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let user_id = UserId(user.id.0 as i64);
    let (cmd, rest) = parse_command(text);

    match cmd.as_str() {
        "start" => {
            let profile = Profile {
                id: user_id,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone().unwrap_or_default(),
                age: None,
                gender: None,
                city: None,
            };
            match state.engine.ensure_profile(&profile).await {
                Ok(created) => {
                    if created {
                        tracing::info!(user = user_id.0, "new profile created");
                    }
                    let _ = state
                        .messenger
                        .send_keyboard(chat_id, WELCOME, keyboards::main_menu())
                        .await;
                }
                Err(err) => render::send_engine_error(&state, chat_id, err).await,
            }
        }

        "help" => {
            let _ = state.messenger.send_html(chat_id, HELP).await;
        }

        "me" => match state.engine.profile(user_id).await {
            Ok(Some(profile)) => {
                let interests = state
                    .engine
                    .interests_of(user_id)
                    .await
                    .unwrap_or_default();
                let summary = formatting::profile_summary(&profile, &interests);
                let _ = state
                    .messenger
                    .send_keyboard(chat_id, &summary, keyboards::main_menu())
                    .await;
            }
            Ok(None) => {
                let _ = state
                    .messenger
                    .send_html(chat_id, "❓ You don't have a profile yet. Send /start.")
                    .await;
            }
            Err(err) => render::send_engine_error(&state, chat_id, err).await,
        },

        "age" => match parse_age(&rest) {
            Some(age) => match state.engine.set_age(user_id, age).await {
                Ok(()) => {
                    let _ = state
                        .messenger
                        .send_html(chat_id, &format!("✅ Age set to {age}."))
                        .await;
                }
                Err(err) => render::send_engine_error(&state, chat_id, err).await,
            },
            None => {
                let _ = state
                    .messenger
                    .send_html(chat_id, "Usage: /age 30 (18 or older)")
                    .await;
            }
        },

        "gender" => match Gender::parse(&rest) {
            Some(gender) => match state.engine.set_gender(user_id, gender).await {
                Ok(()) => {
                    let _ = state
                        .messenger
                        .send_html(chat_id, &format!("✅ Gender set to {gender}."))
                        .await;
                }
                Err(err) => render::send_engine_error(&state, chat_id, err).await,
            },
            None => {
                let _ = state
                    .messenger
                    .send_html(chat_id, "Usage: /gender m or /gender f")
                    .await;
            }
        },

        "city" => {
            let city = rest.trim();
            if city.is_empty() {
                let _ = state
                    .messenger
                    .send_html(chat_id, "Usage: /city Springfield")
                    .await;
            } else {
                match state.engine.set_city(user_id, city).await {
                    Ok(()) => {
                        let _ = state
                            .messenger
                            .send_html(
                                chat_id,
                                &format!("✅ City set to {}.", formatting::escape_html(city)),
                            )
                            .await;
                    }
                    Err(err) => render::send_engine_error(&state, chat_id, err).await,
                }
            }
        }

        "interest" => {
            if rest.trim().is_empty() {
                let _ = state
                    .messenger
                    .send_html(chat_id, "Usage: /interest hiking")
                    .await;
            } else {
                match state.engine.attach_interest(user_id, &rest).await {
                    Ok(interest) => {
                        let _ = state
                            .messenger
                            .send_html(
                                chat_id,
                                &format!(
                                    "✅ Interest added: {}.",
                                    formatting::escape_html(&interest.name)
                                ),
                            )
                            .await;
                    }
                    Err(err) => render::send_engine_error(&state, chat_id, err).await,
                }
            }
        }

        "interests" => match state.engine.interests_of(user_id).await {
            Ok(interests) if interests.is_empty() => {
                let _ = state
                    .messenger
                    .send_html(chat_id, "🏷 No interests yet. Add one with /interest.")
                    .await;
            }
            Ok(interests) => {
                let _ = state
                    .messenger
                    .send_html(
                        chat_id,
                        &format!(
                            "🏷 Your interests: {}",
                            formatting::escape_html(&interests.join(", "))
                        ),
                    )
                    .await;
            }
            Err(err) => render::send_engine_error(&state, chat_id, err).await,
        },

        "search" => match state.engine.resolve(user_id).await {
            Ok(outcome) => render::send_resolve_outcome(&state, chat_id, outcome).await,
            Err(err) => render::send_engine_error(&state, chat_id, err).await,
        },

        "next" => match state.engine.next(user_id).await {
            Ok(outcome) => render::send_next_outcome(&state, chat_id, outcome).await,
            Err(err) => render::send_engine_error(&state, chat_id, err).await,
        },

        "favorites" => {
            send_exclusion_list(&state, chat_id, user_id, ExclusionKind::Favorite).await;
        }

        "blacklist" => {
            send_exclusion_list(&state, chat_id, user_id, ExclusionKind::Blacklist).await;
        }

        _ => {
            let _ = state
                .messenger
                .send_html(chat_id, "❓ Unknown command. Send /help for the list.")
                .await;
        }
    }

    Ok(())
}

pub(super) async fn send_exclusion_list(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    kind: ExclusionKind,
) {
    let title = match kind {
        ExclusionKind::Favorite => "Favorites",
        ExclusionKind::Blacklist => "Blacklist",
    };
    match state.engine.list_exclusion(kind, user_id).await {
        Ok(profiles) => {
            let text = formatting::exclusion_list(title, &profiles);
            let _ = state
                .messenger
                .send_keyboard(chat_id, &text, keyboards::main_menu())
                .await;
        }
        Err(err) => render::send_engine_error(state, chat_id, err).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parsing_strips_bot_mentions() {
        assert_eq!(
            parse_command("/search@cupid_bot"),
            ("search".to_string(), String::new())
        );
        assert_eq!(
            parse_command("/City  New Orleans "),
            ("city".to_string(), "New Orleans".to_string())
        );
        assert_eq!(parse_command("/age 30"), ("age".to_string(), "30".to_string()));
    }

    #[test]
    fn age_parsing_enforces_bounds() {
        assert_eq!(parse_age("30"), Some(30));
        assert_eq!(parse_age(" 18 "), Some(18));
        assert_eq!(parse_age("17"), None);
        assert_eq!(parse_age("121"), None);
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("-5"), None);
    }
}
