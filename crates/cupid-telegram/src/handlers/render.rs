//! Shared rendering of engine outcomes, used by command and callback
//! handlers alike.

use cupid_core::{
    domain::{ChatId, ExclusionKind},
    formatting,
    matching::{Delivery, EmptyReason, NextOutcome, ResolveOutcome},
    Error,
};

use crate::router::AppState;

use super::keyboards;

pub async fn send_resolve_outcome(state: &AppState, chat_id: ChatId, outcome: ResolveOutcome) {
    match outcome {
        ResolveOutcome::Resolved(next) => send_next_outcome(state, chat_id, next).await,
        ResolveOutcome::NoneFound(reason) => {
            let text = match reason {
                EmptyReason::Demographics => {
                    "😔 Nobody matched your age, gender and city. \
                     Check that /age, /gender and /city are set."
                }
                EmptyReason::Interests => {
                    "😔 People were found in your city, but nobody shares your interests yet."
                }
            };
            let _ = state
                .messenger
                .send_keyboard(chat_id, text, keyboards::main_menu())
                .await;
        }
    }
}

pub async fn send_next_outcome(state: &AppState, chat_id: ChatId, outcome: NextOutcome) {
    match outcome {
        NextOutcome::Delivered(delivery) => send_delivery(state, chat_id, &delivery).await,
        NextOutcome::Exhausted => {
            let _ = state
                .messenger
                .send_keyboard(
                    chat_id,
                    "😔 No more candidates for now. Try a new search later.",
                    keyboards::main_menu(),
                )
                .await;
        }
    }
}

async fn send_delivery(state: &AppState, chat_id: ChatId, delivery: &Delivery) {
    let card = formatting::profile_card(&delivery.profile, &delivery.photos);
    let _ = state
        .messenger
        .send_keyboard(chat_id, &card, keyboards::candidate_actions(delivery.profile.id.0))
        .await;
}

/// Engine error → user-facing message, per the error taxonomy: conflicts are
/// informational, missing data is actionable, store failures are distinct
/// from "nobody found".
pub async fn send_engine_error(state: &AppState, chat_id: ChatId, err: Error) {
    let text = match &err {
        Error::AlreadyExcluded {
            kind: ExclusionKind::Favorite,
            ..
        } => "ℹ️ This user is already in your favorites.".to_string(),
        Error::AlreadyExcluded {
            kind: ExclusionKind::Blacklist,
            ..
        } => "ℹ️ This user is already in your blacklist.".to_string(),
        Error::DuplicateInterest { interest, .. } => {
            format!("ℹ️ You already have the interest {interest:?}.")
        }
        Error::ProfileNotFound(_) => "❓ You don't have a profile yet. Send /start.".to_string(),
        Error::AmbiguousPreference(_) => {
            "⚧ Set your gender first so I know who to look for: /gender m or /gender f."
                .to_string()
        }
        _ => {
            tracing::error!(error = %err, "engine call failed");
            "❌ Something broke on our side. Please try again later.".to_string()
        }
    };
    let _ = state.messenger.send_html(chat_id, &text).await;
}
