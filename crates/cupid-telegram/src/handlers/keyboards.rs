use cupid_core::messaging::types::{InlineButton, InlineKeyboard};

pub fn main_menu() -> InlineKeyboard {
    InlineKeyboard::two_per_row(vec![
        InlineButton::new("🔍 Search", "search"),
        InlineButton::new("❤️ Favorites", "favorites"),
        InlineButton::new("🔕 Blacklist", "blacklist"),
    ])
}

/// Buttons under a candidate card. The callback data carries the candidate
/// id, so favorite/blacklist taps stay valid even after newer cards arrive.
pub fn candidate_actions(candidate_id: i64) -> InlineKeyboard {
    InlineKeyboard::two_per_row(vec![
        InlineButton::new("❤️ Favorite", format!("fav:{candidate_id}")),
        InlineButton::new("🙈 Blacklist", format!("ban:{candidate_id}")),
        InlineButton::new("➡️ Next", "next"),
        InlineButton::new("🔍 New search", "search"),
    ])
}

pub fn after_action() -> InlineKeyboard {
    InlineKeyboard::two_per_row(vec![
        InlineButton::new("➡️ Next", "next"),
        InlineButton::new("🔍 New search", "search"),
        InlineButton::new("❤️ Favorites", "favorites"),
        InlineButton::new("🔕 Blacklist", "blacklist"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_actions_embed_the_candidate_id() {
        let kb = candidate_actions(42);
        let data: Vec<&str> = kb
            .rows
            .iter()
            .flatten()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert!(data.contains(&"fav:42"));
        assert!(data.contains(&"ban:42"));
        assert!(data.contains(&"next"));
    }
}
