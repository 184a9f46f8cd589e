/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_html: bool,
    pub supports_inline_keyboards: bool,
    pub max_message_len: usize,
}

/// Inline keyboard (buttons) attached to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback_data: callback_data.into(),
        }
    }
}

impl InlineKeyboard {
    /// Lay buttons out two per row (the original keyboard layout).
    pub fn two_per_row(buttons: Vec<InlineButton>) -> Self {
        let mut rows = Vec::new();
        for pair in buttons.chunks(2) {
            rows.push(pair.to_vec());
        }
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_per_row_chunks_oddly_sized_lists() {
        let kb = InlineKeyboard::two_per_row(vec![
            InlineButton::new("a", "1"),
            InlineButton::new("b", "2"),
            InlineButton::new("c", "3"),
        ]);
        assert_eq!(kb.rows.len(), 2);
        assert_eq!(kb.rows[0].len(), 2);
        assert_eq!(kb.rows[1].len(), 1);
        assert_eq!(kb.rows[1][0].label, "c");
    }
}
