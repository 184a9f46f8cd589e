use std::fmt;

/// Stable external user id (Telegram user id, numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// The gender a requester of this gender is matched against.
    pub fn complement(self) -> Gender {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }

    /// Accepts the stored form plus the short forms users type (`f`, `m`).
    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim().to_lowercase().as_str() {
            "f" | "female" => Some(Gender::Female),
            "m" | "male" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored demographic record. Created on first contact; age/gender/city stay
/// unset until the user supplies them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
    pub city: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Photo row, populated by an external enrichment step and only read here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub user_id: UserId,
    pub url: String,
    pub likes: i64,
    pub is_profile: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interest {
    pub id: i64,
    pub name: String,
}

/// Which per-user exclusion set an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExclusionKind {
    /// Bookmark; does not exclude the target from future suggestions.
    Favorite,
    /// Hard exclusion; the target never enters the ledger.
    Blacklist,
}

impl ExclusionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExclusionKind::Favorite => "favorite",
            ExclusionKind::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for ExclusionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the match ledger: a discovered requester→candidate pair and
/// its delivery state. Rows are never deleted; `shown` flips once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: i64,
    pub requester: UserId,
    pub candidate: UserId,
    /// Unix millis at resolution time; delivery order follows it.
    pub discovered_at: i64,
    pub shown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_accepts_short_and_long_forms() {
        assert_eq!(Gender::parse("f"), Some(Gender::Female));
        assert_eq!(Gender::parse(" Male "), Some(Gender::Male));
        assert_eq!(Gender::parse("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::parse("x"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn gender_complement_is_an_involution() {
        assert_eq!(Gender::Female.complement(), Gender::Male);
        assert_eq!(Gender::Male.complement(), Gender::Female);
        assert_eq!(Gender::Male.complement().complement(), Gender::Male);
    }

    #[test]
    fn display_name_skips_empty_last_name() {
        let mut p = Profile {
            id: UserId(1),
            first_name: "Ann".to_string(),
            last_name: String::new(),
            age: None,
            gender: None,
            city: None,
        };
        assert_eq!(p.display_name(), "Ann");
        p.last_name = "Lee".to_string();
        assert_eq!(p.display_name(), "Ann Lee");
    }
}
