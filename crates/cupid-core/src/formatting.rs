//! HTML rendering for outbound messages.
//!
//! Telegram HTML supports only a small subset: `<b>`, `<i>`, `<code>`,
//! `<a href="...">`. Everything user-supplied is escaped.

use crate::domain::{Photo, Profile};

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Candidate (or own) profile card with its most-liked photos as links.
pub fn profile_card(profile: &Profile, photos: &[Photo]) -> String {
    let mut out = format!("👤 <b>{}</b>\n", escape_html(&profile.display_name()));

    if let Some(age) = profile.age {
        out.push_str(&format!("🎂 {age}\n"));
    }
    if let Some(city) = &profile.city {
        out.push_str(&format!("📍 {}\n", escape_html(city)));
    }

    for (idx, photo) in photos.iter().enumerate() {
        out.push_str(&format!(
            "📷 <a href=\"{}\">Photo {}</a> ({} likes)\n",
            escape_html(&photo.url),
            idx + 1,
            photo.likes
        ));
    }

    out
}

/// Numbered exclusion list (favorites or blacklist) with profile links.
pub fn exclusion_list(title: &str, profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return format!("📋 Your {title} list is empty.");
    }

    let mut out = format!("📋 <b>{}:</b>\n\n", escape_html(title));
    for (idx, profile) in profiles.iter().enumerate() {
        out.push_str(&format!(
            "{}. <a href=\"tg://user?id={}\">{}</a>\n",
            idx + 1,
            profile.id.0,
            escape_html(&profile.display_name())
        ));
    }
    out
}

/// Own-profile summary for `/me`, marking the fields still unset.
pub fn profile_summary(profile: &Profile, interests: &[String]) -> String {
    let mut out = format!("👤 <b>{}</b>\n", escape_html(&profile.display_name()));
    out.push_str(&match profile.age {
        Some(age) => format!("🎂 Age: {age}\n"),
        None => "🎂 Age: not set (/age)\n".to_string(),
    });
    out.push_str(&match profile.gender {
        Some(g) => format!("⚧ Gender: {g}\n"),
        None => "⚧ Gender: not set (/gender)\n".to_string(),
    });
    out.push_str(&match &profile.city {
        Some(city) => format!("📍 City: {}\n", escape_html(city)),
        None => "📍 City: not set (/city)\n".to_string(),
    });
    if interests.is_empty() {
        out.push_str("🏷 Interests: none (/interest)\n");
    } else {
        out.push_str(&format!(
            "🏷 Interests: {}\n",
            escape_html(&interests.join(", "))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn profile() -> Profile {
        Profile {
            id: UserId(7),
            first_name: "Ann <script>".to_string(),
            last_name: "Lee".to_string(),
            age: Some(28),
            gender: None,
            city: Some("Spring & Field".to_string()),
        }
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn card_escapes_user_content_and_lists_photos() {
        let photos = vec![Photo {
            user_id: UserId(7),
            url: "https://example.com/p.jpg".to_string(),
            likes: 12,
            is_profile: true,
        }];
        let card = profile_card(&profile(), &photos);
        assert!(card.contains("Ann &lt;script&gt; Lee"));
        assert!(card.contains("Spring &amp; Field"));
        assert!(card.contains("https://example.com/p.jpg"));
        assert!(card.contains("(12 likes)"));
    }

    #[test]
    fn exclusion_list_distinguishes_empty() {
        assert_eq!(
            exclusion_list("favorites", &[]),
            "📋 Your favorites list is empty."
        );
        let out = exclusion_list("favorites", &[profile()]);
        assert!(out.contains("1. "));
        assert!(out.contains("tg://user?id=7"));
    }

    #[test]
    fn summary_marks_unset_fields() {
        let out = profile_summary(&profile(), &[]);
        assert!(out.contains("Gender: not set"));
        assert!(out.contains("Age: 28"));
        assert!(out.contains("Interests: none"));
    }
}
