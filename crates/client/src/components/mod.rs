//! Shared UI components.

pub mod comments;
pub mod follow_button;
pub mod post_card;
pub mod sidebar;

pub use comments::CommentSection;
pub use follow_button::FollowButton;
pub use post_card::PostCard;
pub use sidebar::Sidebar;

/// Avatar URL with a generated fallback for users without one.
pub fn avatar_url(avatar: Option<&str>, username: &str) -> String {
    match avatar {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            urlencoding::encode(username)
        ),
    }
}

/// "Just now" / "5m ago" / "3h ago" style timestamps.
pub fn format_relative(created_at: chrono::DateTime<chrono::Utc>) -> String {
    format_relative_at(created_at, chrono::Utc::now())
}

fn format_relative_at(
    created_at: chrono::DateTime<chrono::Utc>,
    now: chrono::DateTime<chrono::Utc>,
) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        created_at.format("%m/%d/%Y").to_string()
    }
}

/// Compact counters: 950 -> "950", 1200 -> "1.2k".
pub fn format_count(n: u32) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn relative_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 11, 4, 12, 0, 0).unwrap();
        assert_eq!(format_relative_at(now - Duration::seconds(20), now), "Just now");
        assert_eq!(format_relative_at(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative_at(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative_at(now - Duration::days(2), now), "2d ago");
        assert_eq!(
            format_relative_at(now - Duration::days(30), now),
            "10/05/2025"
        );
    }

    #[test]
    fn compact_counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(1_200), "1.2k");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn avatar_falls_back_to_generated_image() {
        assert_eq!(avatar_url(Some("https://cdn/x.png"), "jdoe"), "https://cdn/x.png");
        assert!(avatar_url(None, "jdoe").contains("dicebear"));
        assert!(avatar_url(Some(""), "j doe").contains("j%20doe"));
    }
}
