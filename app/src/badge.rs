//! Badge-style rendering for status values.
//!
//! Styles are keyed by the known status strings across all entities; anything
//! unrecognized gets the default style rather than failing.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub style: BadgeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Info,
    Success,
    Warning,
    Danger,
    Muted,
    Default,
}

pub fn badge_for(status: &str) -> Badge {
    let style = match status {
        "scheduled" => BadgeStyle::Info,
        "confirmed" | "paid" | "active" | "approved" => BadgeStyle::Success,
        "pending" => BadgeStyle::Warning,
        "cancelled" | "overdue" | "rejected" => BadgeStyle::Danger,
        "completed" | "inactive" => BadgeStyle::Muted,
        _ => BadgeStyle::Default,
    };
    Badge {
        label: status.to_string(),
        style,
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_styles() {
        assert_eq!(badge_for("paid").style, BadgeStyle::Success);
        assert_eq!(badge_for("pending").style, BadgeStyle::Warning);
        assert_eq!(badge_for("overdue").style, BadgeStyle::Danger);
        assert_eq!(badge_for("scheduled").style, BadgeStyle::Info);
        assert_eq!(badge_for("completed").style, BadgeStyle::Muted);
    }

    #[test]
    fn unrecognized_status_falls_back_to_default() {
        let badge = badge_for("archived");
        assert_eq!(badge.style, BadgeStyle::Default);
        assert_eq!(badge.to_string(), "[archived]");
    }
}
