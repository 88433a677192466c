use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a limit in minutes the way the settings screens show it.
pub(crate) fn format_minutes(minutes: u32) -> String {
    format!("{minutes} mins")
}

/// Format the time since the last snapshot as `"Synced ~5m ago"`.
///
/// Returns an empty string when nothing has been synced yet.
pub(crate) fn format_synced(last_synced: Option<DateTime<Utc>>) -> String {
    let Some(dt) = last_synced else {
        return String::new();
    };
    format!("Synced {}", format_relative_time(&dt, Utc::now()))
}

fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt);

    let seconds = duration.num_seconds();
    if seconds < 5 {
        return "just now".to_owned();
    }
    if seconds < 60 {
        return format!("~{seconds}s ago");
    }

    let minutes = duration.num_minutes();
    if minutes < 60 {
        return format!("~{minutes}m ago");
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return format!("~{hours}h ago");
    }

    format!("~{}d ago", duration.num_days())
}

/// Cut `text` to at most `max_width` terminal columns, ending with `…` when
/// anything was removed.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn minutes_label() {
        assert_eq!(format_minutes(90), "90 mins");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now, now), "just now");
        assert_eq!(
            format_relative_time(&(now - Duration::seconds(30)), now),
            "~30s ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::minutes(5)), now),
            "~5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::hours(3)), now),
            "~3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::days(2)), now),
            "~2d ago"
        );
    }

    #[test]
    fn synced_is_empty_before_first_snapshot() {
        assert_eq!(format_synced(None), "");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("steam.exe", 20), "steam.exe");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("notepad.exe", 6), "notep\u{2026}");
        assert_eq!(truncate_to_width("notepad.exe", 0), "");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_to_width("游戏游戏", 5), "游戏\u{2026}");
    }
}
