use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;

/// Label for candidates with no usable activity timestamp
pub const UNKNOWN_ACTIVITY_LABEL: &str = "activity unknown";

/// Whole hours elapsed since `last_active`, never negative
#[inline]
pub fn hours_since(last_active: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_active).num_hours().max(0)
}

/// Order two activity timestamps by hours since activity, fewest first
///
/// A later timestamp means fewer hours have elapsed, so this is the
/// reverse of chronological order. A missing timestamp counts as the
/// least recent activity possible and sorts after every known one.
#[inline]
pub fn compare_recency(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    // `None < Some(_)`, so the reversed comparison puts `None` last
    b.cmp(&a)
}

/// Human-readable "time ago" label for a last-activity timestamp
pub fn describe(last_active: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last_active) = last_active else {
        return UNKNOWN_ACTIVITY_LABEL.to_string();
    };

    let hours = hours_since(last_active, now);
    match hours {
        0 => "just now".to_string(),
        1 => "1 hour ago".to_string(),
        2..=23 => format!("{} hours ago", hours),
        _ => {
            let days = hours / 24;
            if days == 1 {
                "1 day ago".to_string()
            } else {
                format!("{} days ago", days)
            }
        }
    }
}

/// Deserialize an activity timestamp, mapping anything unparseable to `None`
///
/// Clients sometimes send display strings such as "2 hours ago"; those
/// must not reject the whole candidate list.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match raw {
        Some(serde_json::Value::String(text)) => text.trim().parse::<DateTime<Utc>>().ok(),
        _ => None,
    })
}
