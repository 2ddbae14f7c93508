use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Registration timestamp as shown to operators: `YYYY/MM/DD HH:MM:SS`
/// in the configured civil timezone.
pub fn format_registered_at(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%Y/%m/%d %H:%M:%S").to_string()
}

pub fn registered_now(tz: Tz) -> String {
    format_registered_at(Utc::now(), tz)
}
