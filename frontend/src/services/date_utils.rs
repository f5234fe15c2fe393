use chrono::NaiveDate;
use shared::{parse_date_key, WeekWindow};

/// Today as a calendar date, read from the browser clock's local fields.
/// This is the only place "now" enters the view model; all other date math
/// works on plain calendar dates.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .unwrap_or(NaiveDate::MIN)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Header title for a week window, e.g. "June 2025"
pub fn week_title(window: &WeekWindow) -> String {
    use chrono::Datelike;
    let start = window.start();
    format!("{} {}", month_name(start.month()), start.year())
}

/// Format a YYYY-MM-DD date string for display, e.g. "June 15, 2025"
pub fn format_date_for_display(date_str: &str) -> String {
    use chrono::Datelike;
    match parse_date_key(date_str) {
        Some(d) => format!("{} {}, {}", month_name(d.month()), d.day(), d.year()),
        None => date_str.to_string(),
    }
}

/// Format an RFC 3339 timestamp for note display, e.g. "June 15, 2025 14:30"
pub fn format_timestamp_for_display(timestamp: &str) -> String {
    let mut parts = timestamp.split('T');
    let date_part = parts.next().unwrap_or(timestamp);
    let time_part = parts.next().unwrap_or("");

    let date_display = format_date_for_display(date_part);
    if time_part.len() >= 5 {
        format!("{} {}", date_display, &time_part[..5])
    } else {
        date_display
    }
}
