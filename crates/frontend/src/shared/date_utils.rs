/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the dashboard
use chrono::NaiveDate;

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Format ISO date string to "DD Mon" for compact schedule columns
/// Example: "2024-03-15T00:00:00.000Z" -> "15 Mar"; empty or invalid -> "-"
pub fn format_day_month(date_str: Option<&str>) -> String {
    date_str
        .and_then(|s| s.split('T').next())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.format("%d %b").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Отметка прохождения шага: "15.03.2024 09:30"
pub fn format_stamp(date: &str, time: &str) -> String {
    match (date.is_empty(), time.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format_date(date),
        (true, false) => time.to_string(),
        (false, false) => format!("{} {}", format_date(date), time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_day_month() {
        assert_eq!(format_day_month(Some("2024-03-05T00:00:00.000Z")), "05 Mar");
        assert_eq!(format_day_month(Some("2024-12-31")), "31 Dec");
        assert_eq!(format_day_month(Some("")), "-");
        assert_eq!(format_day_month(None), "-");
    }

    #[test]
    fn test_format_stamp() {
        assert_eq!(format_stamp("2024-03-15", "09:30"), "15.03.2024 09:30");
        assert_eq!(format_stamp("2024-03-15", ""), "15.03.2024");
        assert_eq!(format_stamp("", ""), "");
    }
}
