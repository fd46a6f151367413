use chrono::{Duration, NaiveDate};

/// parse a day-first date string ("dd/mm/yyyy"), falling back to ISO
/// ("yyyy-mm-dd"); unparseable input yields None rather than an error so a
/// malformed booking date degrades to a null due date downstream
pub fn parse_date_in(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let day = parts[0].parse().ok()?;
        let month = parts[1].parse().ok()?;
        let year = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// format as "dd/mm/yyyy" for display; None becomes an em dash
pub fn format_date_in(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "—".to_string(),
    }
}

/// calendar-day addition (not business days)
pub fn add_days(date: Option<NaiveDate>, days: i64) -> Option<NaiveDate> {
    date.map(|d| d + Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_first() {
        assert_eq!(
            parse_date_in("11/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
    }

    #[test]
    fn test_parse_iso_fallback() {
        assert_eq!(
            parse_date_in("2024-01-11"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_date_in(""), None);
        assert_eq!(parse_date_in("soon"), None);
        assert_eq!(parse_date_in("31/02/2024"), None);
    }

    #[test]
    fn test_add_days_crosses_month() {
        let bd = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(add_days(bd, 10), NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(add_days(bd, 75), NaiveDate::from_ymd_opt(2024, 3, 16));
        assert_eq!(add_days(bd, 165), NaiveDate::from_ymd_opt(2024, 6, 14));
        assert_eq!(add_days(None, 10), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_date_in(NaiveDate::from_ymd_opt(2024, 3, 16)), "16/03/2024");
        assert_eq!(format_date_in(None), "—");
    }
}
