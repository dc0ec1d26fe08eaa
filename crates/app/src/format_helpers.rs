/// Shared formatting utilities for the UI layer.
///
/// All functions accept ISO-8601 date strings (e.g. "2026-03-02T18:04:00Z")
/// and produce human-readable output without external crate dependencies.

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse month number (1-12) from a two-digit string.
fn parse_month(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|m| (1..=12).contains(m))
}

/// Format an ISO date string as "Mar 2, 2026" (date-only, human-readable).
///
/// Falls back to the first 10 characters if parsing fails.
pub fn format_date_human(date_str: &str) -> String {
    if date_str.len() < 10 {
        return date_str.to_string();
    }
    let year = &date_str[..4];
    let month = &date_str[5..7];
    let day = &date_str[8..10];

    if let Some(m) = parse_month(month) {
        let day_num: u32 = day.parse().unwrap_or(0);
        format!("{} {}, {}", MONTH_NAMES[m - 1], day_num, year)
    } else {
        date_str[..10].to_string()
    }
}

/// Format an ISO datetime string as "Mar 2, 2026 6:04 PM" (with 12-hour
/// time). Falls back to date-only if the time portion is missing.
pub fn format_datetime_human(date_str: &str) -> String {
    let date_part = format_date_human(date_str);

    // Need at least "YYYY-MM-DDTHH:MM" (16 chars)
    if date_str.len() < 16 {
        return date_part;
    }

    let hour_str = &date_str[11..13];
    let min_str = &date_str[14..16];

    let hour: u32 = match hour_str.parse() {
        Ok(h) => h,
        Err(_) => return date_part,
    };

    let (display_hour, ampm) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };

    format!("{} {}:{} {}", date_part, display_hour, min_str, ampm)
}

/// Display coordinates as "40.71280, -74.00600".
pub fn format_coords(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.5}, {longitude:.5}")
}

/// Display a GPS fix: the address when known, the raw coordinates
/// otherwise.
pub fn format_location(point: &shared_types::GeoPoint) -> String {
    match &point.address {
        Some(address) if !address.is_empty() => address.clone(),
        _ => format_coords(point.latitude, point.longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn date_human_formats_iso_dates() {
        assert_eq!(format_date_human("2026-03-02T18:04:00Z"), "Mar 2, 2026");
        assert_eq!(format_date_human("2025-12-31"), "Dec 31, 2025");
    }

    #[test]
    fn date_human_falls_back_on_garbage() {
        assert_eq!(format_date_human("soon"), "soon");
        assert_eq!(format_date_human("2026-99-02T00:00:00Z"), "2026-99-02");
    }

    #[test]
    fn datetime_human_includes_twelve_hour_time() {
        assert_eq!(
            format_datetime_human("2026-03-02T18:04:00Z"),
            "Mar 2, 2026 6:04 PM"
        );
        assert_eq!(
            format_datetime_human("2026-03-02T00:15:00Z"),
            "Mar 2, 2026 12:15 AM"
        );
        assert_eq!(
            format_datetime_human("2026-03-02T12:00:00Z"),
            "Mar 2, 2026 12:00 PM"
        );
    }

    #[test]
    fn datetime_human_without_time_is_date_only() {
        assert_eq!(format_datetime_human("2026-03-02"), "Mar 2, 2026");
    }

    #[test]
    fn location_prefers_address_over_coords() {
        let with_address = shared_types::GeoPoint {
            latitude: 40.7128,
            longitude: -74.006,
            address: Some("Newark, NJ".into()),
            last_updated: None,
        };
        assert_eq!(format_location(&with_address), "Newark, NJ");

        let bare = shared_types::GeoPoint {
            latitude: 40.7128,
            longitude: -74.006,
            address: None,
            last_updated: None,
        };
        assert_eq!(format_location(&bare), "40.71280, -74.00600");
    }
}
