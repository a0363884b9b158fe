//! Issue date conversion.

use chrono::NaiveDate;

/// Turn an emission timestamp (`YYYY-MM-DDTHH:MM:SS...`) into `DD/MM/YYYY`.
///
/// Only the part before the first `T` is used; its `-` separated segments
/// are reversed and joined with `/`. Nothing is validated, so unexpected
/// input comes out rearranged rather than rejected.
pub fn reverse_date_segments(timestamp: &str) -> String {
    let date = timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date);

    date.split('-').rev().collect::<Vec<_>>().join("/")
}

/// Whether a `DD/MM/YYYY` string names a real day.
pub fn is_calendar_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%d/%m/%Y").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_date_segments() {
        assert_eq!(reverse_date_segments("2024-03-07T10:00:00"), "07/03/2024");
        assert_eq!(
            reverse_date_segments("2023-12-31T23:59:59-06:00"),
            "31/12/2023"
        );
        assert_eq!(reverse_date_segments("2024-01-05"), "05/01/2024");
    }

    #[test]
    fn test_malformed_timestamps_pass_through() {
        assert_eq!(reverse_date_segments("20240307T1000"), "20240307");
        assert_eq!(reverse_date_segments("2024-3"), "3/2024");
        assert_eq!(reverse_date_segments(""), "");
        assert_eq!(reverse_date_segments("No disponible"), "No disponible");
    }

    #[test]
    fn test_is_calendar_date() {
        assert!(is_calendar_date("07/03/2024"));
        assert!(is_calendar_date("29/02/2024"));
        assert!(!is_calendar_date("30/02/2024"));
        assert!(!is_calendar_date("3/2024"));
        assert!(!is_calendar_date("No disponible"));
    }
}
