use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

/// Joins an ordered sequence field for display (`"Rock, Jazz"`).
pub fn join_for_display(values: &[String]) -> String {
    values.join(", ")
}

/// Formats a gig date as `March 3rd 2025, 7:30 pm`.
pub fn format_gig_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.day();
    format!(
        "{month} {day}{suffix} {year}, {time}",
        month = date.format("%B"),
        suffix = ordinal_suffix(day),
        year = date.year(),
        time = date.format("%-I:%M %P"),
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn formats_like_the_card_footer() {
        let date = Utc.with_ymd_and_hms(2025, 3, 3, 19, 30, 0).unwrap();
        assert_eq!(format_gig_date(&date), "March 3rd 2025, 7:30 pm");

        let date = Utc.with_ymd_and_hms(2024, 11, 12, 0, 5, 0).unwrap();
        assert_eq!(format_gig_date(&date), "November 12th 2024, 12:05 am");
    }

    #[test]
    fn respects_display_offset() {
        let hst = FixedOffset::west_opt(10 * 3600).unwrap();
        let date = Utc
            .with_ymd_and_hms(2025, 1, 2, 4, 0, 0)
            .unwrap()
            .with_timezone(&hst);
        assert_eq!(format_gig_date(&date), "January 1st 2025, 6:00 pm");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn joins_sequences_with_comma_space() {
        let values = vec!["Rock".to_string(), "Jazz".to_string()];
        assert_eq!(join_for_display(&values), "Rock, Jazz");
        assert_eq!(join_for_display(&[]), "");
    }
}
