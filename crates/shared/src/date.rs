use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// First day of a calendar week.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Start of the calendar week containing `date`.
    pub fn week_of(&self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_days(Days::new(self.position(date).into()))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Zero-based position of `date` inside its calendar week.
    pub fn position(&self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Monday => date.weekday().num_days_from_monday(),
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        }
    }
}

/// `count` consecutive days starting at `start`. Days past the last
/// representable date are a caller error.
pub fn week_dates(start: NaiveDate, count: usize) -> crate::Result<Vec<NaiveDate>> {
    (0..count as u64)
        .map(|offset| {
            start.checked_add_days(Days::new(offset)).ok_or_else(|| {
                crate::Error::User(format!("{start} plus {offset} days is out of range"))
            })
        })
        .collect()
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Label shown next to a planned day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLabel {
    pub weekday: &'static str,
    /// 1 = first day of the week as configured by [`WeekStart`].
    pub day_of_week: u32,
}

impl DayLabel {
    pub fn new(date: NaiveDate, start_on: WeekStart) -> Self {
        Self {
            weekday: weekday_name(date),
            day_of_week: start_on.position(date) + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_dates_are_contiguous() {
        let dates = week_dates(date(2025, 12, 29), 5).unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], date(2025, 12, 29));
        assert_eq!(dates[4], date(2026, 1, 2));
    }

    #[test]
    fn test_week_dates_past_max_date_is_user_error() {
        let err = week_dates(NaiveDate::MAX, 2).unwrap_err();
        assert!(matches!(err, crate::Error::User(_)));
        assert_eq!(week_dates(NaiveDate::MAX, 1).unwrap(), vec![NaiveDate::MAX]);
    }

    #[test]
    fn test_day_label_depends_on_week_start() {
        // 2025-10-26 is a Sunday
        let sunday = date(2025, 10, 26);

        let label = DayLabel::new(sunday, WeekStart::Monday);
        assert_eq!(label.weekday, "Sunday");
        assert_eq!(label.day_of_week, 7);

        let label = DayLabel::new(sunday, WeekStart::Sunday);
        assert_eq!(label.day_of_week, 1);
    }

    #[test]
    fn test_week_of() {
        let wednesday = date(2025, 10, 22);
        assert_eq!(WeekStart::Monday.week_of(wednesday), date(2025, 10, 20));
        assert_eq!(WeekStart::Sunday.week_of(wednesday), date(2025, 10, 19));
    }

    #[test]
    fn test_week_start_parses_lowercase() {
        assert_eq!("sunday".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        let parsed: WeekStart = serde_json::from_str("\"monday\"").unwrap();
        assert_eq!(parsed, WeekStart::Monday);
    }
}
