use std::ops::RangeInclusive;

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde_json::Value;

/// Year of the oldest surviving film; nothing can be released before it.
pub const FIRST_FILM_YEAR: i16 = 1888;

/// Collects field errors across a validation pass instead of stopping at the
/// first failure. One instance per record; it is never reset.
///
/// Every `check_*` returns the typed value when that field passed, so callers
/// can build a typed record from the same pass.
#[derive(Debug)]
pub struct Validator {
    correct: bool,
    errors: Vec<String>,
    current_year: i16,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_current_year(Timestamp::now().to_zoned(TimeZone::UTC).year())
    }

    pub fn with_current_year(current_year: i16) -> Self {
        Self { correct: true, errors: Vec::new(), current_year }
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_result(self) -> (bool, Vec<String>) {
        (self.correct, self.errors)
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn reject(&mut self, message: impl Into<String>) {
        self.correct = false;
        self.errors.push(message.into());
    }

    fn wrong_type(&mut self, expected: &str, value: &Value) {
        self.reject(format!("Wrong type, expected {expected}, got {}", kind(value)));
    }

    /// Length is counted in characters, not bytes.
    pub fn check_bounded_string<'a>(
        &mut self,
        value: &'a Value,
        max_length: usize,
    ) -> Option<&'a str> {
        let Some(s) = value.as_str() else {
            self.wrong_type("string", value);
            return None;
        };

        let length = s.chars().count();
        if length > max_length {
            self.reject(format!("Expected max length of {max_length}, got {length}"));
            return None;
        }

        Some(s)
    }

    pub fn check_numeric_range(
        &mut self,
        value: &Value,
        min_inclusive: f64,
        max_exclusive: f64,
    ) -> Option<f64> {
        let Some(n) = value.as_f64() else {
            self.wrong_type("number", value);
            return None;
        };

        if !(min_inclusive <= n && n < max_exclusive) {
            self.reject(format!(
                "Value out of range. Expected from {min_inclusive} to {max_exclusive}. Got {value} instead"
            ));
            return None;
        }

        Some(n)
    }

    /// Accepts `YYYY-MM-DD` with a four digit year and one or two digit
    /// month and day. Year, month and day are range checked independently so
    /// one bad date can report several errors.
    pub fn check_calendar_date(&mut self, value: &str) -> Option<Date> {
        let Some((year, month, day)) = split_date(value) else {
            self.reject(format!(r#"Wrong date format. Expected "YYYY-MM-DD" format, got {value}"#));
            return None;
        };

        let before = self.errors.len();

        if !(FIRST_FILM_YEAR..=self.current_year).contains(&year) {
            self.reject(format!(
                "Wrong year. First film was filmed in {FIRST_FILM_YEAR}. Got {year}"
            ));
        }
        if !(1..=12).contains(&month) {
            self.reject(format!("Wrong month. Got {month}"));
        }
        if !(1..=31).contains(&day) {
            self.reject(format!("Wrong day. Got {day}"));
        }

        if self.errors.len() != before {
            return None;
        }

        match Date::new(year, month, day) {
            Ok(date) => Some(date),
            Err(_) => {
                self.reject(format!("Wrong date. {value} is not a valid calendar date"));
                None
            }
        }
    }

    pub fn check_date_value(&mut self, value: &Value) -> Option<Date> {
        let Some(s) = value.as_str() else {
            self.wrong_type("string", value);
            return None;
        };
        self.check_calendar_date(s)
    }

    /// Integer key referencing another row; `Some(None)` is an accepted null.
    pub fn check_reference(&mut self, value: &Value, nullable: bool) -> Option<Option<i32>> {
        if nullable && value.is_null() {
            return Some(None);
        }

        match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(id) => Some(Some(id)),
            None => {
                self.wrong_type("integer", value);
                None
            }
        }
    }
}

fn split_date(value: &str) -> Option<(i16, i8, i8)> {
    let mut parts = value.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |s: &str, len: RangeInclusive<usize>| {
        len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4..=4) || !digits(month, 1..=2) || !digits(day, 1..=2) {
        return None;
    }

    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bounded_string_within_limit() {
        for (s, max) in [("test", 4), ("quadros", 10), (&*"s".repeat(99), 100), ("", 0)] {
            let mut v = Validator::new();
            assert_eq!(v.check_bounded_string(&json!(s), max), Some(s));
            assert!(v.is_correct());
            assert!(v.errors().is_empty());
        }
    }

    #[test]
    fn bounded_string_counts_chars() {
        let mut v = Validator::new();
        v.check_bounded_string(&json!("ñañá"), 4);
        assert!(v.is_correct());
    }

    #[test]
    fn bounded_string_too_long() {
        for (s, max) in [("eeeee", 4), ("eeeee", 0), ("eeeeeeeeeee", 10)] {
            let mut v = Validator::new();
            assert_eq!(v.check_bounded_string(&json!(s), max), None);
            assert!(!v.is_correct());
            assert_eq!(
                v.errors(),
                [format!("Expected max length of {max}, got {}", s.len())]
            );
        }
    }

    #[test]
    fn bounded_string_wrong_type_short_circuits() {
        for (value, kind) in [
            (json!(2), "number"),
            (json!(2.0), "number"),
            (json!(true), "boolean"),
            (json!({"1": 2}), "object"),
            (json!(null), "null"),
        ] {
            let mut v = Validator::new();
            v.check_bounded_string(&value, 0);
            assert!(!v.is_correct());
            assert_eq!(v.errors(), [format!("Wrong type, expected string, got {kind}")]);
        }
    }

    #[test]
    fn numeric_in_range() {
        for (n, lo, hi) in [
            (json!(50), 5.0, 200.0),
            (json!(5), 5.0, 10.0),
            (json!(5.2), 5.0, 6.0),
            (json!(5.2), 5.2, 6.0),
            (json!(6.0), 5.2, 6.01),
        ] {
            let mut v = Validator::new();
            assert!(v.check_numeric_range(&n, lo, hi).is_some(), "{n} in [{lo}, {hi})");
            assert!(v.is_correct());
        }
    }

    #[test]
    fn numeric_out_of_range() {
        for (n, lo, hi) in [
            (json!(5), 6.0, 10.0),
            (json!(10), 6.0, 10.0),
            (json!(6.001), 6.01, 10.2),
            (json!(10.21), 6.01, 10.2),
            (json!(10.0), 0.1, 10.0),
        ] {
            let mut v = Validator::new();
            assert_eq!(v.check_numeric_range(&n, lo, hi), None);
            assert!(!v.is_correct());
            assert_eq!(v.errors().len(), 1);
            assert!(v.errors()[0].starts_with("Value out of range."), "{:?}", v.errors());
        }
    }

    #[test]
    fn numeric_wrong_type_short_circuits() {
        for value in [json!("er"), json!(["er", 2]), json!(true), json!(null)] {
            let mut v = Validator::new();
            v.check_numeric_range(&value, 1.0, 2.0);
            assert!(!v.is_correct());
            assert_eq!(v.errors().len(), 1);
            assert!(v.errors()[0].starts_with("Wrong type, expected number"));
        }
    }

    #[test]
    fn calendar_dates_accepted() {
        for date in ["1888-01-01", "1888-11-21", "2012-10-21", "1900-12-31", "2021-1-1"] {
            let mut v = Validator::with_current_year(2026);
            assert!(v.check_calendar_date(date).is_some(), "{date}");
            assert!(v.errors().is_empty(), "{date}: {:?}", v.errors());
        }
    }

    #[test]
    fn calendar_date_normalises() {
        let mut v = Validator::new();
        let date = v.check_calendar_date("2001-2-3").unwrap();
        assert_eq!(date.to_string(), "2001-02-03");
    }

    #[test]
    fn current_year_is_inclusive() {
        let mut v = Validator::with_current_year(2026);
        assert!(v.check_calendar_date("2026-12-31").is_some());
        v.check_calendar_date("2027-01-01");
        assert_eq!(v.errors(), ["Wrong year. First film was filmed in 1888. Got 2027"]);
    }

    #[test]
    fn calendar_date_wrong_format() {
        for date in
            ["11-21-1990", "1998.10.20", "1998/10/20", "not-a-date", "asdasd", "1998-10-20-1", ""]
        {
            let mut v = Validator::new();
            assert_eq!(v.check_calendar_date(date), None);
            assert!(!v.is_correct());
            assert_eq!(
                v.errors(),
                [format!(r#"Wrong date format. Expected "YYYY-MM-DD" format, got {date}"#)]
            );
        }
    }

    #[test]
    fn calendar_date_out_of_range() {
        for (date, expected) in [
            ("1887-12-31", "Wrong year. First film was filmed in 1888. Got 1887"),
            ("1800-1-1", "Wrong year. First film was filmed in 1888. Got 1800"),
            ("2099-01-01", "Wrong year. First film was filmed in 1888. Got 2099"),
            ("1900-0-1", "Wrong month. Got 0"),
            ("1900-13-01", "Wrong month. Got 13"),
            ("1900-1-0", "Wrong day. Got 0"),
            ("1900-01-32", "Wrong day. Got 32"),
        ] {
            let mut v = Validator::new();
            assert_eq!(v.check_calendar_date(date), None);
            assert!(!v.is_correct());
            assert_eq!(v.errors(), [expected]);
        }
    }

    #[test]
    fn calendar_date_reports_every_component() {
        let mut v = Validator::new();
        v.check_calendar_date("1700-13-40");
        assert_eq!(
            v.errors(),
            [
                "Wrong year. First film was filmed in 1888. Got 1700",
                "Wrong month. Got 13",
                "Wrong day. Got 40",
            ]
        );
    }

    #[test]
    fn impossible_day_of_month() {
        let mut v = Validator::new();
        assert_eq!(v.check_calendar_date("1900-02-30"), None);
        assert_eq!(v.errors(), ["Wrong date. 1900-02-30 is not a valid calendar date"]);
    }

    #[test]
    fn errors_accumulate_across_checks() {
        let mut v = Validator::new();
        v.check_bounded_string(&json!(1), 10);
        v.check_numeric_range(&json!(11), 0.1, 10.0);
        v.check_calendar_date("1900-01-01");
        assert!(!v.is_correct());
        assert_eq!(v.errors().len(), 2);
    }

    #[test]
    fn references() {
        let mut v = Validator::new();
        assert_eq!(v.check_reference(&json!(3), false), Some(Some(3)));
        assert_eq!(v.check_reference(&json!(null), true), Some(None));
        assert!(v.is_correct());

        assert_eq!(v.check_reference(&json!(null), false), None);
        assert_eq!(v.check_reference(&json!("3"), true), None);
        assert_eq!(v.check_reference(&json!(1.5), true), None);
        assert_eq!(v.errors().len(), 3);
    }
}
