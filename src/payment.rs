use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{ForecastError, Result};

/// A calendar date as raw `(year, month, day)` components.
pub type Ymd = (i32, u32, u32);

pub fn date_from_ymd((year, month, day): Ymd) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ForecastError::InvalidDate { year, month, day })
}

/// A payment that repeats every `frequency` days after `start`.
///
/// Both `start` and `end` are exclusive: the payment never fires on either date.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringPayment {
    pub description: String,
    pub amount: Decimal,
    pub frequency: u32,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub color: Option<String>,
}

impl RecurringPayment {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        frequency: u32,
        start: Ymd,
        end: Option<Ymd>,
        color: Option<String>,
    ) -> Result<Self> {
        let description = description.into();
        if frequency == 0 {
            return Err(ForecastError::InvalidFrequency { description });
        }
        let start = date_from_ymd(start)?;
        let end = end.map(date_from_ymd).transpose()?;
        Ok(Self {
            description,
            amount,
            frequency,
            start,
            end,
            color,
        })
    }

    pub fn occurs_on_day(&self, date: NaiveDate) -> bool {
        // The range check must come first: the day difference is negative before `start`.
        if date <= self.start {
            return false;
        }
        if self.end.is_some_and(|end| date >= end) {
            return false;
        }
        (date - self.start).num_days() % i64::from(self.frequency) == 0
    }

    /// First day strictly after `date` on which this payment fires, if it is
    /// still a representable date.
    pub fn next_occurrence_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        let frequency = u64::from(self.frequency);
        let elapsed = u64::try_from((date - self.start).num_days()).unwrap_or(0);
        let periods = elapsed / frequency + 1;
        let next = self.start.checked_add_days(Days::new(periods * frequency))?;
        match self.end {
            Some(end) if next >= end => None,
            _ => Some(next),
        }
    }
}

/// A payment that fires on exactly one date.
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimePayment {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub color: Option<String>,
}

impl OneTimePayment {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        date: Ymd,
        color: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            description: description.into(),
            amount,
            date: date_from_ymd(date)?,
            color,
        })
    }

    pub fn occurs_on_day(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn next_occurrence_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        (self.date > date).then_some(self.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payment {
    Recurring(RecurringPayment),
    OneTime(OneTimePayment),
}

impl Payment {
    pub fn description(&self) -> &str {
        match self {
            Payment::Recurring(p) => &p.description,
            Payment::OneTime(p) => &p.description,
        }
    }

    /// Signed amount: negative for expenses, positive for income.
    pub fn amount(&self) -> Decimal {
        match self {
            Payment::Recurring(p) => p.amount,
            Payment::OneTime(p) => p.amount,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Payment::Recurring(p) => p.color.as_deref(),
            Payment::OneTime(p) => p.color.as_deref(),
        }
    }

    pub fn occurs_on_day(&self, date: NaiveDate) -> bool {
        match self {
            Payment::Recurring(p) => p.occurs_on_day(date),
            Payment::OneTime(p) => p.occurs_on_day(date),
        }
    }

    pub fn next_occurrence_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Payment::Recurring(p) => p.next_occurrence_after(date),
            Payment::OneTime(p) => p.next_occurrence_after(date),
        }
    }
}

impl From<RecurringPayment> for Payment {
    fn from(value: RecurringPayment) -> Self {
        Payment::Recurring(value)
    }
}

impl From<OneTimePayment> for Payment {
    fn from(value: OneTimePayment) -> Self {
        Payment::OneTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent(end: Option<Ymd>) -> RecurringPayment {
        RecurringPayment::new("rent", dec!(-1000), 30, (2023, 7, 1), end, None).unwrap()
    }

    #[test]
    fn test_recurring_skips_start_date() {
        let payment = rent(None);
        assert!(!payment.occurs_on_day(day(2023, 7, 1)));
        assert!(payment.occurs_on_day(day(2023, 7, 31)));
        assert!(payment.occurs_on_day(day(2023, 8, 30)));
        assert!(!payment.occurs_on_day(day(2023, 7, 30)));
    }

    #[test]
    fn test_recurring_before_start_never_fires() {
        let payment = rent(None);
        // 30 days before start is a multiple of the frequency.
        assert!(!payment.occurs_on_day(day(2023, 6, 1)));
        assert!(!payment.occurs_on_day(day(2022, 12, 3)));
    }

    #[test]
    fn test_recurring_end_is_exclusive() {
        let payment = rent(Some((2023, 8, 30)));
        assert!(payment.occurs_on_day(day(2023, 7, 31)));
        assert!(!payment.occurs_on_day(day(2023, 8, 30)));
        assert!(!payment.occurs_on_day(day(2023, 9, 29)));
    }

    #[test]
    fn test_recurring_end_before_start_never_fires() {
        let payment = rent(Some((2023, 6, 1)));
        for offset in 0..365 {
            assert!(!payment.occurs_on_day(day(2023, 5, 1) + chrono::Duration::days(offset)));
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = RecurringPayment::new("x", dec!(1), 7, (2023, 13, 1), None, None).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidDate {
                year: 2023,
                month: 13,
                day: 1
            }
        ));
        let err = OneTimePayment::new("x", dec!(1), (2023, 2, 29), None).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidDate { .. }));
        assert!(RecurringPayment::new("x", dec!(1), 7, (2023, 1, 1), Some((2023, 0, 1)), None).is_err());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let err = RecurringPayment::new("gym", dec!(-30), 0, (2023, 1, 1), None, None).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidFrequency { ref description } if description == "gym"));
    }

    #[test]
    fn test_one_time_fires_on_its_date_only() {
        let payment = OneTimePayment::new("bonus", dec!(500), (2023, 8, 1), None).unwrap();
        assert!(payment.occurs_on_day(day(2023, 8, 1)));
        assert!(!payment.occurs_on_day(day(2023, 7, 31)));
        assert!(!payment.occurs_on_day(day(2023, 8, 2)));
    }

    #[test]
    fn test_next_occurrence() {
        let payment = rent(Some((2023, 9, 29)));
        assert_eq!(payment.next_occurrence_after(day(2023, 1, 1)), Some(day(2023, 7, 31)));
        assert_eq!(payment.next_occurrence_after(day(2023, 7, 1)), Some(day(2023, 7, 31)));
        assert_eq!(payment.next_occurrence_after(day(2023, 7, 31)), Some(day(2023, 8, 30)));
        assert_eq!(payment.next_occurrence_after(day(2023, 8, 30)), None);

        let bonus: Payment = OneTimePayment::new("bonus", dec!(500), (2023, 8, 1), None)
            .unwrap()
            .into();
        assert_eq!(bonus.next_occurrence_after(day(2023, 7, 31)), Some(day(2023, 8, 1)));
        assert_eq!(bonus.next_occurrence_after(day(2023, 8, 1)), None);
    }

    #[test]
    fn test_next_occurrence_past_last_date() {
        let payment = RecurringPayment {
            description: "p".into(),
            amount: dec!(-1),
            frequency: 30,
            start: NaiveDate::MAX - chrono::Duration::days(40),
            end: None,
            color: None,
        };
        let first = payment.start + chrono::Duration::days(30);
        assert_eq!(payment.next_occurrence_after(payment.start), Some(first));
        assert_eq!(payment.next_occurrence_after(first), None);
        assert_eq!(payment.next_occurrence_after(NaiveDate::MAX), None);
    }

    #[test]
    fn test_payment_accessors() {
        let payment: Payment =
            RecurringPayment::new("salary", dec!(2500), 14, (2023, 1, 6), None, Some("#00ff00".into()))
                .unwrap()
                .into();
        assert_eq!(payment.description(), "salary");
        assert_eq!(payment.amount(), dec!(2500));
        assert_eq!(payment.color(), Some("#00ff00"));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_unbounded_recurring_fires_one_period_after_start(
            start_offset in 0i64..20_000,
            frequency in 1u32..400,
        ) {
            let start = day(1990, 1, 1) + chrono::Duration::days(start_offset);
            let payment = RecurringPayment {
                description: "p".into(),
                amount: dec!(-1),
                frequency,
                start,
                end: None,
                color: None,
            };
            prop_assert!(!payment.occurs_on_day(start));
            prop_assert!(payment.occurs_on_day(start + chrono::Duration::days(i64::from(frequency))));
        }

        #[test]
        fn prop_bounded_recurring_never_fires_on_or_after_end(
            frequency in 1u32..60,
            end_offset in 1i64..400,
            probe in 0i64..800,
        ) {
            let start = day(2023, 1, 1);
            let end = start + chrono::Duration::days(end_offset);
            let payment = RecurringPayment {
                description: "p".into(),
                amount: dec!(-1),
                frequency,
                start,
                end: Some(end),
                color: None,
            };
            prop_assert!(!payment.occurs_on_day(end + chrono::Duration::days(probe)));
        }

        #[test]
        fn prop_next_occurrence_agrees_with_occurs_on_day(
            frequency in 1u32..45,
            end_offset in proptest::option::of(1i64..200),
            from_offset in -60i64..240,
        ) {
            let start = day(2024, 2, 10);
            let payment = RecurringPayment {
                description: "p".into(),
                amount: dec!(-1),
                frequency,
                start,
                end: end_offset.map(|o| start + chrono::Duration::days(o)),
                color: None,
            };
            let from = start + chrono::Duration::days(from_offset);
            let expected = (1..=400)
                .map(|o| from + chrono::Duration::days(o))
                .find(|d| payment.occurs_on_day(*d));
            prop_assert_eq!(payment.next_occurrence_after(from), expected);
        }

        #[test]
        fn prop_one_time_fires_exactly_once(offset in 0i64..365) {
            let first = day(2023, 1, 1);
            let date = first + chrono::Duration::days(offset);
            let payment = OneTimePayment {
                description: "p".into(),
                amount: dec!(5),
                date,
                color: None,
            };
            let hits = (0..365)
                .filter(|o| payment.occurs_on_day(first + chrono::Duration::days(*o)))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }
}
