use chrono::{Datelike, Local, Months, NaiveDate};

/// The calendar month currently being viewed. A plain value: the UI owns
/// one of these, initializes it at startup, and changes it only through
/// `shift` or `from_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl ViewMonth {
    /// Today's calendar month.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse a "YYYY-MM" key, validating it as a real month.
    pub fn from_key(key: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d").ok()?;
        Some(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    /// Move `delta` months forward or back, rolling over year boundaries.
    /// No bounds beyond what the calendar type itself can represent; a
    /// shift past that range is a no-op.
    pub fn shift(self, delta: i32) -> Self {
        let Some(base) = NaiveDate::from_ymd_opt(self.year, self.month, 1) else {
            return self;
        };
        let shifted = if delta >= 0 {
            base.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            base.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        match shifted {
            Some(d) => Self {
                year: d.year(),
                month: d.month(),
            },
            None => self,
        }
    }

    /// The "YYYY-MM" form used as the plan table's partition key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Whether a "YYYY-MM-DD" date string falls inside this month.
    /// Unparseable dates match nothing.
    pub fn contains(&self, date: &str) -> bool {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .is_ok_and(|d| d.year() == self.year && d.month() == self.month)
    }
}

impl std::fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
