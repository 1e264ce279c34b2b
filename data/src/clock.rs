use chrono::NaiveDate;

/// Source of "today" for stamped dates (`createdAt`, `dueDate`, `paidAt`,
/// `submittedDate`) and for due-date comparisons.
///
/// Production code uses [`Clock::System`]; tests pin a date with
/// [`Clock::Fixed`] so derived fields are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Self::System => chrono::Local::now().date_naive(),
            Self::Fixed(date) => date,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        assert_eq!(Clock::Fixed(date).today(), date);
    }
}
