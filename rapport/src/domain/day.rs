use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of a report period, carrying the flags the backend
/// resolves from the special-day register.
///
/// The flags determine display styling only; whether a cell is editable is
/// decided by the owning period's closed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    pub weekend: bool,
    pub major_holiday: bool,
    pub half_day: bool,
}

impl Day {
    pub fn plain(date: NaiveDate) -> Self {
        Self {
            date,
            weekend: false,
            major_holiday: false,
            half_day: false,
        }
    }
}

/// Background classification of a grid cell. Exactly one applies per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShade {
    ClosedWeekend,
    ClosedHoliday,
    ClosedHalfDay,
    Closed,
    Weekend,
    Holiday,
    HalfDay,
    Weekday,
}

/// Closed-period status is checked first, sub-classified by the day flags;
/// within each branch the precedence is weekend, major holiday, half day.
pub fn cell_shade(day: &Day, closed: bool) -> CellShade {
    if closed {
        if day.weekend {
            CellShade::ClosedWeekend
        } else if day.major_holiday {
            CellShade::ClosedHoliday
        } else if day.half_day {
            CellShade::ClosedHalfDay
        } else {
            CellShade::Closed
        }
    } else if day.weekend {
        CellShade::Weekend
    } else if day.major_holiday {
        CellShade::Holiday
    } else if day.half_day {
        CellShade::HalfDay
    } else {
        CellShade::Weekday
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(weekend: bool, major_holiday: bool, half_day: bool) -> Day {
        Day {
            date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            weekend,
            major_holiday,
            half_day,
        }
    }

    #[test]
    fn closed_wins_over_open_flags() {
        assert_eq!(cell_shade(&day(true, false, false), true), CellShade::ClosedWeekend);
        assert_eq!(cell_shade(&day(false, true, false), true), CellShade::ClosedHoliday);
        assert_eq!(cell_shade(&day(false, false, true), true), CellShade::ClosedHalfDay);
        assert_eq!(cell_shade(&day(false, false, false), true), CellShade::Closed);
    }

    #[test]
    fn open_precedence_is_weekend_holiday_half_day() {
        assert_eq!(cell_shade(&day(true, true, true), false), CellShade::Weekend);
        assert_eq!(cell_shade(&day(false, true, true), false), CellShade::Holiday);
        assert_eq!(cell_shade(&day(false, false, true), false), CellShade::HalfDay);
        assert_eq!(cell_shade(&day(false, false, false), false), CellShade::Weekday);
    }
}
