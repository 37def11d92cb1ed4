// 📆 Lunar Calendar - Fixed alternating 30/29 day arithmetic
//
// Schematic year = 6 x 30 + 6 x 29 = 354 days. No leap correction, no
// observation: this is an approximation, not a real Hijri conversion.

use crate::lunar_date::{from_parts_unchecked, LunarDate};

pub const MONTHS_PER_YEAR: u8 = 12;
pub const DAYS_PER_YEAR: u32 = 354;

/// Days in a schematic lunar month: odd months 30, even months 29
///
/// Independent of the year.
pub fn days_in_month(month: u8) -> u8 {
    if month % 2 == 0 {
        29
    } else {
        30
    }
}

/// Advance a lunar date by one schematic day
///
/// Day overflow rolls into the next month, month overflow into the next year.
/// Total over every valid `LunarDate`.
pub fn next_day(date: &LunarDate) -> LunarDate {
    let (mut year, mut month, mut day) = (date.year(), date.month(), date.day() + 1);

    if day > days_in_month(month) {
        day = 1;
        month += 1;

        if month > MONTHS_PER_YEAR {
            month = 1;
            year += 1;
        }
    }

    from_parts_unchecked(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: u32, month: u8, day: u8) -> LunarDate {
        LunarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month_alternates() {
        let lengths: Vec<u8> = (1..=12).map(days_in_month).collect();
        assert_eq!(lengths, vec![30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29]);
    }

    #[test]
    fn test_next_day_within_month() {
        assert_eq!(next_day(&date(1441, 1, 1)), date(1441, 1, 2));
    }

    #[test]
    fn test_next_day_month_rollover_odd_month() {
        assert_eq!(next_day(&date(1441, 1, 30)), date(1441, 2, 1));
    }

    #[test]
    fn test_next_day_month_rollover_even_month() {
        assert_eq!(next_day(&date(1441, 8, 29)), date(1441, 9, 1));
    }

    #[test]
    fn test_next_day_year_rollover() {
        assert_eq!(next_day(&date(1441, 12, 29)), date(1442, 1, 1));
    }

    #[test]
    fn test_schematic_year_is_354_days() {
        let start = date(1441, 1, 1);
        let mut cursor = start;
        for _ in 0..DAYS_PER_YEAR {
            cursor = next_day(&cursor);
        }
        assert_eq!(cursor, date(1442, 1, 1));
    }

    #[test]
    fn test_method_and_function_agree() {
        let d = date(1441, 6, 29);
        assert_eq!(d.next_day(), next_day(&d));
        assert_eq!(d.next_day(), date(1441, 7, 1));
    }
}
