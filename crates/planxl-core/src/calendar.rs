//! Calendar arithmetic for timeline layout
//!
//! - [`DateGrid`]: the contiguous day axis of a project, weekends included
//! - [`business_days`]: Monday-Friday day count over an inclusive range
//!
//! There is no holiday or timezone handling; a business day is any day that
//! is not a Saturday or Sunday.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Ordered sequence of every calendar day from `start` to `end` inclusive.
///
/// Column `i` of a timeline corresponds to `start + i` days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateGrid {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateGrid {
    /// Build the grid for `start..=end`. Returns `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the grid (`end - start + 1`)
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// A grid always holds at least one day
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate every day in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.len())
    }

    /// Zero-based offset of `date` from the grid start.
    ///
    /// Dates before the start are negative, dates after the end are `>= len()`.
    pub fn index_of(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Date at a zero-based offset, if inside the grid
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.len() {
            return None;
        }
        self.start.checked_add_days(Days::new(index as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count Monday-Friday days in `start..=end`.
///
/// Returns 0 when either date is unset or the range is inverted.
pub fn business_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    if start > end {
        return 0;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn grid_covers_range_inclusively() {
        let grid = DateGrid::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let days: Vec<_> = grid.days().collect();

        assert_eq!(grid.len(), 10);
        assert_eq!(days.len(), 10);
        assert_eq!(days[0], date(2024, 1, 1));
        assert_eq!(days[9], date(2024, 1, 10));
        assert!(days.windows(2).all(|w| (w[1] - w[0]).num_days() == 1));
        assert_eq!(grid.index_of(grid.start()), 0);
        assert_eq!(grid.index_of(grid.end()), 9);
    }

    #[test]
    fn grid_lengths_match_day_difference() {
        let start = date(2023, 12, 20);
        for extra in 0..60 {
            let end = start + chrono::Duration::days(extra);
            let grid = DateGrid::new(start, end).unwrap();
            assert_eq!(grid.len(), extra as usize + 1);
            assert_eq!(grid.days().count(), grid.len());
            assert_eq!(grid.index_of(end), grid.len() as i64 - 1);
            assert_eq!(grid.days().last(), Some(end));
        }
    }

    #[test]
    fn single_day_grid() {
        let day = date(2024, 2, 29);
        let grid = DateGrid::new(day, day).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.days().collect::<Vec<_>>(), vec![day]);
    }

    #[test]
    fn inverted_grid_is_rejected() {
        assert!(DateGrid::new(date(2024, 1, 2), date(2024, 1, 1)).is_none());
    }

    #[test]
    fn outside_dates_map_past_the_edges() {
        let grid = DateGrid::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert_eq!(grid.index_of(date(2023, 12, 30)), -2);
        assert_eq!(grid.index_of(date(2024, 1, 12)), 11);
        assert!(!grid.contains(date(2024, 1, 12)));
        assert_eq!(grid.date_at(3), Some(date(2024, 1, 4)));
        assert_eq!(grid.date_at(10), None);
    }

    #[test]
    fn weekends_are_part_of_the_grid() {
        // 2024-01-06 is a Saturday
        let grid = DateGrid::new(date(2024, 1, 5), date(2024, 1, 8)).unwrap();
        let weekend: Vec<bool> = grid.days().map(is_weekend).collect();
        assert_eq!(weekend, vec![false, true, true, false]);
    }

    #[test]
    fn business_days_single_day() {
        // Monday through Sunday
        for (offset, expected) in [1, 1, 1, 1, 1, 0, 0].into_iter().enumerate() {
            let d = date(2024, 1, 1) + chrono::Duration::days(offset as i64);
            assert_eq!(business_days(Some(d), Some(d)), expected, "{d}");
        }
    }

    #[test]
    fn business_days_over_ranges() {
        assert_eq!(business_days(Some(date(2024, 1, 1)), Some(date(2024, 1, 5))), 5);
        assert_eq!(business_days(Some(date(2024, 1, 1)), Some(date(2024, 1, 10))), 8);
        assert_eq!(business_days(Some(date(2024, 1, 6)), Some(date(2024, 1, 7))), 0);
    }

    #[test]
    fn business_days_unset_or_inverted_is_zero() {
        let d = date(2024, 1, 3);
        assert_eq!(business_days(None, Some(d)), 0);
        assert_eq!(business_days(Some(d), None), 0);
        assert_eq!(business_days(None, None), 0);
        assert_eq!(business_days(Some(d), Some(date(2024, 1, 2))), 0);
    }

    #[test]
    fn business_days_is_monotonic_in_end() {
        let start = date(2024, 3, 1);
        let mut previous = 0;
        for extra in 0..90 {
            let end = start + chrono::Duration::days(extra);
            let count = business_days(Some(start), Some(end));
            assert!(count >= previous);
            assert!(count <= previous + 1);
            previous = count;
        }
    }
}
