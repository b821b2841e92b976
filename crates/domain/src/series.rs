//! Time-series windowing around "now"
//!
//! Slices a sequence of readings into a window of `past` samples before and
//! the remainder after the pivot, where the pivot is the first sample at or
//! after the current instant. The divider index marks where "now" falls
//! inside the returned slice so the renderer can place the past/future
//! separator deterministically.

use chrono::{DateTime, Utc};

use crate::entities::Reading;

/// A windowed slice of readings with the past/future divider position
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Readings in ascending `time_utc` order, at most `count` of them
    pub readings: Vec<Reading>,
    /// Index of the first reading at or after "now"; equals
    /// `readings.len()` when every reading lies in the past
    pub divider_index: usize,
}

impl Window {
    /// An empty window with the divider at position zero
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            readings: Vec::new(),
            divider_index: 0,
        }
    }
}

/// Select a window of up to `count` readings pivoted around `now`
///
/// The input does not need to be sorted. The pivot is the index of the first
/// reading with `time_utc >= now` (or the sequence length if none exists);
/// the window starts `past` samples before the pivot, clamped to the
/// sequence bounds, and extends to at most `count` samples.
///
/// The computation is deterministic: the same inputs always produce the same
/// slice and divider position.
#[must_use]
pub fn select_window(
    mut series: Vec<Reading>,
    now: DateTime<Utc>,
    past: usize,
    count: usize,
) -> Window {
    if series.is_empty() || count == 0 {
        return Window::empty();
    }

    series.sort_by_key(|r| r.time_utc);

    let pivot = series
        .iter()
        .position(|r| r.time_utc >= now)
        .unwrap_or(series.len());

    let start = pivot.saturating_sub(past);
    let end = series.len().min(start + count);
    let readings: Vec<Reading> = series[start..end].to_vec();

    let divider_index = readings
        .iter()
        .position(|r| r.time_utc >= now)
        .unwrap_or(readings.len());

    Window {
        readings,
        divider_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, hour, 0, 0).unwrap()
    }

    fn reading(hour: u32) -> Reading {
        Reading::at(at(hour), format!("{hour:02}:00"))
    }

    #[test]
    fn empty_input_yields_empty_window() {
        let w = select_window(vec![], at(12), 3, 5);
        assert!(w.readings.is_empty());
        assert_eq!(w.divider_index, 0);
    }

    #[test]
    fn zero_count_yields_empty_window() {
        let w = select_window(vec![reading(9)], at(12), 1, 0);
        assert!(w.readings.is_empty());
        assert_eq!(w.divider_index, 0);
    }

    #[test]
    fn pivots_around_now() {
        // Series 09:00, 11:00, 13:00 with now=12:00, past=1, count=2
        // keeps one past sample and the first future one; divider at 1.
        let series = vec![reading(9), reading(11), reading(13)];
        let w = select_window(series, at(12), 1, 2);
        assert_eq!(w.readings.len(), 2);
        assert_eq!(w.readings[0].time_local, "11:00");
        assert_eq!(w.readings[1].time_local, "13:00");
        assert_eq!(w.divider_index, 1);
    }

    #[test]
    fn sorts_unordered_input() {
        let series = vec![reading(13), reading(9), reading(11)];
        let w = select_window(series, at(12), 1, 2);
        assert_eq!(w.readings[0].time_local, "11:00");
        assert_eq!(w.readings[1].time_local, "13:00");
    }

    #[test]
    fn now_after_all_samples_puts_divider_at_end() {
        let series = vec![reading(6), reading(7), reading(8)];
        let w = select_window(series, at(12), 2, 4);
        assert_eq!(w.readings.len(), 3);
        assert_eq!(w.divider_index, w.readings.len());
    }

    #[test]
    fn now_before_all_samples_puts_divider_at_start() {
        let series = vec![reading(14), reading(15), reading(16)];
        let w = select_window(series, at(12), 2, 2);
        assert_eq!(w.readings.len(), 2);
        assert_eq!(w.readings[0].time_local, "14:00");
        assert_eq!(w.divider_index, 0);
    }

    #[test]
    fn start_clamps_to_sequence_beginning() {
        let series = vec![reading(11), reading(13)];
        let w = select_window(series, at(12), 10, 5);
        assert_eq!(w.readings.len(), 2);
        assert_eq!(w.divider_index, 1);
    }

    #[test]
    fn slice_length_never_exceeds_count() {
        let series: Vec<Reading> = (0..24).map(reading).collect();
        let w = select_window(series, at(12), 3, 6);
        assert_eq!(w.readings.len(), 6);
        assert_eq!(w.readings[0].time_local, "09:00");
        assert_eq!(w.divider_index, 3);
    }

    #[test]
    fn exact_now_match_counts_as_future() {
        let series = vec![reading(11), reading(12), reading(13)];
        let w = select_window(series, at(12), 1, 3);
        assert_eq!(w.readings.len(), 3);
        assert_eq!(w.divider_index, 1);
    }

    #[test]
    fn recomputation_is_stable() {
        let series = vec![reading(13), reading(9), reading(11)];
        let a = select_window(series.clone(), at(12), 1, 2);
        let b = select_window(series, at(12), 1, 2);
        assert_eq!(a, b);
    }
}
