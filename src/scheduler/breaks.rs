use crate::config::ScheduleConstants;
use crate::types::TimeGrid;
use chrono::NaiveTime;
use std::collections::BTreeSet;

/// Morning break plus a staggered meal window per distinct semester base
/// (§4.5). Computed once per run from the catalog's semester bases and
/// consulted by the constraint oracle's `is_break` predicate.
#[derive(Debug, Clone)]
pub struct BreakCalendar {
    morning_start: NaiveTime,
    morning_end: NaiveTime,
    meal_windows: Vec<(u32, NaiveTime, NaiveTime)>,
}

impl BreakCalendar {
    /// Build the calendar from the set of semester bases present in the catalog.
    pub fn build(bases: &BTreeSet<u32>, constants: &ScheduleConstants) -> Self {
        let sorted: Vec<u32> = bases.iter().copied().collect();
        let n = sorted.len();
        let span_minutes = (constants.meal_period_end - constants.meal_period_start).num_minutes() as u32;
        let stagger_pool = span_minutes.saturating_sub(constants.meal_duration_minutes);

        let meal_windows = sorted
            .into_iter()
            .enumerate()
            .map(|(k, base)| {
                let offset = if n <= 1 {
                    0
                } else {
                    (k as u32 * stagger_pool) / (n as u32 - 1)
                };
                let start = constants.meal_period_start + chrono::Duration::minutes(offset as i64);
                let end = start + chrono::Duration::minutes(constants.meal_duration_minutes as i64);
                (base, start, end)
            })
            .collect();

        Self {
            morning_start: constants.morning_break_start,
            morning_end: constants.morning_break_end,
            meal_windows,
        }
    }

    fn meal_window_for(&self, semester_base: Option<u32>) -> Option<(NaiveTime, NaiveTime)> {
        let base = semester_base?;
        self.meal_windows
            .iter()
            .find(|(b, _, _)| *b == base)
            .map(|(_, start, end)| (*start, *end))
    }

    /// True iff `slot`'s start time falls in the morning break or in the
    /// meal window assigned to `semester_base`.
    pub fn is_break(&self, grid: &TimeGrid, slot: usize, semester_base: Option<u32>) -> bool {
        let start = grid.start_of(slot);
        if start >= self.morning_start && start < self.morning_end {
            return true;
        }
        if let Some((meal_start, meal_end)) = self.meal_window_for(semester_base) {
            if start >= meal_start && start < meal_end {
                return true;
            }
        }
        false
    }
}
