use crate::day::DayKey;
use crate::history::Ledger;

/// Highest single-day count in the ledger, 0 when empty.
pub fn best_day_count(ledger: &Ledger) -> u64 {
    ledger
        .entries()
        .iter()
        .map(|entry| entry.count)
        .max()
        .unwrap_or(0)
}

/// Consecutive completed days walking backward from `today`. Today itself
/// must be present and completed to count as day one; the walk stops at the
/// first missing or incomplete day and never skips gaps.
pub fn current_streak_at(today: DayKey, ledger: &Ledger) -> u32 {
    let mut streak = 0;
    let mut day = today;

    loop {
        match ledger.find(&day.to_string()) {
            Some(entry) if entry.completed => {
                streak += 1;
                day = day.previous();
            }
            _ => break,
        }
    }

    streak
}
