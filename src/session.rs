use crate::day::DayKey;
use crate::errors::ValidationError;
use crate::history::Ledger;
use crate::models::HistoryEntry;
use crate::stats;
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use tracing::{error, warn};

/// The one mutable state object of the app: today's counter, the all-time
/// total, the daily goal, the history ledger, and the theme selection.
///
/// Every mutating operation applies its in-memory change first and then
/// writes through to the store. A failed write is logged and the operation
/// still counts as succeeded; memory stays authoritative. Callers serialize
/// access through a single mutex, so awaiting the write-through here also
/// keeps per-key writes ordered.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    day: DayKey,
    current_count: u64,
    all_time_count: u64,
    daily_goal: u64,
    ledger: Ledger,
    theme: String,
}

impl Session {
    /// Loads the whole session from the store. Each key parses defensively:
    /// a missing or corrupt value falls back to its default without
    /// disturbing the other keys or failing startup.
    pub async fn rehydrate(store: Arc<dyn KeyValueStore>, default_theme: String) -> Self {
        let day = DayKey::today();

        let count_key = keys::count(&day);
        let goal_key = keys::goal(&day);
        let (count_raw, goal_raw, total_raw, history_raw, theme_raw) = tokio::join!(
            store.get(&count_key),
            store.get(&goal_key),
            store.get(keys::TOTAL),
            store.get(keys::HISTORY),
            store.get(keys::THEME),
        );

        let current_count = parse_count(count_raw, &keys::count(&day));
        let daily_goal = parse_count(goal_raw, &keys::goal(&day));
        let all_time_count = parse_count(total_raw, keys::TOTAL);
        let ledger = parse_history(history_raw);
        let theme = theme_raw.unwrap_or(default_theme);

        Self {
            store,
            day,
            current_count,
            all_time_count,
            daily_goal,
            ledger,
            theme,
        }
    }

    pub fn day(&self) -> &DayKey {
        &self.day
    }

    pub fn current_count(&self) -> u64 {
        self.current_count
    }

    pub fn all_time_count(&self) -> u64 {
        self.all_time_count
    }

    pub fn daily_goal(&self) -> u64 {
        self.daily_goal
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn best_day_count(&self) -> u64 {
        stats::best_day_count(&self.ledger)
    }

    pub fn current_streak(&self) -> u32 {
        stats::current_streak_at(self.day.clone(), &self.ledger)
    }

    /// 0 with no goal set, otherwise the rounded completion percentage,
    /// capped at 100 even when the count overshoots the goal.
    pub fn progress_percent(&self) -> u8 {
        if self.daily_goal == 0 {
            return 0;
        }
        let percent = (self.current_count as f64 / self.daily_goal as f64 * 100.0).round();
        percent.min(100.0) as u8
    }

    /// One tap: today's count and the all-time total move in lockstep.
    /// Returns the new count as the pulse signal for the caller.
    pub async fn increment(&mut self) -> u64 {
        self.refresh_day().await;
        self.current_count = self.current_count.saturating_add(1);
        self.all_time_count = self.all_time_count.saturating_add(1);
        self.write_through(&keys::count(&self.day), self.current_count.to_string())
            .await;
        self.write_through(keys::TOTAL, self.all_time_count.to_string())
            .await;
        self.current_count
    }

    /// Undo one tap, flooring at zero. The all-time total records taps
    /// performed and is never decremented.
    pub async fn decrement(&mut self) -> u64 {
        self.refresh_day().await;
        self.current_count = self.current_count.saturating_sub(1);
        self.write_through(&keys::count(&self.day), self.current_count.to_string())
            .await;
        self.current_count
    }

    /// Sets the daily goal for the active day. Zero clears the goal and
    /// removes its stored key.
    pub async fn set_goal(&mut self, goal: i64) -> Result<u64, ValidationError> {
        if goal < 0 {
            return Err(ValidationError(
                "goal must be a non-negative number".to_string(),
            ));
        }

        self.refresh_day().await;
        self.daily_goal = goal as u64;
        let key = keys::goal(&self.day);
        if self.daily_goal == 0 {
            if let Err(err) = self.store.remove(&key).await {
                error!("failed to remove {key}: {err}");
            }
        } else {
            self.write_through(&key, self.daily_goal.to_string()).await;
        }
        Ok(self.daily_goal)
    }

    /// Snapshots today's count and goal into the ledger. This is the single
    /// write path into history; the history view calls it so the list always
    /// reflects unsaved progress.
    pub async fn commit_today(&mut self) {
        self.refresh_day().await;
        let entry = HistoryEntry {
            date: self.day.to_string(),
            count: self.current_count,
            goal: self.daily_goal,
            completed: self.daily_goal > 0 && self.current_count >= self.daily_goal,
        };
        self.ledger.upsert(entry);
        self.persist_history().await;
    }

    /// Commits the pre-reset snapshot first, then zeroes today's count, so
    /// the day's effort is never silently lost.
    pub async fn reset_today(&mut self) {
        self.commit_today().await;
        self.current_count = 0;
        self.write_through(&keys::count(&self.day), "0".to_string())
            .await;
    }

    pub async fn reset_all_time(&mut self) {
        self.all_time_count = 0;
        self.write_through(keys::TOTAL, "0".to_string()).await;
    }

    pub async fn delete_history(&mut self, date: &str) {
        self.ledger.delete(date);
        self.persist_history().await;
    }

    pub async fn clear_history(&mut self) {
        self.ledger.clear();
        if let Err(err) = self.store.remove(keys::HISTORY).await {
            error!("failed to remove {}: {err}", keys::HISTORY);
        }
    }

    pub async fn set_theme(&mut self, color: String) {
        self.theme = color;
        self.write_through(keys::THEME, self.theme.clone()).await;
    }

    /// Lazy day rollover: adopt the new day key when the calendar day has
    /// changed since the last operation. The count carries over; the goal is
    /// whatever is stored for the new day, normally nothing.
    async fn refresh_day(&mut self) {
        let today = DayKey::today();
        if today == self.day {
            return;
        }

        warn!("day rolled over from {} to {today} mid-session", self.day);
        self.daily_goal = parse_count(self.store.get(&keys::goal(&today)).await, "goal");
        self.day = today;
    }

    async fn persist_history(&self) {
        match serde_json::to_string(self.ledger.entries()) {
            Ok(payload) => self.write_through(keys::HISTORY, payload).await,
            Err(err) => error!("failed to encode history: {err}"),
        }
    }

    async fn write_through(&self, key: &str, value: String) {
        if let Err(err) = self.store.set(key, value).await {
            error!("write-through for {key} failed: {err}");
        }
    }
}

fn parse_count(raw: Option<String>, key: &str) -> u64 {
    match raw {
        None => 0,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("corrupt value for {key} ({err}), using 0");
                0
            }
        },
    }
}

fn parse_history(raw: Option<String>) -> Ledger {
    match raw {
        None => Ledger::default(),
        Some(value) => match serde_json::from_str::<Vec<HistoryEntry>>(&value) {
            Ok(entries) => Ledger::from_entries(entries),
            Err(err) => {
                warn!("corrupt history blob ({err}), starting empty");
                Ledger::default()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    async fn fresh_session() -> Session {
        Session::rehydrate(Arc::new(MemoryStore::default()), "saffron".to_string()).await
    }

    #[tokio::test]
    async fn increment_moves_both_counters_in_lockstep() {
        let mut session = fresh_session().await;
        for _ in 0..5 {
            session.increment().await;
        }
        session.decrement().await;
        session.decrement().await;

        assert_eq!(session.current_count(), 3);
        assert_eq!(session.all_time_count(), 5);
    }

    #[tokio::test]
    async fn decrement_floors_at_zero() {
        let mut session = fresh_session().await;
        assert_eq!(session.decrement().await, 0);
        assert_eq!(session.current_count(), 0);
        assert_eq!(session.all_time_count(), 0);
    }

    #[tokio::test]
    async fn increment_writes_through_to_the_store() {
        let store = Arc::new(MemoryStore::default());
        let mut session = Session::rehydrate(store.clone(), "saffron".to_string()).await;

        session.increment().await;
        session.increment().await;

        let day = session.day().clone();
        assert_eq!(store.get(&keys::count(&day)).await.as_deref(), Some("2"));
        assert_eq!(store.get(keys::TOTAL).await.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn negative_goal_is_rejected_without_changes() {
        let mut session = fresh_session().await;
        session.set_goal(7).await.unwrap();

        assert!(session.set_goal(-1).await.is_err());
        assert_eq!(session.daily_goal(), 7);
    }

    #[tokio::test]
    async fn clearing_the_goal_removes_its_stored_key() {
        let store = Arc::new(MemoryStore::default());
        let mut session = Session::rehydrate(store.clone(), "saffron".to_string()).await;

        session.set_goal(108).await.unwrap();
        let key = keys::goal(session.day());
        assert_eq!(store.get(&key).await.as_deref(), Some("108"));

        session.set_goal(0).await.unwrap();
        assert_eq!(store.get(&key).await, None);
        assert_eq!(session.daily_goal(), 0);
    }

    #[tokio::test]
    async fn progress_percent_rounds_and_clamps() {
        let mut session = fresh_session().await;
        assert_eq!(session.progress_percent(), 0);

        session.set_goal(108).await.unwrap();
        for _ in 0..54 {
            session.increment().await;
        }
        assert_eq!(session.progress_percent(), 50);

        for _ in 0..200 {
            session.increment().await;
        }
        assert_eq!(session.progress_percent(), 100);
    }

    #[tokio::test]
    async fn reset_today_commits_the_pre_reset_snapshot() {
        let mut session = fresh_session().await;
        session.set_goal(50).await.unwrap();
        for _ in 0..40 {
            session.increment().await;
        }

        session.reset_today().await;

        assert_eq!(session.current_count(), 0);
        let entry = session
            .ledger()
            .find(&session.day().to_string())
            .expect("today committed");
        assert_eq!(entry.count, 40);
        assert_eq!(entry.goal, 50);
        assert!(!entry.completed);
    }

    #[tokio::test]
    async fn committing_twice_keeps_one_entry_with_the_latest_count() {
        let mut session = fresh_session().await;
        session.increment().await;
        session.commit_today().await;
        session.increment().await;
        session.commit_today().await;

        assert_eq!(session.ledger().entries().len(), 1);
        assert_eq!(session.ledger().entries()[0].count, 2);
    }

    #[tokio::test]
    async fn reset_all_time_leaves_the_current_count_alone() {
        let mut session = fresh_session().await;
        session.increment().await;
        session.increment().await;

        session.reset_all_time().await;

        assert_eq!(session.all_time_count(), 0);
        assert_eq!(session.current_count(), 2);
    }

    #[tokio::test]
    async fn history_round_trips_through_the_store() {
        let store = Arc::new(MemoryStore::default());
        let mut session = Session::rehydrate(store.clone(), "saffron".to_string()).await;
        session.set_goal(1).await.unwrap();
        session.increment().await;
        session.commit_today().await;

        let stored = store.get(keys::HISTORY).await.expect("history persisted");
        let entries: Vec<HistoryEntry> = serde_json::from_str(&stored).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].completed);

        let reloaded = Session::rehydrate(store.clone(), "saffron".to_string()).await;
        assert_eq!(reloaded.ledger().entries().len(), 1);
        assert_eq!(reloaded.current_count(), 1);
        assert_eq!(reloaded.all_time_count(), 1);
        assert_eq!(reloaded.daily_goal(), 1);
    }

    #[tokio::test]
    async fn clear_history_removes_the_stored_blob() {
        let store = Arc::new(MemoryStore::default());
        let mut session = Session::rehydrate(store.clone(), "saffron".to_string()).await;
        session.increment().await;
        session.commit_today().await;
        assert!(store.get(keys::HISTORY).await.is_some());

        session.clear_history().await;
        assert!(session.ledger().is_empty());
        assert_eq!(store.get(keys::HISTORY).await, None);
    }

    #[tokio::test]
    async fn rehydrate_falls_back_per_key_on_corrupt_values() {
        let store = Arc::new(MemoryStore::default());
        let day = DayKey::today();
        store
            .set(&keys::count(&day), "not a number".to_string())
            .await
            .unwrap();
        store.set(keys::TOTAL, "77".to_string()).await.unwrap();
        store
            .set(keys::HISTORY, "{broken".to_string())
            .await
            .unwrap();
        store
            .set(keys::THEME, "lotus".to_string())
            .await
            .unwrap();

        let session = Session::rehydrate(store, "saffron".to_string()).await;

        assert_eq!(session.current_count(), 0);
        assert_eq!(session.all_time_count(), 77);
        assert!(session.ledger().is_empty());
        assert_eq!(session.theme(), "lotus");
    }

    #[tokio::test]
    async fn theme_defaults_when_nothing_is_stored() {
        let session = fresh_session().await;
        assert_eq!(session.theme(), "saffron");
    }
}
