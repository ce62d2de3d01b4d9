use serde::{Deserialize, Serialize};

/// One finalized day in the history ledger. The field names are the stored
/// JSON contract: `scripture_history` holds an array of these, newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub count: u64,
    pub goal: u64,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub goal: i64,
}

#[derive(Debug, Deserialize)]
pub struct AutoStartRequest {
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub count: u64,
    pub all_time: u64,
    pub goal: u64,
    pub percent: u8,
    pub theme: String,
    pub auto_active: bool,
    pub auto_interval_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub best_day_count: u64,
    pub current_streak: u32,
}
