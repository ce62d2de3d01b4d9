use crate::scheduler::AutoTally;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub auto: Arc<Mutex<AutoTally>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            auto: Arc::new(Mutex::new(AutoTally::default())),
        }
    }
}
