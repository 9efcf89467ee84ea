//! Transient success/failure notices raised by mutation-triggering views.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Oldest notices are dropped past this many.
pub const MAX_NOTIFICATIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Default)]
struct Queue {
    notices: VecDeque<Notice>,
    next_id: u64,
}

/// Shared notice queue. Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<Queue>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, message.into())
    }

    fn push(&self, level: NoticeLevel, message: String) -> u64 {
        match level {
            NoticeLevel::Success => tracing::info!(message = %message, "notification"),
            NoticeLevel::Error => tracing::warn!(message = %message, "notification"),
        }

        let mut queue = self.queue.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        if queue.notices.len() == MAX_NOTIFICATIONS {
            queue.notices.pop_front();
        }
        queue.notices.push_back(Notice { id, level, message });
        id
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut queue = self.queue.lock();
        let before = queue.notices.len();
        queue.notices.retain(|notice| notice.id != id);
        queue.notices.len() != before
    }

    /// Remove and return every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().notices.drain(..).collect()
    }

    pub fn pending(&self) -> Vec<Notice> {
        self.queue.lock().notices.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.queue.lock().notices.back().cloned()
    }
}
