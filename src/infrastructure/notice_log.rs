// Notice log - logs every notice and keeps the most recent ones
use crate::application::notifier::Notifier;
use crate::domain::notice::{Notice, NoticeLevel};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const DEFAULT_NOTICE_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct NoticeLog {
    capacity: usize,
    entries: Mutex<VecDeque<Notice>>,
}

impl NoticeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<Notice> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_CAPACITY)
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warning => {
                tracing::warn!(kind = ?notice.kind, source = %notice.source, "{}", notice.message)
            }
            NoticeLevel::Error => {
                tracing::error!(kind = ?notice.kind, source = %notice.source, "{}", notice.message)
            }
        }

        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(notice);
    }
}
