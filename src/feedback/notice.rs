//! Transient user-visible notices

use std::time::{Duration, Instant};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short-lived message shown to the user
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub created_at: Instant,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Notices waiting to be shown, oldest first
#[derive(Debug)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    /// Default lifetime of a notice (3 seconds)
    pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drop expired notices
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.notices.retain(|n| !n.is_expired(ttl));
    }

    /// Most recent notice that has not yet expired
    pub fn current(&self) -> Option<&Notice> {
        self.notices.iter().rev().find(|n| !n.is_expired(self.ttl))
    }

    pub fn all(&self) -> &[Notice] {
        &self.notices
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_returns_latest() {
        let mut board = NoticeBoard::default();
        board.push(Notice::info("first"));
        board.push(Notice::error("second"));
        let current = board.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.level, NoticeLevel::Error);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut board = NoticeBoard::new(Duration::ZERO);
        board.push(Notice::info("gone"));
        assert!(board.current().is_none());
        board.prune();
        assert!(board.all().is_empty());
    }

    #[test]
    fn test_prune_keeps_live_notices() {
        let mut board = NoticeBoard::new(Duration::from_secs(60));
        board.push(Notice::info("kept"));
        board.prune();
        assert_eq!(board.all().len(), 1);
    }

    #[test]
    fn test_empty_board_has_no_current() {
        let board = NoticeBoard::default();
        assert!(board.current().is_none());
    }
}
