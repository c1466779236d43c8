//! Terminal side of the controller's [`Notifier`]: toasts that expire on
//! their own and at most one pending confirmation.

use slide_remote_core::{Confirmation, Notice, Notifier};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

#[derive(Debug)]
pub struct NoticeBoard {
    toasts: VecDeque<Toast>,
    pending: Option<Confirmation>,
    timeout: Duration,
}

impl NoticeBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            pending: None,
            timeout,
        }
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.toasts.back().map(|t| &t.notice)
    }

    pub fn expire(&mut self, now: Instant) {
        let timeout = self.timeout;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < timeout);
    }

    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.pending
    }

    pub fn take_confirmation(&mut self) -> Option<Confirmation> {
        self.pending.take()
    }

    fn push(&mut self, notice: Notice, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notice,
            shown_at: now,
        });
    }
}

impl Notifier for NoticeBoard {
    fn show_notice(&mut self, notice: Notice) {
        tracing::info!("Notice: {} {}", notice.title(), notice.body());
        if notice.is_terminal() {
            self.pending = None;
        }
        self.push(notice, Instant::now());
    }

    fn request_confirmation(&mut self, confirmation: Confirmation) {
        self.pending = Some(confirmation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_timeout() {
        let mut board = NoticeBoard::new(Duration::from_millis(3000));
        let start = Instant::now();
        board.push(Notice::RequestSent, start);
        board.push(Notice::Accepted, start + Duration::from_millis(2000));

        board.expire(start + Duration::from_millis(2999));
        assert_eq!(board.toasts().count(), 2);

        board.expire(start + Duration::from_millis(3500));
        assert_eq!(board.toasts().count(), 1);
        assert_eq!(board.latest(), Some(&Notice::Accepted));
    }

    #[test]
    fn keeps_a_bounded_backlog() {
        let mut board = NoticeBoard::new(Duration::from_secs(60));
        for _ in 0..10 {
            board.show_notice(Notice::RequestSent);
        }
        assert_eq!(board.toasts().count(), MAX_TOASTS);
    }

    #[test]
    fn terminal_notice_drops_pending_confirmation() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.request_confirmation(Confirmation::Disconnect);
        assert_eq!(board.pending_confirmation(), Some(Confirmation::Disconnect));

        board.show_notice(Notice::RemoteEnded);
        assert_eq!(board.take_confirmation(), None);
    }
}
