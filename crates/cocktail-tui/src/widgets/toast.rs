//! Toast notifications: transient notices in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_WARNING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            max_visible: 3,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        // A repeated message restarts its timer instead of stacking.
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(2));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(4));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(6));
    }

    /// Drop expired toasts. Returns true when something disappeared.
    pub fn tick(&mut self) -> bool {
        let before = self.toasts.len();
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        self.toasts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Newest-first `(severity, message)` pairs.
    pub fn messages(&self) -> impl Iterator<Item = (Severity, &str)> {
        self.toasts
            .iter()
            .rev()
            .map(|t| (t.severity, t.message.as_str()))
    }

    /// Render toasts in the top-right corner of `area`, newest on top.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60).min(area.width);
        let mut y = area.y + 1;

        for (severity, message) in self.messages() {
            if y >= area.y + area.height {
                break;
            }
            let msg_len = message.chars().count() as u16;
            let w = (msg_len + 5).min(max_width);
            let x = area.x + area.width.saturating_sub(w + 1);
            let color = match severity {
                Severity::Info => C_TOAST_INFO,
                Severity::Warning => C_TOAST_WARNING,
                Severity::Error => C_TOAST_ERROR,
            };

            let toast_area = Rect {
                x,
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {} {} ", severity.icon(), message),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))),
                toast_area,
            );
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_collapsed() {
        let mut t = ToastManager::new();
        t.info("4 cocktails already shown");
        t.info("4 cocktails already shown");
        assert_eq!(t.messages().count(), 1);
    }

    #[test]
    fn test_queue_is_capped_newest_first() {
        let mut t = ToastManager::new();
        for i in 0..5 {
            t.warning(format!("notice {}", i));
        }
        let msgs: Vec<&str> = t.messages().map(|(_, m)| m).collect();
        assert_eq!(msgs, vec!["notice 4", "notice 3", "notice 2"]);
    }

    #[test]
    fn test_expired_toasts_are_dropped() {
        let mut t = ToastManager::new();
        t.push("gone", Severity::Error, Duration::ZERO);
        t.error("stays");
        assert!(t.tick());
        let msgs: Vec<(Severity, &str)> = t.messages().collect();
        assert_eq!(msgs, vec![(Severity::Error, "stays")]);
        assert!(!t.tick());
    }
}
