//! Short-lived notifications shown over the gallery.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Info => "ℹ",
            ToastKind::Error => "⚠",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn remaining(&self, lifetime: Duration, now: Instant) -> Duration {
        lifetime.saturating_sub(now.saturating_duration_since(self.created_at))
    }
}

/// Bounded queue of toasts, newest first
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
    max_visible: usize,
}

impl ToastQueue {
    pub fn new(lifetime: Duration, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
            max_visible: max_visible.max(1),
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toasts.push_front(Toast {
            kind,
            message: message.into(),
            created_at: now,
        });
        self.toasts.truncate(self.max_visible);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < lifetime);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
