//! Per-session activity history shown on the profile panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a logged activity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Login,
    Booking,
    Update,
    Emergency,
    Optimization,
    Report,
    Settings,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Login => "login",
            ActivityKind::Booking => "booking",
            ActivityKind::Update => "update",
            ActivityKind::Emergency => "emergency",
            ActivityKind::Optimization => "optimization",
            ActivityKind::Report => "report",
            ActivityKind::Settings => "settings",
        }
    }
}

/// One row of the activity history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub kind: ActivityKind,
    pub details: String,
    /// Freeform duration label ("15m"); empty when not applicable.
    pub duration: String,
}

/// Append-only activity history, newest last.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: ActivityKind,
        action: impl Into<String>,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.entries.push(ActivityEntry {
            timestamp: now,
            action: action.into(),
            kind,
            details: details.into(),
            duration: String::new(),
        });
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_append_only_and_ordered() {
        let mut log = ActivityLog::new();
        let now = Utc::now();
        log.record(ActivityKind::Login, "Logged into system", "ana@example.com", now);
        log.record(ActivityKind::Update, "Updated traffic signal timing", "Main St", now);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].kind, ActivityKind::Login);
        assert_eq!(log.entries()[1].kind, ActivityKind::Update);
    }
}
