use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::models::{AgentLog, LogKind};

/// The live, append-only agent log.
///
/// In memory only. Each entry is also emitted as a tracing event so the
/// activity shows up in the service log.
#[derive(Clone, Default)]
pub struct LogBook {
    entries: Arc<Mutex<Vec<AgentLog>>>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, agent_name: &str, message: impl Into<String>, kind: LogKind) {
        let message = message.into();
        match kind {
            LogKind::Error => tracing::error!(agent = agent_name, "{}", message),
            LogKind::Warning => tracing::warn!(agent = agent_name, "{}", message),
            _ => tracing::info!(agent = agent_name, "{}", message),
        }

        let entry = AgentLog {
            agent_name: agent_name.to_string(),
            message,
            timestamp: Utc::now(),
            kind,
        };
        self.entries.lock().expect("log lock poisoned").push(entry);
    }

    pub fn snapshot(&self) -> Vec<AgentLog> {
        self.entries.lock().expect("log lock poisoned").clone()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<AgentLog> {
        let entries = self.entries.lock().expect("log lock poisoned");
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_tail_in_order() {
        let logs = LogBook::new();
        for i in 0..5 {
            logs.push("Test", format!("entry {}", i), LogKind::Info);
        }
        let tail = logs.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "entry 3");
        assert_eq!(tail[1].message, "entry 4");
    }

    #[test]
    fn recent_larger_than_log_returns_everything() {
        let logs = LogBook::new();
        logs.push("Test", "only", LogKind::Success);
        assert_eq!(logs.recent(20).len(), 1);
        assert_eq!(logs.snapshot().len(), 1);
    }
}
