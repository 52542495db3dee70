use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Messages kept per subject; older ones are dropped first.
pub const MAX_QUEUED_MESSAGES: usize = 16;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// One-shot messages per session subject, handed out on the next listing.
#[derive(Debug, Default)]
pub struct FlashQueue {
    queues: DashMap<String, Vec<FlashMessage>>,
}

impl FlashQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, subject: &str, level: FlashLevel, message: impl Into<String>) {
        let mut queue = self.queues.entry(subject.to_string()).or_default();
        if queue.len() >= MAX_QUEUED_MESSAGES {
            queue.remove(0);
        }
        queue.push(FlashMessage {
            level,
            message: message.into(),
        });
    }

    pub fn drain(&self, subject: &str) -> Vec<FlashMessage> {
        self.queues
            .remove(subject)
            .map(|(_, messages)| messages)
            .unwrap_or_default()
    }
}
