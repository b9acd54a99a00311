use crate::roster::Entry;

/// A broadcast message, delivered to at most one poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shout {
    name: String,
    leader: Entry,
    message: String,
}

impl Shout {
    pub fn new(name: &str, leader: Entry, message: &str) -> Self {
        Self {
            name: name.to_string(),
            leader,
            message: message.to_string(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn leader(&self) -> Entry {
        self.leader
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.message.chars().count()
    }
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}
