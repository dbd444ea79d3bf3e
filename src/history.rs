//! Append-only log of applied transforms

/// Human-readable record of every transform applied in a session.
/// Pure audit log: entries are never undone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformHistory {
    entries: Vec<String>,
}

impl TransformHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: impl Into<String>) {
        let description = description.into();
        log::debug!("transform #{}: {}", self.entries.len() + 1, description);
        self.entries.push(description);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Numbered lines ("1. ...") for the sidebar
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}", i + 1, e))
    }
}
