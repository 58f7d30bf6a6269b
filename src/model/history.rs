use std::collections::VecDeque;

use serde::Serialize;

pub const HISTORY_CAP: usize = 5;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub input_text: String,
    pub output_text: String,
    pub target_language_name: String,
}

/// Most-recent-first, never longer than `HISTORY_CAP`.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<TranslationRecord>,
}

impl History {
    pub fn push(&mut self, record: TranslationRecord) {
        self.entries.push_front(record);
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &TranslationRecord> {
        self.entries.iter()
    }
}
