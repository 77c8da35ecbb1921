use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SHOW_LIMIT: usize = 20;

/// The result of one pick operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub pick: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Local>>,
}

impl HistoryEntry {
    pub fn new(pick: Vec<String>) -> HistoryEntry {
        HistoryEntry {
            pick,
            at: Some(Local::now()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn append(&mut self, picks: Vec<String>) {
        self.entries.push(HistoryEntry::new(picks));
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// Numbered lines for the most recent `limit` entries.
    pub fn show(&self, limit: usize) -> Vec<String> {
        self.recent(limit)
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry.at {
                Some(at) => format!(
                    "{}. {}  [{}]",
                    i + 1,
                    entry.pick.join(", "),
                    at.format("%Y-%m-%d %H:%M")
                ),
                None => format!("{}. {}", i + 1, entry.pick.join(", ")),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
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

    fn history_of(count: usize) -> History {
        let mut history = History::new();
        for i in 0..count {
            history.append(vec![format!("item{}", i)]);
        }
        history
    }

    #[test]
    fn test_show_window_keeps_storage() {
        let history = history_of(25);
        let lines = history.show(DEFAULT_SHOW_LIMIT);
        assert_eq!(lines.len(), 20);
        assert!(lines[0].starts_with("1. item5"));
        assert!(lines[19].starts_with("20. item24"));
        assert_eq!(history.len(), 25);
    }

    #[test]
    fn test_show_fewer_than_limit() {
        let history = history_of(2);
        let lines = history.show(20);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2. item1"));
    }

    #[test]
    fn test_multi_pick_line() {
        let mut history = History::new();
        history.entries.push(HistoryEntry {
            pick: vec!["a".to_string(), "b".to_string()],
            at: None,
        });
        assert_eq!(history.show(20), vec!["1. a, b".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(3);
        history.clear();
        assert!(history.is_empty());
        assert!(history.show(20).is_empty());
    }

    #[test]
    fn test_entry_without_timestamp_loads() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"pick": ["x"]}"#).unwrap();
        assert_eq!(entry.pick, vec!["x"]);
        assert_eq!(entry.at, None);
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"pick":["x"]}"#);
    }
}
