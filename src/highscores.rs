//! High score leaderboard
//!
//! Top 10 finished runs, best first. Every completed run is offered to the
//! board; quitting a run never records it.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve (1-indexed, None if it would fall off)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Insert a finished run, keeping the board sorted and trimmed
    ///
    /// Ties keep insertion order (the older run ranks higher). Returns the
    /// rank achieved (1-indexed) or None if the run didn't make the cut.
    pub fn add(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Format a timestamp relative to `now` (both unix ms)
pub fn format_age(now: f64, timestamp: f64) -> String {
    let diff_secs = (now - timestamp).max(0.0) / 1000.0;
    let diff_mins = diff_secs / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            difficulty: Difficulty::Easy,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry("a", 50)), Some(1));
        assert_eq!(board.add(entry("b", 200)), Some(1));
        assert_eq!(board.add(entry("c", 120)), Some(2));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![200, 120, 50]);
        assert_eq!(board.top_score(), Some(200));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.add(entry("first", 100));
        assert_eq!(board.add(entry("second", 100)), Some(2));
        assert_eq!(board.entries[0].name, "first");
    }

    #[test]
    fn test_keeps_top_ten() {
        let mut board = Leaderboard::new();
        for score in 1..=15 {
            board.add(entry("p", score * 10));
        }
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(60));
        assert_eq!(board.potential_rank(55), None);
        assert_eq!(board.potential_rank(1000), Some(1));
        assert_eq!(board.add(entry("late", 0)), None);
        assert_eq!(board.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_zero_score_recorded_when_room() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry("rookie", 0)), Some(1));
        assert!(!board.is_empty());
    }

    #[test]
    fn test_format_age() {
        let now = 1_000_000_000.0;
        assert_eq!(format_age(now, now - 5_000.0), "Just now");
        assert_eq!(format_age(now, now - 60_000.0), "1 min ago");
        assert_eq!(format_age(now, now - 3.0 * 3_600_000.0), "3 hours ago");
        assert_eq!(format_age(now, now - 86_400_000.0), "Yesterday");
        assert_eq!(format_age(now, now - 4.0 * 86_400_000.0), "4 days ago");
    }
}
