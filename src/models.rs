//! Data models for review cards and their per-card statistics.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cumulative review counters carried on every card.
///
/// All fields only grow, except `streak_count`, which resets to 0 on a lapse.
/// `average_response_time` is preserved for host UIs; the engine never
/// writes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStatistics {
    pub total_reviews: u32,
    pub correct_reviews: u32,
    pub average_response_time: f64,
    pub streak_count: u32,
}

/// A single memorization item and its scheduling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCard {
    pub id: String,
    pub question: String,
    pub answer: String,

    // Classification
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Static editorial difficulty estimate (0-5). Not read by the
    /// scheduling algorithm; carried for host UIs.
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,

    // SM-2 state
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,

    // Scheduling
    pub next_review_date: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<DateTime<Local>>,
    pub created_at: DateTime<Local>,

    #[serde(default)]
    pub statistics: CardStatistics,
}

fn default_difficulty() -> u8 {
    3
}

impl ReviewCard {
    /// Create a fresh card: ease factor 2.5, no repetitions, due immediately.
    pub fn new(
        question: String,
        answer: String,
        category: String,
        tags: Vec<String>,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question,
            answer,
            category,
            tags,
            difficulty: default_difficulty(),
            ease_factor: 2.5,
            interval: 0,
            repetitions: 0,
            next_review_date: now,
            last_review_date: None,
            created_at: now,
            statistics: CardStatistics::default(),
        }
    }

    /// A card that has never been answered.
    pub fn is_new(&self) -> bool {
        self.repetitions == 0 && self.last_review_date.is_none()
    }

    /// Due on or before the given day (dates compared at midnight).
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date.date_naive() <= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_defaults() {
        let now = Local::now();
        let card = ReviewCard::new(
            "question".to_string(),
            "answer".to_string(),
            "General".to_string(),
            vec!["tag".to_string()],
            now,
        );

        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval, 0);
        assert_eq!(card.difficulty, 3);
        assert_eq!(card.next_review_date, now);
        assert!(card.last_review_date.is_none());
        assert_eq!(card.statistics, CardStatistics::default());
        assert!(card.is_new());
        assert!(card.is_due(now.date_naive()));
    }

    #[test]
    fn unique_ids() {
        let now = Local::now();
        let a = ReviewCard::new("q".into(), "a".into(), "C".into(), vec![], now);
        let b = ReviewCard::new("q".into(), "a".into(), "C".into(), vec![], now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serde_round_trip() {
        let now = Local::now();
        let card = ReviewCard::new("q".into(), "a".into(), "Math".into(), vec!["x".into()], now);

        let json = serde_json::to_string(&card).unwrap();
        let back: ReviewCard = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, card.id);
        assert_eq!(back.question, card.question);
        assert_eq!(back.tags, card.tags);
        assert_eq!(back.ease_factor, card.ease_factor);
        assert_eq!(back.next_review_date, card.next_review_date);
    }
}
