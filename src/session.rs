//! Bookkeeping for one sitting of reviews.
//!
//! Tracks what the host needs to summarize a study session: how many cards
//! were answered, how many correctly, and the mean self-assessed quality.
//! No card state lives here; the reviewer owns that.

use chrono::{DateTime, Duration, Local};
use uuid::Uuid;

/// One in-progress or finished review sitting.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub id: String,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub cards_reviewed: u32,
    pub correct_answers: u32,
    /// Running mean of the submitted quality scores.
    pub average_confidence: f64,
}

impl ReviewSession {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: now,
            finished_at: None,
            cards_reviewed: 0,
            correct_answers: 0,
            average_confidence: 0.0,
        }
    }

    /// Count one answered card. Quality at or above 3 counts as correct.
    pub fn record(&mut self, quality: u8) {
        self.cards_reviewed += 1;
        if quality >= 3 {
            self.correct_answers += 1;
        }
        self.average_confidence +=
            (quality as f64 - self.average_confidence) / self.cards_reviewed as f64;
    }

    pub fn finish(&mut self, now: DateTime<Local>) {
        self.finished_at = Some(now);
    }

    /// Share of answered cards that were correct, as a percentage.
    pub fn accuracy(&self) -> f64 {
        if self.cards_reviewed == 0 {
            return 0.0;
        }
        self.correct_answers as f64 / self.cards_reviewed as f64 * 100.0
    }

    /// Wall-clock length of the sitting, once finished.
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}
