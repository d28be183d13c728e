//! SM-2 (SuperMemo 2) review scheduling.
//!
//! Computes a card's next state from a 0-5 recall quality score:
//! - 0: complete blackout
//! - 1: incorrect, remembered on seeing the answer
//! - 2: incorrect, but felt familiar
//! - 3: correct with serious difficulty (the pass threshold)
//! - 4: correct after hesitation
//! - 5: perfect recall
//!
//! Quality below 3 is a lapse: repetitions and interval reset, the streak
//! breaks. Quality at or above 3 climbs the interval ladder 1 day, 6 days,
//! then interval times the ease factor.

use chrono::{DateTime, Duration, Local};

use crate::models::ReviewCard;

/// Floor applied to the ease factor after every update.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Conceptual ceiling from the SM-2 literature. Never applied: repeated
/// perfect reviews grow the ease factor past it without bound.
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Compute the card state after one answered review.
///
/// Pure: the input card is untouched and the caller owns persistence of the
/// returned card. `now` stamps the review and anchors the next due date, so
/// callers control the clock. Quality is taken as-is; out-of-range values
/// flow through the arithmetic unvalidated.
pub fn next_review(card: &ReviewCard, quality: u8, now: DateTime<Local>) -> ReviewCard {
    let mut next = card.clone();

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
    // Updated first: the new factor drives this review's interval growth.
    let q = quality as f64;
    let ef = card.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    next.ease_factor = ef.max(MIN_EASE_FACTOR);

    if quality >= 3 {
        // Correct response
        next.repetitions += 1;
        next.interval = match next.repetitions {
            1 => 1,
            2 => 6,
            _ => (next.interval as f64 * next.ease_factor).round() as u32,
        };
        next.statistics.correct_reviews += 1;
        next.statistics.streak_count += 1;
    } else {
        // Lapse: back to the start of the ladder
        next.repetitions = 0;
        next.interval = 1;
        next.statistics.streak_count = 0;
    }

    next.next_review_date = now + Duration::days(next.interval as i64);
    next.last_review_date = Some(now);
    next.statistics.total_reviews += 1;

    next
}
