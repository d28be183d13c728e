//! Bucketing of a card collection by review state.
//!
//! Cards are partitioned relative to a reference day into: new, learning,
//! overdue, due today, graduated, and upcoming. Every card lands in exactly
//! one bucket.

use chrono::NaiveDate;

use crate::models::ReviewCard;

/// Interval (days) at which a card leaves the learning phase.
pub const GRADUATING_INTERVAL: u32 = 4;

/// A card collection partitioned by review state as of one reference day.
///
/// Buckets borrow from the input slice; hosts needing ownership clone at
/// their boundary.
#[derive(Debug, Default)]
pub struct ReviewSchedule<'a> {
    /// Due exactly on the reference day.
    pub today: Vec<&'a ReviewCard>,
    /// Due before the reference day, most overdue first.
    pub overdue: Vec<&'a ReviewCard>,
    /// Catch-all for future-dated cards the other rules miss.
    pub upcoming: Vec<&'a ReviewCard>,
    /// Never answered.
    pub new: Vec<&'a ReviewCard>,
    /// Answered, but still below the graduating interval.
    pub learning: Vec<&'a ReviewCard>,
    /// Past the graduating interval and due in the future.
    pub graduated: Vec<&'a ReviewCard>,
}

impl<'a> ReviewSchedule<'a> {
    /// Number of cards across all buckets; equals the input size.
    pub fn total(&self) -> usize {
        self.today.len()
            + self.overdue.len()
            + self.upcoming.len()
            + self.new.len()
            + self.learning.len()
            + self.graduated.len()
    }

    /// Assemble the session queue: overdue, then due today, then at most
    /// `new_limit` new cards. Callers interleave the result before study.
    pub fn due_queue(&self, new_limit: usize) -> Vec<&'a ReviewCard> {
        let mut queue = Vec::with_capacity(self.overdue.len() + self.today.len() + new_limit);
        queue.extend(&self.overdue);
        queue.extend(&self.today);
        queue.extend(self.new.iter().take(new_limit));
        queue
    }
}

/// Partition `cards` by review state relative to `today`.
///
/// Dates are compared at midnight. The first matching rule wins and the rule
/// order is fixed: new, learning, overdue, today, graduated, upcoming.
pub fn build_schedule(cards: &[ReviewCard], today: NaiveDate) -> ReviewSchedule<'_> {
    let mut schedule = ReviewSchedule::default();

    for card in cards {
        let review_date = card.next_review_date.date_naive();

        if card.repetitions == 0 && card.last_review_date.is_none() {
            schedule.new.push(card);
        } else if card.interval < GRADUATING_INTERVAL {
            schedule.learning.push(card);
        } else if review_date < today {
            schedule.overdue.push(card);
        } else if review_date == today {
            schedule.today.push(card);
        } else if card.interval >= GRADUATING_INTERVAL {
            // Always reached for future-dated cards; the learning rule above
            // already took everything below the graduating interval.
            schedule.graduated.push(card);
        } else {
            schedule.upcoming.push(card);
        }
    }

    // Most overdue first; other buckets keep input order.
    schedule.overdue.sort_by_key(|card| card.next_review_date);

    schedule
}
