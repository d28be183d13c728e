//! Read-only insights derived from a card snapshot.
//!
//! Everything here is a pure computation: retention, per-category numbers,
//! review-volume forecasting, streaks, and a rough time estimate. Nothing
//! mutates card state.

use chrono::NaiveDate;

use crate::models::ReviewCard;
use crate::schedule::build_schedule;

/// Assumed review time per card, in seconds.
const SECONDS_PER_CARD: f64 = 15.0;

/// Per-category aggregates, in first-seen category order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub name: String,
    pub total: usize,
    /// Mean of each card's own correct/total ratio, as a percentage.
    /// Cards never reviewed count toward the mean at ratio 0.
    pub retention: f64,
    pub avg_ease_factor: f64,
}

/// Streak aggregates across a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakStats {
    pub current_streak: u32,
    pub average_streak: f64,
    pub cards_on_streak: usize,
}

/// Estimated review time, in whole minutes (rounded up).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeInvestment {
    pub today_minutes: u32,
    pub weekly_minutes: u32,
    pub average_per_day: u32,
}

/// Everything a dashboard needs in one pass: counts by review state,
/// retention, a 30-day forecast, category/streak breakdowns, and the time
/// estimate.
#[derive(Debug, Clone)]
pub struct LearningInsights {
    pub total_cards: usize,
    pub cards_to_review_today: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub graduated_cards: usize,
    pub retention_rate: f64,
    pub average_ease_factor: f64,
    pub problem_cards: usize,
    pub review_forecast: Vec<u32>,
    pub category_stats: Vec<CategoryStats>,
    pub streak_stats: StreakStats,
    pub time_investment: TimeInvestment,
}

/// Overall retention rate: correct reviews over total reviews, as a
/// percentage. 0 when nothing has been reviewed yet.
pub fn retention(cards: &[ReviewCard]) -> f64 {
    let total: u64 = cards.iter().map(|c| c.statistics.total_reviews as u64).sum();
    let correct: u64 = cards.iter().map(|c| c.statistics.correct_reviews as u64).sum();

    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// Group cards by category and aggregate count, retention, and mean ease
/// factor per group. Groups appear in first-seen order.
pub fn category_stats(cards: &[ReviewCard]) -> Vec<CategoryStats> {
    let mut stats: Vec<CategoryStats> = Vec::new();

    for card in cards {
        let idx = match stats.iter().position(|s| s.name == card.category) {
            Some(idx) => idx,
            None => {
                stats.push(CategoryStats {
                    name: card.category.clone(),
                    total: 0,
                    retention: 0.0,
                    avg_ease_factor: 0.0,
                });
                stats.len() - 1
            }
        };

        let entry = &mut stats[idx];
        entry.total += 1;
        if card.statistics.total_reviews > 0 {
            entry.retention +=
                card.statistics.correct_reviews as f64 / card.statistics.total_reviews as f64;
        }
        entry.avg_ease_factor += card.ease_factor;
    }

    // Sums to means.
    for entry in &mut stats {
        entry.retention = entry.retention / entry.total as f64 * 100.0;
        entry.avg_ease_factor /= entry.total as f64;
    }

    stats
}

/// Daily review load for the next `days` days, starting at `today`.
///
/// The result always has length `days`; cards due before today or past the
/// window contribute nothing.
pub fn review_forecast(cards: &[ReviewCard], today: NaiveDate, days: usize) -> Vec<u32> {
    let mut forecast = vec![0u32; days];

    for card in cards {
        let days_until = (card.next_review_date.date_naive() - today).num_days();
        if days_until >= 0 && (days_until as usize) < days {
            forecast[days_until as usize] += 1;
        }
    }

    forecast
}

/// Streak aggregates: best current streak, mean streak, and how many cards
/// are on a streak at all. All zeros for an empty collection.
pub fn streak_stats(cards: &[ReviewCard]) -> StreakStats {
    let current_streak = cards
        .iter()
        .map(|c| c.statistics.streak_count)
        .max()
        .unwrap_or(0);

    let average_streak = if cards.is_empty() {
        0.0
    } else {
        cards
            .iter()
            .map(|c| c.statistics.streak_count as f64)
            .sum::<f64>()
            / cards.len() as f64
    };

    let cards_on_streak = cards
        .iter()
        .filter(|c| c.statistics.streak_count > 0)
        .count();

    StreakStats {
        current_streak,
        average_streak,
        cards_on_streak,
    }
}

/// Review-time estimate at 15 seconds per card: today's due load, the
/// 7-day forecast load, and a flat per-day average amortized over a nominal
/// 30-day review cycle (not forecast-derived).
pub fn time_investment(cards: &[ReviewCard], today: NaiveDate) -> TimeInvestment {
    let schedule = build_schedule(cards, today);
    let due_today = (schedule.today.len() + schedule.overdue.len()) as f64;
    let week_load: u32 = review_forecast(cards, today, 7).iter().sum();

    TimeInvestment {
        today_minutes: (due_today * SECONDS_PER_CARD / 60.0).ceil() as u32,
        weekly_minutes: (week_load as f64 * SECONDS_PER_CARD / 60.0).ceil() as u32,
        average_per_day: (cards.len() as f64 * SECONDS_PER_CARD / 30.0 / 60.0).ceil() as u32,
    }
}

/// Cards whose ease factor has sunk below 2.0 and need attention.
pub fn problem_cards(cards: &[ReviewCard]) -> usize {
    cards.iter().filter(|c| c.ease_factor < 2.0).count()
}

/// Compute the full insight bundle for a snapshot, with a 30-day forecast
/// horizon.
pub fn learning_insights(cards: &[ReviewCard], today: NaiveDate) -> LearningInsights {
    let schedule = build_schedule(cards, today);

    let average_ease_factor = if cards.is_empty() {
        0.0
    } else {
        cards.iter().map(|c| c.ease_factor).sum::<f64>() / cards.len() as f64
    };

    LearningInsights {
        total_cards: cards.len(),
        cards_to_review_today: schedule.today.len() + schedule.overdue.len(),
        new_cards: schedule.new.len(),
        learning_cards: schedule.learning.len(),
        graduated_cards: schedule.graduated.len(),
        retention_rate: retention(cards),
        average_ease_factor,
        problem_cards: problem_cards(cards),
        review_forecast: review_forecast(cards, today, 30),
        category_stats: category_stats(cards),
        streak_stats: streak_stats(cards),
        time_investment: time_investment(cards, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn noon(date: NaiveDate) -> DateTime<Local> {
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
    }

    fn card(category: &str) -> ReviewCard {
        ReviewCard::new(
            "q".to_string(),
            "a".to_string(),
            category.to_string(),
            Vec::new(),
            noon(today()),
        )
    }

    fn card_with_stats(category: &str, total: u32, correct: u32, streak: u32) -> ReviewCard {
        let mut c = card(category);
        c.statistics.total_reviews = total;
        c.statistics.correct_reviews = correct;
        c.statistics.streak_count = streak;
        if total > 0 {
            c.last_review_date = Some(noon(today()));
            c.repetitions = streak;
        }
        c
    }

    fn card_due_in(days: i64) -> ReviewCard {
        let mut c = card("C");
        c.repetitions = 3;
        c.interval = 6;
        c.last_review_date = Some(noon(today()) - Duration::days(6));
        c.next_review_date = noon(today()) + Duration::days(days);
        c
    }

    #[test]
    fn retention_is_correct_over_total() {
        let cards = vec![
            card_with_stats("A", 10, 8, 0),
            card_with_stats("A", 10, 7, 0),
        ];
        assert!((retention(&cards) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn retention_bounds() {
        assert_eq!(retention(&[]), 0.0);
        assert_eq!(retention(&[card("A")]), 0.0); // nothing reviewed yet

        let perfect = vec![card_with_stats("A", 5, 5, 5)];
        assert_eq!(retention(&perfect), 100.0);

        let hopeless = vec![card_with_stats("A", 5, 0, 0)];
        assert_eq!(retention(&hopeless), 0.0);
    }

    #[test]
    fn category_stats_first_seen_order_and_means() {
        let cards = vec![
            card_with_stats("Rust", 10, 10, 0),
            card_with_stats("Math", 4, 2, 0),
            card_with_stats("Rust", 0, 0, 0), // unreviewed dilutes the mean
        ];

        let stats = category_stats(&cards);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Rust");
        assert_eq!(stats[1].name, "Math");

        assert_eq!(stats[0].total, 2);
        // (1.0 + 0.0) / 2 cards = 50%
        assert!((stats[0].retention - 50.0).abs() < 1e-9);
        assert!((stats[1].retention - 50.0).abs() < 1e-9);
        assert!((stats[0].avg_ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn forecast_length_and_window() {
        let cards = vec![
            card_due_in(0),
            card_due_in(2),
            card_due_in(2),
            card_due_in(7), // one past the window
            card_due_in(-1), // overdue, contributes nothing
        ];

        let forecast = review_forecast(&cards, today(), 7);
        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast[0], 1);
        assert_eq!(forecast[2], 2);
        assert_eq!(forecast.iter().sum::<u32>(), 3);
    }

    #[test]
    fn forecast_zero_days_is_empty() {
        let cards = vec![card_due_in(0)];
        assert!(review_forecast(&cards, today(), 0).is_empty());
    }

    #[test]
    fn streak_stats_aggregates() {
        let cards = vec![
            card_with_stats("A", 5, 5, 5),
            card_with_stats("A", 3, 1, 0),
            card_with_stats("A", 4, 4, 1),
        ];

        let stats = streak_stats(&cards);
        assert_eq!(stats.current_streak, 5);
        assert!((stats.average_streak - 2.0).abs() < 1e-9);
        assert_eq!(stats.cards_on_streak, 2);
    }

    #[test]
    fn streak_stats_empty() {
        let stats = streak_stats(&[]);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.average_streak, 0.0);
        assert_eq!(stats.cards_on_streak, 0);
    }

    #[test]
    fn time_investment_rounds_up() {
        // 5 cards due today: 75 s -> 2 minutes.
        let cards: Vec<ReviewCard> = (0..5).map(|_| card_due_in(0)).collect();
        let estimate = time_investment(&cards, today());
        assert_eq!(estimate.today_minutes, 2);
        // Same 5 cards inside the 7-day window.
        assert_eq!(estimate.weekly_minutes, 2);
        // 5 * 15 s over 30 days is well under a minute a day.
        assert_eq!(estimate.average_per_day, 1);
    }

    #[test]
    fn problem_cards_counts_low_ease_only() {
        let mut weak = card("A");
        weak.ease_factor = 1.7;
        let mut fine = card("A");
        fine.ease_factor = 2.0; // at the threshold, not below

        assert_eq!(problem_cards(&[weak, fine]), 1);
    }

    #[test]
    fn insights_aggregate_consistently() {
        let mut cards = vec![
            card("A"), // new
            card_due_in(-2), // overdue
            card_due_in(0), // today
            card_due_in(10), // graduated
        ];
        cards.push({
            let mut c = card("A");
            c.repetitions = 1;
            c.interval = 1;
            c.last_review_date = Some(noon(today()));
            c.next_review_date = noon(today()) + Duration::days(1);
            c
        }); // learning

        let insights = learning_insights(&cards, today());
        assert_eq!(insights.total_cards, 5);
        assert_eq!(insights.new_cards, 1);
        assert_eq!(insights.learning_cards, 1);
        assert_eq!(insights.graduated_cards, 1);
        assert_eq!(insights.cards_to_review_today, 2);
        assert_eq!(insights.review_forecast.len(), 30);
        assert!((insights.average_ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn insights_on_empty_collection() {
        let insights = learning_insights(&[], today());
        assert_eq!(insights.total_cards, 0);
        assert_eq!(insights.retention_rate, 0.0);
        assert_eq!(insights.average_ease_factor, 0.0);
        assert_eq!(insights.review_forecast.len(), 30);
        assert!(insights.category_stats.is_empty());
    }
}
