//! SM-2 spaced repetition scheduling engine.
//!
//! Pure scheduling computations over an in-memory card collection: the SM-2
//! reviewer, due-date bucketing, category interleaving, analytics, and a
//! tab-separated interchange format. The engine performs no I/O and holds no
//! state; the host owns the card store and the clock, and every operation
//! takes its inputs explicitly.

pub mod analytics;
pub mod config;
pub mod interchange;
pub mod models;
pub mod schedule;
pub mod sequencer;
pub mod session;
pub mod sm2;
pub mod storage;

pub use models::{CardStatistics, ReviewCard};
pub use schedule::{build_schedule, ReviewSchedule, GRADUATING_INTERVAL};
pub use sm2::{next_review, MAX_EASE_FACTOR, MIN_EASE_FACTOR};
