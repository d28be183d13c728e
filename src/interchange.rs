//! Plain-text import and export of card collections.
//!
//! One card per line, fields separated by tabs: question, answer, then any
//! number of tags. No header row, no quoting, no escaping; content
//! containing tabs or newlines will corrupt the format and that is the
//! caller's problem.

use chrono::{DateTime, Local};
use log::debug;

use crate::models::ReviewCard;

/// Category assigned to every imported card.
pub const IMPORT_CATEGORY: &str = "Imported";

/// Render cards in the interchange format.
///
/// The tab after the answer is always emitted, so a card without tags ends
/// its line with a trailing tab.
pub fn export_txt(cards: &[ReviewCard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}\t{}\t{}", card.question, card.answer, card.tags.join("\t")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the interchange format into fresh cards.
///
/// Fields are trimmed; lines missing a question or an answer are dropped
/// without error, so import under-produces rather than fails. Every card
/// comes out of the default constructor: scheduling state is reset and the
/// category is fixed to [`IMPORT_CATEGORY`].
pub fn import_txt(text: &str, now: DateTime<Local>) -> Vec<ReviewCard> {
    let mut cards = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let mut fields = line.split('\t');
        let question = fields.next().map(str::trim).unwrap_or("");
        let answer = fields.next().map(str::trim).unwrap_or("");

        if question.is_empty() || answer.is_empty() {
            skipped += 1;
            continue;
        }

        let tags: Vec<String> = fields.map(|t| t.trim().to_string()).collect();
        cards.push(ReviewCard::new(
            question.to_string(),
            answer.to_string(),
            IMPORT_CATEGORY.to_string(),
            tags,
            now,
        ));
    }

    if skipped > 0 {
        debug!("import skipped {} unusable line(s)", skipped);
    }

    cards
}
