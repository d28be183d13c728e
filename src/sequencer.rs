//! Review-order interleaving.
//!
//! Alternating categories within a session beats blocking same-category
//! cards together, so the queue is reordered round-robin across categories
//! before study.

use crate::models::ReviewCard;

/// Interleave a due queue across categories.
///
/// Cards are grouped by category in first-seen order, then emitted one per
/// group per pass until every group is drained. The result is a permutation
/// of the input and is deterministic for identical input.
pub fn optimal_order<'a>(cards: &[&'a ReviewCard]) -> Vec<&'a ReviewCard> {
    // Explicit ordered group list: first-seen order decides the round-robin
    // column order, so no hash-map iteration order can leak in.
    let mut groups: Vec<(&str, Vec<&'a ReviewCard>)> = Vec::new();
    for &card in cards {
        match groups.iter().position(|(name, _)| *name == card.category) {
            Some(idx) => groups[idx].1.push(card),
            None => groups.push((card.category.as_str(), vec![card])),
        }
    }

    let longest = groups.iter().map(|(_, group)| group.len()).max().unwrap_or(0);

    let mut order = Vec::with_capacity(cards.len());
    for i in 0..longest {
        for (_, group) in &groups {
            if let Some(&card) = group.get(i) {
                order.push(card);
            }
        }
    }
    order
}
