//! Picks one answer out of the candidates gathered for a title.

use std::collections::HashMap;

use crate::model::BookCandidate;

/// Selects the candidate whose author is listed most often.
///
/// Authors are compared exactly, so `"J. R. R. Tolkien"` and `"J.R.R. Tolkien"` are different
/// votes, and candidates without an author vote together. On a tie the author seen first wins,
/// and within the winning author the first candidate is returned. `candidates` is expected in
/// priority order.
#[must_use]
pub fn most_plausible(candidates: Vec<BookCandidate>) -> Option<BookCandidate> {
    let mut votes: HashMap<Option<&str>, usize> = HashMap::new();
    for candidate in &candidates {
        *votes.entry(candidate.author.as_deref()).or_default() += 1;
    }

    let mut winner: Option<(usize, usize)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let count = votes[&candidate.author.as_deref()];
        // strictly greater keeps the earliest candidate on ties
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((index, count));
        }
    }

    let (index, _) = winner?;
    candidates.into_iter().nth(index)
}
