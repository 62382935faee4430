//! Vote tallying.
//!
//! Pure derivation of display-ready statistics from raw vote counts. Tallies
//! are computed fresh from current counters on every read and never stored.

use newsdesk_db::entities::poll_option;
use serde::Serialize;

/// One option annotated with its share of the vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTally {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub percentage: u8,
}

/// Derived statistics for a whole poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollTally {
    pub total_votes: i64,
    pub options: Vec<OptionTally>,
}

/// Results view for the admin console: options by vote count descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub ranked: Vec<OptionTally>,
    /// Percentage lead of first place over second place; `None` with fewer
    /// than 2 options.
    pub margin: Option<u8>,
}

/// Share of `votes` in `total`, rounded half-up. 0 when `total` is 0.
#[must_use]
pub const fn percentage(votes: i64, total: i64) -> u8 {
    if total <= 0 {
        return 0;
    }
    // Integer round-half-up: (votes * 100 + total / 2) scaled to avoid
    // truncating the half before the division.
    ((votes as i128 * 200 + total as i128) / (total as i128 * 2)) as u8
}

/// Compute total votes and per-option percentages.
///
/// Percentages are rounded independently, so they may not sum to exactly
/// 100. This matches the public results display and is accepted, not
/// corrected.
#[must_use]
pub fn tally(options: &[poll_option::Model]) -> PollTally {
    let total_votes: i64 = options.iter().map(|o| o.votes).sum();

    let options = options
        .iter()
        .map(|o| OptionTally {
            id: o.id,
            text: o.text.clone(),
            votes: o.votes,
            percentage: percentage(o.votes, total_votes),
        })
        .collect();

    PollTally {
        total_votes,
        options,
    }
}

/// Rank options by vote count descending.
///
/// The sort is stable: options with equal vote counts keep their insertion
/// order.
#[must_use]
pub fn rank(tally: &PollTally) -> Ranking {
    let mut ranked = tally.options.clone();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));

    let margin = if ranked.len() >= 2 {
        Some(ranked[0].percentage.saturating_sub(ranked[1].percentage))
    } else {
        None
    };

    Ranking { ranked, margin }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn option(id: i64, text: &str, votes: i64, position: i32) -> poll_option::Model {
        poll_option::Model {
            id,
            poll_id: 1,
            text: text.to_string(),
            votes,
            position,
        }
    }

    #[test]
    fn test_tally_zero_votes_is_all_zero_percent() {
        let result = tally(&[option(1, "Yes", 0, 0), option(2, "No", 0, 1)]);

        assert_eq!(result.total_votes, 0);
        assert!(result.options.iter().all(|o| o.percentage == 0));
    }

    #[test]
    fn test_tally_three_to_one_split() {
        let result = tally(&[option(1, "A", 3, 0), option(2, "B", 1, 1)]);

        assert_eq!(result.total_votes, 4);
        assert_eq!(result.options[0].percentage, 75);
        assert_eq!(result.options[1].percentage, 25);
    }

    #[test]
    fn test_tally_after_one_more_vote() {
        // The worked example: A(3), B(1) plus one more vote for B.
        let result = tally(&[option(1, "A", 3, 0), option(2, "B", 2, 1)]);

        assert_eq!(result.total_votes, 5);
        assert_eq!(result.options[0].percentage, 60);
        assert_eq!(result.options[1].percentage, 40);
    }

    #[test]
    fn test_tally_is_deterministic_for_same_counts() {
        let options = [option(1, "A", 7, 0), option(2, "B", 3, 1)];
        assert_eq!(tally(&options), tally(&options));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/8 = 12.5% rounds up to 13.
        assert_eq!(percentage(1, 8), 13);
        // 1/3 = 33.33...% rounds down to 33.
        assert_eq!(percentage(1, 3), 33);
        // 2/3 = 66.66...% rounds up to 67.
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_independently_rounded_percentages_may_not_sum_to_100() {
        // Three-way 1/1/1 split: 33 + 33 + 33 = 99, left uncorrected.
        let result = tally(&[
            option(1, "A", 1, 0),
            option(2, "B", 1, 1),
            option(3, "C", 1, 2),
        ]);

        let sum: u32 = result.options.iter().map(|o| u32::from(o.percentage)).sum();
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_rank_orders_by_votes_descending() {
        let result = rank(&tally(&[
            option(1, "A", 1, 0),
            option(2, "B", 5, 1),
            option(3, "C", 3, 2),
        ]));

        let ids: Vec<i64> = result.ranked.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        // 5/9 = 56%, 3/9 = 33%.
        assert_eq!(result.margin, Some(23));
    }

    #[test]
    fn test_rank_tie_keeps_insertion_order() {
        let result = rank(&tally(&[
            option(10, "First", 2, 0),
            option(11, "Second", 2, 1),
        ]));

        let ids: Vec<i64> = result.ranked.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(result.margin, Some(0));
    }

    #[test]
    fn test_rank_single_option_has_no_margin() {
        let result = rank(&tally(&[option(1, "Only", 4, 0)]));
        assert_eq!(result.margin, None);
    }
}
