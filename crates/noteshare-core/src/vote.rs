//! Vote ledger primitives: the per-voter toggle state machine.
//!
//! Each post carries a set of (voter, polarity) pairs with at most one
//! entry per voter. Every mutation of that set goes through [`toggle`],
//! which implements the tri-state transition shared by the upvote and
//! downvote endpoints:
//!
//! - casting the same vote again removes it (un-vote)
//! - casting the opposite vote flips the existing entry in place
//! - casting with no prior vote inserts a new entry
//!
//! Aggregate counts are always recomputed from the vote set with
//! [`tally`], never adjusted incrementally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Up,
    Down,
}

impl Polarity {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = ParsePolarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(ParsePolarityError(other.to_string())),
        }
    }
}

/// Error type for parsing a [`Polarity`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolarityError(pub String);

impl fmt::Display for ParsePolarityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid polarity: expected \"up\" or \"down\", got {:?}", self.0)
    }
}

impl std::error::Error for ParsePolarityError {}

/// Mutation to apply to a voter's entry in the vote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOp {
    /// No entry existed; insert one with the requested polarity.
    Insert(Polarity),
    /// An entry with the opposite polarity existed; flip it in place.
    Flip(Polarity),
    /// An entry with the same polarity existed; remove it (un-vote).
    Remove,
}

/// Decide the mutation for one voter casting `requested`.
///
/// This single function backs both vote endpoints; they differ only in
/// the `requested` argument. Branch order matches the transition table:
/// same polarity → remove, opposite → flip, none → insert.
#[must_use]
pub fn toggle(existing: Option<Polarity>, requested: Polarity) -> VoteOp {
    match existing {
        Some(current) if current == requested => VoteOp::Remove,
        Some(_) => VoteOp::Flip(requested),
        None => VoteOp::Insert(requested),
    }
}

/// The voter's resulting state after `toggle(existing, requested)`.
///
/// `None` means the voter no longer has a vote on the item.
#[must_use]
pub fn next_state(existing: Option<Polarity>, requested: Polarity) -> Option<Polarity> {
    match toggle(existing, requested) {
        VoteOp::Remove => None,
        VoteOp::Flip(polarity) | VoteOp::Insert(polarity) => Some(polarity),
    }
}

/// Recompute aggregate (up, down) counts from the current vote set.
///
/// Counters are derived by counting the set, never patched incrementally.
#[must_use]
pub fn tally<I>(votes: I) -> (u64, u64)
where
    I: IntoIterator<Item = Polarity>,
{
    let mut up = 0;
    let mut down = 0;
    for vote in votes {
        match vote {
            Polarity::Up => up += 1,
            Polarity::Down => down += 1,
        }
    }
    (up, down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_toggle_no_vote_inserts() {
        assert_eq!(toggle(None, Polarity::Up), VoteOp::Insert(Polarity::Up));
        assert_eq!(toggle(None, Polarity::Down), VoteOp::Insert(Polarity::Down));
    }

    #[test]
    fn test_toggle_same_polarity_removes() {
        assert_eq!(toggle(Some(Polarity::Up), Polarity::Up), VoteOp::Remove);
        assert_eq!(toggle(Some(Polarity::Down), Polarity::Down), VoteOp::Remove);
    }

    #[test]
    fn test_toggle_opposite_polarity_flips() {
        assert_eq!(
            toggle(Some(Polarity::Up), Polarity::Down),
            VoteOp::Flip(Polarity::Down)
        );
        assert_eq!(
            toggle(Some(Polarity::Down), Polarity::Up),
            VoteOp::Flip(Polarity::Up)
        );
    }

    #[test]
    fn test_double_toggle_removes_vote() {
        // up then up again lands back on no vote
        let after_first = next_state(None, Polarity::Up);
        assert_eq!(after_first, Some(Polarity::Up));
        let after_second = next_state(after_first, Polarity::Up);
        assert_eq!(after_second, None);
    }

    #[test]
    fn test_flip_preserves_set_size() {
        // Simulate the vote set of one item across a flip.
        let voter = "voter-a";
        let mut set: HashMap<&str, Polarity> = HashMap::new();

        apply(&mut set, voter, Polarity::Up);
        assert_eq!(set.len(), 1);

        apply(&mut set, voter, Polarity::Down);
        assert_eq!(set.len(), 1, "flip must not add or remove entries");
        assert_eq!(set.get(voter), Some(&Polarity::Down));
    }

    #[test]
    fn test_tally_counts_match_set() {
        let votes = [Polarity::Up, Polarity::Down, Polarity::Up, Polarity::Up];
        let (up, down) = tally(votes);
        assert_eq!(up, 3);
        assert_eq!(down, 1);
        assert_eq!((up + down) as usize, 4);
    }

    #[test]
    fn test_tally_empty() {
        assert_eq!(tally(std::iter::empty()), (0, 0));
    }

    #[test]
    fn test_scenario_single_voter_sequence() {
        // voter A: upvote, upvote again, downvote
        let mut set: HashMap<&str, Polarity> = HashMap::new();

        apply(&mut set, "a", Polarity::Up);
        assert_eq!(tally(set.values().copied()), (1, 0));

        apply(&mut set, "a", Polarity::Up);
        assert_eq!(tally(set.values().copied()), (0, 0));
        assert!(!set.contains_key("a"));

        apply(&mut set, "a", Polarity::Down);
        assert_eq!(tally(set.values().copied()), (0, 1));

        // voter B joins with an upvote
        apply(&mut set, "b", Polarity::Up);
        assert_eq!(tally(set.values().copied()), (1, 1));
        assert_eq!(set.get("b"), Some(&Polarity::Up));
    }

    #[test]
    fn test_up_plus_down_equals_distinct_voters() {
        let mut set: HashMap<u32, Polarity> = HashMap::new();
        for voter in 0..7u32 {
            let polarity = if voter % 2 == 0 { Polarity::Up } else { Polarity::Down };
            apply(&mut set, voter, polarity);
        }
        let (up, down) = tally(set.values().copied());
        assert_eq!((up + down) as usize, set.len());
    }

    #[test]
    fn test_polarity_flipped() {
        assert_eq!(Polarity::Up.flipped(), Polarity::Down);
        assert_eq!(Polarity::Down.flipped(), Polarity::Up);
    }

    #[test]
    fn test_polarity_parse_and_display() {
        assert_eq!("up".parse::<Polarity>().unwrap(), Polarity::Up);
        assert_eq!("down".parse::<Polarity>().unwrap(), Polarity::Down);
        assert!("sideways".parse::<Polarity>().is_err());
        assert_eq!(Polarity::Up.to_string(), "up");
        assert_eq!(Polarity::Down.to_string(), "down");
    }

    #[test]
    fn test_polarity_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Polarity::Up).unwrap(), "\"up\"");
        let parsed: Polarity = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, Polarity::Down);
    }

    /// Apply one toggle to a map-backed vote set, as the store does to rows.
    fn apply<K: std::hash::Hash + Eq>(set: &mut HashMap<K, Polarity>, voter: K, requested: Polarity) {
        let existing = set.get(&voter).copied();
        match toggle(existing, requested) {
            VoteOp::Remove => {
                set.remove(&voter);
            }
            VoteOp::Flip(polarity) | VoteOp::Insert(polarity) => {
                set.insert(voter, polarity);
            }
        }
    }
}
