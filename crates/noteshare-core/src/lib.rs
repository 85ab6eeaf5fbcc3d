//! noteshare-core: domain logic for the noteshare platform
//!
//! This crate provides the pure, I/O-free pieces of the system:
//! - The vote ledger state machine (per-voter toggle and count recompute)
//! - Quiz question types and server-side attempt scoring
//!
//! Everything here is deterministic and synchronous; persistence and HTTP
//! concerns live in `noteshare-store` and `noteshare-server`.

pub mod quiz;
pub mod vote;

pub use quiz::{Choice, Options, Question, max_score, score_attempt};
pub use vote::{ParsePolarityError, Polarity, VoteOp, next_state, tally, toggle};
