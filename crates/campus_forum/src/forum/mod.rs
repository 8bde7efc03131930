//! Campus forum ledger - accounts, gas-fee actions, tipping, and ranking.
//!
//! This module is organized into submodules:
//! - `types`: Core type definitions (IDs, constants, actions)
//! - `model`: Forum entities (Account, Post, CampusEvent, ForumModel)
//! - `kernel`: ForumKernel implementation (time, events, actions)
//! - `ranking`: Popularity score and display ordering
//! - `persist`: Snapshot, Journal, and persistence utilities

mod kernel;
mod model;
mod persist;
mod ranking;
mod types;

#[cfg(test)]
mod tests;

pub use kernel::{ForumEvent, ForumEventKind, ForumKernel, RejectReason};
pub use model::{
    Account, CampusEvent, Comment, EconomyConfig, EventVote, ForumConfig, ForumModel, Post,
    SessionState,
};
pub use persist::{ForumJournal, ForumSnapshot, PersistError};
pub use ranking::{
    popularity_score, ranked_posts, AGE_DECAY_PER_HOUR, DOWNVOTE_SCORE_WEIGHT, SCORE_TIE_BAND,
    TIP_SCORE_WEIGHT,
};
pub use types::{
    credential_digest, Action, ActionEnvelope, ActionId, AccountId, BalanceError, CommentId,
    EventId, ForumEventId, PostId, Timestamp, DELETION_VOTE_THRESHOLD, JOURNAL_VERSION,
    MIN_CREDENTIAL_CHARS, MS_PER_HOUR, PROMOTION_VOTE_THRESHOLD, SNAPSHOT_VERSION,
};
