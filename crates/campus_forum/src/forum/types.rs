//! Core type definitions: IDs, constants, and the action vocabulary.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Type Aliases
// ============================================================================

pub type AccountId = String;
pub type PostId = u64;
pub type CommentId = u64;
pub type EventId = u64;
pub type Timestamp = i64;
pub type ForumEventId = u64;
pub type ActionId = u64;

// ============================================================================
// Constants
// ============================================================================

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MIN_CREDENTIAL_CHARS: usize = 4;
pub const PROMOTION_VOTE_THRESHOLD: u32 = 3;
pub const DELETION_VOTE_THRESHOLD: u32 = 5;
pub const SNAPSHOT_VERSION: u32 = 1;
pub const JOURNAL_VERSION: u32 = 1;

/// Opaque digest stored in place of the raw credential.
pub fn credential_digest(credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    hex::encode(hasher.finalize())
}

// ============================================================================
// Balance Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    NegativeAmount { amount: i64 },
    Insufficient { requested: i64, available: i64 },
}

// ============================================================================
// Action Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub id: ActionId,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Action {
    RegisterAccount {
        account_id: AccountId,
        username: String,
        credential: String,
    },
    Login {
        username: String,
        credential: String,
    },
    Logout,
    CreatePost {
        author: AccountId,
        title: String,
        body: String,
        category: String,
    },
    AddComment {
        author: AccountId,
        post_id: PostId,
        body: String,
    },
    DownvotePost {
        voter: AccountId,
        post_id: PostId,
    },
    TipPost {
        payer: AccountId,
        post_id: PostId,
        amount: i64,
    },
    VotePromotion {
        voter: AccountId,
        post_id: PostId,
    },
    VoteDeletion {
        voter: AccountId,
        post_id: PostId,
    },
    CreateEvent {
        creator: AccountId,
        title: String,
        description: String,
    },
    VoteOnEvent {
        voter: AccountId,
        event_id: EventId,
        amount: i64,
        support: bool,
    },
    SendFriendRequest {
        requester: AccountId,
        target: AccountId,
    },
    AcceptFriendRequest {
        target: AccountId,
        requester: AccountId,
    },
    RejectFriendRequest {
        target: AccountId,
        requester: AccountId,
    },
}
