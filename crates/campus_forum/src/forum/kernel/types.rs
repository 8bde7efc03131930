use serde::{Deserialize, Serialize};

use super::super::model::{Account, CampusEvent, Comment, Post};
use super::super::types::{AccountId, EventId, ForumEventId, PostId, Timestamp};

// ============================================================================
// Event Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumEvent {
    pub id: ForumEventId,
    pub time: Timestamp,
    pub kind: ForumEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ForumEventKind {
    AccountRegistered {
        account: Account,
    },
    SessionStarted {
        account_id: AccountId,
    },
    SessionEnded {
        account_id: AccountId,
    },
    PostCreated {
        post: Post,
    },
    CommentAdded {
        post_id: PostId,
        comment: Comment,
        fee: i64,
    },
    PostDownvoted {
        voter: AccountId,
        post_id: PostId,
        downvotes: u32,
        fee: i64,
    },
    PostTipped {
        payer: AccountId,
        author: AccountId,
        post_id: PostId,
        amount: i64,
    },
    PromotionVoteCast {
        voter: AccountId,
        post_id: PostId,
        promotion_votes: u32,
        promoted: bool,
        fee: i64,
    },
    DeletionVoteCast {
        voter: AccountId,
        post_id: PostId,
        deletion_votes: u32,
        deleted: bool,
        fee: i64,
    },
    EventCreated {
        event: CampusEvent,
    },
    EventVoteCast {
        voter: AccountId,
        event_id: EventId,
        amount: i64,
        support: bool,
        total_stake: i64,
    },
    FriendRequestSent {
        requester: AccountId,
        target: AccountId,
    },
    FriendRequestAccepted {
        requester: AccountId,
        target: AccountId,
    },
    FriendRequestRejected {
        requester: AccountId,
        target: AccountId,
    },
    ActionRejected {
        reason: RejectReason,
    },
}

// ============================================================================
// Reject Reasons
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RejectReason {
    AccountAlreadyExists {
        account_id: AccountId,
    },
    UsernameTaken {
        username: String,
    },
    AccountNotFound {
        account_id: AccountId,
    },
    UnknownUsername {
        username: String,
    },
    CredentialMismatch {
        username: String,
    },
    CredentialTooShort {
        min_chars: usize,
    },
    NoActiveSession,
    PostNotFound {
        post_id: PostId,
    },
    EventNotFound {
        event_id: EventId,
    },
    EmptyField {
        field: String,
    },
    InvalidAmount {
        amount: i64,
    },
    InsufficientBalance {
        account_id: AccountId,
        requested: i64,
        available: i64,
    },
    SelfActionNotAllowed {
        account_id: AccountId,
        post_id: PostId,
    },
    SelfFriendRequest {
        account_id: AccountId,
    },
    AlreadyFriends {
        account_id: AccountId,
        other: AccountId,
    },
    FriendRequestAlreadyPending {
        requester: AccountId,
        target: AccountId,
    },
    FriendRequestNotFound {
        requester: AccountId,
        target: AccountId,
    },
}
