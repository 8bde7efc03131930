//! Forum entities (Account, Post, CampusEvent) and the ForumModel container.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::types::{
    AccountId, BalanceError, CommentId, EventId, PostId, Timestamp,
};

const DEFAULT_INITIAL_BALANCE: i64 = 1_000;
const DEFAULT_POST_GAS_FEE: i64 = 10;
const DEFAULT_COMMENT_GAS_FEE: i64 = 3;
const DEFAULT_DOWNVOTE_GAS_FEE: i64 = 5;
const DEFAULT_PROMOTE_VOTE_GAS_FEE: i64 = 15;
const DEFAULT_DELETE_VOTE_GAS_FEE: i64 = 20;

pub(crate) fn default_next_entity_id() -> u64 {
    1
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub credential: String,
    pub balance: i64,
    pub gas_spent: i64,
    pub reputation: i64,
    #[serde(default)]
    pub friends: BTreeSet<AccountId>,
    #[serde(default)]
    pub friend_requests: BTreeSet<AccountId>,
}

impl Account {
    pub fn new(
        id: AccountId,
        username: String,
        credential: String,
        initial_balance: i64,
    ) -> Self {
        Self {
            id,
            username,
            credential,
            balance: initial_balance.max(0),
            gas_spent: 0,
            reputation: 0,
            friends: BTreeSet::new(),
            friend_requests: BTreeSet::new(),
        }
    }

    pub fn credit(&mut self, amount: i64) -> Result<(), BalanceError> {
        if amount < 0 {
            return Err(BalanceError::NegativeAmount { amount });
        }
        self.balance = self.balance.saturating_add(amount);
        Ok(())
    }

    pub fn debit(&mut self, amount: i64) -> Result<(), BalanceError> {
        if amount < 0 {
            return Err(BalanceError::NegativeAmount { amount });
        }
        if self.balance < amount {
            return Err(BalanceError::Insufficient {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

// ============================================================================
// Posts and Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: AccountId,
    pub title: String,
    pub body: String,
    pub category: String,
    pub created_at: Timestamp,
    pub tips: i64,
    pub downvotes: u32,
    pub gas_spent: i64,
    pub comments: Vec<Comment>,
    pub promotion_votes: u32,
    pub deletion_votes: u32,
    pub promoted: bool,
}

impl Post {
    pub fn new(
        id: PostId,
        author: AccountId,
        title: String,
        body: String,
        category: String,
        created_at: Timestamp,
        gas_spent: i64,
    ) -> Self {
        Self {
            id,
            author,
            title,
            body,
            category,
            created_at,
            tips: 0,
            downvotes: 0,
            gas_spent,
            comments: Vec::new(),
            promotion_votes: 0,
            deletion_votes: 0,
            promoted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: AccountId,
    pub post_id: PostId,
    pub body: String,
    pub created_at: Timestamp,
    pub tips: i64,
}

// ============================================================================
// Campus Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventVote {
    pub voter: AccountId,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusEvent {
    pub id: EventId,
    pub creator: AccountId,
    pub title: String,
    pub description: String,
    pub created_at: Timestamp,
    pub total_stake: i64,
    pub supporters: Vec<EventVote>,
    pub opposers: Vec<EventVote>,
}

impl CampusEvent {
    pub fn new(
        id: EventId,
        creator: AccountId,
        title: String,
        description: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            creator,
            title,
            description,
            created_at,
            total_stake: 0,
            supporters: Vec::new(),
            opposers: Vec::new(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub current_user: Option<AccountId>,
    pub current_admin: Option<AccountId>,
}

// ============================================================================
// Model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumModel {
    pub accounts: BTreeMap<AccountId, Account>,
    pub posts: BTreeMap<PostId, Post>,
    pub events: BTreeMap<EventId, CampusEvent>,
    #[serde(default)]
    pub session: SessionState,
    #[serde(default = "default_next_entity_id")]
    pub next_post_id: u64,
    #[serde(default = "default_next_entity_id")]
    pub next_comment_id: u64,
    #[serde(default = "default_next_entity_id")]
    pub next_campus_event_id: u64,
}

impl Default for ForumModel {
    fn default() -> Self {
        Self {
            accounts: BTreeMap::new(),
            posts: BTreeMap::new(),
            events: BTreeMap::new(),
            session: SessionState::default(),
            next_post_id: default_next_entity_id(),
            next_comment_id: default_next_entity_id(),
            next_campus_event_id: default_next_entity_id(),
        }
    }
}

impl ForumModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|account| account.username == username)
    }

    /// Sum of all liquid account balances; fees shrink it, tips preserve it.
    pub fn total_balance(&self) -> i64 {
        self.accounts
            .values()
            .fold(0, |sum, account| sum.saturating_add(account.balance))
    }
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub initial_balance: i64,
    pub post_gas_fee: i64,
    pub comment_gas_fee: i64,
    pub downvote_gas_fee: i64,
    pub promote_vote_gas_fee: i64,
    pub delete_vote_gas_fee: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            post_gas_fee: DEFAULT_POST_GAS_FEE,
            comment_gas_fee: DEFAULT_COMMENT_GAS_FEE,
            downvote_gas_fee: DEFAULT_DOWNVOTE_GAS_FEE,
            promote_vote_gas_fee: DEFAULT_PROMOTE_VOTE_GAS_FEE,
            delete_vote_gas_fee: DEFAULT_DELETE_VOTE_GAS_FEE,
        }
    }
}

impl EconomyConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            initial_balance: self.initial_balance.max(0),
            post_gas_fee: self.post_gas_fee.max(0),
            comment_gas_fee: self.comment_gas_fee.max(0),
            downvote_gas_fee: self.downvote_gas_fee.max(0),
            promote_vote_gas_fee: self.promote_vote_gas_fee.max(0),
            delete_vote_gas_fee: self.delete_vote_gas_fee.max(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForumConfig {
    pub economy: EconomyConfig,
}

impl ForumConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            economy: self.economy.sanitized(),
        }
    }
}
