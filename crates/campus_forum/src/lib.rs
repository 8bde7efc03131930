pub mod forum;

pub use forum::{
    credential_digest, popularity_score, ranked_posts, Account, Action, ActionEnvelope, ActionId,
    AccountId, BalanceError, CampusEvent, Comment, CommentId, EconomyConfig, EventId, EventVote,
    ForumConfig, ForumEvent, ForumEventId, ForumEventKind, ForumJournal, ForumKernel, ForumModel,
    ForumSnapshot, PersistError, Post, PostId, RejectReason, SessionState, Timestamp,
    DELETION_VOTE_THRESHOLD, JOURNAL_VERSION, MIN_CREDENTIAL_CHARS, MS_PER_HOUR,
    PROMOTION_VOTE_THRESHOLD, SNAPSHOT_VERSION,
};
