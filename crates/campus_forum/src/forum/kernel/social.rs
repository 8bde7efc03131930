//! Friend requests and friendship state.

use super::super::types::AccountId;
use super::types::{ForumEventKind, RejectReason};
use super::ForumKernel;

impl ForumKernel {
    pub(super) fn apply_send_friend_request(
        &mut self,
        requester: AccountId,
        target: AccountId,
    ) -> ForumEventKind {
        if requester == target {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::SelfFriendRequest {
                    account_id: requester,
                },
            };
        }
        if !self.model.accounts.contains_key(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound {
                    account_id: requester,
                },
            };
        }
        let Some(target_account) = self.model.accounts.get(&target) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { account_id: target },
            };
        };
        if target_account.friends.contains(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AlreadyFriends {
                    account_id: requester,
                    other: target,
                },
            };
        }
        if target_account.friend_requests.contains(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::FriendRequestAlreadyPending { requester, target },
            };
        }

        let Some(target_account) = self.model.accounts.get_mut(&target) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { account_id: target },
            };
        };
        target_account.friend_requests.insert(requester.clone());
        ForumEventKind::FriendRequestSent { requester, target }
    }

    pub(super) fn apply_accept_friend_request(
        &mut self,
        target: AccountId,
        requester: AccountId,
    ) -> ForumEventKind {
        if !self.model.accounts.contains_key(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound {
                    account_id: requester,
                },
            };
        }
        let Some(target_account) = self.model.accounts.get(&target) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { account_id: target },
            };
        };
        if !target_account.friend_requests.contains(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::FriendRequestNotFound { requester, target },
            };
        }

        // Friendship is symmetric: both sides record the other.
        if let Some(target_account) = self.model.accounts.get_mut(&target) {
            target_account.friend_requests.remove(&requester);
            target_account.friends.insert(requester.clone());
        }
        if let Some(requester_account) = self.model.accounts.get_mut(&requester) {
            requester_account.friends.insert(target.clone());
        }
        ForumEventKind::FriendRequestAccepted { requester, target }
    }

    pub(super) fn apply_reject_friend_request(
        &mut self,
        target: AccountId,
        requester: AccountId,
    ) -> ForumEventKind {
        let Some(target_account) = self.model.accounts.get_mut(&target) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { account_id: target },
            };
        };
        if !target_account.friend_requests.remove(&requester) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::FriendRequestNotFound { requester, target },
            };
        }
        ForumEventKind::FriendRequestRejected { requester, target }
    }
}
